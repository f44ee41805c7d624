use super::capping::{self, CAP_HYDROGEN_LABEL};
use super::classify::{BACKBONE_CARBON, ShellIndex};
use super::error::EngineError;
use crate::core::models::atom::{AtomRecord, ConsumedAtomSet};
use crate::core::models::fragment::{Fragment, ResidueClass};
use crate::core::utils::elements;
use crate::core::utils::units::nm_to_angstrom;
use std::collections::{HashMap, HashSet};
use tracing::warn;

const BACKBONE_OXYGEN: &str = "O";

/// The per-residue fragments under construction, keyed by residue number,
/// preserving first-qualification order.
#[derive(Debug, Default)]
pub struct FragmentSet {
    fragments: Vec<Fragment>,
    slots: HashMap<String, usize>,
    /// Atoms whose name prefix had no element mapping; they were consumed but
    /// contribute no line to any fragment.
    pub unmapped_atoms: usize,
}

impl FragmentSet {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    fn fragment_for(&mut self, residue_number: &str, residue_name: &str) -> &mut Fragment {
        let slot = *self.slots.entry(residue_number.to_string()).or_insert_with(|| {
            self.fragments.push(Fragment::new(residue_number, residue_name));
            self.fragments.len() - 1
        });
        &mut self.fragments[slot]
    }
}

/// Distributes shell atoms into fragments, one residue each, in file order.
///
/// Capped residues contribute all atoms except their own backbone C and O;
/// those two are severed toward the following residue and re-enter the system
/// either as the next residue's from-above cap or as superfragment charges.
/// Water/ion and ligand residues contribute every atom. Every included atom's
/// coordinate key is consumed, whether or not its element resolved.
pub fn assemble(
    shell: &[AtomRecord],
    index: &ShellIndex,
    consumed: &mut ConsumedAtomSet,
) -> FragmentSet {
    let mut set = FragmentSet::default();

    for record in shell {
        let Some(class) = index.class_of(&record.residue_number) else {
            continue;
        };
        let include = match class {
            ResidueClass::Ligand | ResidueClass::WaterOrIon => true,
            ResidueClass::Capped => {
                record.atom_name != BACKBONE_CARBON && record.atom_name != BACKBONE_OXYGEN
            }
            ResidueClass::Excluded => false,
        };
        if !include {
            continue;
        }

        consumed.consume(record.coord_key());
        match elements::resolve(&record.atom_name) {
            Some((symbol, atomic_number)) => {
                set.fragment_for(&record.residue_number, &record.residue_name).push_atom(
                    symbol,
                    atomic_number,
                    nm_to_angstrom(record.position),
                );
            }
            None => {
                set.unmapped_atoms += 1;
                warn!(
                    residue = %record.residue_number,
                    atom = %record.atom_name,
                    "no element mapping for atom name; atom dropped from fragment"
                );
            }
        }
    }

    set
}

/// Appends the four cap atoms to every capped residue that has an alpha
/// carbon, in the fixed order [backbone-C, backbone-O, cap-H-above,
/// cap-H-below], and consumes the reference-source atoms the caps absorbed.
pub fn apply_caps(
    set: &mut FragmentSet,
    index: &ShellIndex,
    shell: &[AtomRecord],
    reference: &[AtomRecord],
    ligand_names: &HashSet<String>,
    consumed: &mut ConsumedAtomSet,
) -> Result<(), EngineError> {
    for residue in index.capped.iter().filter(|r| r.ca_x.is_some()) {
        let caps = capping::build_caps(residue, shell, reference, ligand_names)?;
        for key in caps.consumed_keys {
            consumed.consume(key);
        }

        let fragment = set.fragment_for(&residue.residue_number, &residue.residue_name);
        fragment.push_atom(BACKBONE_CARBON, 6.0, caps.backbone_carbon);
        fragment.push_atom(BACKBONE_OXYGEN, 8.0, caps.backbone_oxygen);
        fragment.push_atom(CAP_HYDROGEN_LABEL, 1.0, caps.hydrogen_above);
        fragment.push_atom(CAP_HYDROGEN_LABEL, 1.0, caps.hydrogen_below);
    }
    Ok(())
}
