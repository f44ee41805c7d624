use crate::core::models::atom::AtomRecord;
use crate::core::models::fragment::ResidueClass;
use crate::core::utils::identifiers::is_water_or_ion;
use std::collections::{HashMap, HashSet};

pub const ALPHA_CARBON: &str = "CA";
pub const BACKBONE_CARBON: &str = "C";

/// A capped residue's correlation data, captured on first sight in the shell
/// source.
#[derive(Debug, Clone, PartialEq)]
pub struct CappedResidue {
    pub residue_number: String,
    pub residue_name: String,
    /// Verbatim x/y/z tokens of the residue's first-seen atom; used to locate
    /// the same atom in the reference source.
    pub anchor_raw: [String; 3],
    /// Verbatim x token of the residue's alpha carbon, if one was seen.
    /// A residue without one is never capped.
    pub ca_x: Option<String>,
    /// Verbatim x token of the residue's backbone carbon, if one was seen.
    pub c_x: Option<String>,
}

/// The classifier's output: per-residue classes plus the first-seen-ordered
/// indexes that drive fragment creation and capping.
#[derive(Debug, Default)]
pub struct ShellIndex {
    classes: HashMap<String, ResidueClass>,
    /// Ligand residue numbers, first-seen order.
    pub ligands: Vec<String>,
    /// Capped residues, first-seen order.
    pub capped: Vec<CappedResidue>,
    capped_slots: HashMap<String, usize>,
}

impl ShellIndex {
    pub fn class_of(&self, residue_number: &str) -> Option<ResidueClass> {
        self.classes.get(residue_number).copied()
    }
}

/// Single pass over the shell source. Each residue is classified exactly once
/// from its name: water/ion tokens always qualify; ligand names qualify only
/// when ligand output is enabled; excluded names (and disabled ligands)
/// contribute nothing; everything else is an amino-acid-like residue that
/// will be capped. For capped residues the pass also records the verbatim
/// x tokens of the CA and backbone-C atoms, which drive both capping
/// procedures.
pub fn classify(
    records: &[AtomRecord],
    ligand_names: &HashSet<String>,
    excluded_names: &HashSet<String>,
    include_ligands: bool,
) -> ShellIndex {
    let mut index = ShellIndex::default();

    for record in records {
        let residue_number = record.residue_number.as_str();

        if !index.classes.contains_key(residue_number) {
            let class = if is_water_or_ion(&record.residue_name) {
                ResidueClass::WaterOrIon
            } else if ligand_names.contains(&record.residue_name) {
                if include_ligands {
                    ResidueClass::Ligand
                } else {
                    ResidueClass::Excluded
                }
            } else if excluded_names.contains(&record.residue_name) {
                ResidueClass::Excluded
            } else {
                ResidueClass::Capped
            };

            index.classes.insert(residue_number.to_string(), class);
            match class {
                ResidueClass::Ligand => index.ligands.push(residue_number.to_string()),
                ResidueClass::Capped => {
                    index
                        .capped_slots
                        .insert(residue_number.to_string(), index.capped.len());
                    index.capped.push(CappedResidue {
                        residue_number: residue_number.to_string(),
                        residue_name: record.residue_name.clone(),
                        anchor_raw: record.raw_coords.clone(),
                        ca_x: None,
                        c_x: None,
                    });
                }
                _ => {}
            }
        }

        if let Some(&slot) = index.capped_slots.get(residue_number) {
            let capped = &mut index.capped[slot];
            if record.atom_name == ALPHA_CARBON && capped.ca_x.is_none() {
                capped.ca_x = Some(record.raw_coords[0].clone());
            }
            if record.atom_name == BACKBONE_CARBON && capped.c_x.is_none() {
                capped.c_x = Some(record.raw_coords[0].clone());
            }
        }
    }

    index
}
