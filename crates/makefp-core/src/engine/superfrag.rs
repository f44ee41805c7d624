use crate::core::models::atom::{AtomRecord, ConsumedAtomSet};
use crate::core::models::charge::{ChargeSite, ChargeTable, Superfragment};
use crate::core::utils::identifiers::{is_chloride, is_link_atom, is_water_or_ion};
use crate::core::utils::units::{angstrom_to_bohr, nm_to_angstrom};
use tracing::warn;

/// Fixed monopoles for water sites that have no charge-table entry.
const WATER_OXYGEN_CHARGE: f64 = -0.834;
const WATER_HYDROGEN_CHARGE: f64 = 0.417;
const CHLORIDE_CHARGE: f64 = -1.000;

/// Reduces every reference atom not consumed by a fragment (and not a link
/// atom) to an embedding site: a bohr-space coordinate plus a point charge
/// picked by priority — the charge table by type id first, then the fixed
/// water and chloride rules. Atoms matching no rule keep their coordinate and
/// screening entries but carry no monopole; they are counted so the gap is
/// observable.
pub fn assemble(
    reference: &[AtomRecord],
    charges: &ChargeTable,
    consumed: &ConsumedAtomSet,
) -> Superfragment {
    let mut sites = Vec::new();
    let mut unassigned_monopoles = 0;

    for record in reference {
        if consumed.contains(&record.coord_key()) || is_link_atom(&record.atom_name) {
            continue;
        }

        let monopole = assign_monopole(record, charges);
        if monopole.is_none() {
            unassigned_monopoles += 1;
            warn!(
                residue = %record.residue_number,
                atom = %record.atom_name,
                type_id = %record.type_id,
                "no monopole rule matched; site emitted without a charge"
            );
        }

        sites.push(ChargeSite {
            label_index: sites.len(),
            position: angstrom_to_bohr(nm_to_angstrom(record.position)),
            monopole,
        });
    }

    Superfragment {
        sites,
        unassigned_monopoles,
    }
}

fn assign_monopole(record: &AtomRecord, charges: &ChargeTable) -> Option<f64> {
    if let Some(charge) = charges.get(&record.type_id) {
        return Some(charge);
    }
    if is_water_or_ion(&record.residue_name) {
        if record.atom_name.starts_with('O') {
            return Some(WATER_OXYGEN_CHARGE);
        }
        if record.atom_name.starts_with('H') {
            return Some(WATER_HYDROGEN_CHARGE);
        }
    }
    if is_chloride(&record.residue_name) {
        return Some(CHLORIDE_CHARGE);
    }
    None
}
