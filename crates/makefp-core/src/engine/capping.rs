use super::classify::{ALPHA_CARBON, BACKBONE_CARBON, CappedResidue};
use super::error::EngineError;
use crate::core::models::atom::{AtomRecord, CoordKey};
use crate::core::utils::identifiers::is_water_or_ion;
use crate::core::utils::units::nm_to_angstrom;
use nalgebra::Point3;
use std::collections::HashSet;

/// Canonical cap-bond length in angstroms. Both synthetic hydrogens sit at
/// this distance from their anchor atom, approximating the methyl-like
/// terminus that replaces the severed amide bond.
pub const CAP_BOND_LENGTH: f64 = 1.07886;

/// Label the cap hydrogens carry in the output card.
pub const CAP_HYDROGEN_LABEL: &str = "H000";

const BACKBONE_OXYGEN: &str = "O";

/// The four atoms appended to a capped fragment, in emission order, plus the
/// coordinate keys the from-above scan consumed from the reference source.
/// Positions are in angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct CapAtoms {
    pub backbone_carbon: Point3<f64>,
    pub backbone_oxygen: Point3<f64>,
    pub hydrogen_above: Point3<f64>,
    pub hydrogen_below: Point3<f64>,
    pub consumed_keys: Vec<CoordKey>,
}

/// Reconstructs both caps for one residue.
///
/// The cap "from above" replaces the connection toward the preceding residue:
/// starting just past the residue's anchor line in the reference source, the
/// scan walks backward for the nearest preceding backbone O (skipping
/// water/ion and ligand residues), backbone C, and CA; the cap hydrogen sits
/// at [`CAP_BOND_LENGTH`] from that C along C→CA, and the found C and O are
/// emitted with it. The cap "from below" replaces the connection toward the
/// following residue: the residue's own CA and backbone C are located in the
/// shell source by their recorded x tokens, and a second hydrogen sits at
/// [`CAP_BOND_LENGTH`] from CA along CA→C.
///
/// Any exhausted scan or failed cross-source correlation is an error; capping
/// must never fall back to stale positions.
pub fn build_caps(
    residue: &CappedResidue,
    shell: &[AtomRecord],
    reference: &[AtomRecord],
    ligand_names: &HashSet<String>,
) -> Result<CapAtoms, EngineError> {
    let (carbon, oxygen, alpha) = scan_above(residue, reference, ligand_names)?;

    let p_c = nm_to_angstrom(carbon.position);
    let p_o = nm_to_angstrom(oxygen.position);
    let p_ca = nm_to_angstrom(alpha.position);
    let hydrogen_above = place_cap(p_c, p_ca);

    let (shell_ca, shell_c) = locate_below(residue, shell)?;
    let hydrogen_below = place_cap(
        nm_to_angstrom(shell_ca.position),
        nm_to_angstrom(shell_c.position),
    );

    Ok(CapAtoms {
        backbone_carbon: p_c,
        backbone_oxygen: p_o,
        hydrogen_above,
        hydrogen_below,
        consumed_keys: vec![oxygen.coord_key(), carbon.coord_key()],
    })
}

/// Places a hydrogen at the canonical bond length from `anchor` along the
/// direction toward `toward`.
fn place_cap(anchor: Point3<f64>, toward: Point3<f64>) -> Point3<f64> {
    let direction = (toward - anchor).normalize();
    anchor + direction * CAP_BOND_LENGTH
}

fn scan_above<'a>(
    residue: &CappedResidue,
    reference: &'a [AtomRecord],
    ligand_names: &HashSet<String>,
) -> Result<(&'a AtomRecord, &'a AtomRecord, &'a AtomRecord), EngineError> {
    let anchor_idx = reference
        .iter()
        .position(|r| r.raw_coords == residue.anchor_raw)
        .ok_or_else(|| EngineError::AnchorNotFound {
            residue_number: residue.residue_number.clone(),
        })?;

    // The scan opens on the line after the anchor, clamped to the last record.
    let start = (anchor_idx + 1).min(reference.len() - 1);

    let mut oxygen = None;
    let mut carbon = None;
    let mut alpha = None;
    for record in reference[..=start].iter().rev() {
        if oxygen.is_none()
            && record.atom_name == BACKBONE_OXYGEN
            && !is_water_or_ion(&record.residue_name)
            && !ligand_names.contains(&record.residue_name)
        {
            oxygen = Some(record);
        }
        if carbon.is_none() && record.atom_name == BACKBONE_CARBON {
            carbon = Some(record);
        }
        if alpha.is_none() && record.atom_name == ALPHA_CARBON {
            alpha = Some(record);
        }
        if oxygen.is_some() && carbon.is_some() && alpha.is_some() {
            break;
        }
    }

    let missing = |atom_name| EngineError::MissingBackboneAtom {
        residue_number: residue.residue_number.clone(),
        atom_name,
    };
    Ok((
        carbon.ok_or_else(|| missing(BACKBONE_CARBON))?,
        oxygen.ok_or_else(|| missing(BACKBONE_OXYGEN))?,
        alpha.ok_or_else(|| missing(ALPHA_CARBON))?,
    ))
}

fn locate_below<'a>(
    residue: &CappedResidue,
    shell: &'a [AtomRecord],
) -> Result<(&'a AtomRecord, &'a AtomRecord), EngineError> {
    let missing = |atom_name| EngineError::MissingBackboneAtom {
        residue_number: residue.residue_number.clone(),
        atom_name,
    };

    let find = |x_token: &str, atom_name: &'static str| {
        shell
            .iter()
            .find(|r| r.residue_number == residue.residue_number && r.raw_coords[0] == x_token)
            .ok_or_else(|| missing(atom_name))
    };

    let ca_x = residue.ca_x.as_deref().ok_or_else(|| missing(ALPHA_CARBON))?;
    let c_x = residue.c_x.as_deref().ok_or_else(|| missing(BACKBONE_CARBON))?;
    Ok((find(ca_x, ALPHA_CARBON)?, find(c_x, BACKBONE_CARBON)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn record(residue_number: &str, residue_name: &str, atom_name: &str, p: [f64; 3]) -> AtomRecord {
        AtomRecord {
            residue_number: residue_number.to_string(),
            residue_name: residue_name.to_string(),
            atom_name: atom_name.to_string(),
            type_id: "opls_000".to_string(),
            position: Point3::new(p[0], p[1], p[2]),
            raw_coords: [
                format!("{:.3}", p[0]),
                format!("{:.3}", p[1]),
                format!("{:.3}", p[2]),
            ],
        }
    }

    fn reference() -> Vec<AtomRecord> {
        vec![
            record("1", "ALA", "N", [0.1, 0.2, 0.3]),
            record("1", "ALA", "CA", [0.2, 0.3, 0.4]),
            record("1", "ALA", "C", [0.3, 0.4, 0.5]),
            record("1", "ALA", "O", [0.4, 0.5, 0.6]),
            record("2", "ALA", "N", [0.5, 0.6, 0.7]),
            record("2", "ALA", "H", [0.51, 0.61, 0.71]),
            record("2", "ALA", "CA", [0.6, 0.7, 0.8]),
            record("2", "ALA", "C", [0.7, 0.8, 0.9]),
            record("2", "ALA", "O", [0.8, 0.9, 1.0]),
        ]
    }

    fn shell() -> Vec<AtomRecord> {
        vec![
            record("2", "ALA", "N", [0.5, 0.6, 0.7]),
            record("2", "ALA", "H", [0.51, 0.61, 0.71]),
            record("2", "ALA", "CA", [0.6, 0.7, 0.8]),
            record("2", "ALA", "C", [0.7, 0.8, 0.9]),
            record("2", "ALA", "O", [0.8, 0.9, 1.0]),
        ]
    }

    fn residue_two() -> CappedResidue {
        CappedResidue {
            residue_number: "2".to_string(),
            residue_name: "ALA".to_string(),
            anchor_raw: [
                "0.500".to_string(),
                "0.600".to_string(),
                "0.700".to_string(),
            ],
            ca_x: Some("0.600".to_string()),
            c_x: Some("0.700".to_string()),
        }
    }

    fn distance(a: Point3<f64>, b: Point3<f64>) -> f64 {
        (a - b).norm()
    }

    #[test]
    fn caps_sit_at_the_canonical_bond_length_from_their_anchors() {
        let caps = build_caps(&residue_two(), &shell(), &reference(), &HashSet::new()).unwrap();

        let above = distance(caps.hydrogen_above, caps.backbone_carbon);
        assert!((above - CAP_BOND_LENGTH).abs() < 1e-12);

        let shell_ca = Point3::new(6.0, 7.0, 8.0);
        let below = distance(caps.hydrogen_below, shell_ca);
        assert!((below - CAP_BOND_LENGTH).abs() < 1e-12);
    }

    #[test]
    fn from_above_picks_the_preceding_residues_backbone() {
        let caps = build_caps(&residue_two(), &shell(), &reference(), &HashSet::new()).unwrap();
        // The nearest preceding C/O scanning backward belong to residue 1.
        assert_eq!(caps.backbone_carbon, Point3::new(3.0, 4.0, 5.0));
        assert_eq!(caps.backbone_oxygen, Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn hydrogen_above_lies_on_the_c_to_ca_line() {
        let caps = build_caps(&residue_two(), &shell(), &reference(), &HashSet::new()).unwrap();
        let p_c = Point3::new(3.0, 4.0, 5.0);
        let p_ca = Point3::new(2.0, 3.0, 4.0);
        let expected = p_c + (p_ca - p_c).normalize() * CAP_BOND_LENGTH;
        assert!(distance(caps.hydrogen_above, expected) < 1e-12);
    }

    #[test]
    fn consumed_keys_cover_the_emitted_carbon_and_oxygen() {
        let caps = build_caps(&residue_two(), &shell(), &reference(), &HashSet::new()).unwrap();
        assert_eq!(
            caps.consumed_keys,
            vec![
                CoordKey("0.400".to_string()),
                CoordKey("0.300".to_string()),
            ]
        );
    }

    #[test]
    fn water_and_ligand_oxygens_are_skipped_in_the_backward_scan() {
        let mut reference = reference();
        // Drop residue 1's O and put a water O right before residue 2 instead.
        reference.remove(3);
        reference.insert(3, record("7", "SOL", "O", [0.45, 0.55, 0.65]));

        let err =
            build_caps(&residue_two(), &shell(), &reference, &HashSet::new()).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingBackboneAtom {
                residue_number: "2".to_string(),
                atom_name: "O",
            }
        );
    }

    #[test]
    fn exhausted_scan_is_a_missing_backbone_atom_error() {
        // Residue 2 opens the reference source; nothing precedes it.
        let reference: Vec<AtomRecord> = reference()[4..].to_vec();
        let err =
            build_caps(&residue_two(), &shell(), &reference, &HashSet::new()).unwrap_err();
        assert!(matches!(err, EngineError::MissingBackboneAtom { .. }));
    }

    #[test]
    fn unmatched_anchor_coordinates_are_an_anchor_error() {
        let mut residue = residue_two();
        residue.anchor_raw = ["9.999".to_string(), "9.999".to_string(), "9.999".to_string()];
        let err = build_caps(&residue, &shell(), &reference(), &HashSet::new()).unwrap_err();
        assert_eq!(
            err,
            EngineError::AnchorNotFound {
                residue_number: "2".to_string(),
            }
        );
    }

    #[test]
    fn missing_backbone_carbon_token_fails_the_below_cap() {
        let mut residue = residue_two();
        residue.c_x = None;
        let err = build_caps(&residue, &shell(), &reference(), &HashSet::new()).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingBackboneAtom {
                residue_number: "2".to_string(),
                atom_name: "C",
            }
        );
    }
}
