use nalgebra::Point3;
use std::collections::HashMap;

/// Monopole lookup table keyed by force-field charge-type id.
///
/// The first occurrence of a type id in the source wins; later duplicates are
/// ignored, matching the fixed-order semantics of the charge-type table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChargeTable {
    map: HashMap<String, f64>,
}

impl ChargeTable {
    /// Records a charge for a type id unless one was already recorded.
    pub fn insert_first(&mut self, type_id: &str, charge: f64) {
        self.map.entry(type_id.to_string()).or_insert(charge);
    }

    pub fn get(&self, type_id: &str) -> Option<f64> {
        self.map.get(type_id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One embedding site of the superfragment.
///
/// Every site emits a coordinate line and a screening line; the monopole line
/// is omitted when no charge-assignment rule matched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSite {
    /// Sequential local index, rendered as the `O{n}` site label.
    pub label_index: usize,
    /// Position in the embedding length unit (bohr).
    pub position: Point3<f64>,
    pub monopole: Option<f64>,
}

/// Aggregate point-charge representation of all atoms not placed into a
/// fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Superfragment {
    pub sites: Vec<ChargeSite>,
    /// Sites that matched no monopole rule and carry no explicit charge.
    pub unassigned_monopoles: usize,
}
