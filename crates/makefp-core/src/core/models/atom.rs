use nalgebra::Point3;
use std::collections::HashSet;

/// A single row from a whitespace-delimited coordinate source.
///
/// Records keep both the parsed position and the verbatim coordinate tokens.
/// The shell and reference sources are correlated by exact token equality,
/// which holds only while both files were printed from the same frame without
/// reformatting; carrying the raw text through makes that assumption explicit
/// instead of relying on float round-tripping.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Residue number as written in the source (kept as a string key).
    pub residue_number: String,
    /// Residue name (e.g. "ALA", "SOL", "LIG").
    pub residue_name: String,
    /// Atom name within the residue (e.g. "CA", "OW", "HW1").
    pub atom_name: String,
    /// Force-field charge-type id (fourth column of the coordinate sources).
    pub type_id: String,
    /// Position in the source length unit (nm).
    pub position: Point3<f64>,
    /// Verbatim x/y/z tokens as they appeared on the source line.
    pub raw_coords: [String; 3],
}

impl AtomRecord {
    /// The key under which this atom is tracked in the [`ConsumedAtomSet`].
    pub fn coord_key(&self) -> CoordKey {
        CoordKey(self.raw_coords[0].clone())
    }
}

/// Membership key for the consumed-atom set: the verbatim x token of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(pub String);

/// The set of atoms already placed into some fragment.
///
/// Grows monotonically while fragments are assembled and capped; queried by
/// the superfragment assembler so no atom is counted both as fragment geometry
/// and as an embedding point charge.
#[derive(Debug, Default, Clone)]
pub struct ConsumedAtomSet(HashSet<CoordKey>);

impl ConsumedAtomSet {
    pub fn consume(&mut self, key: CoordKey) {
        self.0.insert(key);
    }

    pub fn contains(&self, key: &CoordKey) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
