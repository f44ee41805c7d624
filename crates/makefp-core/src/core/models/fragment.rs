use nalgebra::Point3;

/// Classification of a residue in the shell source, computed once by the
/// classifier and consumed by every downstream stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    /// A ligand residue; becomes an un-capped fragment when ligand output is
    /// enabled.
    Ligand,
    /// A water molecule or monatomic ion; always becomes an un-capped
    /// fragment, regardless of the ligand/exclusion name lists.
    WaterOrIon,
    /// An amino-acid-like residue whose backbone was cut at the shell
    /// boundary; receives synthetic cap hydrogens.
    Capped,
    /// A residue named in the exclusion list (or a ligand while ligand output
    /// is disabled); contributes nothing to any fragment.
    Excluded,
}

/// One atom line of a fragment, with the position already converted to the
/// output length unit (angstrom).
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentAtom {
    /// Element label as written in the output card ("C", "Cl", "H000", ...).
    pub label: String,
    pub atomic_number: f64,
    pub position: Point3<f64>,
}

/// One residue's self-contained MAKEFP input unit.
///
/// Created lazily the first time a residue qualifies; atoms are appended in
/// shell-file order, with cap atoms (for capped residues) appended last.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub residue_number: String,
    pub residue_name: String,
    pub atoms: Vec<FragmentAtom>,
}

impl Fragment {
    pub fn new(residue_number: &str, residue_name: &str) -> Self {
        Self {
            residue_number: residue_number.to_string(),
            residue_name: residue_name.to_string(),
            atoms: Vec::new(),
        }
    }

    pub fn push_atom(&mut self, label: &str, atomic_number: f64, position: Point3<f64>) {
        self.atoms.push(FragmentAtom {
            label: label.to_string(),
            atomic_number,
            position,
        });
    }
}
