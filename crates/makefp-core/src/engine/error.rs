use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    /// A capping scan exhausted its range without finding a required backbone
    /// neighbor. Proceeding would fabricate a geometrically invalid fragment,
    /// so this is fatal.
    #[error("Residue {residue_number}: no backbone atom '{atom_name}' found for capping")]
    MissingBackboneAtom {
        residue_number: String,
        atom_name: &'static str,
    },

    /// The residue's first-seen coordinates have no verbatim match in the
    /// reference source, so the two sources cannot be correlated.
    #[error("Residue {residue_number}: no reference record matches its first-seen coordinates")]
    AnchorNotFound { residue_number: String },
}
