use phf::{Set, phf_set};
use std::path::Path;

static WATER_OR_ION_RESIDUES: Set<&'static str> = phf_set! {
    "SOL", "TP3", "QSL",
};

static CHLORIDE_RESIDUES: Set<&'static str> = phf_set! {
    "CL", "Cl-",
};

static ACIDIC_RESIDUES: Set<&'static str> = phf_set! {
    "ASP", "GLU",
};

static BASIC_RESIDUES: Set<&'static str> = phf_set! {
    "ARG", "LYS",
};

static LINK_ATOM_NAMES: Set<&'static str> = phf_set! {
    "LA",
};

pub fn is_water_or_ion(residue_name: &str) -> bool {
    WATER_OR_ION_RESIDUES.contains(residue_name)
}

pub fn is_chloride(residue_name: &str) -> bool {
    CHLORIDE_RESIDUES.contains(residue_name)
}

pub fn is_link_atom(atom_name: &str) -> bool {
    LINK_ATOM_NAMES.contains(atom_name)
}

/// Net formal charge written into a fragment's `icharg` card.
pub fn formal_charge(residue_name: &str) -> i32 {
    if ACIDIC_RESIDUES.contains(residue_name) {
        -1
    } else if BASIC_RESIDUES.contains(residue_name) {
        1
    } else {
        0
    }
}

/// Extracts the run tag (the first run of decimal digits) from a file name.
pub fn extract_run_tag(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some(digits)
}
