use super::table::TableError;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a residue-name list, one name per line, trimmed; empty lines are
/// skipped.
pub fn read_name_list(reader: &mut impl BufRead) -> Result<HashSet<String>, TableError> {
    let mut names = HashSet::new();
    for line_res in reader.lines() {
        let line = line_res?;
        let name = line.trim();
        if !name.is_empty() {
            names.insert(name.to_string());
        }
    }
    Ok(names)
}

pub fn read_name_list_from_path<P: AsRef<Path>>(path: P) -> Result<HashSet<String>, TableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_name_list(&mut reader)
}
