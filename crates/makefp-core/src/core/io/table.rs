use crate::core::models::atom::AtomRecord;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// The shell source carries a title, an atom count, and two box lines at each
/// end; the reference source has three extra preamble lines.
pub const SHELL_HEADER_SKIP: usize = 4;
pub const SHELL_FOOTER_SKIP: usize = 4;
pub const REFERENCE_HEADER_SKIP: usize = 7;
pub const REFERENCE_FOOTER_SKIP: usize = 4;

/// Lowest field count a coordinate record must have: residue number, residue
/// name, atom name, charge-type id, and x/y/z.
const COORD_FIELDS: usize = 7;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Source has {lines} line(s), fewer than its fixed header/footer of {skip}")]
    TooShort { lines: usize, skip: usize },
    #[error("Malformed record on line {line}: expected at least {expected} fields, found {found}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid float on line {line}, field {field} (value: '{value}')")]
    InvalidFloat {
        line: usize,
        field: usize,
        value: String,
    },
}

/// Reads the coordinate records of a tabular source, skipping the fixed
/// header and footer line counts. No validation happens beyond what the
/// pipeline dereferences: field count and the three coordinate floats.
pub fn read_records(
    reader: &mut impl BufRead,
    header_skip: usize,
    footer_skip: usize,
) -> Result<Vec<AtomRecord>, TableError> {
    let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
    let skip = header_skip + footer_skip;
    if lines.len() < skip {
        return Err(TableError::TooShort {
            lines: lines.len(),
            skip,
        });
    }

    let mut records = Vec::with_capacity(lines.len() - skip);
    for (idx, line) in lines
        .iter()
        .enumerate()
        .take(lines.len() - footer_skip)
        .skip(header_skip)
    {
        let line_num = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < COORD_FIELDS {
            return Err(TableError::MalformedRecord {
                line: line_num,
                expected: COORD_FIELDS,
                found: fields.len(),
            });
        }

        let mut coords = [0.0f64; 3];
        let mut raw_coords = [const { String::new() }; 3];
        for (slot, field) in (4..COORD_FIELDS).enumerate() {
            let token = fields[field];
            coords[slot] = token.parse().map_err(|_| TableError::InvalidFloat {
                line: line_num,
                field,
                value: token.to_string(),
            })?;
            raw_coords[slot] = token.to_string();
        }

        records.push(AtomRecord {
            residue_number: fields[0].to_string(),
            residue_name: fields[1].to_string(),
            atom_name: fields[2].to_string(),
            type_id: fields[3].to_string(),
            position: Point3::new(coords[0], coords[1], coords[2]),
            raw_coords,
        });
    }
    Ok(records)
}

pub fn read_shell_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AtomRecord>, TableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_records(&mut reader, SHELL_HEADER_SKIP, SHELL_FOOTER_SKIP)
}

pub fn read_reference_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AtomRecord>, TableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_records(&mut reader, REFERENCE_HEADER_SKIP, REFERENCE_FOOTER_SKIP)
}
