use super::table::TableError;
use crate::core::models::charge::ChargeTable;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const CHARGE_HEADER_SKIP: usize = 1;

/// Column positions of the two fields the monopole lookup dereferences.
const TYPE_ID_FIELD: usize = 5;
const CHARGE_FIELD: usize = 6;

/// Reads the charge-type table. Only the type-id and charge columns are
/// interpreted; the first occurrence of a type id wins.
pub fn read_charge_table(reader: &mut impl BufRead) -> Result<ChargeTable, TableError> {
    let mut table = ChargeTable::default();
    for (idx, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        if idx < CHARGE_HEADER_SKIP {
            continue;
        }
        let line_num = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= CHARGE_FIELD {
            return Err(TableError::MalformedRecord {
                line: line_num,
                expected: CHARGE_FIELD + 1,
                found: fields.len(),
            });
        }
        let charge: f64 = fields[CHARGE_FIELD]
            .parse()
            .map_err(|_| TableError::InvalidFloat {
                line: line_num,
                field: CHARGE_FIELD,
                value: fields[CHARGE_FIELD].to_string(),
            })?;
        table.insert_first(fields[TYPE_ID_FIELD], charge);
    }
    Ok(table)
}

pub fn read_charge_table_from_path<P: AsRef<Path>>(path: P) -> Result<ChargeTable, TableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_charge_table(&mut reader)
}
