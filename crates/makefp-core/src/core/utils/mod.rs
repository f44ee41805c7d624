pub mod elements;
pub mod identifiers;
pub mod units;
