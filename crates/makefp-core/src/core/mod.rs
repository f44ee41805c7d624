//! # Core Module
//!
//! Fundamental building blocks for fragment generation: typed records for the
//! tabular input sources, the fragment and charge-table models, input readers
//! and output writers, and the small pure lookups (element resolution,
//! residue-name classification sets, length-unit conversions) shared by the
//! engine and workflow layers.
//!
//! Nothing in this module holds pipeline state; every algorithmic decision
//! lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod utils;
