//! Data structures shared across the pipeline: atom records from the
//! coordinate sources, the per-residue fragment model, and the charge-type
//! table used for superfragment monopole lookup.

pub mod atom;
pub mod charge;
pub mod fragment;
