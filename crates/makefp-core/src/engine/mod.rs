//! # Engine Module
//!
//! The algorithmic core of the pipeline: residue classification over the
//! shell source, reconstruction of the two synthetic cap hydrogens per capped
//! residue, assembly of fragment atom lists, and assembly of the
//! point-charge superfragment from everything left over.
//!
//! All stages operate on explicit values ([`classify::ShellIndex`],
//! [`crate::core::models::atom::ConsumedAtomSet`]) threaded through by the
//! workflow; nothing here touches the filesystem.

pub mod capping;
pub mod classify;
pub mod error;
pub mod fragments;
pub mod superfrag;
