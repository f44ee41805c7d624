//! # makefp Core Library
//!
//! Converts a molecular-dynamics snapshot into per-residue GAMESS MAKEFP input
//! fragments plus one aggregate electrostatic-embedding fragment (the
//! "superfragment"), for Effective Fragment Potential (EFP) calculations.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to keep the
//! geometric reconstruction logic separate from parsing and from output
//! formatting.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`,
//!   `Fragment`, `ChargeTable`), readers for the whitespace-delimited input
//!   tables, writers for the MAKEFP card and `.efp` output formats, and pure
//!   lookup utilities (element resolution, residue-name sets, unit
//!   conversions).
//!
//! - **[`engine`]: The Logic Core.** Residue classification into fragments,
//!   the capping-geometry reconstruction that synthesizes terminal hydrogens
//!   where the solvation-shell cutoff severed the backbone, and the
//!   point-charge assembly for everything left over.
//!
//! - **[`workflows`]: The Public API.** The end-to-end pipeline tying loaders,
//!   engine, and writers together, along with its configuration surface.

pub mod core;
pub mod engine;
pub mod workflows;
