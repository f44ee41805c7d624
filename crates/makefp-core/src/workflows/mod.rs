//! # Workflows Module
//!
//! The user-facing entry point of the library. [`generate::run`] executes the
//! full pipeline — load the three tabular sources and two name lists,
//! classify the shell, assemble and cap the fragments, write the MAKEFP
//! cards, and optionally assemble the superfragment — placing every output in
//! a per-run directory and returning a summary of what was produced and what
//! was silently dropped.

pub mod config;
pub mod generate;
