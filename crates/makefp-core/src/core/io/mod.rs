//! Input/output for the pipeline's external formats.
//!
//! Readers handle the three positional whitespace-delimited text sources
//! (shell coordinates, reference coordinates, charge-type table) and the
//! plain name lists. Writers serialize fragments into the GAMESS MAKEFP
//! input-card format and the superfragment into the `.efp` embedding format;
//! both output templates are treated as opaque fixed text.

pub mod charges;
pub mod efp;
pub mod gamess;
pub mod names;
pub mod table;
