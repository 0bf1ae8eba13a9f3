//! Report generation
//!
//! Markdown tables, SVG figures, and the assembly of the final report
//! document plus its machine-readable model summary.

pub mod document;
pub mod figures;
pub mod tables;

pub use document::{build_report, write_report, Report};
