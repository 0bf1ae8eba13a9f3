//! A one-shot statistical analysis of discussion-network composition and
//! occupational mobility over a fixed-year survey extract: load, derive
//! the network and indicator variables, fit the two regressions, and
//! render the report.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod report;
pub mod schema;
pub mod stats;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use models::{Contact, Indicators, NetworkMeasures, Respondent, RespondentCollection};

// Derivations
pub use algorithm::{derive_indicators, derive_network_measures};

// Loading
pub use reader::load_respondents;

// Models and report assembly
pub use report::{build_report, write_report, Report};
pub use stats::{fit_logistic, fit_ols, LinearFit, LogisticFit};
