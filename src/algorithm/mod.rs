//! Derivation algorithms
//!
//! Pure functions that turn raw respondent records into the derived
//! variables the models and tables consume.

pub mod indicators;
pub mod network;

pub use indicators::derive_indicators;
pub use network::derive_network_measures;
