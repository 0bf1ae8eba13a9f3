//! Entity models for the analysis
//!
//! One flat record per respondent, five contact slots each, plus the
//! derived measure structs computed once after loading.

pub mod collection;
pub mod contact;
pub mod indicators;
pub mod measures;
pub mod respondent;

pub use collection::{AnalyzedRespondent, RespondentCollection};
pub use contact::Contact;
pub use indicators::Indicators;
pub use measures::NetworkMeasures;
pub use respondent::Respondent;
