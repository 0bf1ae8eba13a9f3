//! Statistical routines
//!
//! Descriptive summaries, the model design-matrix builder, and the two
//! regression fitters. Distribution tail areas come from `statrs`.

pub mod descriptive;
pub mod design;
pub mod linear;
pub mod logistic;
pub mod matrix;

pub use descriptive::{FrequencyTable, Summary};
pub use design::ModelData;
pub use linear::{fit_ols, LinearFit};
pub use logistic::{fit_logistic, LogisticFit};
