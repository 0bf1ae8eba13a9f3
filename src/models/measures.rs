//! Derived network measures
//!
//! The two per-respondent network features computed by the derivation in
//! `algorithm::network`, plus the eligible-contact count they are based
//! on. Computed once after loading and never mutated.

use serde::Serialize;

/// Derived network-composition features for one respondent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NetworkMeasures {
    /// Education of the most-educated eligible contact(s)
    ///
    /// Mean over the contacts tied at the maximal education level;
    /// `None` when no eligible contact has a reported education.
    pub peak_education: Option<f64>,
    /// Years known for the longest-known contact among the tied set
    ///
    /// `None` when the tied set is empty or none of its members report a
    /// years-known value.
    pub peak_known_years: Option<f64>,
    /// Contacts that survived the kin exclusion and reported education
    pub eligible_contacts: usize,
}

impl NetworkMeasures {
    /// An explicitly missing measure set
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether any network feature could be derived
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.peak_education.is_some()
    }
}
