//! Network-composition derivation
//!
//! For each respondent: drop contacts flagged as the respondent's parent
//! or child, find the maximal education level among the remainder with
//! reported education, average the education values of the contacts tied
//! at that maximum, and take the longest years-known value within the
//! same tied set. An empty eligible set yields explicitly missing
//! features.

use crate::models::{Contact, NetworkMeasures, Respondent};

/// Derive the network-composition measures for one respondent
#[must_use]
pub fn derive_network_measures(respondent: &Respondent) -> NetworkMeasures {
    let eligible: Vec<&Contact> = respondent
        .contacts
        .iter()
        .filter(|c| !c.is_excluded_kin() && c.education.is_some())
        .collect();

    let Some(max_education) = eligible.iter().filter_map(|c| c.education).max() else {
        return NetworkMeasures::missing();
    };

    let tied: Vec<&Contact> = eligible
        .iter()
        .copied()
        .filter(|c| c.education == Some(max_education))
        .collect();

    // Ties at the maximum are averaged rather than resolved by slot
    // order; tied values are equal, so the mean is the maximum itself,
    // but the whole tied set feeds the years-known feature below.
    let peak_education = tied
        .iter()
        .filter_map(|c| c.education)
        .map(f64::from)
        .sum::<f64>()
        / tied.len() as f64;

    // Longest-known proxy: max years-known within the tied set, skipping
    // contacts that did not report a duration.
    let peak_known_years = tied
        .iter()
        .filter_map(|c| c.known_years)
        .max()
        .map(f64::from);

    NetworkMeasures {
        peak_education: Some(peak_education),
        peak_known_years,
        eligible_contacts: eligible.len(),
    }
}
