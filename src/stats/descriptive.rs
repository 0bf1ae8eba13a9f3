//! Descriptive summaries
//!
//! Moment and quantile summaries over `Option`-valued columns (missing
//! values are skipped and counted), frequency tables for categorical
//! codes, and the grouped mobility rates behind the bar figure.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Summary statistics for one numeric column
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Number of non-missing observations
    pub n: usize,
    /// Number of missing observations
    pub missing: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation
    pub sd: f64,
    /// Minimum
    pub min: f64,
    /// Lower quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Upper quartile
    pub q3: f64,
    /// Maximum
    pub max: f64,
}

/// Summarize a column of optional values
///
/// Returns `None` when every value is missing.
pub fn summarize<I>(values: I) -> Option<Summary>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut present = Vec::new();
    let mut missing = 0;
    for value in values {
        match value {
            Some(v) if v.is_finite() => present.push(v),
            _ => missing += 1,
        }
    }

    if present.is_empty() {
        return None;
    }

    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = present.len();
    let n_f = n as f64;
    let mean = present.iter().sum::<f64>() / n_f;
    let sd = if n > 1 {
        (present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n_f - 1.0)).sqrt()
    } else {
        0.0
    };

    Some(Summary {
        n,
        missing,
        mean,
        sd,
        min: present[0],
        q1: quantile(&present, 0.25),
        median: quantile(&present, 0.5),
        q3: quantile(&present, 0.75),
        max: present[n - 1],
    })
}

/// Linear-interpolation quantile over a sorted slice
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let position = p * (n - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// A frequency table over labelled categories
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrequencyTable {
    counts: FxHashMap<String, usize>,
    /// Observations with no usable category
    pub missing: usize,
}

impl FrequencyTable {
    /// Tally a column of optional labels
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for label in labels {
            match label {
                Some(l) => *table.counts.entry(l.into()).or_insert(0) += 1,
                None => table.missing += 1,
            }
        }
        table
    }

    /// Count for one category
    #[must_use]
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Total non-missing observations
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Categories with counts and shares, sorted by descending count
    #[must_use]
    pub fn entries(&self) -> Vec<(String, usize, f64)> {
        let total = self.total();
        self.counts
            .iter()
            .map(|(label, &count)| {
                let share = if total > 0 {
                    count as f64 / total as f64
                } else {
                    0.0
                };
                (label.clone(), count, share)
            })
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }
}

/// One grouped rate: band label, group size, share with the outcome
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRate {
    /// Band label
    pub label: String,
    /// Observations in the band with a non-missing outcome
    pub n: usize,
    /// Share of the band with the outcome set
    pub rate: f64,
}

/// Outcome rate within ordered bands
///
/// `pairs` yields (band index, outcome) per observation; missing bands
/// or outcomes are skipped. `labels` names the bands in order.
pub fn rates_by_band<I>(pairs: I, labels: &[&str]) -> Vec<GroupedRate>
where
    I: IntoIterator<Item = (Option<usize>, Option<bool>)>,
{
    let mut hits = vec![0usize; labels.len()];
    let mut totals = vec![0usize; labels.len()];

    for (band, outcome) in pairs {
        if let (Some(band), Some(outcome)) = (band, outcome) {
            if band < labels.len() {
                totals[band] += 1;
                if outcome {
                    hits[band] += 1;
                }
            }
        }
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, label)| GroupedRate {
            label: (*label).to_string(),
            n: totals[i],
            rate: if totals[i] > 0 {
                hits[i] as f64 / totals[i] as f64
            } else {
                0.0
            },
        })
        .collect()
}
