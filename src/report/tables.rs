//! Markdown table rendering
//!
//! Fixed-precision rendering of the descriptive and regression tables.
//! Every table reports its effective n so missing-data handling stays
//! visible in the document.

use crate::stats::descriptive::{FrequencyTable, Summary};
use crate::stats::linear::{CoefficientEstimate, LinearFit};
use crate::stats::logistic::LogisticFit;

/// Format a value with three decimals
fn fmt(value: f64) -> String {
    format!("{value:.3}")
}

/// Format a p-value, flooring tiny values
fn fmt_p(p: f64) -> String {
    if p < 0.001 {
        "<0.001".to_string()
    } else {
        format!("{p:.3}")
    }
}

/// Render the descriptive summary table
///
/// `rows` pairs a display name with the column's summary; variables
/// where every value was missing render as dashes.
#[must_use]
pub fn summary_table(rows: &[(&str, Option<Summary>)]) -> String {
    let mut out = String::new();
    out.push_str("| Variable | n | Missing | Mean | SD | Min | Median | Max |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");

    for (name, summary) in rows {
        match summary {
            Some(s) => {
                out.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                    name,
                    s.n,
                    s.missing,
                    fmt(s.mean),
                    fmt(s.sd),
                    fmt(s.min),
                    fmt(s.median),
                    fmt(s.max)
                ));
            }
            None => {
                out.push_str(&format!("| {name} | 0 | — | — | — | — | — | — |\n"));
            }
        }
    }

    out
}

/// Render a frequency table for one categorical variable
#[must_use]
pub fn frequency_table(variable: &str, table: &FrequencyTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("**{variable}** (n = {}", table.total()));
    if table.missing > 0 {
        out.push_str(&format!(", missing = {}", table.missing));
    }
    out.push_str(")\n\n");

    out.push_str("| Category | Count | Share |\n");
    out.push_str("|---|---|---|\n");
    for (label, count, share) in table.entries() {
        out.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            label,
            count,
            share * 100.0
        ));
    }

    out
}

fn coefficient_rows(coefficients: &[CoefficientEstimate], stat_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "| Term | Estimate | Std. Error | {stat_label} | p-value |\n"
    ));
    out.push_str("|---|---|---|---|---|\n");
    for c in coefficients {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            c.term,
            fmt(c.estimate),
            fmt(c.std_error),
            fmt(c.statistic),
            fmt_p(c.p_value)
        ));
    }
    out
}

/// Render the linear-model coefficient table with fit statistics
#[must_use]
pub fn linear_table(fit: &LinearFit) -> String {
    let mut out = coefficient_rows(&fit.coefficients, "t");
    out.push_str(&format!(
        "\nn = {} ({} dropped for missing values), R² = {}, adjusted R² = {}, \
         F = {} (p {})\n",
        fit.n,
        fit.dropped,
        fmt(fit.r_squared),
        fmt(fit.adj_r_squared),
        fmt(fit.f_statistic),
        fmt_p(fit.f_p_value)
    ));
    out
}

/// Render the logistic-model coefficient table with fit statistics
#[must_use]
pub fn logistic_table(fit: &LogisticFit) -> String {
    let mut out = coefficient_rows(&fit.coefficients, "z");
    out.push_str(&format!(
        "\nn = {} ({} dropped for missing values), log-likelihood = {}, \
         McFadden pseudo-R² = {}, converged in {} iterations\n",
        fit.n,
        fit.dropped,
        fmt(fit.log_likelihood),
        fmt(fit.pseudo_r_squared),
        fit.iterations
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::descriptive::summarize;

    #[test]
    fn test_p_value_formatting() {
        assert_eq!(fmt_p(0.04), "0.040");
        assert_eq!(fmt_p(0.0004), "<0.001");
    }

    #[test]
    fn test_summary_table_renders_missing_column() {
        let present = summarize(vec![Some(1.0), Some(2.0), Some(3.0)]);
        let table = summary_table(&[("prestige", present), ("empty", None)]);

        assert!(table.contains("| prestige | 3 | 0 |"));
        assert!(table.contains("| empty | 0 |"));
        assert!(table.starts_with("| Variable |"));
    }

    #[test]
    fn test_frequency_table_render() {
        let table = FrequencyTable::from_labels(vec![Some("south"), Some("south"), None]);
        let rendered = frequency_table("Region", &table);

        assert!(rendered.contains("**Region** (n = 2, missing = 1)"));
        assert!(rendered.contains("| south | 2 | 100.0% |"));
    }

    #[test]
    fn test_coefficient_rows_render() {
        let coefficients = vec![CoefficientEstimate {
            term: "(Intercept)".to_string(),
            estimate: 1.23456,
            std_error: 0.5,
            statistic: 2.469,
            p_value: 0.0136,
        }];
        let rows = coefficient_rows(&coefficients, "t");

        assert!(rows.contains("| (Intercept) | 1.235 | 0.500 | 2.469 | 0.014 |"));
    }
}
