//! Logistic regression
//!
//! Maximum-likelihood fit via Newton-Raphson on the log-likelihood, with
//! Wald standard errors from the inverted observed information and
//! p-values from the standard normal distribution.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use super::design::ModelData;
use super::linear::CoefficientEstimate;
use super::matrix::Matrix;
use crate::error::{AnalysisError, Result};

/// Convergence threshold on the maximum absolute score
const SCORE_TOLERANCE: f64 = 1e-8;
/// Iteration cap; separation or a degenerate response hits this
const MAX_ITERATIONS: usize = 25;

/// A fitted logistic model
#[derive(Debug, Clone, Serialize)]
pub struct LogisticFit {
    /// Coefficient table on the log-odds scale, intercept first
    pub coefficients: Vec<CoefficientEstimate>,
    /// Effective observations after listwise deletion
    pub n: usize,
    /// Rows dropped for missing values
    pub dropped: usize,
    /// Log-likelihood at the maximum
    pub log_likelihood: f64,
    /// Log-likelihood of the intercept-only model
    pub null_log_likelihood: f64,
    /// McFadden pseudo R-squared
    pub pseudo_r_squared: f64,
    /// Newton-Raphson iterations used
    pub iterations: usize,
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Score vector X'(y - p) and observed information X'WX at `beta`
fn score_and_information(data: &ModelData, beta: &[f64]) -> (Vec<f64>, Matrix) {
    let k = beta.len();
    let mut score = vec![0.0; k];
    let mut information = Matrix::zeros(k, k);

    for (row, &y) in data.rows.iter().zip(&data.response) {
        let eta: f64 = row.iter().zip(beta).map(|(x, b)| x * b).sum();
        let p = sigmoid(eta);
        let weight = p * (1.0 - p);
        for i in 0..k {
            score[i] += row[i] * (y - p);
            for j in i..k {
                information.add_to(i, j, weight * row[i] * row[j]);
            }
        }
    }
    for i in 0..k {
        for j in (i + 1)..k {
            let value = information.get(i, j);
            information.set(j, i, value);
        }
    }

    (score, information)
}

/// Fit a logistic regression on prepared model data with a 0/1 response
pub fn fit_logistic(data: &ModelData) -> Result<LogisticFit> {
    data.ensure_estimable()?;

    if data.response.iter().any(|&y| y != 0.0 && y != 1.0) {
        return Err(AnalysisError::model(
            "logistic response must be coded 0/1",
        ));
    }

    let n = data.n();
    let k = data.k();
    let successes = data.response.iter().sum::<f64>();
    if successes == 0.0 || successes == n as f64 {
        return Err(AnalysisError::model(
            "logistic response has no variation",
        ));
    }

    let mut beta = vec![0.0; k];
    let mut iterations = 0;
    let (mut score, mut information) = score_and_information(data, &beta);

    loop {
        let max_score = score.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        if max_score < SCORE_TOLERANCE {
            break;
        }
        if iterations >= MAX_ITERATIONS {
            return Err(AnalysisError::model(format!(
                "logistic fit did not converge in {MAX_ITERATIONS} iterations \
                 (max score {max_score:.3e}); the data may be separable"
            )));
        }
        iterations += 1;

        let step = information.solve(&score)?;
        for (b, s) in beta.iter_mut().zip(&step) {
            *b += s;
        }
        if beta.iter().any(|b| !b.is_finite()) {
            return Err(AnalysisError::model(
                "logistic coefficients diverged; the data may be separable",
            ));
        }

        (score, information) = score_and_information(data, &beta);
    }

    // Log-likelihood at the maximum, with an overflow-safe log(1 + e^x)
    let log1p_exp = |x: f64| {
        if x > 0.0 {
            x + (-x).exp().ln_1p()
        } else {
            x.exp().ln_1p()
        }
    };
    let mut log_likelihood = 0.0;
    for (row, &y) in data.rows.iter().zip(&data.response) {
        let eta: f64 = row.iter().zip(&beta).map(|(x, b)| x * b).sum();
        log_likelihood += y * eta - log1p_exp(eta);
    }

    // Intercept-only model has a closed form at the sample proportion
    let p_bar = successes / n as f64;
    let null_log_likelihood =
        successes * p_bar.ln() + (n as f64 - successes) * (1.0 - p_bar).ln();
    let pseudo_r_squared = 1.0 - log_likelihood / null_log_likelihood;

    let covariance = information.inverse()?;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AnalysisError::model(format!("normal distribution: {e}")))?;

    let coefficients = data
        .terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let std_error = covariance.get(i, i).sqrt();
            let statistic = if std_error > 0.0 {
                beta[i] / std_error
            } else {
                0.0
            };
            CoefficientEstimate {
                term: term.clone(),
                estimate: beta[i],
                std_error,
                statistic,
                p_value: 2.0 * (1.0 - normal.cdf(statistic.abs())),
            }
        })
        .collect();

    Ok(LogisticFit {
        coefficients,
        n,
        dropped: data.dropped,
        log_likelihood,
        null_log_likelihood,
        pseudo_r_squared,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(rows: Vec<Vec<f64>>, response: Vec<f64>) -> ModelData {
        let k = rows.first().map_or(0, Vec::len);
        let terms = (0..k)
            .map(|i| {
                if i == 0 {
                    "(Intercept)".to_string()
                } else {
                    format!("x{i}")
                }
            })
            .collect();
        ModelData {
            terms,
            rows,
            response,
            dropped: 0,
        }
    }

    #[test]
    fn test_intercept_only_recovers_log_odds() {
        // 3 successes out of 10: intercept = ln(3/7)
        let rows = vec![vec![1.0]; 10];
        let mut response = vec![0.0; 10];
        response[0] = 1.0;
        response[1] = 1.0;
        response[2] = 1.0;

        let fit = fit_logistic(&design(rows, response)).unwrap();
        let expected = (3.0_f64 / 7.0).ln();
        assert!((fit.coefficients[0].estimate - expected).abs() < 1e-6);
        assert!(fit.pseudo_r_squared.abs() < 1e-9);
    }

    #[test]
    fn test_balanced_predictor_effect() {
        // Outcome mostly follows the predictor, with two contrarian
        // observations so the likelihood has an interior maximum.
        let mut rows = Vec::new();
        let mut response = Vec::new();
        for i in 0..20 {
            let x = if i < 10 { 0.0 } else { 1.0 };
            rows.push(vec![1.0, x]);
            // 2/10 successes at x = 0, 8/10 at x = 1
            let y = match i {
                0 | 1 => 1.0,
                10 | 11 => 0.0,
                _ if i >= 12 => 1.0,
                _ => 0.0,
            };
            response.push(y);
        }

        let fit = fit_logistic(&design(rows, response)).unwrap();
        // Log odds ratio: ln((8/2) / (2/8)) = ln(16)
        let slope = fit.coefficients[1].estimate;
        assert!((slope - 16.0_f64.ln()).abs() < 1e-6);
        // Intercept: ln(2/8)
        let intercept = fit.coefficients[0].estimate;
        assert!((intercept - (0.25_f64).ln()).abs() < 1e-6);
        assert!(fit.log_likelihood > fit.null_log_likelihood);
        assert!(fit.pseudo_r_squared > 0.0);
    }

    #[test]
    fn test_separable_data_fails_loudly() {
        // Perfect separation: outcome is exactly x > 0
        let mut rows = Vec::new();
        let mut response = Vec::new();
        for i in 0..12 {
            let x = f64::from(i) - 5.5;
            rows.push(vec![1.0, x]);
            response.push(if x > 0.0 { 1.0 } else { 0.0 });
        }

        assert!(fit_logistic(&design(rows, response)).is_err());
    }

    #[test]
    fn test_degenerate_response_is_an_error() {
        let rows = vec![vec![1.0], vec![1.0], vec![1.0]];
        assert!(fit_logistic(&design(rows, vec![1.0, 1.0, 1.0])).is_err());
    }

    #[test]
    fn test_non_binary_response_is_an_error() {
        let rows = vec![vec![1.0], vec![1.0]];
        assert!(fit_logistic(&design(rows, vec![0.0, 2.0])).is_err());
    }
}
