//! Ordinary least squares
//!
//! Fits the linear model via the normal equations, with standard errors
//! from the inverted cross-product matrix and two-sided p-values from
//! the Student's t distribution.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use super::design::ModelData;
use super::matrix::Matrix;
use crate::error::{AnalysisError, Result};

/// One estimated coefficient with its inference columns
#[derive(Debug, Clone, Serialize)]
pub struct CoefficientEstimate {
    /// Term name
    pub term: String,
    /// Point estimate
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// t or z statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// A fitted linear model
#[derive(Debug, Clone, Serialize)]
pub struct LinearFit {
    /// Coefficient table, intercept first
    pub coefficients: Vec<CoefficientEstimate>,
    /// Effective observations after listwise deletion
    pub n: usize,
    /// Rows dropped for missing values
    pub dropped: usize,
    /// Residual degrees of freedom
    pub residual_df: usize,
    /// Coefficient of determination
    pub r_squared: f64,
    /// R-squared adjusted for model size
    pub adj_r_squared: f64,
    /// Overall F statistic
    pub f_statistic: f64,
    /// p-value of the overall F test
    pub f_p_value: f64,
}

/// Fit an OLS regression on prepared model data
pub fn fit_ols(data: &ModelData) -> Result<LinearFit> {
    data.ensure_estimable()?;

    let n = data.n();
    let k = data.k();

    // Normal equations: X'X beta = X'y
    let mut xtx = Matrix::zeros(k, k);
    let mut xty = vec![0.0; k];
    for (row, &y) in data.rows.iter().zip(&data.response) {
        for i in 0..k {
            xty[i] += row[i] * y;
            for j in i..k {
                xtx.add_to(i, j, row[i] * row[j]);
            }
        }
    }
    // Mirror the upper triangle
    for i in 0..k {
        for j in (i + 1)..k {
            let value = xtx.get(i, j);
            xtx.set(j, i, value);
        }
    }

    let beta = xtx.solve(&xty)?;

    // Residual and total sums of squares
    let mean_y = data.response.iter().sum::<f64>() / n as f64;
    let mut ss_residual = 0.0;
    let mut ss_total = 0.0;
    for (row, &y) in data.rows.iter().zip(&data.response) {
        let fitted: f64 = row.iter().zip(&beta).map(|(x, b)| x * b).sum();
        ss_residual += (y - fitted).powi(2);
        ss_total += (y - mean_y).powi(2);
    }

    let residual_df = n - k;
    let sigma2 = ss_residual / residual_df as f64;
    let covariance = xtx.inverse()?;

    let t_dist = StudentsT::new(0.0, 1.0, residual_df as f64)
        .map_err(|e| AnalysisError::model(format!("t distribution: {e}")))?;

    let coefficients = data
        .terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            let std_error = (sigma2 * covariance.get(i, i)).sqrt();
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
                p_value: 2.0 * (1.0 - t_dist.cdf(statistic.abs())),
            }
        })
        .collect();

    let r_squared = if ss_total > 0.0 {
        1.0 - ss_residual / ss_total
    } else {
        0.0
    };
    let adj_r_squared =
        1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / residual_df as f64;

    // Overall F test against the intercept-only model
    let model_df = k - 1;
    let f_statistic = if model_df > 0 && r_squared < 1.0 {
        (r_squared / model_df as f64) / ((1.0 - r_squared) / residual_df as f64)
    } else {
        f64::INFINITY
    };
    let f_p_value = if f_statistic.is_finite() {
        let f_dist = FisherSnedecor::new(model_df as f64, residual_df as f64)
            .map_err(|e| AnalysisError::model(format!("F distribution: {e}")))?;
        1.0 - f_dist.cdf(f_statistic)
    } else {
        0.0
    };

    Ok(LinearFit {
        coefficients,
        n,
        dropped: data.dropped,
        residual_df,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_design(rows: Vec<Vec<f64>>, response: Vec<f64>, terms: &[&str]) -> ModelData {
        ModelData {
            terms: terms.iter().map(ToString::to_string).collect(),
            rows,
            response,
            dropped: 0,
        }
    }

    #[test]
    fn test_exact_line_recovery() {
        // y = 3 + 2x fitted exactly
        let design = simple_design(
            vec![
                vec![1.0, 1.0],
                vec![1.0, 2.0],
                vec![1.0, 3.0],
                vec![1.0, 4.0],
            ],
            vec![5.0, 7.0, 9.0, 11.0],
            &["(Intercept)", "x"],
        );

        let fit = fit_ols(&design).unwrap();
        assert!((fit.coefficients[0].estimate - 3.0).abs() < 1e-9);
        assert!((fit.coefficients[1].estimate - 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_known_small_sample_fit() {
        // Hand-computed: x = [0,1,2,3,4], y = [1,2,2,4,5]
        // Sxx = 10, Sxy = 10 -> slope 1.0, intercept 0.8
        // SSE = 0.8, SST = 10.8 -> R^2 = 10/10.8
        let rows: Vec<Vec<f64>> = (0..5).map(|x| vec![1.0, f64::from(x)]).collect();
        let design = simple_design(
            rows,
            vec![1.0, 2.0, 2.0, 4.0, 5.0],
            &["(Intercept)", "x"],
        );

        let fit = fit_ols(&design).unwrap();
        assert!((fit.coefficients[0].estimate - 0.8).abs() < 1e-9);
        assert!((fit.coefficients[1].estimate - 1.0).abs() < 1e-9);
        assert!((fit.r_squared - 10.0 / 10.8).abs() < 1e-9);
        assert_eq!(fit.n, 5);
        assert_eq!(fit.residual_df, 3);
        // Slope SE = sqrt((0.8/3) / 10)
        let expected_se = (0.8_f64 / 3.0 / 10.0).sqrt();
        assert!((fit.coefficients[1].std_error - expected_se).abs() < 1e-9);
        assert!((fit.coefficients[1].statistic - 1.0 / expected_se).abs() < 1e-9);
        // t is about 6.12 on 3 df: clearly significant, two-sided
        assert!(fit.coefficients[1].p_value < 0.01);
        assert!(fit.coefficients[1].p_value > 0.001);
    }

    #[test]
    fn test_collinear_design_is_singular() {
        // Second predictor is exactly twice the first
        let design = simple_design(
            vec![
                vec![1.0, 1.0, 2.0],
                vec![1.0, 2.0, 4.0],
                vec![1.0, 3.0, 6.0],
                vec![1.0, 4.0, 8.0],
            ],
            vec![1.0, 2.0, 3.0, 4.0],
            &["(Intercept)", "x", "x2"],
        );

        assert!(fit_ols(&design).is_err());
    }

    #[test]
    fn test_empty_design_errors() {
        let design = simple_design(vec![], vec![], &["(Intercept)"]);
        assert!(fit_ols(&design).is_err());
    }
}
