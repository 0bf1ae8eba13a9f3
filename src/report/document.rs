//! Report assembly
//!
//! Builds the full Markdown report from the analyzed collection: data
//! note, descriptive tables, figures, both regression tables, and a
//! machine-readable JSON summary of the fits.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::indicators::{CommunityGroup, MaritalStatus, RegionGroup};
use crate::models::RespondentCollection;
use crate::stats::descriptive::{rates_by_band, summarize, FrequencyTable};
use crate::stats::design::{mobility_design, prestige_design};
use crate::stats::{fit_ols, fit_logistic, LinearFit, LogisticFit, ModelData};

use super::figures;
use super::tables;

/// Labels for the network-education bands in the mobility figure
const EDUCATION_BAND_LABELS: [&str; 4] = ["<12", "12", "13-15", "16+"];

/// A fully assembled report ready to be written
#[derive(Debug)]
pub struct Report {
    /// The Markdown document
    pub markdown: String,
    /// Figure filename/SVG pairs referenced from the document
    pub figures: Vec<(String, String)>,
    /// JSON summary of both model fits
    pub model_summary: String,
}

/// JSON-serializable fit summary written next to the document
#[derive(Debug, Serialize)]
struct ModelSummaries<'a> {
    survey_year: i32,
    respondents: usize,
    linear: &'a LinearFit,
    logistic: &'a LogisticFit,
}

/// Band index for the mobility-by-education figure
fn education_band(peak_education: f64) -> usize {
    if peak_education < 12.0 {
        0
    } else if peak_education < 13.0 {
        1
    } else if peak_education < 16.0 {
        2
    } else {
        3
    }
}

/// Build the report from an analyzed collection
///
/// Fits both models; an empty collection surfaces as a model error
/// rather than an empty document.
pub fn build_report(config: &AnalysisConfig, collection: &RespondentCollection) -> Result<Report> {
    let prestige: ModelData = prestige_design(collection);
    let mobility: ModelData = mobility_design(collection);

    log::info!(
        "Fitting models: linear n = {} (dropped {}), logistic n = {} (dropped {})",
        prestige.n(),
        prestige.dropped,
        mobility.n(),
        mobility.dropped
    );

    let linear_fit = fit_ols(&prestige)?;
    let logistic_fit = fit_logistic(&mobility)?;

    let markdown = render_markdown(config, collection, &linear_fit, &logistic_fit);
    let figure_files = render_figures(collection);

    let summary = ModelSummaries {
        survey_year: config.survey_year,
        respondents: collection.len(),
        linear: &linear_fit,
        logistic: &logistic_fit,
    };
    let model_summary = serde_json::to_string_pretty(&summary)
        .map_err(|e| AnalysisError::model(format!("failed to serialize fit summary: {e}")))?;

    Ok(Report {
        markdown,
        figures: figure_files,
        model_summary,
    })
}

fn render_figures(collection: &RespondentCollection) -> Vec<(String, String)> {
    let mut figure_files = Vec::new();

    // Figure 1: father's vs own prestige with the bivariate fit line
    let points: Vec<(f64, f64)> = collection
        .iter()
        .filter_map(|r| {
            Some((
                f64::from(r.respondent.father_prestige?),
                f64::from(r.respondent.prestige?),
            ))
        })
        .collect();
    let (intercept, slope) = bivariate_line(&points);
    figure_files.push((
        "figure_1_prestige_scatter.svg".to_string(),
        figures::scatter_with_fit(
            &points,
            intercept,
            slope,
            "Occupational prestige by father's prestige",
            "Father's occupational prestige",
            "Respondent's occupational prestige",
        ),
    ));

    // Figure 2: distribution of the derived network education feature
    let network_education: Vec<f64> = collection
        .iter()
        .filter_map(|r| r.network.peak_education)
        .collect();
    figure_files.push((
        "figure_2_network_education.svg".to_string(),
        figures::histogram(
            &network_education,
            10,
            "Education of the most-educated non-kin contact",
            "Years of schooling",
        ),
    ));

    // Figure 3: mobility rate by network-education band
    let pairs = collection.iter().map(|r| {
        (
            r.network.peak_education.map(education_band),
            r.indicators.upward_mobility,
        )
    });
    let rates = rates_by_band(pairs, &EDUCATION_BAND_LABELS);
    figure_files.push((
        "figure_3_mobility_by_band.svg".to_string(),
        figures::rate_bars(
            &rates,
            "Upward mobility by network education",
            "Network education (years)",
            "Share upwardly mobile",
        ),
    ));

    figure_files
}

/// Least-squares line through a point cloud, (intercept, slope)
fn bivariate_line(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    if points.len() < 2 {
        return (0.0, 0.0);
    }
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return (mean_y, 0.0);
    }
    let sxy: f64 = points
        .iter()
        .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
        .sum();
    let slope = sxy / sxx;
    (mean_y - slope * mean_x, slope)
}

fn render_markdown(
    config: &AnalysisConfig,
    collection: &RespondentCollection,
    linear_fit: &LinearFit,
    logistic_fit: &LogisticFit,
) -> String {
    let mut doc = String::new();

    doc.push_str(&format!("# {}\n\n", config.report_title));
    doc.push_str(&format!(
        "Survey year {}; {} respondents loaded, {} with derived network \
         measures, {} with both prestige scores.\n\n",
        config.survey_year,
        collection.len(),
        collection.with_network_data().len(),
        collection.with_mobility_data().len()
    ));

    doc.push_str("## Descriptive statistics\n\n");
    doc.push_str(&tables::summary_table(&[
        (
            "Occupational prestige",
            summarize(collection.iter().map(|r| r.respondent.prestige.map(f64::from))),
        ),
        (
            "Father's occupational prestige",
            summarize(
                collection
                    .iter()
                    .map(|r| r.respondent.father_prestige.map(f64::from)),
            ),
        ),
        (
            "Age",
            summarize(collection.iter().map(|r| r.respondent.age.map(f64::from))),
        ),
        (
            "Years of schooling",
            summarize(
                collection
                    .iter()
                    .map(|r| r.respondent.education_years.map(f64::from)),
            ),
        ),
        (
            "Network education (derived)",
            summarize(collection.iter().map(|r| r.network.peak_education)),
        ),
        (
            "Network years known (derived)",
            summarize(collection.iter().map(|r| r.network.peak_known_years)),
        ),
        (
            "Network size (reported contacts)",
            summarize(
                collection
                    .iter()
                    .map(|r| Some(r.respondent.network_size() as f64)),
            ),
        ),
    ]));
    doc.push('\n');

    let marital = FrequencyTable::from_labels(collection.iter().map(|r| {
        r.respondent
            .marital
            .and_then(|code| MaritalStatus::from(code).label())
    }));
    doc.push_str(&tables::frequency_table("Marital status", &marital));
    doc.push('\n');

    let region = FrequencyTable::from_labels(collection.iter().map(|r| {
        r.respondent
            .region
            .and_then(|code| RegionGroup::from(code).label())
    }));
    doc.push_str(&tables::frequency_table("Region", &region));
    doc.push('\n');

    let community = FrequencyTable::from_labels(collection.iter().map(|r| {
        r.respondent
            .community
            .and_then(|code| CommunityGroup::from(code).label())
    }));
    doc.push_str(&tables::frequency_table("Community type", &community));
    doc.push('\n');

    doc.push_str("## Figures\n\n");
    doc.push_str("![Prestige scatter](figure_1_prestige_scatter.svg)\n\n");
    doc.push_str("![Network education](figure_2_network_education.svg)\n\n");
    doc.push_str("![Mobility by band](figure_3_mobility_by_band.svg)\n\n");

    doc.push_str("## Linear model: occupational prestige\n\n");
    doc.push_str(&tables::linear_table(linear_fit));
    doc.push('\n');

    doc.push_str("## Logistic model: upward mobility\n\n");
    doc.push_str(&tables::logistic_table(logistic_fit));
    doc.push('\n');

    doc.push_str(
        "## Notes on missing data\n\n\
         Survey missing codes are mapped to explicit missing values at load \
         time and propagate through every derivation. Contacts flagged as \
         the respondent's parent or child are excluded from the network \
         measures; education values tied at the maximum are averaged. Model \
         rows are dropped listwise on any missing value, and each table \
         reports its effective n.\n",
    );

    doc
}

/// Write the report, figures, and JSON summary to the output directory
///
/// Returns the path of the Markdown document.
pub fn write_report(config: &AnalysisConfig, report: &Report) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| AnalysisError::report(&config.output_dir, e.to_string()))?;

    let report_path = config.output_dir.join("report.md");
    fs::write(&report_path, &report.markdown)
        .map_err(|e| AnalysisError::report(&report_path, e.to_string()))?;

    for (name, svg) in &report.figures {
        let path = config.output_dir.join(name);
        fs::write(&path, svg).map_err(|e| AnalysisError::report(&path, e.to_string()))?;
    }

    let summary_path = config.output_dir.join("model_summary.json");
    fs::write(&summary_path, &report.model_summary)
        .map_err(|e| AnalysisError::report(&summary_path, e.to_string()))?;

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, Respondent};

    /// Deterministic generator so the synthetic cohort has no exact
    /// collinearity between dummy groups
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, modulo: i32) -> i32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((self.0 >> 33) as i32).rem_euclid(modulo)
        }
    }

    fn synthetic_collection(n: usize) -> RespondentCollection {
        let mut rng = Lcg(0x51ab_cafe);
        let mut respondents = Vec::new();
        for i in 0..n {
            let mut r = Respondent::new(i as i64, 1985)
                .with_prestige(Some(20 + rng.next(60)), Some(20 + rng.next(60)))
                .with_contact(Contact::new(
                    Some(6 + rng.next(14)),
                    Some(1 + rng.next(30)),
                ))
                .with_contact(Contact::new(
                    Some(6 + rng.next(14)),
                    Some(1 + rng.next(30)),
                ));
            r.sex = Some(1 + rng.next(2));
            r.race = Some(1 + rng.next(3));
            r.age = Some(18 + rng.next(60));
            r.education_years = Some(6 + rng.next(14));
            r.marital = Some(1 + rng.next(5));
            r.region = Some(1 + rng.next(9));
            r.community = Some(1 + rng.next(10));
            respondents.push(r);
        }
        RespondentCollection::from_respondents(respondents)
    }

    #[test]
    fn test_education_bands() {
        assert_eq!(education_band(10.0), 0);
        assert_eq!(education_band(12.0), 1);
        assert_eq!(education_band(12.5), 1);
        assert_eq!(education_band(14.0), 2);
        assert_eq!(education_band(16.0), 3);
    }

    #[test]
    fn test_bivariate_line() {
        let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let (intercept, slope) = bivariate_line(&points);
        assert!((intercept - 1.0).abs() < 1e-12);
        assert!((slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_report_on_synthetic_cohort() {
        let config = AnalysisConfig::default();
        let collection = synthetic_collection(200);

        let report = build_report(&config, &collection).unwrap();
        assert!(report.markdown.contains("## Descriptive statistics"));
        assert!(report.markdown.contains("## Linear model"));
        assert!(report.markdown.contains("## Logistic model"));
        assert_eq!(report.figures.len(), 3);
        assert!(report.model_summary.contains("\"linear\""));

        let parsed: serde_json::Value = serde_json::from_str(&report.model_summary).unwrap();
        assert_eq!(parsed["survey_year"], 1985);
        assert_eq!(parsed["respondents"], 200);
    }

    #[test]
    fn test_empty_collection_fails_at_fit() {
        let config = AnalysisConfig::default();
        let collection = RespondentCollection::new();
        assert!(build_report(&config, &collection).is_err());
    }
}
