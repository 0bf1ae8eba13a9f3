//! Configuration for the analysis run.

use std::path::PathBuf;

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Survey year the extract is filtered to
    pub survey_year: i32,
    /// Path to the Parquet extract
    pub input_path: PathBuf,
    /// Directory the report artifacts are written to
    pub output_dir: PathBuf,
    /// Title of the generated report
    pub report_title: String,
    /// Numeric codes treated as missing in contact fields
    ///
    /// The extract's codebook marks inapplicable, don't-know and
    /// no-answer responses with sentinel codes rather than nulls.
    pub contact_missing_codes: Vec<i32>,
    /// Numeric codes treated as missing in respondent-level fields
    pub respondent_missing_codes: Vec<i32>,
    /// Fail instead of warning when a projected column is absent
    pub fail_on_missing_column: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            survey_year: 1985,
            input_path: PathBuf::from("data/survey_extract.parquet"),
            output_dir: PathBuf::from("report"),
            report_title: "Discussion-Network Composition and Occupational Mobility".to_string(),
            contact_missing_codes: vec![0, 98, 99],
            respondent_missing_codes: vec![98, 99],
            fail_on_missing_column: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a config for a given extract path
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    /// Set the survey year
    #[must_use]
    pub fn with_survey_year(mut self, year: i32) -> Self {
        self.survey_year = year;
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the report title
    #[must_use]
    pub fn with_report_title(mut self, title: impl Into<String>) -> Self {
        self.report_title = title.into();
        self
    }

    /// Override the contact-field missing codes
    #[must_use]
    pub fn with_contact_missing_codes(mut self, codes: Vec<i32>) -> Self {
        self.contact_missing_codes = codes;
        self
    }

    /// Override the respondent-field missing codes
    #[must_use]
    pub fn with_respondent_missing_codes(mut self, codes: Vec<i32>) -> Self {
        self.respondent_missing_codes = codes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.survey_year, 1985);
        assert_eq!(config.contact_missing_codes, vec![0, 98, 99]);
        assert!(!config.fail_on_missing_column);
    }

    #[test]
    fn test_builder_setters() {
        let config = AnalysisConfig::new("extract.parquet")
            .with_survey_year(1987)
            .with_output_dir("out")
            .with_report_title("Networks");

        assert_eq!(config.survey_year, 1987);
        assert_eq!(config.input_path, PathBuf::from("extract.parquet"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.report_title, "Networks");
    }
}
