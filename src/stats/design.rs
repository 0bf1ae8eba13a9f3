//! Model design-matrix construction
//!
//! Builds the shared predictor set for both regressions from the
//! analyzed collection. Rows with any missing predictor or response are
//! dropped listwise; the count of dropped rows is kept so tables can
//! report the effective n.

use crate::error::{AnalysisError, Result};
use crate::models::{AnalyzedRespondent, RespondentCollection};

/// Intercept term name
pub const TERM_INTERCEPT: &str = "(Intercept)";

/// A prepared design matrix with its response vector
#[derive(Debug, Clone)]
pub struct ModelData {
    /// Term names, aligned with the columns of each row
    pub terms: Vec<String>,
    /// Design rows (intercept first)
    pub rows: Vec<Vec<f64>>,
    /// Response values, one per row
    pub response: Vec<f64>,
    /// Rows dropped for missing values
    pub dropped: usize,
}

impl ModelData {
    /// Effective number of observations
    #[must_use]
    pub fn n(&self) -> usize {
        self.rows.len()
    }

    /// Number of model terms including the intercept
    #[must_use]
    pub fn k(&self) -> usize {
        self.terms.len()
    }

    /// Fail unless the design has more observations than terms
    pub fn ensure_estimable(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(AnalysisError::model(
                "empty design: no rows survived missing-value deletion",
            ));
        }
        if self.n() <= self.k() {
            return Err(AnalysisError::model(format!(
                "design has {} rows for {} terms",
                self.n(),
                self.k()
            )));
        }
        Ok(())
    }
}

/// The shared predictor term names (intercept first)
#[must_use]
pub fn predictor_terms() -> Vec<String> {
    [
        TERM_INTERCEPT,
        "father_prestige",
        "network_education",
        "network_known_years",
        "female",
        "black",
        "other_race",
        "age_30_44",
        "age_45_59",
        "age_60_plus",
        "educ_high_school",
        "educ_some_college",
        "educ_college_plus",
        "widowed",
        "divorced_separated",
        "never_married",
        "midwest",
        "south",
        "west",
        "suburb",
        "small_town",
        "rural",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn dummy(value: Option<bool>) -> Option<f64> {
    value.map(|b| if b { 1.0 } else { 0.0 })
}

/// Predictor row for one respondent, `None` if any predictor is missing
fn predictor_row(record: &AnalyzedRespondent) -> Option<Vec<f64>> {
    let r = &record.respondent;
    let ind = &record.indicators;

    Some(vec![
        1.0,
        f64::from(r.father_prestige?),
        record.network.peak_education?,
        record.network.peak_known_years?,
        dummy(ind.female)?,
        dummy(ind.black)?,
        dummy(ind.other_race)?,
        dummy(ind.age_30_44)?,
        dummy(ind.age_45_59)?,
        dummy(ind.age_60_plus)?,
        dummy(ind.educ_high_school)?,
        dummy(ind.educ_some_college)?,
        dummy(ind.educ_college_plus)?,
        dummy(ind.widowed)?,
        dummy(ind.divorced_separated)?,
        dummy(ind.never_married)?,
        dummy(ind.midwest)?,
        dummy(ind.south)?,
        dummy(ind.west)?,
        dummy(ind.suburb)?,
        dummy(ind.small_town)?,
        dummy(ind.rural)?,
    ])
}

fn build<F>(collection: &RespondentCollection, response: F) -> ModelData
where
    F: Fn(&AnalyzedRespondent) -> Option<f64>,
{
    let mut rows = Vec::new();
    let mut responses = Vec::new();
    let mut dropped = 0;

    for record in collection {
        match (predictor_row(record), response(record)) {
            (Some(row), Some(y)) => {
                rows.push(row);
                responses.push(y);
            }
            _ => dropped += 1,
        }
    }

    ModelData {
        terms: predictor_terms(),
        rows,
        response: responses,
        dropped,
    }
}

/// Design for the linear model: occupational prestige as the response
#[must_use]
pub fn prestige_design(collection: &RespondentCollection) -> ModelData {
    build(collection, |record| {
        record.respondent.prestige.map(f64::from)
    })
}

/// Design for the logistic model: upward mobility as a 0/1 response
#[must_use]
pub fn mobility_design(collection: &RespondentCollection) -> ModelData {
    build(collection, |record| {
        record
            .indicators
            .upward_mobility
            .map(|up| if up { 1.0 } else { 0.0 })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contact, Respondent};

    fn complete_respondent(id: i64) -> Respondent {
        let mut r = Respondent::new(id, 1985)
            .with_prestige(Some(50), Some(40))
            .with_contact(Contact::new(Some(12), Some(5)));
        r.sex = Some(1);
        r.race = Some(1);
        r.age = Some(35);
        r.education_years = Some(12);
        r.marital = Some(1);
        r.region = Some(3);
        r.community = Some(5);
        r
    }

    #[test]
    fn test_complete_record_yields_row() {
        let collection = RespondentCollection::from_respondents(vec![complete_respondent(1)]);
        let design = prestige_design(&collection);

        assert_eq!(design.n(), 1);
        assert_eq!(design.dropped, 0);
        assert_eq!(design.rows[0].len(), design.terms.len());
        assert_eq!(design.rows[0][0], 1.0);
        assert_eq!(design.response[0], 50.0);
    }

    #[test]
    fn test_listwise_deletion() {
        let mut incomplete = complete_respondent(2);
        incomplete.age = None;

        let collection =
            RespondentCollection::from_respondents(vec![complete_respondent(1), incomplete]);
        let design = prestige_design(&collection);

        assert_eq!(design.n(), 1);
        assert_eq!(design.dropped, 1);
    }

    #[test]
    fn test_mobility_response_is_binary() {
        let collection = RespondentCollection::from_respondents(vec![complete_respondent(1)]);
        let design = mobility_design(&collection);

        assert_eq!(design.n(), 1);
        assert_eq!(design.response[0], 1.0);
    }

    #[test]
    fn test_empty_design_is_not_estimable() {
        let collection = RespondentCollection::new();
        let design = prestige_design(&collection);
        assert!(design.ensure_estimable().is_err());
    }
}
