//! Parquet loading for the survey extract
//!
//! Synchronous read with column projection, a survey-year row filter,
//! and typed column extraction that maps the extract's numeric missing
//! codes to `None`.

use anyhow::Context;
use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array};
use arrow::compute::filter as filter_array;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::fs::File;
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{Contact, Respondent};
use crate::schema::{
    contact_child_col, contact_educ_col, contact_known_col, contact_parent_col, extract_schema,
    COL_AGE, COL_COMMUNITY, COL_EDUC, COL_FATHER_PRESTIGE, COL_ID, COL_MARITAL, COL_PRESTIGE,
    COL_RACE, COL_REGION, COL_SEX, COL_YEAR, CONTACT_SLOTS,
};

/// Load the extract and build the respondent records for one survey year
///
/// An off-year or empty extract yields an empty vector, not an error.
pub fn load_respondents(config: &AnalysisConfig) -> Result<Vec<Respondent>> {
    let schema = extract_schema();
    let batches = read_parquet(
        &config.input_path,
        Some(&schema),
        config.fail_on_missing_column,
    )?;

    let mut respondents = Vec::new();
    for batch in &batches {
        let filtered = filter_batch_by_year(batch, config.survey_year)?;
        if filtered.num_rows() == 0 {
            continue;
        }
        respondents.extend(batch_to_respondents(&filtered, config)?);
    }

    log::info!(
        "Loaded {} respondents for survey year {} from {}",
        respondents.len(),
        config.survey_year,
        config.input_path.display()
    );

    Ok(respondents)
}

/// Read a parquet file into Arrow record batches with column projection
pub fn read_parquet(
    path: &Path,
    schema: Option<&Schema>,
    fail_on_missing_column: bool,
) -> Result<Vec<RecordBatch>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open parquet file: {}", path.display()))?;

    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet file: {}", path.display()))?;

    let reader = if let Some(schema) = schema {
        // Convert schema to projection indices, skipping fields that
        // don't exist in the file
        let mut projection = Vec::new();
        let file_schema = reader_builder.schema();

        for f in schema.fields() {
            let field_name = f.name();
            match file_schema.index_of(field_name) {
                Ok(idx) => projection.push(idx),
                Err(_) if fail_on_missing_column => {
                    return Err(AnalysisError::column(format!(
                        "Field {field_name} not found in parquet file {}",
                        path.display()
                    )));
                }
                Err(_) => {
                    log::warn!("Field {field_name} not found in parquet file, skipping");
                }
            }
        }

        if projection.is_empty() {
            log::warn!("No matching fields found in schema projection, reading all columns");
            reader_builder
                .build()
                .with_context(|| format!("Failed to build parquet reader for {}", path.display()))?
        } else {
            let projection_mask =
                ProjectionMask::leaves(reader_builder.parquet_schema(), projection);
            reader_builder
                .with_projection(projection_mask)
                .build()
                .with_context(|| {
                    format!(
                        "Failed to build parquet reader with projection for {}",
                        path.display()
                    )
                })?
        }
    } else {
        reader_builder
            .build()
            .with_context(|| format!("Failed to build parquet reader for {}", path.display()))?
    };

    let mut batches = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .with_context(|| format!("Failed to read record batch from {}", path.display()))?;
        batches.push(batch);
    }

    Ok(batches)
}

/// Keep only the rows whose year column equals the survey year
pub fn filter_batch_by_year(batch: &RecordBatch, year: i32) -> Result<RecordBatch> {
    let year_idx = batch
        .schema()
        .index_of(COL_YEAR)
        .map_err(|_| AnalysisError::column("year column not found in record batch"))?;

    let year_array = batch.column(year_idx);
    let mut values = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        values.push(numeric_value(year_array, row) == Some(f64::from(year)));
    }
    let mask = BooleanArray::from(values);

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| filter_array(col, &mask))
        .collect::<arrow::error::Result<_>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Build respondent records from one filtered batch
fn batch_to_respondents(batch: &RecordBatch, config: &AnalysisConfig) -> Result<Vec<Respondent>> {
    let columns = ColumnView::new(batch);
    let respondent_codes = &config.respondent_missing_codes;
    let contact_codes = &config.contact_missing_codes;

    let mut respondents = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let id = columns
            .integer(COL_ID, row)
            .ok_or_else(|| AnalysisError::column(format!("missing id in row {row}")))?;

        let mut respondent = Respondent::new(id, config.survey_year);
        respondent.prestige = columns.coded(COL_PRESTIGE, row, respondent_codes);
        respondent.father_prestige = columns.coded(COL_FATHER_PRESTIGE, row, respondent_codes);
        respondent.sex = columns.coded(COL_SEX, row, respondent_codes);
        respondent.race = columns.coded(COL_RACE, row, respondent_codes);
        respondent.age = columns.coded(COL_AGE, row, respondent_codes);
        respondent.education_years = columns.coded(COL_EDUC, row, respondent_codes);
        respondent.marital = columns.coded(COL_MARITAL, row, respondent_codes);
        respondent.region = columns.coded(COL_REGION, row, respondent_codes);
        respondent.community = columns.coded(COL_COMMUNITY, row, respondent_codes);

        for slot in 1..=CONTACT_SLOTS {
            let mut contact = Contact::new(
                columns.coded(&contact_educ_col(slot), row, contact_codes),
                columns.coded(&contact_known_col(slot), row, contact_codes),
            );
            if columns.flag(&contact_parent_col(slot), row) {
                contact = contact.as_parent();
            }
            if columns.flag(&contact_child_col(slot), row) {
                contact = contact.as_child();
            }
            respondent.contacts.push(contact);
        }

        respondents.push(respondent);
    }

    Ok(respondents)
}

/// Typed per-batch column access
///
/// Extracts come from different conversion tools, so numeric columns may
/// arrive as Int32, Int64 or Float64; all three are accepted.
struct ColumnView<'a> {
    batch: &'a RecordBatch,
}

impl<'a> ColumnView<'a> {
    fn new(batch: &'a RecordBatch) -> Self {
        Self { batch }
    }

    fn array(&self, name: &str) -> Option<&ArrayRef> {
        self.batch
            .schema()
            .index_of(name)
            .ok()
            .map(|idx| self.batch.column(idx))
    }

    /// Integer value, `None` on null or absent column
    fn integer(&self, name: &str, row: usize) -> Option<i64> {
        let array = self.array(name)?;
        numeric_value(array, row).map(|v| v as i64)
    }

    /// Integer value with missing-code mapping
    ///
    /// Values outside the i32 code range read as missing rather than
    /// wrapping into a valid code.
    fn coded(&self, name: &str, row: usize, missing_codes: &[i32]) -> Option<i32> {
        let value = i32::try_from(self.integer(name, row)?).ok()?;
        if missing_codes.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Boolean flag column: nonzero means set, null or absent means unset
    fn flag(&self, name: &str, row: usize) -> bool {
        self.integer(name, row).is_some_and(|v| v != 0)
    }
}

/// Numeric value from an Int32/Int64/Float64 array, `None` on null
fn numeric_value(array: &ArrayRef, row: usize) -> Option<f64> {
    if array.is_null(row) {
        return None;
    }
    if let Some(ints) = array.as_any().downcast_ref::<Int32Array>() {
        return Some(f64::from(ints.value(row)));
    }
    if let Some(ints) = array.as_any().downcast_ref::<Int64Array>() {
        return Some(ints.value(row) as f64);
    }
    if let Some(floats) = array.as_any().downcast_ref::<Float64Array>() {
        return Some(floats.value(row));
    }
    None
}
