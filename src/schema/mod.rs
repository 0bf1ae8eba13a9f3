//! Column definitions for the survey extract
//!
//! The extract is one flat record per respondent: the two prestige
//! response variables, raw demographic codes, and five repeated contact
//! slots with education, years-known and parent/child flags.

use arrow_schema::{DataType, Field, Schema};

/// Number of contact slots per respondent
pub const CONTACT_SLOTS: usize = 5;

/// Respondent identifier column
pub const COL_ID: &str = "id";
/// Survey year column
pub const COL_YEAR: &str = "year";
/// Respondent occupational prestige score
pub const COL_PRESTIGE: &str = "prestige";
/// Father's occupational prestige score
pub const COL_FATHER_PRESTIGE: &str = "papres";
/// Respondent sex code (1 = male, 2 = female)
pub const COL_SEX: &str = "sex";
/// Respondent race code (1 = white, 2 = black, 3 = other)
pub const COL_RACE: &str = "race";
/// Respondent age in years
pub const COL_AGE: &str = "age";
/// Respondent completed years of schooling
pub const COL_EDUC: &str = "educ";
/// Marital status code (1 = married .. 5 = never married)
pub const COL_MARITAL: &str = "marital";
/// Census region code (1..=9)
pub const COL_REGION: &str = "region";
/// Community size/type code (1..=10, large city to open country)
pub const COL_COMMUNITY: &str = "commsize";

/// Column name for a contact slot's education level (1-based slot)
#[must_use]
pub fn contact_educ_col(slot: usize) -> String {
    format!("educ{slot}")
}

/// Column name for a contact slot's years known (1-based slot)
#[must_use]
pub fn contact_known_col(slot: usize) -> String {
    format!("known{slot}")
}

/// Column name for a contact slot's parent flag (1-based slot)
#[must_use]
pub fn contact_parent_col(slot: usize) -> String {
    format!("parent{slot}")
}

/// Column name for a contact slot's child flag (1-based slot)
#[must_use]
pub fn contact_child_col(slot: usize) -> String {
    format!("child{slot}")
}

/// All column names the analysis projects from the extract
#[must_use]
pub fn projected_columns() -> Vec<String> {
    let mut columns: Vec<String> = [
        COL_ID,
        COL_YEAR,
        COL_PRESTIGE,
        COL_FATHER_PRESTIGE,
        COL_SEX,
        COL_RACE,
        COL_AGE,
        COL_EDUC,
        COL_MARITAL,
        COL_REGION,
        COL_COMMUNITY,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    for slot in 1..=CONTACT_SLOTS {
        columns.push(contact_educ_col(slot));
        columns.push(contact_known_col(slot));
        columns.push(contact_parent_col(slot));
        columns.push(contact_child_col(slot));
    }

    columns
}

/// The projected Arrow schema for the survey extract
///
/// Every value column is nullable; the extract may carry genuine nulls
/// in addition to its numeric missing codes.
#[must_use]
pub fn extract_schema() -> Schema {
    let mut fields = vec![
        Field::new(COL_ID, DataType::Int64, false),
        Field::new(COL_YEAR, DataType::Int32, false),
        Field::new(COL_PRESTIGE, DataType::Int32, true),
        Field::new(COL_FATHER_PRESTIGE, DataType::Int32, true),
        Field::new(COL_SEX, DataType::Int32, true),
        Field::new(COL_RACE, DataType::Int32, true),
        Field::new(COL_AGE, DataType::Int32, true),
        Field::new(COL_EDUC, DataType::Int32, true),
        Field::new(COL_MARITAL, DataType::Int32, true),
        Field::new(COL_REGION, DataType::Int32, true),
        Field::new(COL_COMMUNITY, DataType::Int32, true),
    ];

    for slot in 1..=CONTACT_SLOTS {
        fields.push(Field::new(contact_educ_col(slot), DataType::Int32, true));
        fields.push(Field::new(contact_known_col(slot), DataType::Int32, true));
        fields.push(Field::new(contact_parent_col(slot), DataType::Int32, true));
        fields.push(Field::new(contact_child_col(slot), DataType::Int32, true));
    }

    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_column_names() {
        assert_eq!(contact_educ_col(1), "educ1");
        assert_eq!(contact_known_col(3), "known3");
        assert_eq!(contact_parent_col(5), "parent5");
        assert_eq!(contact_child_col(2), "child2");
    }

    #[test]
    fn test_projected_columns_cover_all_slots() {
        let columns = projected_columns();
        // 11 respondent-level columns + 4 per contact slot
        assert_eq!(columns.len(), 11 + 4 * CONTACT_SLOTS);
        assert!(columns.contains(&"educ5".to_string()));
        assert!(columns.contains(&"prestige".to_string()));
    }

    #[test]
    fn test_extract_schema_matches_projection() {
        let schema = extract_schema();
        let columns = projected_columns();
        assert_eq!(schema.fields().len(), columns.len());
        for name in columns {
            assert!(schema.index_of(&name).is_ok(), "missing field {name}");
        }
    }
}
