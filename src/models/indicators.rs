//! Indicator variables derived from raw extract codes
//!
//! Categorical codes map to small enums; the `Indicators` struct is the
//! flattened dummy-variable view the regressions and tables consume.
//! Each dummy is `Option`-typed so missing raw codes stay missing.

use serde::Serialize;

/// Respondent sex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    /// Code 1
    Male,
    /// Code 2
    Female,
    /// Any other or missing code
    Unknown,
}

impl From<i32> for Sex {
    fn from(value: i32) -> Self {
        match value {
            1 => Sex::Male,
            2 => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// Respondent race group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Race {
    /// Code 1
    White,
    /// Code 2
    Black,
    /// Code 3
    Other,
    /// Any other or missing code
    Unknown,
}

impl From<i32> for Race {
    fn from(value: i32) -> Self {
        match value {
            1 => Race::White,
            2 => Race::Black,
            3 => Race::Other,
            _ => Race::Unknown,
        }
    }
}

/// Marital status group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaritalStatus {
    /// Code 1
    Married,
    /// Code 2
    Widowed,
    /// Codes 3 and 4
    DivorcedOrSeparated,
    /// Code 5
    NeverMarried,
    /// Any other or missing code
    Unknown,
}

impl From<i32> for MaritalStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => MaritalStatus::Married,
            2 => MaritalStatus::Widowed,
            3 | 4 => MaritalStatus::DivorcedOrSeparated,
            5 => MaritalStatus::NeverMarried,
            _ => MaritalStatus::Unknown,
        }
    }
}

impl MaritalStatus {
    /// Display label, `None` for unknown codes
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MaritalStatus::Married => Some("Married"),
            MaritalStatus::Widowed => Some("Widowed"),
            MaritalStatus::DivorcedOrSeparated => Some("Divorced/Separated"),
            MaritalStatus::NeverMarried => Some("Never married"),
            MaritalStatus::Unknown => None,
        }
    }
}

/// Census region collapsed to four groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionGroup {
    /// Codes 1 and 2
    Northeast,
    /// Codes 3 and 4
    Midwest,
    /// Codes 5, 6 and 7
    South,
    /// Codes 8 and 9
    West,
    /// Any other or missing code
    Unknown,
}

impl From<i32> for RegionGroup {
    fn from(value: i32) -> Self {
        match value {
            1 | 2 => RegionGroup::Northeast,
            3 | 4 => RegionGroup::Midwest,
            5..=7 => RegionGroup::South,
            8 | 9 => RegionGroup::West,
            _ => RegionGroup::Unknown,
        }
    }
}

impl RegionGroup {
    /// Display label, `None` for unknown codes
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            RegionGroup::Northeast => Some("Northeast"),
            RegionGroup::Midwest => Some("Midwest"),
            RegionGroup::South => Some("South"),
            RegionGroup::West => Some("West"),
            RegionGroup::Unknown => None,
        }
    }
}

/// Community size/type collapsed to four groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityGroup {
    /// Codes 1 and 2, large central cities
    BigCity,
    /// Codes 3 and 4, suburbs of large cities
    Suburb,
    /// Codes 5 through 8, smaller cities and towns
    SmallTown,
    /// Codes 9 and 10, open country
    Rural,
    /// Any other or missing code
    Unknown,
}

impl From<i32> for CommunityGroup {
    fn from(value: i32) -> Self {
        match value {
            1 | 2 => CommunityGroup::BigCity,
            3 | 4 => CommunityGroup::Suburb,
            5..=8 => CommunityGroup::SmallTown,
            9 | 10 => CommunityGroup::Rural,
            _ => CommunityGroup::Unknown,
        }
    }
}

impl CommunityGroup {
    /// Display label, `None` for unknown codes
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            CommunityGroup::BigCity => Some("Large city"),
            CommunityGroup::Suburb => Some("Suburb"),
            CommunityGroup::SmallTown => Some("Small city/town"),
            CommunityGroup::Rural => Some("Rural"),
            CommunityGroup::Unknown => None,
        }
    }
}

/// Flattened indicator variables for one respondent
///
/// Dummies derived from the same raw code share missingness: if the code
/// is missing every dummy in its group is `None`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Indicators {
    /// Sex
    pub female: Option<bool>,
    /// Race dummies (white is the reference)
    pub black: Option<bool>,
    /// Race: other than white or black
    pub other_race: Option<bool>,
    /// Age 18-29
    pub age_18_29: Option<bool>,
    /// Age 30-44
    pub age_30_44: Option<bool>,
    /// Age 45-59
    pub age_45_59: Option<bool>,
    /// Age 60 or older
    pub age_60_plus: Option<bool>,
    /// Fewer than 12 years of schooling
    pub educ_lt_high_school: Option<bool>,
    /// Exactly 12 years of schooling
    pub educ_high_school: Option<bool>,
    /// 13-15 years of schooling
    pub educ_some_college: Option<bool>,
    /// 16 or more years of schooling
    pub educ_college_plus: Option<bool>,
    /// Currently married
    pub married: Option<bool>,
    /// Widowed
    pub widowed: Option<bool>,
    /// Divorced or separated
    pub divorced_separated: Option<bool>,
    /// Never married
    pub never_married: Option<bool>,
    /// Northeast region
    pub northeast: Option<bool>,
    /// Midwest region
    pub midwest: Option<bool>,
    /// South region
    pub south: Option<bool>,
    /// West region
    pub west: Option<bool>,
    /// Large central city
    pub big_city: Option<bool>,
    /// Suburb of a large city
    pub suburb: Option<bool>,
    /// Smaller city or town
    pub small_town: Option<bool>,
    /// Open country
    pub rural: Option<bool>,
    /// Any eligible non-kin contact with reported education
    pub has_network_data: bool,
    /// Derived network education feature at college level or above
    pub high_network_education: Option<bool>,
    /// Own prestige strictly above father's prestige
    pub upward_mobility: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::from(1), Sex::Male);
        assert_eq!(Sex::from(2), Sex::Female);
        assert_eq!(Sex::from(9), Sex::Unknown);
    }

    #[test]
    fn test_marital_codes_collapse() {
        assert_eq!(MaritalStatus::from(3), MaritalStatus::DivorcedOrSeparated);
        assert_eq!(MaritalStatus::from(4), MaritalStatus::DivorcedOrSeparated);
        assert_eq!(MaritalStatus::from(5), MaritalStatus::NeverMarried);
    }

    #[test]
    fn test_region_grouping() {
        assert_eq!(RegionGroup::from(1), RegionGroup::Northeast);
        assert_eq!(RegionGroup::from(4), RegionGroup::Midwest);
        assert_eq!(RegionGroup::from(6), RegionGroup::South);
        assert_eq!(RegionGroup::from(9), RegionGroup::West);
        assert_eq!(RegionGroup::from(0), RegionGroup::Unknown);
    }

    #[test]
    fn test_community_grouping() {
        assert_eq!(CommunityGroup::from(2), CommunityGroup::BigCity);
        assert_eq!(CommunityGroup::from(3), CommunityGroup::Suburb);
        assert_eq!(CommunityGroup::from(7), CommunityGroup::SmallTown);
        assert_eq!(CommunityGroup::from(10), CommunityGroup::Rural);
    }
}
