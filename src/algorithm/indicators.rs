//! Indicator-variable derivation
//!
//! One pass over the raw codes producing the flattened dummy set. A
//! missing raw code leaves every dummy in its group missing; the
//! mobility outcome is missing unless both prestige scores are reported.

use crate::models::indicators::{CommunityGroup, MaritalStatus, Race, RegionGroup, Sex};
use crate::models::{Indicators, NetworkMeasures, Respondent};

/// Years of schooling treated as college-level network education
pub const COLLEGE_EDUCATION_YEARS: f64 = 16.0;

/// Derive the indicator set for one respondent
#[must_use]
pub fn derive_indicators(respondent: &Respondent, network: &NetworkMeasures) -> Indicators {
    let mut ind = Indicators::default();

    if let Some(code) = respondent.sex {
        ind.female = match Sex::from(code) {
            Sex::Unknown => None,
            sex => Some(sex == Sex::Female),
        };
    }

    if let Some(code) = respondent.race {
        let race = Race::from(code);
        if race != Race::Unknown {
            ind.black = Some(race == Race::Black);
            ind.other_race = Some(race == Race::Other);
        }
    }

    if let Some(age) = respondent.age {
        ind.age_18_29 = Some((18..=29).contains(&age));
        ind.age_30_44 = Some((30..=44).contains(&age));
        ind.age_45_59 = Some((45..=59).contains(&age));
        ind.age_60_plus = Some(age >= 60);
    }

    if let Some(years) = respondent.education_years {
        ind.educ_lt_high_school = Some(years < 12);
        ind.educ_high_school = Some(years == 12);
        ind.educ_some_college = Some((13..=15).contains(&years));
        ind.educ_college_plus = Some(years >= 16);
    }

    if let Some(code) = respondent.marital {
        let status = MaritalStatus::from(code);
        if status != MaritalStatus::Unknown {
            ind.married = Some(status == MaritalStatus::Married);
            ind.widowed = Some(status == MaritalStatus::Widowed);
            ind.divorced_separated = Some(status == MaritalStatus::DivorcedOrSeparated);
            ind.never_married = Some(status == MaritalStatus::NeverMarried);
        }
    }

    if let Some(code) = respondent.region {
        let region = RegionGroup::from(code);
        if region != RegionGroup::Unknown {
            ind.northeast = Some(region == RegionGroup::Northeast);
            ind.midwest = Some(region == RegionGroup::Midwest);
            ind.south = Some(region == RegionGroup::South);
            ind.west = Some(region == RegionGroup::West);
        }
    }

    if let Some(code) = respondent.community {
        let community = CommunityGroup::from(code);
        if community != CommunityGroup::Unknown {
            ind.big_city = Some(community == CommunityGroup::BigCity);
            ind.suburb = Some(community == CommunityGroup::Suburb);
            ind.small_town = Some(community == CommunityGroup::SmallTown);
            ind.rural = Some(community == CommunityGroup::Rural);
        }
    }

    ind.has_network_data = network.has_data();
    ind.high_network_education = network
        .peak_education
        .map(|educ| educ >= COLLEGE_EDUCATION_YEARS);

    ind.upward_mobility = match (respondent.prestige, respondent.father_prestige) {
        (Some(own), Some(father)) => Some(own > father),
        _ => None,
    };

    ind
}
