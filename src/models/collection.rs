//! Respondent collection
//!
//! Holds loaded respondents together with their derived measures. The
//! derivations run once when records are added; nothing in here mutates
//! a derived value afterwards.

use super::indicators::Indicators;
use super::measures::NetworkMeasures;
use super::respondent::Respondent;
use crate::algorithm::{derive_indicators, derive_network_measures};

/// A respondent paired with its derived variables
#[derive(Debug, Clone)]
pub struct AnalyzedRespondent {
    /// The raw respondent record
    pub respondent: Respondent,
    /// Derived network-composition features
    pub network: NetworkMeasures,
    /// Derived indicator variables
    pub indicators: Indicators,
}

/// A collection of respondents with derived variables attached
#[derive(Debug, Default)]
pub struct RespondentCollection {
    records: Vec<AnalyzedRespondent>,
}

impl RespondentCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive measures for a batch of respondents and build a collection
    #[must_use]
    pub fn from_respondents(respondents: Vec<Respondent>) -> Self {
        let mut collection = Self::new();
        for respondent in respondents {
            collection.add(respondent);
        }
        collection
    }

    /// Add one respondent, deriving its variables
    pub fn add(&mut self, respondent: Respondent) {
        let network = derive_network_measures(&respondent);
        let indicators = derive_indicators(&respondent, &network);
        self.records.push(AnalyzedRespondent {
            respondent,
            network,
            indicators,
        });
    }

    /// Number of respondents in the collection
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all analyzed respondents
    pub fn iter(&self) -> impl Iterator<Item = &AnalyzedRespondent> {
        self.records.iter()
    }

    /// Respondents matching a predicate
    pub fn filter<F>(&self, predicate: F) -> Vec<&AnalyzedRespondent>
    where
        F: Fn(&AnalyzedRespondent) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Respondents with at least one derived network feature
    #[must_use]
    pub fn with_network_data(&self) -> Vec<&AnalyzedRespondent> {
        self.filter(|r| r.network.has_data())
    }

    /// Respondents with both prestige scores reported
    #[must_use]
    pub fn with_mobility_data(&self) -> Vec<&AnalyzedRespondent> {
        self.filter(|r| {
            r.respondent.prestige.is_some() && r.respondent.father_prestige.is_some()
        })
    }
}

impl<'a> IntoIterator for &'a RespondentCollection {
    type Item = &'a AnalyzedRespondent;
    type IntoIter = std::slice::Iter<'a, AnalyzedRespondent>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;

    fn respondent_with_network(id: i64) -> Respondent {
        Respondent::new(id, 1985)
            .with_prestige(Some(50), Some(40))
            .with_contact(Contact::new(Some(12), Some(5)))
    }

    #[test]
    fn test_collection_derives_on_add() {
        let collection =
            RespondentCollection::from_respondents(vec![respondent_with_network(1)]);

        assert_eq!(collection.len(), 1);
        let record = collection.iter().next().unwrap();
        assert_eq!(record.network.peak_education, Some(12.0));
        assert_eq!(record.indicators.upward_mobility, Some(true));
    }

    #[test]
    fn test_filters() {
        let mut collection = RespondentCollection::new();
        collection.add(respondent_with_network(1));
        // No contacts, no prestige: excluded from both filtered views
        collection.add(Respondent::new(2, 1985));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.with_network_data().len(), 1);
        assert_eq!(collection.with_mobility_data().len(), 1);
    }
}
