//! Respondent entity model
//!
//! A respondent is one surveyed individual, the unit of analysis. Raw
//! demographic fields keep their extract codes; the indicator derivation
//! turns them into analysis variables.

use smallvec::SmallVec;

use super::contact::Contact;
use crate::schema::CONTACT_SLOTS;

/// One survey respondent with raw fields and contact slots
#[derive(Debug, Clone)]
pub struct Respondent {
    /// Respondent identifier from the extract
    pub id: i64,
    /// Survey year the record belongs to
    pub year: i32,
    /// Occupational prestige score (mobility outcome measure)
    pub prestige: Option<i32>,
    /// Father's occupational prestige score
    pub father_prestige: Option<i32>,
    /// Sex code (1 = male, 2 = female)
    pub sex: Option<i32>,
    /// Race code (1 = white, 2 = black, 3 = other)
    pub race: Option<i32>,
    /// Age in years
    pub age: Option<i32>,
    /// Completed years of schooling
    pub education_years: Option<i32>,
    /// Marital status code (1 = married, 2 = widowed, 3 = divorced,
    /// 4 = separated, 5 = never married)
    pub marital: Option<i32>,
    /// Census region code (1..=9)
    pub region: Option<i32>,
    /// Community size/type code (1..=10)
    pub community: Option<i32>,
    /// The up-to-five named discussion contacts
    pub contacts: SmallVec<[Contact; CONTACT_SLOTS]>,
}

impl Respondent {
    /// Create a respondent with empty contact slots
    #[must_use]
    pub fn new(id: i64, year: i32) -> Self {
        Self {
            id,
            year,
            prestige: None,
            father_prestige: None,
            sex: None,
            race: None,
            age: None,
            education_years: None,
            marital: None,
            region: None,
            community: None,
            contacts: SmallVec::new(),
        }
    }

    /// Set both prestige scores
    #[must_use]
    pub fn with_prestige(mut self, own: Option<i32>, father: Option<i32>) -> Self {
        self.prestige = own;
        self.father_prestige = father;
        self
    }

    /// Append a contact slot
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.push(contact);
        self
    }

    /// Contacts that carry any reported data
    pub fn reported_contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.is_reported())
    }

    /// Number of contacts with any reported data
    #[must_use]
    pub fn network_size(&self) -> usize {
        self.reported_contacts().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_size_skips_empty_slots() {
        let respondent = Respondent::new(1, 1985)
            .with_contact(Contact::new(Some(12), Some(4)))
            .with_contact(Contact::default())
            .with_contact(Contact::new(None, Some(2)));

        assert_eq!(respondent.contacts.len(), 3);
        assert_eq!(respondent.network_size(), 2);
    }

    #[test]
    fn test_with_prestige() {
        let respondent = Respondent::new(7, 1985).with_prestige(Some(48), Some(35));
        assert_eq!(respondent.prestige, Some(48));
        assert_eq!(respondent.father_prestige, Some(35));
    }
}
