//! Network contact model
//!
//! A contact is one of up to five people a respondent named as someone
//! they discuss important matters with. Value fields are `Option`-typed;
//! the reader maps survey missing codes to `None` before this struct is
//! built.

/// One named contact in a respondent's discussion network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Contact's completed years of schooling
    pub education: Option<i32>,
    /// How long the respondent has known the contact, in years
    pub known_years: Option<i32>,
    /// Whether the contact is the respondent's parent
    pub is_parent: bool,
    /// Whether the contact is the respondent's child
    pub is_child: bool,
}

impl Contact {
    /// Create a contact with education and years-known values
    #[must_use]
    pub fn new(education: Option<i32>, known_years: Option<i32>) -> Self {
        Self {
            education,
            known_years,
            is_parent: false,
            is_child: false,
        }
    }

    /// Mark the contact as the respondent's parent
    #[must_use]
    pub fn as_parent(mut self) -> Self {
        self.is_parent = true;
        self
    }

    /// Mark the contact as the respondent's child
    #[must_use]
    pub fn as_child(mut self) -> Self {
        self.is_child = true;
        self
    }

    /// Whether the contact is excluded from network derivation as kin
    ///
    /// The network measures describe the non-family part of the
    /// discussion network, so parents and children are dropped.
    #[must_use]
    pub fn is_excluded_kin(&self) -> bool {
        self.is_parent || self.is_child
    }

    /// Whether the slot holds any reported data at all
    #[must_use]
    pub fn is_reported(&self) -> bool {
        self.education.is_some() || self.known_years.is_some()
    }
}
