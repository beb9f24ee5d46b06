use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Gender;

/// One answered survey form, after column and answer decoding
///
/// Wishes are raw: blanks are already dropped but duplicates are kept so the
/// registry can reject them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SurveyRow {
    #[validate(length(min = 1))]
    pub name: String,
    pub gender: Gender,
    #[serde(rename = "optedIn")]
    pub opted_in: bool,
    #[serde(default)]
    pub wishes: Vec<String>,
    #[serde(default)]
    pub partner: Option<String>,
}

impl SurveyRow {
    pub fn new(name: &str, gender: Gender, opted_in: bool) -> Self {
        Self {
            name: name.to_string(),
            gender,
            opted_in,
            wishes: Vec::new(),
            partner: None,
        }
    }

    pub fn with_wishes(mut self, wishes: &[&str]) -> Self {
        self.wishes = wishes.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn with_partner(mut self, partner: &str) -> Self {
        self.partner = Some(partner.to_string());
        self
    }
}
