use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Participant name -> ordered list of other participant names.
///
/// Used both for the explicit (partial) wish snapshot and for the completed
/// preference lists handed to the solver. `BTreeMap` keeps iteration order
/// stable between runs.
pub type WishMap = BTreeMap<String, Vec<String>>;

/// Completed preference lists, one total order per opted-in participant
pub type PreferenceTable = BTreeMap<String, Vec<String>>;

/// The two gender categories of the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn opposite(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }
}

/// A survey participant as seen by the completion engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub gender: Gender,
    #[serde(rename = "optedIn")]
    pub opted_in: bool,
    /// Ranked choices, best first. Never contains duplicates.
    pub wishes: Vec<String>,
    #[serde(default)]
    pub partner: Option<String>,
}

impl Participant {
    /// Explicit wishes in survey order: partner first, then ranked choices
    pub fn explicit_wishes(&self) -> Vec<String> {
        self.partner
            .iter()
            .chain(self.wishes.iter())
            .cloned()
            .collect()
    }

    /// Every name this participant mentions anywhere in their answers
    pub fn mentioned(&self) -> impl Iterator<Item = &str> {
        self.wishes
            .iter()
            .chain(self.partner.iter())
            .map(String::as_str)
    }
}
