use serde::{Deserialize, Serialize};

use crate::models::matching::Matching;

/// A participant whose assigned partner is not among their original wishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsatisfiedWish {
    pub participant: String,
    pub partner: Option<String>,
    pub wishes: Vec<String>,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub matching: Matching,
    /// Participants whose partner appears in their original wishes
    pub score: usize,
    pub opted_in: usize,
}

/// Summary printed by the CLI after a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub participants: usize,
    #[serde(rename = "optedIn")]
    pub opted_in: usize,
    pub pairs: usize,
    pub satisfied: usize,
    pub output: String,
}
