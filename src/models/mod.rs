// Model exports
pub mod domain;
pub mod matching;
pub mod report;
pub mod survey;

pub use domain::{Gender, Participant, PreferenceTable, WishMap};
pub use matching::Matching;
pub use report::{MatchReport, RunSummary, UnsatisfiedWish};
pub use survey::SurveyRow;
