// Service exports
pub mod persistence;
pub mod survey;

pub use persistence::{export_matching, import_matching, read_matching, write_matching, PersistenceError};
pub use survey::{SurveyError, SurveyReader};
