//! Roommate Algo - stable roommate assignment from partial wish lists
//!
//! Survey answers name only a few wished-for roommates. This library
//! completes each opted-in participant's wishes into a total preference
//! order (explicit wishes, then graph distance, then a seeded shuffle),
//! solves the stable roommates problem over those orders, and scores and
//! persists the resulting pairing.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    build_preferences, IrvingSolver, ParticipantRegistry, PreferenceCompleter, RoommateSolver,
    SolverError,
};
pub use models::{Gender, MatchReport, Matching, Participant, PreferenceTable, SurveyRow, WishMap};
