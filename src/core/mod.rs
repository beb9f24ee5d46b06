// Core algorithm exports
pub mod cascade;
pub mod completion;
pub mod distance;
pub mod graph;
pub mod pipeline;
pub mod registry;
pub mod scoring;
pub mod shuffle;
pub mod solver;

pub use cascade::{CascadeScope, OptOutCascade};
pub use completion::PreferenceCompleter;
pub use distance::{bfs_distances, rank_by_distance};
pub use graph::{build_graphs, WishGraph, WishGraphs};
pub use pipeline::{build_preferences, run, Preferences};
pub use registry::{ParticipantRegistry, RegistryError};
pub use scoring::{score_matching, unsatisfied_wishes};
pub use shuffle::{seed_for, seeded_permutation};
pub use solver::{IrvingSolver, RoommateSolver, SolverError};
