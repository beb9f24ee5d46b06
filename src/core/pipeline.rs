use crate::core::cascade::{CascadeScope, OptOutCascade};
use crate::core::completion::PreferenceCompleter;
use crate::core::graph::build_graphs;
use crate::core::registry::ParticipantRegistry;
use crate::core::scoring::score_matching;
use crate::core::solver::{RoommateSolver, SolverError};
use crate::models::{MatchReport, PreferenceTable, WishMap};

/// Wish snapshots produced by one completion run
#[derive(Debug, Clone)]
pub struct Preferences {
    /// Explicit wishes of opted-in participants, kept for scoring
    pub initial: WishMap,
    /// Total preference order for every opted-in participant
    pub complete: PreferenceTable,
}

/// Complete every opted-in participant's preference list
///
/// # Pipeline Stages
/// 1. Explicit wish snapshot
/// 2. Academic and social graph construction
/// 3. Opt-out cascade over the graphs and the snapshot
/// 4. Preference completion
/// 5. Opt-out cascade over the completed lists
pub fn build_preferences(registry: &ParticipantRegistry) -> Preferences {
    let cascade = OptOutCascade::from_registry(registry);

    let mut initial = registry.initial_wishes();
    let mut graphs = build_graphs(registry.iter());

    cascade.apply_to_graph(&mut graphs.academic);
    cascade.apply_to_graph(&mut graphs.social);
    cascade.apply(&mut initial, CascadeScope::InitialWishes);

    let mut complete = PreferenceCompleter::new(registry, &graphs, &initial).complete_all();
    cascade.apply(&mut complete, CascadeScope::CompletedLists);

    tracing::info!(
        "Completed preference lists for {} of {} participants",
        complete.len(),
        registry.len()
    );

    Preferences { initial, complete }
}

/// Complete, solve and score in one go
pub fn run(
    registry: &ParticipantRegistry,
    solver: &impl RoommateSolver,
) -> Result<MatchReport, SolverError> {
    let preferences = build_preferences(registry);

    let matching = solver.solve(&preferences.complete)?;
    tracing::info!("Found a stable matching with {} pairs", matching.len());

    let score = score_matching(&preferences.initial, &matching);
    tracing::info!(
        "{} of {} participants got one of their wishes",
        score,
        preferences.initial.len()
    );

    Ok(MatchReport {
        matching,
        score,
        opted_in: preferences.complete.len(),
    })
}
