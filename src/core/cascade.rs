use std::collections::BTreeSet;

use crate::core::graph::WishGraph;
use crate::core::registry::ParticipantRegistry;
use crate::models::WishMap;

/// Which wish lists a cascade pass runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeScope {
    /// Explicit wishes kept for scoring
    InitialWishes,
    /// Completed preference lists handed to the solver
    CompletedLists,
}

/// Removes participants who declined the social component
///
/// The full opted-out set is fixed up front, so the result does not depend
/// on the order in which names are removed, and repeated passes are no-ops.
#[derive(Debug, Clone, Default)]
pub struct OptOutCascade {
    opted_out: BTreeSet<String>,
}

impl OptOutCascade {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            opted_out: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_registry(registry: &ParticipantRegistry) -> Self {
        Self {
            opted_out: registry.opted_out_names(),
        }
    }

    pub fn is_opted_out(&self, name: &str) -> bool {
        self.opted_out.contains(name)
    }

    /// Drop every opted-out entry and every mention of an opted-out name
    ///
    /// Returns how many entries were removed from the map.
    pub fn apply(&self, wishes: &mut WishMap, scope: CascadeScope) -> usize {
        let mut removed = 0;
        for name in &self.opted_out {
            if wishes.remove(name).is_some() {
                removed += 1;
                match scope {
                    CascadeScope::CompletedLists => {
                        tracing::info!("Removed {:?} from wishes.", name)
                    }
                    CascadeScope::InitialWishes => {
                        tracing::debug!("Removed {:?} from initial wishes.", name)
                    }
                }
            }
        }

        for list in wishes.values_mut() {
            list.retain(|name| !self.is_opted_out(name));
        }
        removed
    }

    /// Drop every opted-out node, and with it every edge touching it
    pub fn apply_to_graph(&self, graph: &mut WishGraph) -> usize {
        self.opted_out
            .iter()
            .filter(|name| graph.remove_node(name))
            .count()
    }
}
