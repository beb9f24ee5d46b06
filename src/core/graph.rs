//! Undirected wish graphs over participant names.
//!
//! An edge means "one of the two named the other in a wish". Rank and
//! direction are dropped on insertion; only reachability matters.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::Participant;

/// Undirected simple graph keyed by participant name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishGraph {
    /// name -> neighbors
    adj: BTreeMap<String, BTreeSet<String>>,
}

impl WishGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str) {
        self.adj.entry(name.to_string()).or_default();
    }

    /// Add the undirected edge `a - b`. Self loops are ignored and repeated
    /// edges collapse into one.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        if a == b {
            self.add_node(a);
            return;
        }
        self.adj.entry(a.to_string()).or_default().insert(b.to_string());
        self.adj.entry(b.to_string()).or_default().insert(a.to_string());
    }

    /// Remove a node and every edge touching it. No-op if absent.
    pub fn remove_node(&mut self, name: &str) -> bool {
        let Some(neighbors) = self.adj.remove(name) else {
            return false;
        };
        for neighbor in neighbors {
            if let Some(set) = self.adj.get_mut(&neighbor) {
                set.remove(name);
            }
        }
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adj.contains_key(name)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.adj.get(a).is_some_and(|n| n.contains(b))
    }

    pub fn neighbors(&self, name: &str) -> impl Iterator<Item = &str> {
        self.adj
            .get(name)
            .into_iter()
            .flat_map(|n| n.iter().map(String::as_str))
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adj.keys().map(String::as_str)
    }
}

/// The academic (ranked wishes only) and social (ranked wishes plus
/// partner) graphs, built together
#[derive(Debug, Clone, Default)]
pub struct WishGraphs {
    pub academic: WishGraph,
    pub social: WishGraph,
}

/// Build fresh academic and social graphs from the given participants
pub fn build_graphs<'a, I>(participants: I) -> WishGraphs
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut graphs = WishGraphs::default();

    for participant in participants {
        let name = participant.name.as_str();
        graphs.academic.add_node(name);
        graphs.social.add_node(name);

        for wish in &participant.wishes {
            graphs.academic.add_edge(name, wish);
            graphs.social.add_edge(name, wish);
        }

        if let Some(partner) = &participant.partner {
            graphs.social.add_edge(name, partner);
        }
    }

    tracing::debug!(
        "Built wish graphs: academic {} nodes/{} edges, social {} nodes/{} edges",
        graphs.academic.node_count(),
        graphs.academic.edge_count(),
        graphs.social.node_count(),
        graphs.social.edge_count(),
    );

    graphs
}
