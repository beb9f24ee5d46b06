use std::collections::HashSet;

use crate::core::distance::rank_by_distance;
use crate::core::graph::WishGraphs;
use crate::core::registry::ParticipantRegistry;
use crate::core::shuffle::seeded_permutation;
use crate::models::{Gender, Participant, PreferenceTable, WishMap};

/// Ordered list under construction: no duplicates, never the owner
struct Ranking<'a> {
    owner: &'a str,
    order: Vec<String>,
    placed: HashSet<String>,
}

impl<'a> Ranking<'a> {
    fn new(owner: &'a str) -> Self {
        Self {
            owner,
            order: Vec::new(),
            placed: HashSet::new(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        name == self.owner || self.placed.contains(name)
    }

    fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.contains(name) {
                self.placed.insert(name.to_string());
                self.order.push(name.to_string());
            }
        }
    }
}

/// Turns partial wish lists into total preference orders
///
/// For each opted-in participant the order is built in layers, skipping
/// anyone already placed:
///
/// 1. Explicit wishes (partner first, then ranked choices)
/// 2. Same gender, by distance in the academic graph
/// 3. Same gender, by distance in the social graph
/// 4. Remaining same gender, in seeded shuffle order
/// 5. Opposite gender, by distance in the social graph
/// 6. Remaining opposite gender, in seeded shuffle order
///
/// The graphs and wish snapshot must already have been cascaded, so that
/// opted-out participants never appear in them.
pub struct PreferenceCompleter<'a> {
    registry: &'a ParticipantRegistry,
    graphs: &'a WishGraphs,
    explicit: &'a WishMap,
}

impl<'a> PreferenceCompleter<'a> {
    pub fn new(
        registry: &'a ParticipantRegistry,
        graphs: &'a WishGraphs,
        explicit: &'a WishMap,
    ) -> Self {
        Self {
            registry,
            graphs,
            explicit,
        }
    }

    fn is_candidate(&self, name: &str, gender: Gender) -> bool {
        self.registry
            .get(name)
            .is_some_and(|p| p.opted_in && p.gender == gender)
    }

    fn of_gender(&self, names: &[String], gender: Gender) -> Vec<String> {
        names
            .iter()
            .filter(|name| self.is_candidate(name, gender))
            .cloned()
            .collect()
    }

    /// Complete the preference order for one participant
    pub fn complete(&self, participant: &Participant) -> Vec<String> {
        let name = participant.name.as_str();
        let own = participant.gender;
        let other = own.opposite();
        let mut ranking = Ranking::new(name);

        // 1. explicit wishes, as left by the cascade
        let explicit = self
            .explicit
            .get(name)
            .cloned()
            .unwrap_or_else(|| participant.explicit_wishes());
        ranking.extend(explicit.iter().filter(|w| self.registry.get(w).is_some_and(|p| p.opted_in)));

        // 2. same gender, academic distance
        let academic = rank_by_distance(&self.graphs.academic, name);
        ranking.extend(self.of_gender(&academic, own));

        // 3. same gender, social distance
        let social = rank_by_distance(&self.graphs.social, name);
        ranking.extend(self.of_gender(&social, own));

        // 4. everyone else of the same gender
        let remaining: Vec<String> = self
            .registry
            .opted_in_names(own)
            .into_iter()
            .filter(|n| !ranking.contains(n))
            .collect();
        ranking.extend(seeded_permutation(name, &remaining));

        // 5. opposite gender, social distance
        ranking.extend(self.of_gender(&social, other));

        // 6. everyone else of the opposite gender
        let remaining: Vec<String> = self
            .registry
            .opted_in_names(other)
            .into_iter()
            .filter(|n| !ranking.contains(n))
            .collect();
        ranking.extend(seeded_permutation(name, &remaining));

        tracing::debug!(
            "Completed {}: {} explicit, {} total",
            name,
            explicit.len(),
            ranking.order.len()
        );

        ranking.order
    }

    /// Complete every opted-in participant
    pub fn complete_all(&self) -> PreferenceTable {
        self.registry
            .opted_in()
            .map(|p| (p.name.clone(), self.complete(p)))
            .collect()
    }
}
