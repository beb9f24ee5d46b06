//! Stable roommates solving.
//!
//! The completion engine only builds the solver's input; the solver itself
//! sits behind [`RoommateSolver`] so another implementation can be plugged
//! in. [`IrvingSolver`] is Irving's two-phase algorithm: proposals with list
//! truncation, then elimination of rotations until every list holds a single
//! name. When no stable complete matching exists the solver fails with
//! [`SolverError::IncompleteMatch`] rather than returning a partial pairing.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::{Matching, PreferenceTable};

/// Errors that can occur while solving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("no stable complete matching exists: {0}")]
    IncompleteMatch(String),

    #[error("preference list of {0} is not an ordering of every other participant")]
    MalformedPreferences(String),
}

/// Anything that turns complete preference lists into a stable pairing
pub trait RoommateSolver {
    fn solve(&self, preferences: &PreferenceTable) -> Result<Matching, SolverError>;
}

/// Irving's algorithm for the stable roommates problem
#[derive(Debug, Clone, Copy, Default)]
pub struct IrvingSolver;

impl RoommateSolver for IrvingSolver {
    fn solve(&self, preferences: &PreferenceTable) -> Result<Matching, SolverError> {
        let names: Vec<&str> = preferences.keys().map(String::as_str).collect();
        if names.len() % 2 == 1 {
            return Err(SolverError::IncompleteMatch(format!(
                "odd number of participants ({})",
                names.len()
            )));
        }

        let mut table = Table::new(&names, preferences)?;
        table.propose()?;
        table.eliminate_rotations()?;

        let mut matching = Matching::new();
        for i in 0..names.len() {
            let j = table.first(i).ok_or_else(|| empty_list(names[i]))?;
            if table.first(j) != Some(i) {
                return Err(SolverError::IncompleteMatch(format!(
                    "{} and {} do not hold each other",
                    names[i], names[j]
                )));
            }
            if i < j {
                matching.insert(names[i], names[j]);
            }
        }

        tracing::debug!("Solved stable roommates for {} participants", names.len());
        Ok(matching)
    }
}

fn empty_list(name: &str) -> SolverError {
    SolverError::IncompleteMatch(format!("{} ran out of acceptable roommates", name))
}

/// Reduced preference table over participant indices
struct Table<'a> {
    names: &'a [&'a str],
    prefs: Vec<Vec<usize>>,
    /// rank[i][j] = position of j in i's original list
    rank: Vec<Vec<usize>>,
    /// removed[i][j] = the pair i-j has been deleted from both lists
    removed: Vec<Vec<bool>>,
}

impl<'a> Table<'a> {
    fn new(names: &'a [&'a str], preferences: &PreferenceTable) -> Result<Self, SolverError> {
        let n = names.len();
        let index: HashMap<&str, usize> = names.iter().enumerate().map(|(i, name)| (*name, i)).collect();

        let mut prefs = Vec::with_capacity(n);
        let mut rank = vec![vec![usize::MAX; n]; n];

        for (i, name) in names.iter().enumerate() {
            let malformed = || SolverError::MalformedPreferences(name.to_string());
            let list = &preferences[*name];
            if list.len() + 1 != n {
                return Err(malformed());
            }

            let mut order = Vec::with_capacity(list.len());
            for (r, other) in list.iter().enumerate() {
                let j = *index.get(other.as_str()).ok_or_else(malformed)?;
                if j == i || rank[i][j] != usize::MAX {
                    return Err(malformed());
                }
                rank[i][j] = r;
                order.push(j);
            }
            prefs.push(order);
        }

        Ok(Self {
            names,
            prefs,
            rank,
            removed: vec![vec![false; n]; n],
        })
    }

    fn remaining(&self, i: usize) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.prefs[i].iter().copied().filter(move |&j| !self.removed[i][j])
    }

    fn first(&self, i: usize) -> Option<usize> {
        self.remaining(i).next()
    }

    fn second(&self, i: usize) -> Option<usize> {
        self.remaining(i).nth(1)
    }

    fn last(&self, i: usize) -> Option<usize> {
        self.remaining(i).next_back()
    }

    fn delete(&mut self, a: usize, b: usize) {
        self.removed[a][b] = true;
        self.removed[b][a] = true;
    }

    /// Everyone `i` likes less than `keep`
    fn successors(&self, i: usize, keep: usize) -> Vec<usize> {
        let cutoff = self.rank[i][keep];
        self.remaining(i).filter(|&j| self.rank[i][j] > cutoff).collect()
    }

    fn check_lists(&self) -> Result<(), SolverError> {
        match (0..self.names.len()).find(|&i| self.first(i).is_none()) {
            Some(i) => Err(empty_list(self.names[i])),
            None => Ok(()),
        }
    }

    /// Phase 1: everyone proposes down their list; whoever receives a
    /// proposal drops everyone they like less than the proposer.
    fn propose(&mut self) -> Result<(), SolverError> {
        let n = self.names.len();
        // holder[y] = the proposal y currently holds
        let mut holder: Vec<Option<usize>> = vec![None; n];
        let mut free: Vec<usize> = (0..n).rev().collect();

        while let Some(x) = free.pop() {
            loop {
                let y = self.first(x).ok_or_else(|| empty_list(self.names[x]))?;
                if let Some(z) = holder[y] {
                    if self.rank[y][z] < self.rank[y][x] {
                        self.reject(&mut holder, &mut free, x, y);
                        continue;
                    }
                }

                for w in self.successors(y, x) {
                    self.reject(&mut holder, &mut free, y, w);
                }
                holder[y] = Some(x);
                break;
            }
        }

        self.check_lists()
    }

    /// Delete a-b during phase 1, freeing whichever side loses a held proposal
    fn reject(&mut self, holder: &mut [Option<usize>], free: &mut Vec<usize>, a: usize, b: usize) {
        self.delete(a, b);
        if holder[a] == Some(b) {
            holder[a] = None;
            free.push(b);
        }
        if holder[b] == Some(a) {
            holder[b] = None;
            free.push(a);
        }
    }

    /// Phase 2: remove exposed rotations until every list has one entry
    fn eliminate_rotations(&mut self) -> Result<(), SolverError> {
        let n = self.names.len();

        loop {
            let Some(start) = (0..n).find(|&i| self.second(i).is_some()) else {
                break;
            };
            let mut sequence = vec![start];
            let mut position: Vec<Option<usize>> = vec![None; n];
            position[start] = Some(0);

            let cycle_start = loop {
                let x = sequence[sequence.len() - 1];
                let y = self.second(x).ok_or_else(|| empty_list(self.names[x]))?;
                let next = self.last(y).ok_or_else(|| empty_list(self.names[y]))?;
                if let Some(k) = position[next] {
                    break k;
                }
                position[next] = Some(sequence.len());
                sequence.push(next);
            };

            let mut rotation = Vec::with_capacity(sequence.len() - cycle_start);
            for &x in &sequence[cycle_start..] {
                let y = self.second(x).ok_or_else(|| empty_list(self.names[x]))?;
                rotation.push((x, y));
            }

            for (x, y) in rotation {
                for w in self.successors(y, x) {
                    self.delete(y, w);
                }
            }

            self.check_lists()?;
        }

        Ok(())
    }
}
