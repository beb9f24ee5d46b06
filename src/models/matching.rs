use std::collections::BTreeMap;

/// A symmetric pairing of participants
///
/// Every pair is stored once under its canonical direction (the
/// lexicographically smaller name as key) plus a reverse index, so a lookup
/// works from either side. Inserting or removing a pair always updates both
/// directions together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    forward: BTreeMap<String, String>,
    reverse: BTreeMap<String, String>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `a` with `b`, dissolving any pair either of them was part of.
    ///
    /// Returns the partners that were displaced.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>) -> Vec<String> {
        let (a, b) = (a.into(), b.into());
        let mut displaced = Vec::new();

        for name in [&a, &b] {
            if let Some(old) = self.remove(name) {
                if old != a && old != b {
                    displaced.push(old);
                }
            }
        }

        let (key, value) = if a <= b { (a, b) } else { (b, a) };
        self.reverse.insert(value.clone(), key.clone());
        self.forward.insert(key, value);
        displaced
    }

    /// Partner of `name`, looked up from either direction
    pub fn get(&self, name: &str) -> Option<&str> {
        self.forward
            .get(name)
            .or_else(|| self.reverse.get(name))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forward.contains_key(name) || self.reverse.contains_key(name)
    }

    /// Dissolve the pair containing `name`, returning the former partner
    pub fn remove(&mut self, name: &str) -> Option<String> {
        if let Some(value) = self.forward.remove(name) {
            self.reverse.remove(&value);
            return Some(value);
        }
        let key = self.reverse.remove(name)?;
        self.forward.remove(&key);
        Some(key)
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// One entry per pair, keyed by the smaller name
    pub fn canonical(&self) -> &BTreeMap<String, String> {
        &self.forward
    }
}
