use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::models::{Gender, Participant, SurveyRow, WishMap};

/// Errors raised while turning survey rows into participants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{participant} has duplicate entries in their wish list: {wish}")]
    DuplicateWish { participant: String, wish: String },

    #[error("{participant} named {unknown}, who is not a registered participant")]
    UnknownParticipant { participant: String, unknown: String },

    #[error("{0} answered the survey more than once")]
    DuplicateParticipant(String),
}

/// In-memory record of every participant, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    participants: BTreeMap<String, Participant>,
}

impl ParticipantRegistry {
    /// Build the registry, aborting on the first invalid row
    pub fn from_rows(rows: Vec<SurveyRow>) -> Result<Self, RegistryError> {
        let mut participants = BTreeMap::new();

        for row in rows {
            let participant = participant_from_row(row)?;
            if participants.contains_key(&participant.name) {
                return Err(RegistryError::DuplicateParticipant(participant.name));
            }
            participants.insert(participant.name.clone(), participant);
        }

        let registry = Self { participants };
        registry.check_references()?;
        Ok(registry)
    }

    /// Build the registry, dropping rows with duplicate wishes instead of failing
    ///
    /// Unknown names and repeated participants are still fatal: they cannot
    /// be attributed to a single row.
    pub fn from_rows_lenient(
        rows: Vec<SurveyRow>,
    ) -> Result<(Self, Vec<RegistryError>), RegistryError> {
        let mut participants = BTreeMap::new();
        let mut rejected = Vec::new();

        for row in rows {
            match participant_from_row(row) {
                Ok(participant) => {
                    if participants.contains_key(&participant.name) {
                        return Err(RegistryError::DuplicateParticipant(participant.name));
                    }
                    participants.insert(participant.name.clone(), participant);
                }
                Err(e) => {
                    tracing::warn!("Dropping survey row: {}", e);
                    rejected.push(e);
                }
            }
        }

        let registry = Self { participants };
        registry.check_references()?;
        Ok((registry, rejected))
    }

    fn check_references(&self) -> Result<(), RegistryError> {
        for participant in self.participants.values() {
            if let Some(unknown) = participant
                .mentioned()
                .find(|name| !self.participants.contains_key(*name))
            {
                return Err(RegistryError::UnknownParticipant {
                    participant: participant.name.clone(),
                    unknown: unknown.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.participants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.participants.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// All participants, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn opted_in(&self) -> impl Iterator<Item = &Participant> {
        self.iter().filter(|p| p.opted_in)
    }

    pub fn opted_out_names(&self) -> BTreeSet<String> {
        self.iter()
            .filter(|p| !p.opted_in)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Sorted names of opted-in participants of one gender
    pub fn opted_in_names(&self, gender: Gender) -> Vec<String> {
        self.opted_in()
            .filter(|p| p.gender == gender)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Snapshot of explicit wishes (partner first, then ranked choices)
    /// for every participant, opted in or not
    pub fn initial_wishes(&self) -> WishMap {
        self.participants
            .iter()
            .map(|(name, p)| (name.clone(), p.explicit_wishes()))
            .collect()
    }
}

fn participant_from_row(row: SurveyRow) -> Result<Participant, RegistryError> {
    let mut seen = BTreeSet::new();
    for wish in &row.wishes {
        if !seen.insert(wish.as_str()) {
            return Err(RegistryError::DuplicateWish {
                participant: row.name.clone(),
                wish: wish.clone(),
            });
        }
    }

    Ok(Participant {
        name: row.name,
        gender: row.gender,
        opted_in: row.opted_in,
        wishes: row.wishes,
        partner: row.partner,
    })
}
