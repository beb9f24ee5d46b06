use crate::models::{Matching, UnsatisfiedWish, WishMap};

/// Participants whose assigned partner is not among their original wishes
///
/// Someone left without a partner counts as unsatisfied as well.
pub fn unsatisfied_wishes(initial_wishes: &WishMap, matching: &Matching) -> Vec<UnsatisfiedWish> {
    initial_wishes
        .iter()
        .filter_map(|(person, wishes)| {
            let partner = matching.get(person);
            match partner {
                Some(p) if wishes.iter().any(|w| w == p) => None,
                _ => Some(UnsatisfiedWish {
                    participant: person.clone(),
                    partner: partner.map(str::to_string),
                    wishes: wishes.clone(),
                }),
            }
        })
        .collect()
}

/// Count participants whose partner appears in their original wish list
///
/// Every participant who missed out is logged with their partner and wishes.
pub fn score_matching(initial_wishes: &WishMap, matching: &Matching) -> usize {
    let misses = unsatisfied_wishes(initial_wishes, matching);

    for miss in &misses {
        tracing::info!(
            "{} was matched with {} but wished for {:?}",
            miss.participant,
            miss.partner.as_deref().unwrap_or("nobody"),
            miss.wishes,
        );
    }

    initial_wishes.len() - misses.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn wishes() -> WishMap {
        let mut wishes = WishMap::new();
        wishes.insert("A".into(), vec!["C".into()]);
        wishes.insert("B".into(), vec![]);
        wishes.insert("C".into(), vec!["A".into()]);
        wishes.insert("D".into(), vec![]);
        wishes
    }

    #[test]
    fn test_score_counts_satisfied_wishes() {
        let mut matching = Matching::new();
        matching.insert("A", "C");
        matching.insert("B", "D");

        assert_eq!(score_matching(&wishes(), &matching), 2);

        let misses: Vec<String> = unsatisfied_wishes(&wishes(), &matching)
            .into_iter()
            .map(|m| m.participant)
            .collect();
        assert_eq!(misses, vec!["B", "D"]);
    }

    #[test]
    fn test_unmatched_participant_is_a_miss() {
        let mut matching = Matching::new();
        matching.insert("A", "C");

        let misses = unsatisfied_wishes(&wishes(), &matching);
        assert_eq!(misses.len(), 2);
        assert_eq!(misses[0].partner, None);
        assert_eq!(score_matching(&wishes(), &matching), 2);
    }

    #[test]
    fn test_crossed_matching_scores_zero() {
        let mut matching = Matching::new();
        matching.insert("A", "B");
        matching.insert("C", "D");

        assert_eq!(score_matching(&wishes(), &matching), 0);
    }

    #[test]
    fn test_misses_are_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut matching = Matching::new();
        matching.insert("A", "C");

        let score = tracing::subscriber::with_default(subscriber, || {
            score_matching(&wishes(), &matching)
        });

        assert_eq!(score, 2);
        let output = logs.contents();
        assert!(output.contains("B was matched with nobody but wished for []"));
        assert!(output.contains("D was matched with nobody but wished for []"));
        assert!(!output.contains("A was matched"));
    }
}
