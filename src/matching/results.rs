use std::collections::HashSet;

use crate::matching::entity::Matchable;

/// Holds the immutable result list for one search cycle plus the two
/// independent per-entity flag sets (contacted, saved). The list is
/// write-once per cycle; individual entities are never removed.
#[derive(Debug)]
pub struct ResultStore<E> {
    results: Vec<E>,
    contacted: HashSet<String>,
    saved: HashSet<String>,
}

impl<E: Matchable> Default for ResultStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Matchable> ResultStore<E> {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            contacted: HashSet::new(),
            saved: HashSet::new(),
        }
    }

    /// Replace the entire result list atomically.
    pub fn set_results(&mut self, entities: Vec<E>) {
        self.results = entities;
    }

    pub fn results(&self) -> &[E] {
        &self.results
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.results.iter().find(|e| e.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Add to the contacted set. Idempotent; returns true only the first
    /// time an id is marked.
    pub fn mark_contacted(&mut self, id: &str) -> bool {
        self.contacted.insert(id.to_string())
    }

    pub fn is_contacted(&self, id: &str) -> bool {
        self.contacted.contains(id)
    }

    pub fn contacted_count(&self) -> usize {
        self.contacted.len()
    }

    /// Flip membership in the saved set; returns the new membership state.
    pub fn toggle_saved(&mut self, id: &str) -> bool {
        if self.saved.remove(id) {
            false
        } else {
            self.saved.insert(id.to_string());
            true
        }
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Empty the results and both flag sets. Used when a new search starts;
    /// no merge semantics across searches.
    pub fn clear(&mut self) {
        self.results.clear();
        self.contacted.clear();
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::entity::{CarrierMatch, ContactInfo};
    use proptest::prelude::*;

    fn carrier(id: &str) -> CarrierMatch {
        CarrierMatch {
            id: id.to_string(),
            name: format!("Carrier {id}"),
            lane: "Chicago, IL - New York, NY".to_string(),
            equipment: "Dry Van".to_string(),
            rate_per_mile: 2.85,
            on_time_pct: 96,
            fleet_size: 40,
            match_score: 90,
            contact: ContactInfo {
                phone: "(312) 555-0100".to_string(),
                email: "dispatch@example.com".to_string(),
            },
        }
    }

    #[test]
    fn default_store_starts_empty() {
        let store: ResultStore<CarrierMatch> = ResultStore::default();
        assert!(store.is_empty());
        assert_eq!(store.contacted_count(), 0);
        assert_eq!(store.saved_count(), 0);
    }

    #[test]
    fn mark_contacted_is_idempotent() {
        let mut store: ResultStore<CarrierMatch> = ResultStore::new();
        store.set_results(vec![carrier("CAR-1")]);

        assert!(store.mark_contacted("CAR-1"));
        assert!(!store.mark_contacted("CAR-1"));
        assert!(!store.mark_contacted("CAR-1"));
        assert!(store.is_contacted("CAR-1"));
        assert_eq!(store.contacted_count(), 1);
    }

    #[test]
    fn toggle_saved_round_trips() {
        let mut store: ResultStore<CarrierMatch> = ResultStore::new();
        assert!(store.toggle_saved("CAR-2"));
        assert!(store.is_saved("CAR-2"));
        assert!(!store.toggle_saved("CAR-2"));
        assert!(!store.is_saved("CAR-2"));
    }

    #[test]
    fn clear_empties_results_and_both_flag_sets() {
        let mut store: ResultStore<CarrierMatch> = ResultStore::new();
        store.set_results(vec![carrier("CAR-1"), carrier("CAR-2")]);
        store.mark_contacted("CAR-1");
        store.toggle_saved("CAR-2");

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.contacted_count(), 0);
        assert_eq!(store.saved_count(), 0);
    }

    #[test]
    fn set_results_replaces_list_atomically() {
        let mut store: ResultStore<CarrierMatch> = ResultStore::new();
        store.set_results(vec![carrier("CAR-1")]);
        store.set_results(vec![carrier("CAR-2"), carrier("CAR-3")]);

        assert_eq!(store.len(), 2);
        assert!(store.get("CAR-1").is_none());
        assert!(store.get("CAR-3").is_some());
    }

    proptest! {
        #[test]
        fn toggling_twice_is_identity(ids in proptest::collection::vec("[A-Z]{3}-[0-9]{1,4}", 1..20)) {
            let mut store: ResultStore<CarrierMatch> = ResultStore::new();
            for id in &ids {
                let before = store.is_saved(id);
                store.toggle_saved(id);
                store.toggle_saved(id);
                prop_assert_eq!(store.is_saved(id), before);
            }
        }

        #[test]
        fn repeated_contact_marking_never_duplicates(id in "[A-Z]{3}-[0-9]{1,4}", n in 1usize..10) {
            let mut store: ResultStore<CarrierMatch> = ResultStore::new();
            for _ in 0..n {
                store.mark_contacted(&id);
            }
            prop_assert!(store.is_contacted(&id));
            prop_assert_eq!(store.contacted_count(), 1);
        }
    }
}
