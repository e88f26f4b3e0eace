use ondeck_models::MovieId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// An eligible movie with the genre names it should be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleMovie {
    pub id: MovieId,
    pub genres: Vec<String>,
}

/// Target membership for every list a sync writes, keyed by list name.
///
/// The On Deck bucket always exists, even when empty, so a run with nothing
/// eligible still clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreBuckets {
    on_deck: String,
    buckets: BTreeMap<String, BTreeSet<MovieId>>,
}

impl GenreBuckets {
    pub fn new(on_deck: impl Into<String>) -> Self {
        let on_deck = on_deck.into();
        let mut buckets = BTreeMap::new();
        buckets.insert(on_deck.clone(), BTreeSet::new());
        Self { on_deck, buckets }
    }

    pub fn on_deck_name(&self) -> &str {
        &self.on_deck
    }

    pub fn on_deck(&self) -> &BTreeSet<MovieId> {
        &self.buckets[&self.on_deck]
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<MovieId>> {
        self.buckets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, id: MovieId) {
        self.buckets.entry(name.to_string()).or_default().insert(id);
    }

    /// Add an empty bucket so the list is rewritten (emptied) on the next write.
    pub fn ensure_bucket(&mut self, name: &str) {
        self.buckets.entry(name.to_string()).or_default();
    }

    /// Number of buckets, On Deck included
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// On Deck first, then the genre lists in reverse alphabetical order.
    pub fn write_order(&self) -> Vec<(&str, &BTreeSet<MovieId>)> {
        let mut order = vec![(self.on_deck.as_str(), self.on_deck())];
        order.extend(
            self.buckets
                .iter()
                .rev()
                .filter(|(name, _)| **name != self.on_deck)
                .map(|(name, ids)| (name.as_str(), ids)),
        );
        order
    }
}

/// File every movie under On Deck and under each of its genre names.
pub fn partition_by_genre(movies: impl IntoIterator<Item = EligibleMovie>, on_deck_name: &str) -> GenreBuckets {
    let mut buckets = GenreBuckets::new(on_deck_name);
    for movie in movies {
        buckets.insert(on_deck_name, movie.id);
        for genre in &movie.genres {
            buckets.insert(genre, movie.id);
        }
    }
    buckets
}
