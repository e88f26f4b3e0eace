use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Genre id → name lookup, fetched once per run.
#[derive(Debug, Clone, Default)]
pub struct GenreCatalog {
    names: HashMap<u32, String>,
}

impl GenreCatalog {
    pub fn new(genres: impl IntoIterator<Item = Genre>) -> Self {
        Self {
            names: genres.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }

    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Names for the given ids, in input order. Unknown ids are dropped.
    pub fn names_for<'a>(&'a self, ids: &[u32]) -> Vec<&'a str> {
        ids.iter().filter_map(|id| self.name(*id)).collect()
    }

    /// Every genre name, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.values().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
