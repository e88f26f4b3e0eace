use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::movie::MovieId;

/// A franchise: an ordered grouping of related movies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub parts: Vec<CollectionPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionPart {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default, deserialize_with = "crate::release_date::deserialize")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

fn default_media_type() -> String {
    "movie".to_string()
}
