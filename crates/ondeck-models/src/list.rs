use serde::{Deserialize, Serialize};

use crate::movie::MovieId;

/// TMDB v4 list sort mode `primary_release_date.desc`.
pub const SORT_BY_RELEASE_DATE_DESC: i64 = 6;

/// An account list as reported by the list store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedList {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sort_by: Option<i64>,
    #[serde(default)]
    pub number_of_items: Option<u32>,
}

/// Entry posted to a list. Only movies are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem {
    pub media_type: String,
    pub media_id: MovieId,
}

impl ListItem {
    pub fn movie(media_id: MovieId) -> Self {
        Self {
            media_type: "movie".to_string(),
            media_id,
        }
    }
}

/// Entry read back from a list. Lists may hold TV shows too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    pub id: u64,
    #[serde(default = "default_media_type")]
    pub media_type: String,
}

impl ListEntry {
    pub fn is_movie(&self) -> bool {
        self.media_type == "movie"
    }
}

fn default_media_type() -> String {
    "movie".to_string()
}

/// One page of list contents. Older list payloads only carry `object_ids`
/// tokens such as `movie:550`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItemsPage {
    pub results: Vec<ListEntry>,
    pub object_ids: Vec<String>,
    pub page: u32,
    pub total_pages: u32,
}

/// One page of a paginated collaborator response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
}

/// Result of a mutating call. `success: false` is a business failure, not
/// a transport error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteOutcome {
    pub success: bool,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl WriteOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            status_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_message: Some(message.into()),
        }
    }
}

/// Reply to a list creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedList {
    pub success: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub status_message: Option<String>,
}
