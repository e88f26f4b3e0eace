//! Bodies exactly as TMDB sends and expects them. Conversion into
//! `ondeck_models` types happens here so nothing else sees the wire shape.

use chrono::NaiveDate;
use ondeck_models::{
    CreatedList, Genre, GenreCatalog, ListEntry, ListItem, ListItemsPage, Movie, MovieId,
    RegionAvailability, WatchAvailability,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub(crate) struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "ondeck_models::release_date::deserialize")]
    pub release_date: Option<NaiveDate>,
    pub genres: Vec<Genre>,
    pub belongs_to_collection: Option<CollectionRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionRef {
    pub id: u64,
}

impl From<MovieDetails> for Movie {
    fn from(details: MovieDetails) -> Self {
        Movie {
            id: details.id,
            title: details.title,
            release_date: details.release_date,
            genres: details.genres,
            collection_id: details.belongs_to_collection.map(|c| c.id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreListResponse {
    pub genres: Vec<Genre>,
}

impl From<GenreListResponse> for GenreCatalog {
    fn from(response: GenreListResponse) -> Self {
        GenreCatalog::new(response.genres)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WatchProvidersResponse {
    pub results: HashMap<String, RegionAvailability>,
}

impl From<WatchProvidersResponse> for WatchAvailability {
    fn from(response: WatchProvidersResponse) -> Self {
        WatchAvailability {
            regions: response.results,
        }
    }
}

/// `GET /4/list/{id}`. Current payloads page through `results`; older ones
/// carry an `object_ids` map keyed by `<media_type>:<id>`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListDetailsResponse {
    #[serde(default)]
    pub results: Option<Vec<ListEntry>>,
    #[serde(default)]
    pub object_ids: Option<HashMap<String, serde_json::Value>>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl From<ListDetailsResponse> for ListItemsPage {
    fn from(response: ListDetailsResponse) -> Self {
        let mut object_ids: Vec<String> = response
            .object_ids
            .map(|ids| ids.into_keys().collect())
            .unwrap_or_default();
        object_ids.sort();

        ListItemsPage {
            results: response.results.unwrap_or_default(),
            object_ids,
            page: response.page,
            total_pages: response.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SortRequest {
    pub sort_by: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ItemsRequest<'a> {
    pub items: &'a [ListItem],
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateListRequest<'a> {
    pub name: &'a str,
    pub iso_639_1: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateListResponse {
    pub success: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl From<CreateListResponse> for CreatedList {
    fn from(response: CreateListResponse) -> Self {
        CreatedList {
            success: response.success,
            id: response.id,
            status_message: response.status_message,
        }
    }
}
