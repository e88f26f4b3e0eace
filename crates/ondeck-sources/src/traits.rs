use async_trait::async_trait;
use ondeck_models::{
    Collection, CreatedList, GenreCatalog, ListItem, ListItemsPage, Movie, MovieId, NamedList,
    Page, WatchAvailability, WriteOutcome,
};

use crate::error::Result;

/// CRUD over named, ordered collections of movie references.
///
/// Mutating calls return a [`WriteOutcome`]; `success: false` is reported to
/// the caller rather than raised so a run can carry on with the next list.
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn get_lists(&self, account_id: &str, page: u32) -> Result<Page<NamedList>>;
    async fn get_list_items(&self, list_id: u64, page: u32) -> Result<ListItemsPage>;

    async fn set_sort_mode(&self, list_id: u64, sort_by: i64) -> Result<WriteOutcome>;
    async fn clear_list(&self, list_id: u64) -> Result<WriteOutcome>;
    async fn add_items(&self, list_id: u64, items: &[ListItem]) -> Result<WriteOutcome>;
    async fn create_list(&self, name: &str, iso_639_1: &str) -> Result<CreatedList>;
}

/// Read-only movie facts.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn get_movie(&self, movie_id: MovieId) -> Result<Movie>;
    async fn get_collection(&self, collection_id: u64) -> Result<Collection>;
    async fn get_genre_catalog(&self) -> Result<GenreCatalog>;
    async fn get_watch_providers(&self, movie_id: MovieId) -> Result<WatchAvailability>;
}
