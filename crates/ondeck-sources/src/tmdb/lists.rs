use async_trait::async_trait;
use ondeck_models::{CreatedList, ListItem, ListItemsPage, NamedList, Page, WriteOutcome};
use reqwest::Method;
use tracing::debug;

use crate::error::Result;
use crate::tmdb::client::TmdbClient;
use crate::tmdb::wire::{
    CreateListRequest, CreateListResponse, ItemsRequest, ListDetailsResponse, SortRequest,
};
use crate::traits::ListStore;

#[async_trait]
impl ListStore for TmdbClient {
    async fn get_lists(&self, account_id: &str, page: u32) -> Result<Page<NamedList>> {
        let response = self
            .v4(Method::GET, &format!("/account/{}/lists", account_id))
            .query(&[("page", page)])
            .send()
            .await?;
        let lists: Page<NamedList> = self.handle_response(response).await?;
        debug!(page = lists.page, total_pages = lists.total_pages, count = lists.results.len(), "Fetched account lists page");
        Ok(lists)
    }

    async fn get_list_items(&self, list_id: u64, page: u32) -> Result<ListItemsPage> {
        let response = self
            .v4(Method::GET, &format!("/list/{}", list_id))
            .query(&[("page", page)])
            .send()
            .await?;
        let details: ListDetailsResponse = self.handle_response(response).await?;
        Ok(details.into())
    }

    async fn set_sort_mode(&self, list_id: u64, sort_by: i64) -> Result<WriteOutcome> {
        let request = self
            .v4(Method::PUT, &format!("/list/{}", list_id))
            .json(&SortRequest { sort_by });
        self.send_write(request).await
    }

    async fn clear_list(&self, list_id: u64) -> Result<WriteOutcome> {
        let request = self.v4(Method::GET, &format!("/list/{}/clear", list_id));
        self.send_write(request).await
    }

    async fn add_items(&self, list_id: u64, items: &[ListItem]) -> Result<WriteOutcome> {
        let request = self
            .v4(Method::POST, &format!("/list/{}/items", list_id))
            .json(&ItemsRequest { items });
        self.send_write(request).await
    }

    async fn create_list(&self, name: &str, iso_639_1: &str) -> Result<CreatedList> {
        let response = self
            .v4(Method::POST, "/list")
            .json(&CreateListRequest { name, iso_639_1 })
            .send()
            .await?;
        let created: CreateListResponse = self.handle_write(response).await?;
        Ok(created.into())
    }
}
