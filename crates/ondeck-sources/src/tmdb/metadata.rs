use async_trait::async_trait;
use ondeck_models::{Collection, GenreCatalog, Movie, MovieId, WatchAvailability};

use crate::error::Result;
use crate::tmdb::client::TmdbClient;
use crate::tmdb::wire::{GenreListResponse, MovieDetails, WatchProvidersResponse};
use crate::traits::MetadataSource;

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn get_movie(&self, movie_id: MovieId) -> Result<Movie> {
        let response = self.v3(&format!("/movie/{}", movie_id)).send().await?;
        let details: MovieDetails = self.handle_response(response).await?;
        Ok(details.into())
    }

    async fn get_collection(&self, collection_id: u64) -> Result<Collection> {
        let response = self.v3(&format!("/collection/{}", collection_id)).send().await?;
        self.handle_response(response).await
    }

    async fn get_genre_catalog(&self) -> Result<GenreCatalog> {
        let response = self.v3("/genre/movie/list").send().await?;
        let genres: GenreListResponse = self.handle_response(response).await?;
        Ok(genres.into())
    }

    async fn get_watch_providers(&self, movie_id: MovieId) -> Result<WatchAvailability> {
        let response = self
            .v3(&format!("/movie/{}/watch/providers", movie_id))
            .send()
            .await?;
        let providers: WatchProvidersResponse = self.handle_response(response).await?;
        Ok(providers.into())
    }
}
