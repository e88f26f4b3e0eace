use ondeck_config::{TmdbConfig, TmdbCredentials};
use ondeck_models::WriteOutcome;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::trace;

use crate::error::{Result, SourceError};

const DEFAULT_API_V3_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_API_V4_URL: &str = "https://api.themoviedb.org/4";

/// TMDB over HTTP. The v4 half (bearer token) is the list store, the v3
/// half (`api_key` query parameter) is the metadata source.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_v3_url: String,
    api_v4_url: String,
    access_token: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(access_token: String, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_v3_url: DEFAULT_API_V3_URL.to_string(),
            api_v4_url: DEFAULT_API_V4_URL.to_string(),
            access_token,
            api_key,
        }
    }

    pub fn from_config(config: &TmdbConfig, credentials: &TmdbCredentials) -> Self {
        Self::new(credentials.access_token.clone(), credentials.api_key.clone())
            .with_base_urls(&config.api_v3_url, &config.api_v4_url)
    }

    pub fn with_base_urls(mut self, api_v3_url: &str, api_v4_url: &str) -> Self {
        self.api_v3_url = api_v3_url.trim_end_matches('/').to_string();
        self.api_v4_url = api_v4_url.trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn v3(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_v3_url, path);
        trace!(url = %url, "TMDB v3 request");
        self.client.get(url).query(&[("api_key", self.api_key.as_str())])
    }

    pub(crate) fn v4(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_v4_url, path);
        trace!(method = %method, url = %url, "TMDB v4 request");
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json;charset=utf-8")
            .header("Accept", "application/json")
    }

    /// Decode a successful read. Non-2xx is an API error; a body that does
    /// not match `T` fails with the JSON path of the first bad field.
    pub(crate) async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: status_message(&body).unwrap_or(body),
            });
        }
        decode(&body)
    }

    /// Decode a mutating call. TMDB answers business failures with a
    /// `success: false` body, sometimes under a 4xx status; those come back
    /// as an outcome, not an error.
    pub(crate) async fn handle_write<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        match decode::<T>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(SourceError::Api {
                status: status.as_u16(),
                message: status_message(&body).unwrap_or(body),
            }),
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn send_write(&self, request: RequestBuilder) -> Result<WriteOutcome> {
        let response = request.send().await?;
        self.handle_write(response).await
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| SourceError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

fn status_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("status_message")?
        .as_str()
        .map(|s| s.to_string())
}
