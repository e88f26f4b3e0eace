use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::Api { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
