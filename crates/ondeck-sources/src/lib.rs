pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::{Result, SourceError};
pub use tmdb::TmdbClient;
pub use traits::{ListStore, MetadataSource};
