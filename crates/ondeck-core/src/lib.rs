pub mod eligibility;
pub mod lists;
pub mod partition;
pub mod progress;
pub mod representative;
pub mod resolver;
pub mod sync;

#[cfg(test)]
mod testing;

pub use eligibility::{EligibilityPolicy, GenreGate, ProviderGate};
pub use lists::{fetch_lists, read_movie_ids, ListDirectory, ListWriter, WriteAction, WriteFailure, WriteReport};
pub use partition::{partition_by_genre, EligibleMovie, GenreBuckets};
pub use progress::{ProgressTracker, SyncProgress};
pub use representative::{select_representatives, CollectionPick};
pub use resolver::{EligibilityResolver, Resolution, ResolveInput};
pub use sync::{SyncOptions, SyncOrchestrator, SyncResult};
