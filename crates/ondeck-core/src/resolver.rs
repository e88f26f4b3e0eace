use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use ondeck_models::{MovieId, ProviderMode};
use ondeck_sources::MetadataSource;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

use crate::eligibility::EligibilityPolicy;
use crate::partition::{partition_by_genre, EligibleMovie, GenreBuckets};
use crate::progress::SyncProgress;
use crate::representative::{select_representatives, CollectionPick};

/// List memberships read before resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    pub number_one: BTreeSet<MovieId>,
    pub watched: HashSet<MovieId>,
    /// Only honoured outside `all` mode
    pub excluded: HashSet<MovieId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub buckets: GenreBuckets,
    /// Every genre in the catalog, sorted
    pub genre_names: Vec<String>,
    pub movies_considered: usize,
    pub collections_resolved: usize,
    pub skipped_excluded: usize,
}

/// Turns the number-one list into the set of movies worth watching next.
///
/// A standalone movie qualifies itself. A movie that belongs to a collection
/// stands in for the whole franchise: the collection is resolved once per run
/// and its next unwatched, released part(s) are what get checked.
pub struct EligibilityResolver<'a> {
    metadata: &'a dyn MetadataSource,
    policy: EligibilityPolicy,
    on_deck_name: String,
    today: NaiveDate,
    progress: &'a dyn SyncProgress,
}

impl<'a> EligibilityResolver<'a> {
    pub fn new(metadata: &'a dyn MetadataSource, policy: EligibilityPolicy, on_deck_name: impl Into<String>) -> Self {
        Self {
            metadata,
            policy,
            on_deck_name: on_deck_name.into(),
            today: Local::now().date_naive(),
            progress: &(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn SyncProgress) -> Self {
        self.progress = progress;
        self
    }

    pub async fn resolve(&self, input: &ResolveInput) -> Result<Resolution> {
        let catalog = self
            .metadata
            .get_genre_catalog()
            .await
            .context("Failed to fetch genre catalog")?;

        let honour_exclusions = self.policy.mode() != ProviderMode::All;
        let pick = CollectionPick::for_mode(self.policy.mode());
        let total = input.number_one.len();

        let mut collection_cache = HashSet::new();
        let mut eligible = Vec::new();
        let mut movies_considered = 0;
        let mut collections_resolved = 0;
        let mut skipped_excluded = 0;

        for (index, &movie_id) in input.number_one.iter().enumerate() {
            if honour_exclusions && input.excluded.contains(&movie_id) {
                debug!(movie_id, "Skipping excluded movie");
                skipped_excluded += 1;
                continue;
            }

            let movie = match self.metadata.get_movie(movie_id).await {
                Ok(movie) => movie,
                Err(e) if e.is_not_found() => {
                    warn!(movie_id, "Movie {} no longer exists upstream, skipping", movie_id);
                    continue;
                }
                Err(e) => return Err(e).with_context(|| format!("Failed to fetch movie {}", movie_id)),
            };
            movies_considered += 1;
            self.progress.movie_started(index + 1, total, &movie.title);
            debug!("({} of {}): {}", index + 1, total, movie.title);

            let Some(collection_id) = movie.collection_id else {
                if input.watched.contains(&movie_id) {
                    continue;
                }
                let genres = movie.genre_names();
                if self.check(movie_id, &genres).await? {
                    eligible.push(EligibleMovie {
                        id: movie_id,
                        genres: genres.iter().map(|g| g.to_string()).collect(),
                    });
                }
                continue;
            };

            if !collection_cache.insert(collection_id) {
                debug!(collection_id, "Collection already resolved");
                continue;
            }
            let collection = self
                .metadata
                .get_collection(collection_id)
                .await
                .with_context(|| format!("Failed to fetch collection {}", collection_id))?;
            collections_resolved += 1;

            for representative in select_representatives(&collection.parts, &input.watched, self.today, pick) {
                if honour_exclusions && input.excluded.contains(&representative) {
                    debug!(movie_id = representative, "Skipping excluded collection part");
                    skipped_excluded += 1;
                    continue;
                }
                let Some(part) = collection.parts.iter().find(|p| p.id == representative) else {
                    continue;
                };
                let genres = catalog.names_for(&part.genre_ids);
                if self.check(representative, &genres).await? {
                    debug!(collection = %collection.name, part = %part.title, "Collection part is on deck");
                    eligible.push(EligibleMovie {
                        id: representative,
                        genres: genres.iter().map(|g| g.to_string()).collect(),
                    });
                }
            }
        }

        let buckets = partition_by_genre(eligible, &self.on_deck_name);
        info!(
            "Resolved {} movies ({} collections, {} excluded): {} on deck",
            movies_considered,
            collections_resolved,
            skipped_excluded,
            buckets.on_deck().len()
        );
        self.progress.movies_finished(buckets.on_deck().len());

        Ok(Resolution {
            buckets,
            genre_names: catalog.names().into_iter().map(|n| n.to_string()).collect(),
            movies_considered,
            collections_resolved,
            skipped_excluded,
        })
    }

    /// Genre gate first so a rejected movie costs no provider lookup.
    async fn check(&self, movie_id: MovieId, genres: &[&str]) -> Result<bool> {
        if !self.policy.passes_genres(genres) {
            return Ok(false);
        }
        if !self.policy.needs_availability() {
            return Ok(true);
        }
        let availability = self
            .metadata
            .get_watch_providers(movie_id)
            .await
            .with_context(|| format!("Failed to fetch watch providers for movie {}", movie_id))?;
        Ok(self.policy.is_eligible(Some(&availability), genres))
    }
}

#[cfg(test)]
mod tests;
