use anyhow::Result;
use chrono::NaiveDate;
use ondeck_config::Config;
use ondeck_models::{MovieId, ProviderMode};
use ondeck_sources::{ListStore, MetadataSource};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use crate::eligibility::{EligibilityPolicy, ProviderGate};
use crate::lists::{read_movie_ids, ListDirectory, ListWriter, WriteFailure};
use crate::partition::GenreBuckets;
use crate::progress::SyncProgress;
use crate::resolver::{EligibilityResolver, ResolveInput};

/// Per-run switches. Defaults come from `[eligibility]`; CLI flags override.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOptions {
    pub mode: ProviderMode,
    pub genre_filter: bool,
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.eligibility.mode,
            genre_filter: config.eligibility.genre_filter,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub dry_run: bool,
    /// Target membership per list. Written unless `dry_run`.
    pub buckets: GenreBuckets,
    pub lists_written: Vec<String>,
    pub lists_failed: Vec<String>,
    pub lists_skipped: Vec<String>,
    pub movies_on_deck: usize,
    pub movies_considered: usize,
    pub collections_resolved: usize,
    pub skipped_excluded: usize,
    pub duration: Duration,
    pub failures: Vec<WriteFailure>,
}

pub struct SyncOrchestrator {
    lists: Arc<dyn ListStore>,
    metadata: Arc<dyn MetadataSource>,
    account_id: String,
    config: Config,
    options: SyncOptions,
    progress: Arc<dyn SyncProgress>,
    today: Option<NaiveDate>,
}

impl SyncOrchestrator {
    pub fn new(
        lists: Arc<dyn ListStore>,
        metadata: Arc<dyn MetadataSource>,
        account_id: impl Into<String>,
        config: Config,
    ) -> Self {
        let options = SyncOptions::from_config(&config);
        Self {
            lists,
            metadata,
            account_id: account_id.into(),
            config,
            options,
            progress: Arc::new(()),
            today: None,
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn SyncProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Pin the date used to decide whether a collection part is released.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    #[instrument(skip(self), fields(mode = %self.options.mode, dry_run = self.options.dry_run))]
    pub async fn sync(&self) -> Result<SyncResult> {
        let start = Instant::now();
        let lists_config = &self.config.lists;
        let store = self.lists.as_ref();
        let mut failures = Vec::new();

        let mut directory = if self.options.dry_run {
            ListDirectory::inspect(store, &self.account_id, lists_config.sort_by).await?
        } else {
            ListDirectory::load(store, &self.account_id, lists_config.sort_by, &mut failures).await?
        };
        let number_one_list = directory.require(&lists_config.number_one)?.id;
        let watched_list = directory.require(&lists_config.watched)?.id;

        let number_one = read_movie_ids(store, number_one_list).await?;
        let watched: HashSet<MovieId> = read_movie_ids(store, watched_list).await?.into_iter().collect();
        let excluded = self.read_excluded(&directory).await?;
        info!(
            "{} number-one hits, {} watched, {} excluded",
            number_one.len(),
            watched.len(),
            excluded.len()
        );

        let policy = EligibilityPolicy::new(
            ProviderGate::new(
                self.options.mode,
                self.config.tmdb.region.clone(),
                self.config.eligibility.allowed_providers.clone(),
            ),
            self.options.genre_filter,
        );
        let mut resolver = EligibilityResolver::new(self.metadata.as_ref(), policy, lists_config.on_deck.clone())
            .with_progress(self.progress.as_ref());
        if let Some(today) = self.today {
            resolver = resolver.with_today(today);
        }
        let resolution = resolver
            .resolve(&ResolveInput {
                number_one,
                watched,
                excluded,
            })
            .await?;

        // Genre lists with nothing eligible this run are emptied too.
        let mut buckets = resolution.buckets;
        let reserved = [
            lists_config.number_one.as_str(),
            lists_config.watched.as_str(),
            lists_config.excluded.as_str(),
        ];
        for genre in &resolution.genre_names {
            if directory.get(genre).is_some() && !reserved.contains(&genre.as_str()) {
                buckets.ensure_bucket(genre);
            }
        }

        let mut result = SyncResult {
            dry_run: self.options.dry_run,
            movies_on_deck: buckets.on_deck().len(),
            buckets,
            lists_written: Vec::new(),
            lists_failed: Vec::new(),
            lists_skipped: Vec::new(),
            movies_considered: resolution.movies_considered,
            collections_resolved: resolution.collections_resolved,
            skipped_excluded: resolution.skipped_excluded,
            duration: Duration::ZERO,
            failures,
        };

        if self.options.dry_run {
            info!("Dry run: {} lists would be rewritten", result.buckets.len());
            result.duration = start.elapsed();
            return Ok(result);
        }

        let report = ListWriter::new(store, self.config.tmdb.language.clone(), lists_config.sort_by)
            .create_missing(lists_config.create_missing)
            .with_write_delay(Duration::from_millis(self.config.pacing.write_delay_ms))
            .with_progress(self.progress.as_ref())
            .write_all(&mut directory, &result.buckets)
            .await?;

        result.lists_written = report.written;
        result.lists_failed = report.failed;
        result.lists_skipped = report.skipped;
        result.failures.extend(report.failures);
        result.duration = start.elapsed();

        info!(
            "Sync finished in {:.1}s: {} on deck, {} lists written, {} failed",
            result.duration.as_secs_f64(),
            result.movies_on_deck,
            result.lists_written.len(),
            result.lists_failed.len()
        );
        Ok(result)
    }

    async fn read_excluded(&self, directory: &ListDirectory) -> Result<HashSet<MovieId>> {
        let Some(name) = self.config.lists.excluded_list() else {
            return Ok(HashSet::new());
        };
        match directory.get(name) {
            Some(list) => {
                let ids: BTreeSet<MovieId> = read_movie_ids(self.lists.as_ref(), list.id).await?;
                Ok(ids.into_iter().collect())
            }
            None => {
                warn!(list = %name, "Excluded list {} not found, nothing will be excluded", name);
                Ok(HashSet::new())
            }
        }
    }
}
