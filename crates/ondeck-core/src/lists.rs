use anyhow::{anyhow, Context, Result};
use ondeck_models::{ListItem, MovieId, NamedList};
use ondeck_sources::ListStore;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::partition::GenreBuckets;
use crate::progress::{ProgressTracker, SyncProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteAction {
    Sort,
    Create,
    Clear,
    Populate,
}

impl WriteAction {
    fn verb(self) -> &'static str {
        match self {
            WriteAction::Sort => "set sort mode on",
            WriteAction::Create => "create",
            WriteAction::Clear => "clear",
            WriteAction::Populate => "populate",
        }
    }
}

/// A `success: false` reply from the list store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteFailure {
    pub list: String,
    pub action: WriteAction,
    pub message: Option<String>,
}

impl WriteFailure {
    fn new(list: &str, action: WriteAction, message: Option<String>) -> Self {
        Self {
            list: list.to_string(),
            action,
            message,
        }
    }

    fn log(self) -> Self {
        warn!(list = %self.list, message = ?self.message, "{}", self);
        self
    }
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {} list {}.", self.action.verb(), self.list)?;
        if let Some(message) = &self.message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

/// Every list on the account, by name. Later duplicates shadow earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ListDirectory {
    lists: BTreeMap<String, NamedList>,
}

impl ListDirectory {
    pub fn new(lists: impl IntoIterator<Item = NamedList>) -> Self {
        Self {
            lists: lists.into_iter().map(|l| (l.name.clone(), l)).collect(),
        }
    }

    /// Walk every page of the account's lists, then put each one whose sort
    /// mode differs from `sort_by` back in order. Rejected sort changes are
    /// appended to `failures`.
    pub async fn load(
        store: &dyn ListStore,
        account_id: &str,
        sort_by: i64,
        failures: &mut Vec<WriteFailure>,
    ) -> Result<Self> {
        let mut lists = fetch_lists(store, account_id).await?;
        debug!("Found {} lists on account", lists.len());

        for list in &mut lists {
            if list.sort_by == Some(sort_by) {
                continue;
            }
            let outcome = store
                .set_sort_mode(list.id, sort_by)
                .await
                .with_context(|| format!("Failed to set sort mode on list {}", list.name))?;
            if outcome.success {
                debug!(list = %list.name, "Sort mode set to {}", sort_by);
                list.sort_by = Some(sort_by);
            } else {
                failures.push(WriteFailure::new(&list.name, WriteAction::Sort, outcome.status_message).log());
            }
        }

        Ok(Self::new(lists))
    }

    /// Like `load`, but read-only: lists with the wrong sort mode are only
    /// logged.
    pub async fn inspect(store: &dyn ListStore, account_id: &str, sort_by: i64) -> Result<Self> {
        let lists = fetch_lists(store, account_id).await?;
        debug!("Found {} lists on account", lists.len());
        for list in lists.iter().filter(|l| l.sort_by != Some(sort_by)) {
            info!(list = %list.name, "Would set sort mode to {}", sort_by);
        }
        Ok(Self::new(lists))
    }

    pub fn get(&self, name: &str) -> Option<&NamedList> {
        self.lists.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&NamedList> {
        self.get(name)
            .ok_or_else(|| anyhow!("List '{}' not found on the account", name))
    }

    pub fn insert(&mut self, list: NamedList) {
        self.lists.insert(list.name.clone(), list);
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedList> {
        self.lists.values()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

/// Every list on the account, across all pages. Read-only.
pub async fn fetch_lists(store: &dyn ListStore, account_id: &str) -> Result<Vec<NamedList>> {
    let mut lists = Vec::new();
    let mut page = 1;
    loop {
        let response = store
            .get_lists(account_id, page)
            .await
            .with_context(|| format!("Failed to fetch account lists (page {})", page))?;
        lists.extend(response.results);
        if page >= response.total_pages {
            break;
        }
        page += 1;
    }
    Ok(lists)
}

/// Every movie id in a list, across all pages. TV entries are ignored.
pub async fn read_movie_ids(store: &dyn ListStore, list_id: u64) -> Result<BTreeSet<MovieId>> {
    let mut ids = BTreeSet::new();
    let mut page = 1;
    loop {
        let items = store
            .get_list_items(list_id, page)
            .await
            .with_context(|| format!("Failed to read list {} (page {})", list_id, page))?;

        if items.results.is_empty() {
            ids.extend(items.object_ids.iter().filter_map(|token| parse_object_id(token)));
        } else {
            ids.extend(items.results.iter().filter(|e| e.is_movie()).map(|e| e.id));
        }

        if page >= items.total_pages {
            break;
        }
        page += 1;
    }
    Ok(ids)
}

/// `movie:550` → 550. Other media types and malformed tokens give `None`.
pub fn parse_object_id(token: &str) -> Option<MovieId> {
    let (media_type, id) = token.split_once(':')?;
    if media_type != "movie" {
        return None;
    }
    id.parse().ok()
}

/// What a write phase did, by list name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub failed: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<WriteFailure>,
}

/// Rewrites lists wholesale: clear, then add the target membership.
pub struct ListWriter<'a> {
    store: &'a dyn ListStore,
    language: String,
    sort_by: i64,
    create_missing: bool,
    write_delay: Duration,
    progress: &'a dyn SyncProgress,
}

impl<'a> ListWriter<'a> {
    pub fn new(store: &'a dyn ListStore, language: impl Into<String>, sort_by: i64) -> Self {
        Self {
            store,
            language: language.into(),
            sort_by,
            create_missing: true,
            write_delay: Duration::ZERO,
            progress: &(),
        }
    }

    pub fn create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    pub fn with_write_delay(mut self, write_delay: Duration) -> Self {
        self.write_delay = write_delay;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn SyncProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the contents of `list` with `ids`. Returns the rejected steps;
    /// an empty vec means the list now holds exactly `ids`.
    pub async fn populate(&self, list: &NamedList, ids: &BTreeSet<MovieId>) -> Result<Vec<WriteFailure>> {
        let mut failures = Vec::new();

        let cleared = self
            .store
            .clear_list(list.id)
            .await
            .with_context(|| format!("Failed to clear list {}", list.name))?;
        if !cleared.success {
            failures.push(WriteFailure::new(&list.name, WriteAction::Clear, cleared.status_message).log());
        }

        if !ids.is_empty() {
            let items: Vec<ListItem> = ids.iter().map(|id| ListItem::movie(*id)).collect();
            let added = self
                .store
                .add_items(list.id, &items)
                .await
                .with_context(|| format!("Failed to populate list {}", list.name))?;
            if !added.success {
                failures.push(WriteFailure::new(&list.name, WriteAction::Populate, added.status_message).log());
            }
        }

        Ok(failures)
    }

    /// Write every bucket, On Deck first, creating missing lists when allowed.
    pub async fn write_all(&self, directory: &mut ListDirectory, buckets: &GenreBuckets) -> Result<WriteReport> {
        let order = buckets.write_order();
        let total = order.len();
        let mut tracker = ProgressTracker::new(total);
        let mut report = WriteReport::default();

        for (index, (name, ids)) in order.into_iter().enumerate() {
            if index > 0 && !self.write_delay.is_zero() {
                tokio::time::sleep(self.write_delay).await;
            }
            self.progress.list_started(index + 1, total, name);
            info!("({} of {}): Populating {}", index + 1, total, name);

            let existing = directory.get(name).cloned();
            let list = match existing {
                Some(list) => list,
                None => match self.create(name, &mut report).await? {
                    Some(list) => {
                        directory.insert(list.clone());
                        list
                    }
                    None => {
                        tracker.record_skipped();
                        continue;
                    }
                },
            };

            let failures = self.populate(&list, ids).await?;
            if failures.is_empty() {
                tracker.record_written();
                report.written.push(name.to_string());
            } else {
                tracker.record_failed();
                report.failed.push(name.to_string());
                report.failures.extend(failures);
            }
        }

        self.progress.lists_finished();
        tracker.log_summary("List write");
        Ok(report)
    }

    async fn create(&self, name: &str, report: &mut WriteReport) -> Result<Option<NamedList>> {
        if !self.create_missing {
            warn!(list = %name, "No list named {} and create_missing is off, skipping", name);
            report.skipped.push(name.to_string());
            return Ok(None);
        }

        let created = self
            .store
            .create_list(name, &self.language)
            .await
            .with_context(|| format!("Failed to create list {}", name))?;
        let id = match created.id {
            Some(id) if created.success => id,
            _ => {
                report.failed.push(name.to_string());
                report
                    .failures
                    .push(WriteFailure::new(name, WriteAction::Create, created.status_message).log());
                return Ok(None);
            }
        };
        info!(list = %name, id, "Created list {}", name);

        let mut list = NamedList {
            id,
            name: name.to_string(),
            sort_by: None,
            number_of_items: Some(0),
        };
        let sorted = self
            .store
            .set_sort_mode(id, self.sort_by)
            .await
            .with_context(|| format!("Failed to set sort mode on list {}", name))?;
        if sorted.success {
            list.sort_by = Some(self.sort_by);
        } else {
            report
                .failures
                .push(WriteFailure::new(name, WriteAction::Sort, sorted.status_message).log());
        }
        Ok(Some(list))
    }
}
