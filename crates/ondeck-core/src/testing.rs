//! In-memory collaborators for exercising the resolver and the sync run.

use async_trait::async_trait;
use chrono::NaiveDate;
use ondeck_models::{
    AvailabilityKind, Collection, CollectionPart, CreatedList, Genre, GenreCatalog, ListEntry, ListItem,
    ListItemsPage, Movie, MovieId, NamedList, Page, Provider, RegionAvailability, WatchAvailability,
    WriteOutcome, SORT_BY_RELEASE_DATE_DESC,
};
use ondeck_sources::{ListStore, MetadataSource, Result, SourceError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::progress::SyncProgress;

const GENRES: [(u32, &str); 10] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (18, "Drama"),
    (27, "Horror"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (53, "Thriller"),
    (37, "Western"),
];

pub fn genre(name: &str) -> Genre {
    let (id, name) = GENRES
        .iter()
        .find(|(_, n)| *n == name)
        .unwrap_or_else(|| panic!("unknown test genre {}", name));
    Genre {
        id: *id,
        name: name.to_string(),
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn today() -> NaiveDate {
    date("2026-10-19")
}

pub fn part(id: MovieId, release_date: &str, genres: &[&str]) -> CollectionPart {
    CollectionPart {
        id,
        title: format!("Part {}", id),
        media_type: "movie".to_string(),
        release_date: Some(date(release_date)),
        genre_ids: genres.iter().map(|g| genre(g).id).collect(),
    }
}

pub fn free_in_us() -> WatchAvailability {
    offered_in_us(AvailabilityKind::Free, "Tubi TV")
}

pub fn offered_in_us(kind: AvailabilityKind, provider: &str) -> WatchAvailability {
    WatchAvailability::default()
        .with_region("US", RegionAvailability::default().with(kind, vec![Provider::named(provider)]))
}

fn not_found() -> SourceError {
    SourceError::Api {
        status: 404,
        message: "The resource you requested could not be found.".to_string(),
    }
}

#[derive(Default)]
pub struct FakeMetadata {
    movies: HashMap<MovieId, Movie>,
    collections: HashMap<u64, Collection>,
    providers: HashMap<MovieId, WatchAvailability>,
    calls: Mutex<Vec<String>>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, id: MovieId, title: &str, genres: &[&str]) -> Self {
        self.movies.insert(
            id,
            Movie {
                id,
                title: title.to_string(),
                release_date: None,
                genres: genres.iter().map(|g| genre(g)).collect(),
                collection_id: None,
            },
        );
        self
    }

    pub fn with_collection_movie(mut self, id: MovieId, title: &str, collection_id: u64) -> Self {
        self = self.with_movie(id, title, &[]);
        if let Some(movie) = self.movies.get_mut(&id) {
            movie.collection_id = Some(collection_id);
        }
        self
    }

    pub fn with_collection(mut self, id: u64, parts: Vec<CollectionPart>) -> Self {
        self.collections.insert(
            id,
            Collection {
                id,
                name: format!("Collection {}", id),
                parts,
            },
        );
        self
    }

    pub fn with_providers(mut self, id: MovieId, availability: WatchAvailability) -> Self {
        self.providers.insert(id, availability);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MetadataSource for FakeMetadata {
    async fn get_movie(&self, movie_id: MovieId) -> Result<Movie> {
        self.record(format!("movie {}", movie_id));
        self.movies.get(&movie_id).cloned().ok_or_else(not_found)
    }

    async fn get_collection(&self, collection_id: u64) -> Result<Collection> {
        self.record(format!("collection {}", collection_id));
        self.collections.get(&collection_id).cloned().ok_or_else(not_found)
    }

    async fn get_genre_catalog(&self) -> Result<GenreCatalog> {
        self.record("genres".to_string());
        Ok(GenreCatalog::new(GENRES.iter().map(|(_, name)| genre(name))))
    }

    async fn get_watch_providers(&self, movie_id: MovieId) -> Result<WatchAvailability> {
        self.record(format!("providers {}", movie_id));
        Ok(self.providers.get(&movie_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct StoreState {
    lists: Vec<NamedList>,
    items: HashMap<u64, Vec<MovieId>>,
    legacy: HashSet<u64>,
    fail_sort: HashSet<u64>,
    fail_clear: HashSet<u64>,
    fail_add: HashSet<u64>,
    fail_create: bool,
    calls: Vec<String>,
}

/// A list store holding everything in memory. Pages hold `page_size` entries.
pub struct FakeListStore {
    state: Mutex<StoreState>,
    page_size: usize,
}

impl FakeListStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            page_size: 20,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_list(self, id: u64, name: &str, ids: &[MovieId]) -> Self {
        self.with_list_sorted_by(id, name, ids, Some(SORT_BY_RELEASE_DATE_DESC))
    }

    pub fn with_list_sorted_by(self, id: u64, name: &str, ids: &[MovieId], sort_by: Option<i64>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.lists.push(NamedList {
                id,
                name: name.to_string(),
                sort_by,
                number_of_items: Some(ids.len() as u32),
            });
            state.items.insert(id, ids.to_vec());
        }
        self
    }

    /// Serve this list's contents only through `object_ids`.
    pub fn legacy(self, id: u64) -> Self {
        self.state.lock().unwrap().legacy.insert(id);
        self
    }

    pub fn failing_sort(self, id: u64) -> Self {
        self.state.lock().unwrap().fail_sort.insert(id);
        self
    }

    pub fn failing_clear(self, id: u64) -> Self {
        self.state.lock().unwrap().fail_clear.insert(id);
        self
    }

    pub fn failing_add(self, id: u64) -> Self {
        self.state.lock().unwrap().fail_add.insert(id);
        self
    }

    pub fn failing_create(self) -> Self {
        self.state.lock().unwrap().fail_create = true;
        self
    }

    pub fn list(&self, name: &str) -> Option<NamedList> {
        let state = self.state.lock().unwrap();
        state.lists.iter().find(|l| l.name == name).cloned()
    }

    pub fn items(&self, name: &str) -> Option<Vec<MovieId>> {
        let list = self.list(name)?;
        self.state.lock().unwrap().items.get(&list.id).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that change list state
    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("lists ") && !c.starts_with("items "))
            .collect()
    }

    fn page_count(&self, len: usize) -> u32 {
        len.div_ceil(self.page_size).max(1) as u32
    }

    fn page_slice<T: Clone>(&self, all: &[T], page: u32) -> Vec<T> {
        all.iter()
            .skip((page as usize - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ListStore for FakeListStore {
    async fn get_lists(&self, account_id: &str, page: u32) -> Result<Page<NamedList>> {
        let lists = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("lists {} {}", account_id, page));
            state.lists.clone()
        };
        Ok(Page {
            results: self.page_slice(&lists, page),
            page,
            total_pages: self.page_count(lists.len()),
        })
    }

    async fn get_list_items(&self, list_id: u64, page: u32) -> Result<ListItemsPage> {
        let (ids, legacy) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("items {} {}", list_id, page));
            let Some(ids) = state.items.get(&list_id).cloned() else {
                return Err(not_found());
            };
            (ids, state.legacy.contains(&list_id))
        };

        let slice = self.page_slice(&ids, page);
        let total_pages = self.page_count(ids.len());
        if legacy {
            let mut object_ids: Vec<String> = slice.iter().map(|id| format!("movie:{}", id)).collect();
            object_ids.push("tv:1399".to_string());
            return Ok(ListItemsPage {
                results: vec![],
                object_ids,
                page,
                total_pages,
            });
        }

        let mut results: Vec<ListEntry> = slice
            .into_iter()
            .map(|id| ListEntry {
                id,
                media_type: "movie".to_string(),
            })
            .collect();
        if page == 1 {
            results.push(ListEntry {
                id: 1399,
                media_type: "tv".to_string(),
            });
        }
        Ok(ListItemsPage {
            results,
            object_ids: vec![],
            page,
            total_pages,
        })
    }

    async fn set_sort_mode(&self, list_id: u64, sort_by: i64) -> Result<WriteOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("sort {} {}", list_id, sort_by));
        if state.fail_sort.contains(&list_id) {
            return Ok(WriteOutcome::failed("Sort rejected."));
        }
        if let Some(list) = state.lists.iter_mut().find(|l| l.id == list_id) {
            list.sort_by = Some(sort_by);
        }
        Ok(WriteOutcome::ok())
    }

    async fn clear_list(&self, list_id: u64) -> Result<WriteOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clear {}", list_id));
        if state.fail_clear.contains(&list_id) {
            return Ok(WriteOutcome::failed("Clear rejected."));
        }
        state.items.insert(list_id, vec![]);
        Ok(WriteOutcome::ok())
    }

    async fn add_items(&self, list_id: u64, items: &[ListItem]) -> Result<WriteOutcome> {
        let mut state = self.state.lock().unwrap();
        let ids: Vec<MovieId> = items.iter().map(|i| i.media_id).collect();
        state.calls.push(format!("add {} {:?}", list_id, ids));
        if state.fail_add.contains(&list_id) {
            return Ok(WriteOutcome::failed("Add rejected."));
        }
        state.items.entry(list_id).or_default().extend(ids);
        Ok(WriteOutcome::ok())
    }

    async fn create_list(&self, name: &str, iso_639_1: &str) -> Result<CreatedList> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create {} {}", name, iso_639_1));
        if state.fail_create {
            return Ok(CreatedList {
                success: false,
                id: None,
                status_message: Some("Create rejected.".to_string()),
            });
        }
        let id = 9000 + state.lists.len() as u64;
        state.lists.push(NamedList {
            id,
            name: name.to_string(),
            sort_by: None,
            number_of_items: Some(0),
        });
        state.items.insert(id, vec![]);
        Ok(CreatedList {
            success: true,
            id: Some(id),
            status_message: None,
        })
    }
}

/// Records every progress callback as a line of text.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl SyncProgress for RecordingProgress {
    fn movie_started(&self, index: usize, total: usize, title: &str) {
        self.events.lock().unwrap().push(format!("({} of {}): {}", index, total, title));
    }

    fn list_started(&self, index: usize, total: usize, name: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("({} of {}): Populating {}", index, total, name));
    }
}
