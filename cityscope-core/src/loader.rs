//! Incremental loader for the remote city directory.
//!
//! The loader owns the append-only collection of [`CityRecord`]s plus the
//! fetch state machine, and derives the sorted/filtered table view and the
//! autosuggest candidates from whatever has been loaded so far. Pages are
//! requested with `offset = collection length`, so record order is exactly
//! arrival order and a page can never interleave with another: a new
//! request cannot begin while one is outstanding.

use tracing::{debug, warn};

use crate::model::{CityRecord, SortColumn, SortDirection, SortSpec};
use crate::remote::{DirectoryApi, FetchError};

/// Fixed directory page size.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    /// A page request is outstanding; further triggers are no-ops.
    Loading,
    /// The endpoint returned an empty page. Sticky: the loader never
    /// requests again.
    Exhausted,
}

#[derive(Debug, Clone, Copy)]
struct PageRequest {
    offset: usize,
    limit: usize,
}

#[derive(Debug)]
pub struct CityLoader {
    api: Box<dyn DirectoryApi>,
    cities: Vec<CityRecord>,
    state: FetchState,
    sort: SortSpec,
    search_query: String,
}

impl CityLoader {
    pub fn new(api: Box<dyn DirectoryApi>) -> Self {
        Self {
            api,
            cities: Vec::new(),
            state: FetchState::Idle,
            sort: SortSpec::default(),
            search_query: String::new(),
        }
    }

    /// Create a loader and request the first page unconditionally.
    ///
    /// A failed initial request leaves the loader empty and idle; the next
    /// visibility trigger retries it like any other page.
    pub async fn open(api: Box<dyn DirectoryApi>) -> Self {
        let mut loader = Self::new(api);

        if let Err(err) = loader.request_next_page().await {
            warn!("initial directory page failed: {err}");
        }

        loader
    }

    /// Reserve the next page slot, or refuse while loading/exhausted.
    fn begin_page(&mut self) -> Option<PageRequest> {
        if self.state != FetchState::Idle {
            return None;
        }

        self.state = FetchState::Loading;
        Some(PageRequest { offset: self.cities.len(), limit: PAGE_SIZE })
    }

    fn complete_page(
        &mut self,
        outcome: Result<Vec<CityRecord>, FetchError>,
    ) -> Result<(), FetchError> {
        match outcome {
            Ok(batch) if batch.is_empty() => {
                debug!("directory exhausted after {} records", self.cities.len());
                self.state = FetchState::Exhausted;
                Ok(())
            }
            Ok(batch) => {
                debug!("appending {} directory records at offset {}", batch.len(), self.cities.len());
                self.cities.extend(batch);
                self.state = FetchState::Idle;
                Ok(())
            }
            Err(err) => {
                // Retriable: the collection is untouched and the state
                // returns to idle, never exhausted.
                self.state = FetchState::Idle;
                Err(err)
            }
        }
    }

    /// Request the next directory page.
    ///
    /// A call while a request is outstanding, or after exhaustion, is a
    /// silent no-op. On failure the error is returned for logging; the
    /// loader itself stays retriable.
    pub async fn request_next_page(&mut self) -> Result<(), FetchError> {
        let Some(request) = self.begin_page() else {
            return Ok(());
        };

        let outcome = self.api.fetch_page(request.offset, request.limit).await;
        self.complete_page(outcome)
    }

    /// Level-triggered fetch signal: the consumer has scrolled the sentinel
    /// into view (or otherwise wants more rows). Harmless while a fetch is
    /// in flight or after exhaustion; fetch errors are logged only.
    pub async fn trigger_on_visibility(&mut self, visible: bool) {
        if !visible || self.state != FetchState::Idle {
            return;
        }

        if let Err(err) = self.request_next_page().await {
            warn!("directory page fetch failed, will retry on next trigger: {err}");
        }
    }

    pub fn set_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    /// The presentation view: the full collection stably sorted by the
    /// active column (case-insensitive), then filtered to records whose
    /// name or country contains the search query (case-insensitive). An
    /// empty query matches everything. Recomputed on every call.
    pub fn derived_view(&self) -> Vec<&CityRecord> {
        let mut view: Vec<&CityRecord> = self.cities.iter().collect();

        view.sort_by(|a, b| {
            let a_value = self.sort.column.key(a).to_lowercase();
            let b_value = self.sort.column.key(b).to_lowercase();
            let ordering = a_value.cmp(&b_value);

            match self.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let needle = self.search_query.to_lowercase();
        view.retain(|city| {
            city.name.to_lowercase().contains(&needle)
                || city.cou_name_en.to_lowercase().contains(&needle)
        });

        view
    }

    /// Autosuggest candidates over the full collection, not the filtered
    /// view: records whose name starts with `prefix` (case-insensitive,
    /// trimmed). An empty prefix yields no candidates.
    pub fn autosuggest_candidates(&self, prefix: &str) -> Vec<&CityRecord> {
        let needle = prefix.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.cities.iter().filter(|city| city.name.to_lowercase().starts_with(&needle)).collect()
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn has_more(&self) -> bool {
        self.state != FetchState::Exhausted
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }
}
