//! Filtered view over a server-paginated collection.
//!
//! Each view instance owns one page of records fetched from a
//! [`PageSource`] plus a locally filtered subset. Page loads go to the
//! network; criteria changes never do - they recompute the filtered
//! subset synchronously from the records already in hand.
//!
//! State machine: `Idle -> Loading -> {Loaded, Failed}`, with `Loaded`
//! re-entering `Loading` on page change or refresh. Loads are
//! serialized per instance by `&mut self`, so the last completed load
//! is always the last write to state.

use reporta_core::{Filterable, FilterCriteria, apply_criteria};
use serde::Deserialize;

use crate::error::ApiError;

/// Loading state of a collection view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A page request is in flight.
    Loading,
    /// A page is loaded and displayable.
    Loaded,
    /// The last load failed; holds a human-readable cause. The view
    /// offers [`CollectionView::retry`] as the recovery affordance.
    Failed(String),
}

/// One page of a remote collection, as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<R> {
    pub data: Vec<R>,
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

/// Server-sourced pagination metadata.
///
/// `total` counts the whole remote collection and is deliberately
/// distinct from the locally filtered count, so callers can render
/// "N of M" without contradiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

/// A remote endpoint that serves pages of records.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Record: Filterable + Clone;

    /// Fetch one page (1-based).
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Record>, ApiError>;
}

/// A server-paginated collection with client-side filtering.
#[derive(Debug)]
pub struct CollectionView<S: PageSource> {
    source: S,
    state: LoadState,
    records: Vec<S::Record>,
    filtered: Vec<S::Record>,
    criteria: FilterCriteria,
    meta: Option<PageMeta>,
    last_requested: u32,
}

impl<S: PageSource> CollectionView<S> {
    /// Create an idle view over a page source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            records: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            meta: None,
            last_requested: 1,
        }
    }

    /// Fetch one page from the remote collection.
    ///
    /// Requests outside `[1, last_page]` are rejected before any
    /// network call and leave the view untouched; the return value is
    /// `false` for such guarded no-ops. On success the previous record
    /// set is replaced and the current criteria re-applied. On failure
    /// the view transitions to [`LoadState::Failed`] and the previous
    /// page is discarded - stale records that no longer match the
    /// stated page are never displayed.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the fetch fails.
    pub async fn load_page(&mut self, page: u32) -> Result<bool, ApiError> {
        if page == 0 {
            return Ok(false);
        }
        if let Some(meta) = &self.meta
            && page > meta.last_page
        {
            return Ok(false);
        }

        self.state = LoadState::Loading;
        self.last_requested = page;

        match self.source.fetch_page(page).await {
            Ok(fetched) => {
                self.meta = Some(PageMeta {
                    current_page: fetched.current_page,
                    last_page: fetched.last_page,
                    total: fetched.total,
                });
                self.records = fetched.data;
                self.refilter();
                self.state = LoadState::Loaded;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "collection page load failed");
                self.records.clear();
                self.filtered.clear();
                self.meta = None;
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Re-issue the last requested page (error recovery / refresh).
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the fetch fails.
    pub async fn retry(&mut self) -> Result<bool, ApiError> {
        self.load_page(self.last_requested).await
    }

    /// Replace the filter criteria and recompute the filtered subset.
    ///
    /// Purely local: operates on the already-loaded page and never
    /// issues a network request or changes the load state.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Reset to the identity filter (filtered view = full loaded set).
    pub fn clear_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    fn refilter(&mut self) {
        self.filtered = apply_criteria(&self.records, &self.criteria);
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// The full loaded page.
    #[must_use]
    pub fn records(&self) -> &[S::Record] {
        &self.records
    }

    /// The filtered subset of the loaded page.
    #[must_use]
    pub fn filtered(&self) -> &[S::Record] {
        &self.filtered
    }

    /// Count of locally filtered records (the "N" of "N of M").
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// The active criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Server-reported page number currently loaded.
    #[must_use]
    pub fn current_page(&self) -> Option<u32> {
        self.meta.map(|m| m.current_page)
    }

    /// Server-reported page count.
    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.meta.map(|m| m.last_page)
    }

    /// Server-reported size of the whole collection (the "M").
    #[must_use]
    pub fn total_records(&self) -> Option<u64> {
        self.meta.map(|m| m.total)
    }
}
