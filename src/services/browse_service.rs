// src/services/browse_service.rs
//
// Browse Service
//
// The creature index is fetched once per process and cached; the filter and
// page cursor live in a BrowseState behind a mutex. Every navigation call
// returns the resulting page.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::OnceCell;

use crate::domain::browse::{filter_index, page_count};
use crate::domain::{BrowseState, CreatureIndexEntry};
use crate::error::{AppError, AppResult};
use crate::integrations::CreatureApi;

/// One row of a browse page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseItem {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowsePage {
    pub filter: String,
    pub page: usize,
    pub page_count: usize,
    /// Number of entries matching the filter
    pub total: usize,
    pub entries: Vec<BrowseItem>,
}

pub struct BrowseService {
    api: Arc<dyn CreatureApi>,
    index_limit: u32,
    index: OnceCell<Vec<CreatureIndexEntry>>,
    state: Mutex<BrowseState>,
}

impl BrowseService {
    pub fn new(api: Arc<dyn CreatureApi>, index_limit: u32) -> Self {
        Self {
            api,
            index_limit,
            index: OnceCell::new(),
            state: Mutex::new(BrowseState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BrowseState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The full index, fetched on first use.
    /// A failed load is not cached; the next call tries again.
    pub async fn index(&self) -> AppResult<&[CreatureIndexEntry]> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let entries = self.api.fetch_index(self.index_limit).await.map_err(|e| {
                    log::warn!("Index load failed: {}", e);
                    AppError::IndexUnavailable
                })?;
                log::info!("Loaded {} index entries", entries.len());
                Ok::<_, AppError>(entries)
            })
            .await?;

        Ok(index.as_slice())
    }

    /// Apply `navigate` to the cursor and render the resulting page.
    /// The closure sees the match count under the filter in force before it
    /// runs; the page is sliced under the filter in force after it.
    async fn navigate<F>(&self, navigate: F) -> AppResult<BrowsePage>
    where
        F: FnOnce(&mut BrowseState, usize),
    {
        let index = self.index().await?;

        let mut state = self.lock();
        let count = filter_index(index, state.filter()).len();
        navigate(&mut *state, count);
        let filtered = filter_index(index, state.filter());

        let entries = state
            .visible(&filtered)
            .iter()
            .map(|entry| BrowseItem {
                id: entry.id(),
                name: entry.name.clone(),
            })
            .collect();

        Ok(BrowsePage {
            filter: state.filter().to_string(),
            page: state.page(),
            page_count: page_count(filtered.len()),
            total: filtered.len(),
            entries,
        })
    }

    pub async fn current_page(&self) -> AppResult<BrowsePage> {
        self.navigate(|_, _| {}).await
    }

    /// Replace the filter; always lands on page 1
    pub async fn set_filter(&self, filter: &str) -> AppResult<BrowsePage> {
        self.navigate(|state, _| state.set_filter(filter)).await
    }

    pub async fn next_page(&self) -> AppResult<BrowsePage> {
        self.navigate(|state, count| {
            if !state.next_page(count) {
                log::debug!("Already on the last page");
            }
        })
        .await
    }

    pub async fn previous_page(&self) -> AppResult<BrowsePage> {
        self.navigate(|state, count| {
            if !state.previous_page(count) {
                log::debug!("Already on the first page");
            }
        })
        .await
    }

    pub async fn go_to(&self, page: usize) -> AppResult<BrowsePage> {
        self.navigate(|state, count| state.go_to(page, count)).await
    }
}
