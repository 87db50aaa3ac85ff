//! Browsing the creature index
//!
//! A case-insensitive name filter plus a 1-based page cursor over a fixed page
//! size. The cursor is clamped to `[1, page_count]` on every navigation
//! action, and `page_count` never drops below 1.

use serde::{Deserialize, Serialize};

use crate::domain::creature::id_from_resource_url;

pub const PAGE_SIZE: usize = 20;

/// One name/reference pair from the index listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureIndexEntry {
    pub name: String,
    pub url: String,
}

impl CreatureIndexEntry {
    pub fn id(&self) -> Option<u32> {
        id_from_resource_url(&self.url)
    }
}

/// Transient filter and pagination cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    filter: String,
    page: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 1,
        }
    }
}

/// Number of pages for `count` filtered entries, at least 1
pub fn page_count(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Entries whose name contains `filter`, ignoring case
pub fn filter_index<'a>(index: &'a [CreatureIndexEntry], filter: &str) -> Vec<&'a CreatureIndexEntry> {
    let needle = filter.trim().to_lowercase();
    index
        .iter()
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .collect()
}

impl BrowseState {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the filter and return to the first page
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.page = 1;
    }

    /// Jump to `page`, clamped to the valid range for `count` entries
    pub fn go_to(&mut self, page: usize, count: usize) {
        self.page = page.clamp(1, page_count(count));
    }

    /// Returns false when already on the last page
    pub fn next_page(&mut self, count: usize) -> bool {
        let before = self.page;
        self.go_to(self.page.saturating_add(1), count);
        self.page != before
    }

    /// Returns false when already on the first page
    pub fn previous_page(&mut self, count: usize) -> bool {
        let before = self.page;
        self.go_to(self.page.saturating_sub(1), count);
        self.page != before
    }

    /// The slice of `filtered` shown on the current page.
    /// Re-clamps first, since the index may have shrunk under the cursor.
    pub fn visible<'a, T>(&mut self, filtered: &'a [T]) -> &'a [T] {
        self.go_to(self.page, filtered.len());
        let start = (self.page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(filtered.len());
        filtered.get(start..end).unwrap_or(&[])
    }
}
