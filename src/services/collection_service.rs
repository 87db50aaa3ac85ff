// src/services/collection_service.rs
//
// Collection Store
//
// Owns History, Favorites, Team and Compare, enforces their invariants and is
// the only writer of their storage keys. Every mutation writes the affected
// collection through immediately; Compare stays in memory.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::collection::{
    append_bounded, push_history, remove_by_id, toggle_entry, validate_entries, validate_history,
    CollectionEntry, CollectionKind,
};
use crate::domain::{DomainError, DomainResult};
use crate::repositories::CollectionRepository;

#[derive(Debug, Default, Clone)]
struct Collections {
    history: Vec<String>,
    favorites: Vec<CollectionEntry>,
    team: Vec<CollectionEntry>,
    compare: Vec<CollectionEntry>,
}

impl Collections {
    fn entries_mut(&mut self, kind: CollectionKind) -> Option<&mut Vec<CollectionEntry>> {
        match kind {
            CollectionKind::History => None,
            CollectionKind::Favorites => Some(&mut self.favorites),
            CollectionKind::Team => Some(&mut self.team),
            CollectionKind::Compare => Some(&mut self.compare),
        }
    }
}

pub struct CollectionService {
    repo: Arc<dyn CollectionRepository>,
    state: Mutex<Collections>,
}

impl CollectionService {
    /// Create an empty store; call `load_all` once at startup
    pub fn new(repo: Arc<dyn CollectionRepository>) -> Self {
        Self {
            repo,
            state: Mutex::new(Collections::default()),
        }
    }

    /// Create the store and load persisted collections
    pub fn load(repo: Arc<dyn CollectionRepository>) -> Self {
        let service = Self::new(repo);
        service.load_all();
        service
    }

    // Collections are convenience state; a poisoned lock still holds usable data.
    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read every persisted collection from storage.
    ///
    /// Missing, unreadable or malformed content leaves that collection empty;
    /// nothing is surfaced to the caller. Compare always starts empty.
    pub fn load_all(&self) {
        let history = match self.repo.load_history() {
            Ok(Some(history)) => match validate_history(&history) {
                Ok(()) => history,
                Err(e) => {
                    log::warn!("Discarding stored history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read stored history: {}", e);
                Vec::new()
            }
        };

        let favorites = self.load_entries(CollectionKind::Favorites);
        let team = self.load_entries(CollectionKind::Team);

        let mut state = self.lock();
        *state = Collections {
            history,
            favorites,
            team,
            compare: Vec::new(),
        };

        log::info!(
            "Loaded collections: {} history, {} favorites, {} team",
            state.history.len(),
            state.favorites.len(),
            state.team.len()
        );
    }

    fn load_entries(&self, kind: CollectionKind) -> Vec<CollectionEntry> {
        match self.repo.load_entries(kind) {
            Ok(Some(entries)) => match validate_entries(&entries, kind) {
                Ok(()) => entries,
                Err(e) => {
                    log::warn!("Discarding stored {}: {}", kind, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read stored {}: {}", kind, e);
                Vec::new()
            }
        }
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write one collection through to storage.
    /// Failures are logged; the in-memory state stands.
    fn persist(&self, kind: CollectionKind, state: &Collections) {
        let result = match kind {
            CollectionKind::History => self.repo.save_history(&state.history),
            CollectionKind::Favorites => self.repo.save_entries(kind, &state.favorites),
            CollectionKind::Team => self.repo.save_entries(kind, &state.team),
            CollectionKind::Compare => return,
        };

        if let Err(e) = result {
            log::warn!("Failed to save {}: {}", kind, e);
        }
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Record a searched name as the most recent history entry
    pub fn add_history(&self, name: &str) {
        let mut state = self.lock();
        push_history(&mut state.history, name);
        self.persist(CollectionKind::History, &state);
    }

    /// Add the entry to favorites, or remove it if already there.
    /// Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&self, entry: CollectionEntry) -> bool {
        let mut state = self.lock();
        let is_favorite = toggle_entry(&mut state.favorites, entry, CollectionKind::Favorites);
        self.persist(CollectionKind::Favorites, &state);
        is_favorite
    }

    pub fn add_to_team(&self, entry: CollectionEntry) -> DomainResult<()> {
        self.append(CollectionKind::Team, entry)
    }

    /// Absent identifiers are ignored
    pub fn remove_from_team(&self, id: u32) {
        self.remove(CollectionKind::Team, id);
    }

    pub fn add_to_compare(&self, entry: CollectionEntry) -> DomainResult<()> {
        self.append(CollectionKind::Compare, entry)
    }

    /// Absent identifiers are ignored
    pub fn remove_from_compare(&self, id: u32) {
        self.remove(CollectionKind::Compare, id);
    }

    /// Empty the named collection
    pub fn clear(&self, kind: CollectionKind) {
        let mut state = self.lock();
        if kind == CollectionKind::History {
            state.history.clear();
        } else if let Some(entries) = state.entries_mut(kind) {
            entries.clear();
        }
        self.persist(kind, &state);
        log::info!("Cleared {}", kind);
    }

    fn append(&self, kind: CollectionKind, entry: CollectionEntry) -> DomainResult<()> {
        let mut state = self.lock();
        let entries = state.entries_mut(kind).ok_or_else(|| {
            DomainError::InvariantViolation(format!("The {} holds names, not entries", kind))
        })?;
        append_bounded(entries, entry, kind)?;
        self.persist(kind, &state);
        Ok(())
    }

    fn remove(&self, kind: CollectionKind, id: u32) {
        let mut state = self.lock();
        let removed = state
            .entries_mut(kind)
            .map(|entries| remove_by_id(entries, id))
            .unwrap_or(false);

        if removed {
            self.persist(kind, &state);
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    pub fn favorites(&self) -> Vec<CollectionEntry> {
        self.lock().favorites.clone()
    }

    pub fn team(&self) -> Vec<CollectionEntry> {
        self.lock().team.clone()
    }

    pub fn compare(&self) -> Vec<CollectionEntry> {
        self.lock().compare.clone()
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.lock().favorites.iter().any(|e| e.id == id)
    }

    pub fn is_in_team(&self, id: u32) -> bool {
        self.lock().team.iter().any(|e| e.id == id)
    }

    pub fn is_in_compare(&self, id: u32) -> bool {
        self.lock().compare.iter().any(|e| e.id == id)
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        let state = self.lock();
        match kind {
            CollectionKind::History => state.history.len(),
            CollectionKind::Favorites => state.favorites.len(),
            CollectionKind::Team => state.team.len(),
            CollectionKind::Compare => state.compare.len(),
        }
    }
}
