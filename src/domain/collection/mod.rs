//! Critical Collection Invariants:
//!
//! 1. Every collection is bounded by its kind's capacity
//! 2. Entries are unique by identifier (History: by name)
//! 3. History and Favorites are most-recent-first
//! 4. Team and Compare keep insertion order and reject overflow
//! 5. Compare is session-only and never written to storage

pub mod entity;
pub mod invariants;

pub use entity::{CollectionEntry, CollectionKind};
pub use invariants::{
    append_bounded, push_history, remove_by_id, toggle_entry, validate_entries,
    validate_history,
};
