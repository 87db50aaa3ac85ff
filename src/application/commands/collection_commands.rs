// src/application/commands/collection_commands.rs
//
// Collection Command Handlers
//
// Favorites, team and compare actions apply to the creature currently
// displayed by the search controller.

use crate::application::{
    dto::{CollectionEntryDto, CompareTableDto},
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::{CollectionEntry, CollectionKind, CreatureRecord};

fn displayed_record(state: &AppState) -> Result<CreatureRecord, ErrorResponse> {
    state
        .search_service
        .snapshot()
        .result
        .map(|result| result.record)
        .ok_or_else(|| ErrorResponse::validation("Search for a creature first".to_string()))
}

/// Entries of a collection, in stored order.
/// History holds bare names; use `search_suggestions` for it.
pub fn list_collection(state: &AppState, kind: CollectionKind) -> Vec<CollectionEntryDto> {
    let entries = match kind {
        CollectionKind::History => Vec::new(),
        CollectionKind::Favorites => state.collection_service.favorites(),
        CollectionKind::Team => state.collection_service.team(),
        CollectionKind::Compare => state.collection_service.compare(),
    };
    entries.iter().map(CollectionEntryDto::from).collect()
}

pub fn clear_collection(state: &AppState, kind: CollectionKind) {
    state.collection_service.clear(kind);
}

/// Toggle the displayed creature in favorites.
/// Returns true when it is now a favorite.
pub fn toggle_favorite(state: &AppState) -> Result<bool, ErrorResponse> {
    let record = displayed_record(state)?;
    Ok(state
        .collection_service
        .toggle_favorite(CollectionEntry::favorite(&record)))
}

pub fn add_to_team(state: &AppState) -> Result<CollectionEntryDto, ErrorResponse> {
    let record = displayed_record(state)?;
    let entry = CollectionEntry::team_member(&record);
    state.collection_service.add_to_team(entry.clone())?;
    Ok(CollectionEntryDto::from(&entry))
}

pub fn remove_from_team(state: &AppState, id: u32) {
    state.collection_service.remove_from_team(id);
}

pub fn add_to_compare(state: &AppState) -> Result<CollectionEntryDto, ErrorResponse> {
    let record = displayed_record(state)?;
    let entry = CollectionEntry::comparison(&record);
    state.collection_service.add_to_compare(entry.clone())?;
    Ok(CollectionEntryDto::from(&entry))
}

pub fn remove_from_compare(state: &AppState, id: u32) {
    state.collection_service.remove_from_compare(id);
}

pub fn compare_table(state: &AppState) -> CompareTableDto {
    CompareTableDto::new(&state.collection_service.compare())
}
