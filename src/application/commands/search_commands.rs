// src/application/commands/search_commands.rs
//
// Search Command Handlers
//
// RULES:
// - Call services
// - Return DTOs
// - Never contain business logic

use crate::application::{
    dto::CreatureDto,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::services::SearchOutcome;

fn outcome_to_dto(state: &AppState, outcome: SearchOutcome, shiny: bool) -> Option<CreatureDto> {
    match outcome {
        SearchOutcome::Completed(result) => Some(CreatureDto::from_result(
            &result,
            shiny,
            &state.collection_service,
        )),
        SearchOutcome::Superseded => None,
    }
}

/// Search by name or id.
/// `Ok(None)` when a newer search superseded this one.
pub async fn search_creature(
    state: &AppState,
    query: &str,
    shiny: bool,
) -> Result<Option<CreatureDto>, ErrorResponse> {
    let outcome = state.search_service.search(query).await.to_error_response()?;
    Ok(outcome_to_dto(state, outcome, shiny))
}

/// Search a random creature
pub async fn random_creature(
    state: &AppState,
    shiny: bool,
) -> Result<Option<CreatureDto>, ErrorResponse> {
    let outcome = state.search_service.random().await.to_error_response()?;
    Ok(outcome_to_dto(state, outcome, shiny))
}

/// The creature currently displayed, if any
pub fn current_creature(state: &AppState, shiny: bool) -> Option<CreatureDto> {
    state
        .search_service
        .snapshot()
        .result
        .map(|result| CreatureDto::from_result(&result, shiny, &state.collection_service))
}

/// Previous queries, most recent first
pub fn search_suggestions(state: &AppState) -> Vec<String> {
    state.collection_service.history()
}
