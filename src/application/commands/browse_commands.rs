// src/application/commands/browse_commands.rs
//
// Browse Command Handlers

use crate::application::{
    dto::BrowsePageDto,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};

/// Show a page of the index.
/// A new filter always starts from page 1; `page` is applied after it.
pub async fn browse(
    state: &AppState,
    filter: Option<&str>,
    page: Option<usize>,
) -> Result<BrowsePageDto, ErrorResponse> {
    let service = &state.browse_service;

    let mut current = match filter {
        Some(filter) => service.set_filter(filter).await.to_error_response()?,
        None => service.current_page().await.to_error_response()?,
    };
    if let Some(page) = page {
        current = service.go_to(page).await.to_error_response()?;
    }

    Ok(current.into())
}

pub async fn browse_next(state: &AppState) -> Result<BrowsePageDto, ErrorResponse> {
    let page = state.browse_service.next_page().await.to_error_response()?;
    Ok(page.into())
}

pub async fn browse_previous(state: &AppState) -> Result<BrowsePageDto, ErrorResponse> {
    let page = state.browse_service.previous_page().await.to_error_response()?;
    Ok(page.into())
}
