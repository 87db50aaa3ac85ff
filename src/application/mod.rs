// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the terminal (CLI, shell) and the services
// - Translates domain results into DTOs and display text
// - Collapses every error into one user-facing message

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod shell;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use shell::Shell;
pub use state::AppState;
