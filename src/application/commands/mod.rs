// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the CLI/shell and services
// - Commands return DTOs
// - Commands handle error conversion for display
// - Commands NEVER contain business logic

pub mod browse_commands;
pub mod collection_commands;
pub mod search_commands;

pub use browse_commands::*;
pub use collection_commands::*;
pub use search_commands::*;
