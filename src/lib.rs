// src/lib.rs
// PokeHub - Local-first creature browser backed by PokeAPI
//
// Architecture:
// - Domain-centric: collection rules and pagination live in the domain
// - Explicit: no implicit behavior, no magic
// - Local-first: favorites, team and history persist in local storage
// - Application Layer: CLI and shell boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    evolution_sequence,
    flavor_text,
    // Browse
    BrowseState,
    // Collections
    CollectionEntry,
    CollectionKind,
    CreatureIndexEntry,
    // Creature
    CreatureRecord,
    DomainError,
    // Evolution
    EvolutionChain,
    EvolutionStep,
    SpeciesMetadata,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration & Database
// ============================================================================

pub use config::AppConfig;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CollectionRepository,
    KeyValueStorage,
    MemoryStorage,
    SqliteStorage,
    StorageCollectionRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    BrowsePage,
    BrowseService,
    CollectionService,
    SearchOutcome,
    SearchResult,
    SearchService,
    SearchState,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CreatureApi, PokeApiClient};
