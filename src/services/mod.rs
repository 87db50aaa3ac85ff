// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod browse_service;
pub mod collection_service;
pub mod search_service;

pub use browse_service::{BrowseItem, BrowsePage, BrowseService};
pub use collection_service::CollectionService;
pub use search_service::{
    SearchOutcome,
    SearchResult,
    SearchService,
    SearchState,
    RANDOM_ID_MAX,
};
