// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls

pub mod collection_repository;
pub mod storage_repository;

pub use collection_repository::{CollectionRepository, StorageCollectionRepository};
pub use storage_repository::{KeyValueStorage, MemoryStorage, SqliteStorage};
