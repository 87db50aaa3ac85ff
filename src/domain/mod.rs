// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod browse;
pub mod collection;
pub mod creature;
pub mod evolution;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Creature Domain
pub use creature::{
    flavor_text, id_from_resource_url, Ability, BaseStat, CreatureRecord, FlavorTextEntry,
    SpeciesMetadata, Sprites,
};

// Evolution Domain
pub use evolution::{evolution_sequence, EvolutionChain, EvolutionNode, EvolutionStep};

// Collection Domain
pub use collection::{CollectionEntry, CollectionKind};

// Browse Domain (transient)
pub use browse::{BrowseState, CreatureIndexEntry, PAGE_SIZE};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("The {kind} is full (maximum {capacity})")]
    CollectionFull {
        kind: CollectionKind,
        capacity: usize,
    },

    #[error("{name} is already in the {kind}")]
    DuplicateEntry { kind: CollectionKind, name: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
