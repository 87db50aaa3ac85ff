// src/integrations/mod.rs
//
// External Integrations Module

pub mod pokeapi;

pub use pokeapi::{CreatureApi, PokeApiClient};
