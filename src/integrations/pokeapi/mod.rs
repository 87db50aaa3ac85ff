pub mod client;

pub use client::{CreatureApi, PokeApiClient};

#[cfg(test)]
pub use client::MockCreatureApi;
