pub mod entity;
pub mod species;

pub use entity::{Ability, BaseStat, CreatureRecord, Sprites, MAX_BASE_STAT};
pub use species::{flavor_text, FlavorTextEntry, SpeciesMetadata};

/// Parse the identifier out of a resource reference such as
/// `https://pokeapi.co/api/v2/pokemon-species/25/`.
///
/// The identifier is the trailing numeric path segment; a trailing slash is
/// allowed.
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .filter(|id| *id > 0)
}
