// src/integrations/pokeapi/client.rs
//
// PokeAPI Integration
//
// ARCHITECTURE:
// - REST client for the public, read-only PokeAPI
// - Maps external payloads → domain records (NO collection mutation)
// - Used by SearchService and BrowseService
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - No retries, no caching
// - Every request carries the configured timeout

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::domain::{
    Ability, BaseStat, CreatureIndexEntry, CreatureRecord, EvolutionChain, FlavorTextEntry,
    SpeciesMetadata, Sprites,
};
use crate::error::{AppError, AppResult};

/// Read-only creature data source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatureApi: Send + Sync {
    /// Fetch a creature by lower-case name or numeric identifier
    async fn fetch_creature(&self, name_or_id: &str) -> AppResult<CreatureRecord>;

    async fn fetch_species(&self, id: u32) -> AppResult<SpeciesMetadata>;

    /// Fetch the chain behind a species' evolution-chain reference
    async fn fetch_evolution_chain(&self, url: &str) -> AppResult<EvolutionChain>;

    /// Fetch the name/reference listing used for browsing
    async fn fetch_index(&self, limit: u32) -> AppResult<Vec<CreatureIndexEntry>>;
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PokemonData {
    id: u32,
    name: String,
    sprites: SpritesData,
    #[serde(default)]
    types: Vec<TypeSlotData>,
    #[serde(default)]
    stats: Vec<StatData>,
    #[serde(default)]
    abilities: Vec<AbilityData>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    base_experience: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SpritesData {
    front_default: Option<String>,
    front_shiny: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotData {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatData {
    stat: NamedResource,
    base_stat: u32,
}

#[derive(Debug, Deserialize)]
struct AbilityData {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Debug, Deserialize)]
struct SpeciesData {
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextData>,
    evolution_chain: Option<UrlResource>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextData {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Debug, Deserialize)]
struct UrlResource {
    url: String,
}

#[derive(Debug, Deserialize)]
struct EvolutionChainData {
    chain: ChainLinkData,
}

#[derive(Debug, Deserialize)]
struct ChainLinkData {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<ChainLinkData>,
}

#[derive(Debug, Deserialize)]
struct IndexData {
    results: Vec<NamedResource>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// PokeAPI REST client
pub struct PokeApiClient {
    base_url: Url,
    http_client: Client,
}

impl PokeApiClient {
    /// Create a client from configuration
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("pokehub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Api(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .map_err(|e| AppError::Config(format!("Invalid API URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("{} cannot be a base URL", base_url)));
        }

        Ok(Self { base_url, http_client })
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment
    fn resource_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    /// GET `url` and decode its JSON body.
    /// A 404 becomes `NotFound(subject)`; other failures become `Api`.
    async fn get_json<T>(&self, url: &str, subject: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            return Err(AppError::Api(format!("{} returned status {}", url, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Api(format!("Failed to parse response from {}: {}", url, e)))
    }

    // ========================================================================
    // INTERNAL: Mapping
    // ========================================================================

    fn map_creature(data: PokemonData) -> CreatureRecord {
        CreatureRecord {
            id: data.id,
            name: data.name,
            types: data.types.into_iter().map(|t| t.kind.name).collect(),
            stats: data
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            abilities: data
                .abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    hidden: a.is_hidden,
                })
                .collect(),
            height: data.height,
            weight: data.weight,
            sprites: Sprites {
                normal: data.sprites.front_default,
                shiny: data.sprites.front_shiny,
            },
            base_experience: data.base_experience,
        }
    }

    fn map_species(data: SpeciesData) -> SpeciesMetadata {
        SpeciesMetadata {
            flavor_text_entries: data
                .flavor_text_entries
                .into_iter()
                .map(|entry| FlavorTextEntry {
                    text: entry.flavor_text,
                    language: entry.language.name,
                })
                .collect(),
            evolution_chain_url: data.evolution_chain.map(|c| c.url),
        }
    }

    /// Flatten the nested chain by following the first listed next stage
    fn map_chain(data: EvolutionChainData) -> Option<EvolutionChain> {
        let mut stages = Vec::new();
        let mut current = Some(data.chain);

        while let Some(link) = current {
            stages.push((link.species.name, link.species.url));
            current = link.evolves_to.into_iter().next();
        }

        EvolutionChain::from_stages(stages)
    }
}

#[async_trait]
impl CreatureApi for PokeApiClient {
    async fn fetch_creature(&self, name_or_id: &str) -> AppResult<CreatureRecord> {
        let url = self.resource_url(&["pokemon", name_or_id])?;
        let data: PokemonData = self.get_json(url.as_str(), name_or_id).await?;
        Ok(Self::map_creature(data))
    }

    async fn fetch_species(&self, id: u32) -> AppResult<SpeciesMetadata> {
        let url = self.resource_url(&["pokemon-species", &id.to_string()])?;
        let data: SpeciesData = self.get_json(url.as_str(), &format!("species #{}", id)).await?;
        Ok(Self::map_species(data))
    }

    async fn fetch_evolution_chain(&self, url: &str) -> AppResult<EvolutionChain> {
        let data: EvolutionChainData = self.get_json(url, url).await?;
        Self::map_chain(data).ok_or_else(|| AppError::NotFound(url.to_string()))
    }

    async fn fetch_index(&self, limit: u32) -> AppResult<Vec<CreatureIndexEntry>> {
        let mut url = self.resource_url(&["pokemon"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let data: IndexData = self.get_json(url.as_str(), "creature index").await?;

        Ok(data
            .results
            .into_iter()
            .map(|r| CreatureIndexEntry {
                name: r.name,
                url: r.url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evolution_sequence;

    #[test]
    fn test_client_creation() {
        let config = AppConfig::default()
            .with_api_url("https://pokeapi.co/api/v2/")
            .unwrap();
        let client = PokeApiClient::new(&config).unwrap();

        assert_eq!(
            client.resource_url(&["pokemon", "pikachu"]).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/pikachu"
        );
    }

    #[test]
    fn test_query_stays_one_path_segment() {
        let client = PokeApiClient::new(&AppConfig::default()).unwrap();

        let url = client.resource_url(&["pokemon", "mr/mime?x#y"]).unwrap();
        assert!(url.as_str().ends_with("/pokemon/mr%2Fmime%3Fx%23y"));
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().map(|s| s.count()), Some(4));
    }

    #[test]
    fn test_map_creature_payload() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "height": 4,
            "weight": 60,
            "sprites": {"front_default": "https://img/25.png", "front_shiny": null, "back_default": null},
            "types": [{"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}],
            "stats": [
                {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
                {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
            ],
            "abilities": [
                {"ability": {"name": "static", "url": "u"}, "is_hidden": false, "slot": 1},
                {"ability": {"name": "lightning-rod", "url": "u"}, "is_hidden": true, "slot": 3}
            ]
        }"#;

        let data: PokemonData = serde_json::from_str(json).unwrap();
        let record = PokeApiClient::map_creature(data);

        assert_eq!(record.id, 25);
        assert_eq!(record.types, vec!["electric".to_string()]);
        assert_eq!(record.stats[1].name, "speed");
        assert_eq!(record.stats[1].value, 90);
        assert!(record.abilities[1].hidden);
        assert_eq!(record.sprites.normal.as_deref(), Some("https://img/25.png"));
        assert!(record.sprites.shiny.is_none());
        assert_eq!(record.base_experience, Some(112));
    }

    #[test]
    fn test_map_species_payload() {
        let json = r#"{
            "flavor_text_entries": [
                {"flavor_text": "Il stocke", "language": {"name": "fr", "url": "u"}, "version": {"name": "x", "url": "u"}},
                {"flavor_text": "It stores\felectricity.", "language": {"name": "en", "url": "u"}, "version": {"name": "x", "url": "u"}}
            ],
            "evolution_chain": {"url": "https://pokeapi.co/api/v2/evolution-chain/10/"}
        }"#;

        let data: SpeciesData = serde_json::from_str(json).unwrap();
        let species = PokeApiClient::map_species(data);

        assert_eq!(species.flavor_text_entries.len(), 2);
        assert_eq!(
            species.evolution_chain_url.as_deref(),
            Some("https://pokeapi.co/api/v2/evolution-chain/10/")
        );
        assert_eq!(crate::domain::flavor_text(Some(&species)), "It stores electricity.");
    }

    #[test]
    fn test_map_branching_chain_follows_first_link() {
        let json = r#"{
            "id": 67,
            "chain": {
                "species": {"name": "eevee", "url": "https://pokeapi.co/api/v2/pokemon-species/133/"},
                "evolves_to": [
                    {"species": {"name": "vaporeon", "url": "https://pokeapi.co/api/v2/pokemon-species/134/"}, "evolves_to": []},
                    {"species": {"name": "jolteon", "url": "https://pokeapi.co/api/v2/pokemon-species/135/"}, "evolves_to": []}
                ]
            }
        }"#;

        let data: EvolutionChainData = serde_json::from_str(json).unwrap();
        let chain = PokeApiClient::map_chain(data).unwrap();
        let steps = evolution_sequence(Some(&chain));

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "eevee");
        assert_eq!(steps[0].id, Some(133));
        assert_eq!(steps[1].name, "vaporeon");
    }

    // Note: no live API calls here; services are tested against MockCreatureApi
}
