// src/services/search_service.rs
//
// Search Controller
//
// Resolves a query (name or numeric id) into a record, its species metadata
// and its evolution chain, fetched strictly in that order. Species and chain
// are best-effort. Each search takes a ticket from a monotonically increasing
// counter; a response is applied only while its ticket is the latest issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{
    evolution_sequence, flavor_text, CreatureRecord, EvolutionChain, EvolutionStep,
    SpeciesMetadata,
};
use crate::error::{AppError, AppResult};
use crate::integrations::CreatureApi;
use crate::services::CollectionService;

/// Highest identifier used for random lookups
pub const RANDOM_ID_MAX: u32 = 1010;

/// A fully resolved search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub record: CreatureRecord,
    pub species: Option<SpeciesMetadata>,
    pub evolution: Option<EvolutionChain>,
}

impl SearchResult {
    pub fn flavor_text(&self) -> String {
        flavor_text(self.species.as_ref())
    }

    pub fn evolution_sequence(&self) -> Vec<EvolutionStep> {
        evolution_sequence(self.evolution.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Completed(SearchResult),

    /// A newer search was issued before this one finished; its response was
    /// discarded.
    Superseded,
}

/// What the view currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub loading: bool,
    pub result: Option<SearchResult>,
    pub error: Option<String>,
}

pub struct SearchService {
    api: Arc<dyn CreatureApi>,
    collections: Arc<CollectionService>,
    latest_ticket: AtomicU64,
    state: Mutex<SearchState>,
}

impl SearchService {
    pub fn new(api: Arc<dyn CreatureApi>, collections: Arc<CollectionService>) -> Self {
        Self {
            api,
            collections,
            latest_ticket: AtomicU64::new(0),
            state: Mutex::new(SearchState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    /// Issue a ticket and reset displayed state
    fn begin(&self) -> u64 {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock() = SearchState {
            loading: true,
            result: None,
            error: None,
        };
        ticket
    }

    /// Current displayed state
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    /// Latest issued ticket (0 before the first search)
    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket.load(Ordering::SeqCst)
    }

    /// Search by name (case-insensitive) or numeric identifier.
    ///
    /// Fails with `EmptyQuery` for blank input and with `NotFound` when the
    /// record cannot be fetched for any reason. Returns
    /// `SearchOutcome::Superseded` if a newer search started meanwhile.
    pub async fn search(&self, query: &str) -> AppResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            let err = AppError::EmptyQuery;
            self.lock().error = Some(err.to_string());
            return Err(err);
        }

        let ticket = self.begin();
        let lookup = query.to_lowercase();
        log::debug!("Search #{} for '{}'", ticket, lookup);

        let record = match self.api.fetch_creature(&lookup).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Lookup of '{}' failed: {}", query, e);
                if !self.is_current(ticket) {
                    return Ok(SearchOutcome::Superseded);
                }
                let err = AppError::NotFound(query.to_string());
                self.fail(ticket, &err);
                return Err(err);
            }
        };
        if !self.is_current(ticket) {
            return Ok(SearchOutcome::Superseded);
        }

        let species = match self.api.fetch_species(record.id).await {
            Ok(species) => Some(species),
            Err(e) => {
                log::warn!("Species metadata for #{} unavailable: {}", record.id, e);
                None
            }
        };
        if !self.is_current(ticket) {
            return Ok(SearchOutcome::Superseded);
        }

        let chain_url = species
            .as_ref()
            .and_then(|s| s.evolution_chain_url.clone());
        let evolution = match chain_url {
            Some(url) => match self.api.fetch_evolution_chain(&url).await {
                Ok(chain) => Some(chain),
                Err(e) => {
                    log::warn!("Evolution chain {} unavailable: {}", url, e);
                    None
                }
            },
            None => None,
        };

        let result = SearchResult {
            record,
            species,
            evolution,
        };

        {
            let mut state = self.lock();
            if !self.is_current(ticket) {
                log::debug!("Search #{} superseded, discarding response", ticket);
                return Ok(SearchOutcome::Superseded);
            }
            *state = SearchState {
                loading: false,
                result: Some(result.clone()),
                error: None,
            };
        }

        self.collections.add_history(&result.record.name);
        log::info!("Found {}", result.record);

        Ok(SearchOutcome::Completed(result))
    }

    /// Search a uniformly random identifier in `1..=RANDOM_ID_MAX`
    pub async fn random(&self) -> AppResult<SearchOutcome> {
        let id = rand::random_range(1..=RANDOM_ID_MAX);
        self.search(&id.to_string()).await
    }

    fn fail(&self, ticket: u64, err: &AppError) {
        let mut state = self.lock();
        if self.is_current(ticket) {
            state.loading = false;
            state.error = Some(err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creature::entity::fixtures::creature;
    use crate::domain::{CreatureIndexEntry, FlavorTextEntry};
    use crate::integrations::pokeapi::MockCreatureApi;
    use crate::repositories::{MemoryStorage, StorageCollectionRepository};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use tokio::sync::Notify;

    const CHAIN_URL: &str = "https://pokeapi.co/api/v2/evolution-chain/10/";

    fn collections() -> Arc<CollectionService> {
        Arc::new(CollectionService::load(Arc::new(
            StorageCollectionRepository::new(Arc::new(MemoryStorage::new())),
        )))
    }

    fn species_with_chain() -> SpeciesMetadata {
        SpeciesMetadata {
            flavor_text_entries: vec![FlavorTextEntry {
                text: "When several of\u{000C}these gather".to_string(),
                language: "en".to_string(),
            }],
            evolution_chain_url: Some(CHAIN_URL.to_string()),
        }
    }

    fn pichu_chain() -> EvolutionChain {
        EvolutionChain::from_stages(vec![
            ("pichu".to_string(), "https://pokeapi.co/api/v2/pokemon-species/172/".to_string()),
            ("pikachu".to_string(), "https://pokeapi.co/api/v2/pokemon-species/25/".to_string()),
            ("raichu".to_string(), "https://pokeapi.co/api/v2/pokemon-species/26/".to_string()),
        ])
        .unwrap()
    }

    fn full_mock() -> MockCreatureApi {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .with(eq("pikachu"))
            .returning(|_| Ok(creature(25, "pikachu")));
        api.expect_fetch_species()
            .with(eq(25))
            .returning(|_| Ok(species_with_chain()));
        api.expect_fetch_evolution_chain()
            .with(eq(CHAIN_URL))
            .returning(|_| Ok(pichu_chain()));
        api
    }

    #[tokio::test]
    async fn test_search_pikachu_twice() {
        let collections = collections();
        let service = SearchService::new(Arc::new(full_mock()), collections.clone());

        let outcome = service.search("  Pikachu ").await.unwrap();
        let SearchOutcome::Completed(result) = outcome else {
            panic!("expected a completed search");
        };
        assert_eq!(result.record.id, 25);
        assert_eq!(result.flavor_text(), "When several of these gather");
        let names: Vec<String> = result.evolution_sequence().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["pichu", "pikachu", "raichu"]);
        assert_eq!(collections.history(), vec!["pikachu"]);

        service.search("pikachu").await.unwrap();
        assert_eq!(collections.history(), vec!["pikachu"]);

        let state = service.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.result.map(|r| r.record.id), Some(25));
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        // No expectations: any API call would panic
        let service = SearchService::new(Arc::new(MockCreatureApi::new()), collections());

        let err = service.search("   ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQuery));
        assert_eq!(service.latest_ticket(), 0);
        assert!(service.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn test_transport_failure_collapses_to_not_found() {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .returning(|_| Err(AppError::Api("connection refused".to_string())));

        let collections = collections();
        let service = SearchService::new(Arc::new(api), collections.clone());

        let err = service.search("MissingNo").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref q) if q == "MissingNo"));

        let state = service.snapshot();
        assert!(!state.loading);
        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some("\"MissingNo\" not found"));
        assert!(collections.history().is_empty());
    }

    #[tokio::test]
    async fn test_species_failure_is_best_effort() {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .returning(|_| Ok(creature(132, "ditto")));
        api.expect_fetch_species()
            .returning(|_| Err(AppError::Api("status 500".to_string())));
        api.expect_fetch_evolution_chain().never();

        let service = SearchService::new(Arc::new(api), collections());
        let SearchOutcome::Completed(result) = service.search("132").await.unwrap() else {
            panic!("expected a completed search");
        };

        assert!(result.species.is_none());
        assert!(result.evolution.is_none());
        assert_eq!(result.flavor_text(), "");
        assert!(result.evolution_sequence().is_empty());
    }

    #[tokio::test]
    async fn test_chain_failure_is_best_effort() {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .returning(|_| Ok(creature(25, "pikachu")));
        api.expect_fetch_species()
            .returning(|_| Ok(species_with_chain()));
        api.expect_fetch_evolution_chain()
            .returning(|url| Err(AppError::NotFound(url.to_string())));

        let service = SearchService::new(Arc::new(api), collections());
        let SearchOutcome::Completed(result) = service.search("pikachu").await.unwrap() else {
            panic!("expected a completed search");
        };

        assert!(result.species.is_some());
        assert!(result.evolution.is_none());
    }

    #[tokio::test]
    async fn test_new_search_clears_previous_error() {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .with(eq("nope"))
            .returning(|q| Err(AppError::NotFound(q.to_string())));
        api.expect_fetch_creature()
            .with(eq("mew"))
            .returning(|_| Ok(creature(151, "mew")));
        api.expect_fetch_species()
            .returning(|_| Ok(SpeciesMetadata::default()));

        let service = SearchService::new(Arc::new(api), collections());
        assert!(service.search("nope").await.is_err());
        assert!(service.snapshot().error.is_some());

        service.search("mew").await.unwrap();
        let state = service.snapshot();
        assert!(state.error.is_none());
        assert_eq!(state.result.map(|r| r.record.name), Some("mew".to_string()));
    }

    #[tokio::test]
    async fn test_random_uses_numeric_id_in_range() {
        let mut api = MockCreatureApi::new();
        api.expect_fetch_creature()
            .withf(|q: &str| q.parse::<u32>().map_or(false, |id| (1..=RANDOM_ID_MAX).contains(&id)))
            .returning(|q| Ok(creature(q.parse().unwrap(), "random")));
        api.expect_fetch_species()
            .returning(|_| Ok(SpeciesMetadata::default()));

        let service = SearchService::new(Arc::new(api), collections());
        assert!(matches!(
            service.random().await.unwrap(),
            SearchOutcome::Completed(_)
        ));
    }

    /// Holds the first lookup of "slowpoke" until released
    struct GatedApi {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CreatureApi for GatedApi {
        async fn fetch_creature(&self, name_or_id: &str) -> AppResult<CreatureRecord> {
            if name_or_id == "slowpoke" {
                self.started.notify_one();
                self.release.notified().await;
                return Ok(creature(79, "slowpoke"));
            }
            Ok(creature(25, name_or_id))
        }

        async fn fetch_species(&self, id: u32) -> AppResult<SpeciesMetadata> {
            Err(AppError::NotFound(format!("species #{id}")))
        }

        async fn fetch_evolution_chain(&self, url: &str) -> AppResult<EvolutionChain> {
            Err(AppError::NotFound(url.to_string()))
        }

        async fn fetch_index(&self, _limit: u32) -> AppResult<Vec<CreatureIndexEntry>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(GatedApi {
            started: Notify::new(),
            release: Notify::new(),
        });
        let collections = collections();
        let service = Arc::new(SearchService::new(api.clone(), collections.clone()));

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.search("slowpoke").await }
        });
        api.started.notified().await;

        let second = service.search("pikachu").await.unwrap();
        assert!(matches!(second, SearchOutcome::Completed(_)));

        api.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first, SearchOutcome::Superseded);

        let state = service.snapshot();
        assert_eq!(state.result.map(|r| r.record.name), Some("pikachu".to_string()));
        assert_eq!(collections.history(), vec!["pikachu"]);
        assert_eq!(service.latest_ticket(), 2);
    }
}
