// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::integrations::CreatureApi;
use crate::repositories::{KeyValueStorage, StorageCollectionRepository};
use crate::services::{BrowseService, CollectionService, SearchService};

/// Application state shared by the command handlers.
/// All services are Arc-wrapped and built once per process.
pub struct AppState {
    pub collection_service: Arc<CollectionService>,
    pub search_service: Arc<SearchService>,
    pub browse_service: Arc<BrowseService>,
}

impl AppState {
    /// Wire repositories and services over the given storage and API.
    /// Collections are loaded from storage here.
    pub fn build(
        config: &AppConfig,
        storage: Arc<dyn KeyValueStorage>,
        api: Arc<dyn CreatureApi>,
    ) -> Self {
        // 1. Repositories
        let collection_repo = Arc::new(StorageCollectionRepository::new(storage));

        // 2. Services
        let collection_service = Arc::new(CollectionService::load(collection_repo));
        let search_service = Arc::new(SearchService::new(api.clone(), collection_service.clone()));
        let browse_service = Arc::new(BrowseService::new(api, config.index_limit));

        Self {
            collection_service,
            search_service,
            browse_service,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::integrations::pokeapi::MockCreatureApi;
    use crate::repositories::MemoryStorage;

    /// State over in-memory storage and the given mock
    pub fn state_with(api: MockCreatureApi) -> AppState {
        AppState::build(
            &AppConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(api),
        )
    }
}
