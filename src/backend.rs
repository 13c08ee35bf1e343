use std::sync::Arc;
use axum::extract::FromRef;
use tracing::{info, warn};
use crate::config::{Config, StorageConfig};
use crate::error::APIResult;
use crate::events::service::EventService;
use crate::storage::memory::MemoryStorage;
use crate::storage::postgres::PgStorage;
use crate::storage::Storage;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct Backend {
    pub events: EventService,
}

impl Backend {
    pub async fn new(config: &Config) -> APIResult<Self> {
        let storage: Arc<dyn Storage> = match &config.storage {
            StorageConfig::Postgres { database_url } => {
                info!("using postgres storage");
                Arc::new(PgStorage::new(database_url).await?)
            }
            StorageConfig::InMemory { requested: true } => {
                info!("using in-memory storage, data is lost on restart");
                Arc::new(MemoryStorage::seeded())
            }
            StorageConfig::InMemory { requested: false } => {
                warn!("DATABASE_URL is not set, falling back to in-memory storage; set STORAGE=memory to silence this");
                Arc::new(MemoryStorage::seeded())
            }
        };

        Ok(Backend::from_storage(storage))
    }

    pub fn from_storage(storage: Arc<dyn Storage>) -> Self {
        Backend {
            events: EventService::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Backend::from_storage(Arc::new(MemoryStorage::seeded()))
    }
}

impl FromRef<Backend> for EventService {
    fn from_ref(backend: &Backend) -> Self {
        backend.events.clone()
    }
}
