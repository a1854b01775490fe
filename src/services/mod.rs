use std::sync::Arc;

use log::info;

mod short_key;

pub use short_key::{ShortKeyService, ShortKeyServiceTrait};

use crate::{
    config::{Config, StorageBackend},
    db::Database,
    errors::AppError,
    stores::{MemoryMappingStore, PgMappingStore},
};

/// Builds the short-key service on top of the configured mapping store.
///
/// The core is agnostic to which backend is chosen; the selection happens
/// only here. The database handle is returned alongside the service so the
/// health endpoint can report on it; it is `None` for the memory backend.
pub async fn build(
    config: &Config,
) -> Result<(Arc<dyn ShortKeyServiceTrait>, Option<Database>), AppError> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory mapping store");
            let store = Arc::new(MemoryMappingStore::new());
            Ok((Arc::new(ShortKeyService::new(store, config.token)), None))
        }
        StorageBackend::Postgres => {
            info!("Using Postgres mapping store");
            let db = Database::connect(&config.db).await?;
            let store = Arc::new(PgMappingStore::new(db.clone()));
            Ok((Arc::new(ShortKeyService::new(store, config.token)), Some(db)))
        }
    }
}
