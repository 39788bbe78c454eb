use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::generation::VariantManager;

/// Shared application state
///
/// Holds the configuration, the embedded database handle and the variant
/// manager. Clone is shallow; handlers receive it through axum's `State`
/// extractor.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Variant lifecycle manager
    pub manager: VariantManager,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let manager = VariantManager::new(db.clone());
        Self {
            config,
            db,
            manager,
        }
    }

    /// Open the on-disk database under the working directory and build the
    /// full state
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir();
        let db_path = db_path
            .to_str()
            .ok_or_else(|| ServerError::Database("database path is not valid UTF-8".into()))?;

        let service = DbService::new(db_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::new(config.clone(), service.db))
    }

    /// In-memory state for tests
    pub async fn for_testing() -> Result<Self> {
        let service = DbService::memory()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        let config = Config {
            admin_token: None,
            ..Config::default()
        };
        Ok(Self::new(config, service.db))
    }
}
