//! Database Module
//!
//! Embedded SurrealDB storage. Tables and the uniqueness indexes the engine
//! relies on (global SKU, per-item attribute name) are defined at startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "reef";
const DATABASE: &str = "catalog";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");

        Ok(Self { db })
    }
}

/// Define tables and indexes (idempotent)
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS attribute SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS attribute_value SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS variant SCHEMALESS;

        -- Attribute machine name is unique within its owning item
        DEFINE INDEX IF NOT EXISTS idx_attribute_item_name ON TABLE attribute COLUMNS item, name UNIQUE;
        -- SKU is unique across the entire catalog
        DEFINE INDEX IF NOT EXISTS idx_variant_sku ON TABLE variant COLUMNS sku UNIQUE;

        DEFINE INDEX IF NOT EXISTS idx_attribute_item ON TABLE attribute COLUMNS item;
        DEFINE INDEX IF NOT EXISTS idx_value_attribute ON TABLE attribute_value COLUMNS attribute;
        DEFINE INDEX IF NOT EXISTS idx_variant_item ON TABLE variant COLUMNS item;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
