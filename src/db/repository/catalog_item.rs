//! Catalog Item Repository

use super::{BaseRepository, RepoError, RepoResult, new_key, record_id, strip_table_prefix};
use crate::db::models::{CatalogItem, CatalogItemCreate, CatalogItemUpdate};
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "item";

#[derive(Clone)]
pub struct CatalogItemRepository {
    base: BaseRepository,
}

impl CatalogItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all items, newest first
    pub async fn find_all(&self, include_inactive: bool) -> RepoResult<Vec<CatalogItem>> {
        let sql = if include_inactive {
            "SELECT * FROM item ORDER BY created_at DESC"
        } else {
            "SELECT * FROM item WHERE is_active = true ORDER BY created_at DESC"
        };
        let items: Vec<CatalogItem> = self.base.db().query(sql).await?.take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<CatalogItem>> {
        let key = strip_table_prefix(TABLE, id);
        let item: Option<CatalogItem> = self.base.db().select((TABLE, key)).await?;
        Ok(item)
    }

    /// Create a new item
    pub async fn create(&self, data: CatalogItemCreate) -> RepoResult<CatalogItem> {
        let now = chrono::Utc::now().timestamp();
        let item = CatalogItem {
            id: None,
            name: data.name,
            description: data.description,
            brand: data.brand,
            image: data.image,
            mode: data.mode,
            base_price: data.base_price,
            price: data.price,
            stock: data.stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<CatalogItem> = self
            .base
            .db()
            .create((TABLE, new_key()))
            .content(item)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create item".to_string()))
    }

    /// Partial update
    pub async fn update(&self, id: &str, data: CatalogItemUpdate) -> RepoResult<CatalogItem> {
        let mut merge = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {e}")))?;
        merge["updated_at"] = json!(chrono::Utc::now().timestamp());

        let target = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $target MERGE $data RETURN AFTER")
            .bind(("target", target))
            .bind(("data", merge))
            .await?;
        let items: Vec<CatalogItem> = result.take(0)?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
    }

    /// Delete an item and everything hanging off it (attributes, their
    /// values, variants) as one atomic unit
    pub async fn delete_cascading(&self, id: &str) -> RepoResult<()> {
        let target = record_id(TABLE, id);
        let item_ref = super::canonical_id(TABLE, id);

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                DELETE attribute_value WHERE attribute IN
                    (SELECT VALUE type::string(id) FROM attribute WHERE item = $item_ref);
                DELETE attribute WHERE item = $item_ref;
                DELETE variant WHERE item = $item_ref;
                DELETE $target;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("item_ref", item_ref))
            .bind(("target", target))
            .await?
            .check()?;
        Ok(())
    }
}
