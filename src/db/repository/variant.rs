//! Variant Repository
//!
//! Persistence boundary for variant records. SKU uniqueness is enforced by
//! the database index; the bulk insert used by the generation commit step is
//! one transaction so a residual collision (diff-then-insert race) leaves no
//! partial set behind.

use super::{BaseRepository, RepoError, RepoResult, canonical_id, new_key, record_id, strip_table_prefix};
use crate::db::models::Variant;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "variant";

#[derive(Clone)]
pub struct VariantRepository {
    base: BaseRepository,
}

impl VariantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find variant by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Variant>> {
        let key = strip_table_prefix(TABLE, id);
        let variant: Option<Variant> = self.base.db().select((TABLE, key)).await?;
        Ok(variant)
    }

    /// Variants of one item, newest first
    pub async fn find_by_item(
        &self,
        item_id: &str,
        include_inactive: bool,
    ) -> RepoResult<Vec<Variant>> {
        let sql = if include_inactive {
            "SELECT * FROM variant WHERE item = $item ORDER BY created_at DESC"
        } else {
            "SELECT * FROM variant WHERE item = $item AND is_active = true ORDER BY created_at DESC"
        };
        let variants: Vec<Variant> = self
            .base
            .db()
            .query(sql)
            .bind(("item", canonical_id("item", item_id)))
            .await?
            .take(0)?;
        Ok(variants)
    }

    /// Which of the candidate SKUs already exist (the diff step of the
    /// generation workflow)
    pub async fn find_existing_skus(&self, skus: &[String]) -> RepoResult<Vec<String>> {
        if skus.is_empty() {
            return Ok(vec![]);
        }
        let existing: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE sku FROM variant WHERE sku IN $skus")
            .bind(("skus", skus.to_vec()))
            .await?
            .take(0)?;
        Ok(existing)
    }

    /// Create one variant; rejects with Duplicate when the SKU exists
    pub async fn create(&self, variant: Variant) -> RepoResult<Variant> {
        let created: Option<Variant> = self
            .base
            .db()
            .create((TABLE, new_key()))
            .content(variant)
            .await
            .map_err(RepoError::from)?;
        created.ok_or_else(|| RepoError::Database("Failed to create variant".to_string()))
    }

    /// Bulk create, used only by the generation commit step. The caller has
    /// already deduplicated against existing SKUs; all rows land or none do.
    pub async fn bulk_create(&self, variants: Vec<Variant>) -> RepoResult<Vec<Variant>> {
        if variants.is_empty() {
            return Ok(vec![]);
        }

        let keys: Vec<String> = variants.iter().map(|_| new_key()).collect();
        let rows: Vec<Value> = keys
            .iter()
            .zip(&variants)
            .map(|(key, variant)| serde_json::json!({ "key": key, "data": variant }))
            .collect();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                FOR $row IN $rows {
                    CREATE type::thing('variant', $row.key) CONTENT $row.data;
                };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("rows", rows))
            .await?
            .check()?;

        // Fetch the committed rows back in insertion order
        let ids: Vec<surrealdb::RecordId> = keys
            .iter()
            .map(|k| surrealdb::RecordId::from_table_key(TABLE, k.as_str()))
            .collect();
        let fetched: Vec<Variant> = self
            .base
            .db()
            .query("SELECT * FROM variant WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;

        let order: std::collections::HashMap<String, usize> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (canonical_id(TABLE, k), i))
            .collect();
        let mut fetched = fetched;
        fetched.sort_by_key(|v| {
            v.id.as_ref()
                .and_then(|id| order.get(&id.to_string()).copied())
                .unwrap_or(usize::MAX)
        });
        Ok(fetched)
    }

    /// Partial update; a SKU change re-validates uniqueness via the index
    pub async fn update(&self, id: &str, merge: Value) -> RepoResult<Variant> {
        let target = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $target MERGE $data RETURN AFTER")
            .bind(("target", target))
            .bind(("data", merge))
            .await?
            .check()?;
        let variants: Vec<Variant> = result.take(0)?;
        variants
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Variant {id} not found")))
    }

    /// Delete one variant; false when it did not exist
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let target = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("DELETE $target RETURN BEFORE")
            .bind(("target", target))
            .await?;
        let deleted: Vec<Variant> = result.take(0)?;
        Ok(!deleted.is_empty())
    }
}
