//! Attribute Repository
//!
//! Attributes and their values are separate tables tied by a "attribute:key"
//! string reference. Every multi-row mutation (create with values, value
//! list replacement, cascade delete) is a single transaction.

use super::{
    BaseRepository, RepoError, RepoResult, canonical_id, new_key, record_id, strip_table_prefix,
};
use crate::db::models::{
    Attribute, AttributeValue, AttributeValueInput, AttributeWithValues,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "attribute";
const VALUE_TABLE: &str = "attribute_value";

#[derive(Clone)]
pub struct AttributeRepository {
    base: BaseRepository,
}

impl AttributeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find attribute by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Attribute>> {
        let key = strip_table_prefix(TABLE, id);
        let attr: Option<Attribute> = self.base.db().select((TABLE, key)).await?;
        Ok(attr)
    }

    /// Find attribute by id with its ordered value list
    pub async fn find_with_values(&self, id: &str) -> RepoResult<Option<AttributeWithValues>> {
        let Some(attribute) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let attr_ref = canonical_id(TABLE, id);
        let values: Vec<AttributeValue> = self
            .base
            .db()
            .query("SELECT * FROM attribute_value WHERE attribute = $attr ORDER BY position ASC")
            .bind(("attr", attr_ref))
            .await?
            .take(0)?;
        Ok(Some(AttributeWithValues { attribute, values }))
    }

    /// All attributes of one item, position order, values nested in value
    /// position order
    pub async fn find_by_item(&self, item_id: &str) -> RepoResult<Vec<AttributeWithValues>> {
        let attributes: Vec<Attribute> = self
            .base
            .db()
            .query("SELECT * FROM attribute WHERE item = $item ORDER BY position ASC")
            .bind(("item", canonical_id("item", item_id)))
            .await?
            .take(0)?;
        self.attach_values(attributes, false).await
    }

    /// Variation attributes of one item with active values only: the
    /// generator's input, ordered exactly as generation enumerates
    pub async fn find_variation_for_item(
        &self,
        item_id: &str,
    ) -> RepoResult<Vec<AttributeWithValues>> {
        let attributes: Vec<Attribute> = self
            .base
            .db()
            .query(
                "SELECT * FROM attribute WHERE item = $item AND is_variation = true ORDER BY position ASC",
            )
            .bind(("item", canonical_id("item", item_id)))
            .await?
            .take(0)?;
        self.attach_values(attributes, true).await
    }

    async fn attach_values(
        &self,
        attributes: Vec<Attribute>,
        active_only: bool,
    ) -> RepoResult<Vec<AttributeWithValues>> {
        if attributes.is_empty() {
            return Ok(vec![]);
        }

        let attr_refs: Vec<String> = attributes
            .iter()
            .filter_map(|a| a.id.as_ref().map(|id| id.to_string()))
            .collect();

        let sql = if active_only {
            "SELECT * FROM attribute_value WHERE attribute IN $attrs AND is_active = true ORDER BY position ASC"
        } else {
            "SELECT * FROM attribute_value WHERE attribute IN $attrs ORDER BY position ASC"
        };
        let values: Vec<AttributeValue> = self
            .base
            .db()
            .query(sql)
            .bind(("attrs", attr_refs))
            .await?
            .take(0)?;

        let mut grouped: HashMap<String, Vec<AttributeValue>> = HashMap::new();
        for value in values {
            grouped
                .entry(value.attribute.clone())
                .or_default()
                .push(value);
        }

        Ok(attributes
            .into_iter()
            .map(|attribute| {
                let key = attribute
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                AttributeWithValues {
                    attribute,
                    values: grouped.remove(&key).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Highest position among an item's attributes, or -1 when it has none
    pub async fn max_position(&self, item_id: &str) -> RepoResult<i32> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE position FROM attribute WHERE item = $item ORDER BY position DESC LIMIT 1")
            .bind(("item", canonical_id("item", item_id)))
            .await?;
        let positions: Vec<i32> = result.take(0)?;
        Ok(positions.into_iter().next().unwrap_or(-1))
    }

    /// Create an attribute and its initial value list as one unit.
    /// Creation of either without the other is not a valid end state.
    pub async fn create_with_values(
        &self,
        attribute: Attribute,
        values: &[AttributeValueInput],
    ) -> RepoResult<AttributeWithValues> {
        let key = new_key();
        let rows = value_rows(&canonical_id(TABLE, &key), values);

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                CREATE type::thing('attribute', $key) CONTENT $attr;
                FOR $v IN $rows { CREATE attribute_value CONTENT $v; };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("key", key.clone()))
            .bind(("attr", attribute))
            .bind(("rows", rows))
            .await?
            .check()?;

        self.find_with_values(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create attribute".to_string()))
    }

    /// Update attribute fields and, when `values` is supplied, replace the
    /// whole value list (delete-then-recreate) in the same transaction
    pub async fn update(
        &self,
        id: &str,
        merge: Value,
        values: Option<&[AttributeValueInput]>,
    ) -> RepoResult<AttributeWithValues> {
        let key = strip_table_prefix(TABLE, id).to_string();
        let attr_ref = canonical_id(TABLE, &key);
        let target = record_id(TABLE, &key);

        match values {
            Some(values) => {
                let rows = value_rows(&attr_ref, values);
                self.base
                    .db()
                    .query(
                        r#"
                        BEGIN TRANSACTION;
                        UPDATE $target MERGE $data;
                        DELETE attribute_value WHERE attribute = $attr_ref;
                        FOR $v IN $rows { CREATE attribute_value CONTENT $v; };
                        COMMIT TRANSACTION;
                        "#,
                    )
                    .bind(("target", target))
                    .bind(("data", merge))
                    .bind(("attr_ref", attr_ref))
                    .bind(("rows", rows))
                    .await?
                    .check()?;
            }
            None => {
                self.base
                    .db()
                    .query("UPDATE $target MERGE $data")
                    .bind(("target", target))
                    .bind(("data", merge))
                    .await?
                    .check()?;
            }
        }

        self.find_with_values(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Attribute {id} not found")))
    }

    /// Reassign positions. `entries` holds (bare key, new position) pairs;
    /// the caller is responsible for validating the id set.
    pub async fn set_positions(&self, entries: &[(String, i32)]) -> RepoResult<()> {
        let rows: Vec<Value> = entries
            .iter()
            .map(|(key, position)| json!({ "key": key, "position": position }))
            .collect();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                FOR $entry IN $rows {
                    UPDATE type::thing('attribute', $entry.key) SET position = $entry.position;
                };
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("rows", rows))
            .await?
            .check()?;
        Ok(())
    }

    /// Delete the attribute, its values, renumber the remaining attributes
    /// of the item, and delete every variant of the item as one atomic unit
    /// (a variant's attribute key is no longer guaranteed valid once a
    /// dimension disappears)
    pub async fn delete_cascading(
        &self,
        id: &str,
        item_id: &str,
        renumber: &[(String, i32)],
    ) -> RepoResult<()> {
        let attr_ref = canonical_id(TABLE, id);
        let target = record_id(TABLE, id);
        let rows: Vec<Value> = renumber
            .iter()
            .map(|(key, position)| json!({ "key": key, "position": position }))
            .collect();

        self.base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                DELETE attribute_value WHERE attribute = $attr_ref;
                DELETE $target;
                FOR $entry IN $rows {
                    UPDATE type::thing('attribute', $entry.key) SET position = $entry.position;
                };
                DELETE variant WHERE item = $item_ref;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("attr_ref", attr_ref))
            .bind(("target", target))
            .bind(("rows", rows))
            .bind(("item_ref", canonical_id("item", item_id)))
            .await?
            .check()?;
        Ok(())
    }
}

/// Build value rows for a transaction, positions assigned 0..n-1 in payload
/// order
fn value_rows(attr_ref: &str, values: &[AttributeValueInput]) -> Vec<AttributeValue> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| AttributeValue {
            id: None,
            attribute: attr_ref.to_string(),
            value: v.value.clone(),
            label: v.label.clone(),
            description: v.description.clone(),
            color_code: v.color_code.clone(),
            image: v.image.clone(),
            price_adjustment: v.price_adjustment,
            position: i as i32,
            is_active: v.is_active,
        })
        .collect()
}
