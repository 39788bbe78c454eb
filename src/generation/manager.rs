//! Variant Lifecycle Manager
//!
//! Orchestrates the end-to-end generation workflow (load item → resolve
//! variation attributes → combine → price + SKU → diff → commit → report)
//! and owns attribute add/update/reorder/delete together with their
//! cascading effects on variants. All persistence goes through the
//! repositories; every multi-row step is a single atomic unit there.

use super::{combiner, pricing, sku};
use crate::db::models::{
    Attribute, AttributeCreate, AttributeReorder, AttributeUpdate, AttributeWithValues,
    CatalogItem, Variant, VariantCreate, VariantMode, VariantUpdate,
};
use crate::db::repository::{
    AttributeRepository, CatalogItemRepository, RepoError, VariantRepository, canonical_id,
    strip_table_prefix,
};
use crate::utils::{AppError, AppResult, ErrorCode, validation};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Target item id
    pub item: String,
    /// One-off base price for this run; never persisted on the item
    pub base_price: Option<f64>,
    pub sku_prefix: Option<String>,
}

/// Outcome of one generation run
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Candidate combinations produced
    pub total: usize,
    /// Candidates whose SKU already existed (skipped)
    pub existing: usize,
    /// Net-new variants committed
    pub created: usize,
    pub variants: Vec<Variant>,
}

/// One row of a generation preview
#[derive(Debug, Serialize, Deserialize)]
pub struct CombinationPreview {
    /// 1-based, in enumeration order
    pub index: usize,
    pub attributes: BTreeMap<String, String>,
    pub price: f64,
}

/// Preview outcome: priced combinations, nothing persisted
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationPreview {
    pub total: usize,
    pub combinations: Vec<CombinationPreview>,
}

/// Variant lifecycle manager
#[derive(Clone)]
pub struct VariantManager {
    items: CatalogItemRepository,
    attributes: AttributeRepository,
    variants: VariantRepository,
}

impl VariantManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            items: CatalogItemRepository::new(db.clone()),
            attributes: AttributeRepository::new(db.clone()),
            variants: VariantRepository::new(db),
        }
    }

    // =========================================================================
    // Generation workflow
    // =========================================================================

    /// Run the full generation workflow and commit the net-new set
    pub async fn generate(&self, request: GenerateRequest) -> AppResult<GenerationReport> {
        let (item, combinations) = self.resolve_combinations(&request.item).await?;
        if combinations.is_empty() {
            return Err(AppError::validation(
                "No valid attribute combinations found",
            ));
        }

        let base_price = request.base_price.or(item.base_price).unwrap_or(0.0);
        let prefix = request.sku_prefix.as_deref();
        let item_ref = canonical_id("item", &request.item);
        let now = chrono::Utc::now().timestamp();

        let candidates: Vec<Variant> = combinations
            .iter()
            .enumerate()
            .map(|(index, combination)| Variant {
                id: None,
                item: item_ref.clone(),
                sku: sku::assign_sku(prefix, combination, index),
                attributes: combination.selection_map(),
                price: pricing::variant_price(base_price, combination),
                stock: 0,
                thumbnail: None,
                gallery: vec![],
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .collect();

        // Diff against what is already persisted
        let skus: Vec<String> = candidates.iter().map(|v| v.sku.clone()).collect();
        let existing: HashSet<String> = self
            .variants
            .find_existing_skus(&skus)
            .await?
            .into_iter()
            .collect();
        let net_new: Vec<Variant> = candidates
            .into_iter()
            .filter(|v| !existing.contains(&v.sku))
            .collect();

        let total = skus.len();
        if net_new.is_empty() {
            // Re-running against an unchanged attribute set is a normal,
            // idempotent outcome
            tracing::info!(item = %item_ref, total, "all variants already exist");
            return Ok(GenerationReport {
                total,
                existing: total,
                created: 0,
                variants: vec![],
            });
        }

        let created = self
            .variants
            .bulk_create(net_new)
            .await
            .map_err(generation_conflict)?;

        tracing::info!(
            item = %item_ref,
            total,
            created = created.len(),
            "variant generation committed"
        );

        Ok(GenerationReport {
            total,
            existing: total - created.len(),
            created: created.len(),
            variants: created,
        })
    }

    /// Preview the generation outcome without touching the variant table
    pub async fn preview(
        &self,
        item_id: &str,
        base_price: Option<f64>,
    ) -> AppResult<GenerationPreview> {
        let (item, combinations) = self.resolve_combinations(item_id).await?;
        let base_price = base_price.or(item.base_price).unwrap_or(0.0);

        let combinations: Vec<CombinationPreview> = combinations
            .iter()
            .enumerate()
            .map(|(i, combination)| CombinationPreview {
                index: i + 1,
                attributes: combination.selection_map(),
                price: pricing::variant_price(base_price, combination),
            })
            .collect();

        Ok(GenerationPreview {
            total: combinations.len(),
            combinations,
        })
    }

    /// Steps 1-3 shared by preview and generate
    async fn resolve_combinations(
        &self,
        item_id: &str,
    ) -> AppResult<(CatalogItem, Vec<combiner::Combination>)> {
        validation::validate_required_text(item_id, "item", validation::MAX_TOKEN_LEN)?;
        let item = self.load_configurable_item(item_id).await?;
        let attributes = self.attributes.find_variation_for_item(item_id).await?;
        if attributes.is_empty() {
            return Err(AppError::new(ErrorCode::NoVariationAttributes));
        }
        Ok((item, combiner::combine(&attributes)))
    }

    async fn load_configurable_item(&self, item_id: &str) -> AppResult<CatalogItem> {
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
        if item.mode != VariantMode::Configurable {
            return Err(AppError::new(ErrorCode::ItemNotConfigurable));
        }
        Ok(item)
    }

    // =========================================================================
    // Attribute lifecycle
    // =========================================================================

    /// Ordered attribute list with nested ordered values
    pub async fn list_attributes(&self, item_id: &str) -> AppResult<Vec<AttributeWithValues>> {
        Ok(self.attributes.find_by_item(item_id).await?)
    }

    pub async fn get_attribute(&self, id: &str) -> AppResult<AttributeWithValues> {
        self.attributes
            .find_with_values(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::AttributeNotFound))
    }

    /// Add an attribute and its initial value list as one unit
    pub async fn add_attribute(
        &self,
        item_id: &str,
        data: AttributeCreate,
    ) -> AppResult<AttributeWithValues> {
        self.load_configurable_item(item_id).await?;

        let position = self.attributes.max_position(item_id).await? + 1;
        let attribute = Attribute {
            id: None,
            item: canonical_id("item", item_id),
            name: data.name,
            label: data.label,
            kind: data.kind,
            display: data.display,
            is_required: data.is_required,
            is_variation: data.is_variation,
            position,
            description: data.description,
        };

        self.attributes
            .create_with_values(attribute, &data.values)
            .await
            .map_err(attribute_conflict)
    }

    /// Update attribute fields; a supplied value list replaces the existing
    /// one wholesale
    pub async fn update_attribute(
        &self,
        id: &str,
        data: AttributeUpdate,
    ) -> AppResult<AttributeWithValues> {
        self.attributes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::AttributeNotFound))?;

        let mut merge = serde_json::Map::new();
        if let Some(name) = &data.name {
            merge.insert("name".into(), json!(name));
        }
        if let Some(label) = &data.label {
            merge.insert("label".into(), json!(label));
        }
        if let Some(kind) = &data.kind {
            merge.insert("kind".into(), json!(kind));
        }
        if let Some(display) = &data.display {
            merge.insert("display".into(), json!(display));
        }
        if let Some(is_required) = data.is_required {
            merge.insert("is_required".into(), json!(is_required));
        }
        if let Some(is_variation) = data.is_variation {
            merge.insert("is_variation".into(), json!(is_variation));
        }
        if let Some(description) = &data.description {
            merge.insert("description".into(), json!(description));
        }

        self.attributes
            .update(id, Value::Object(merge), data.values.as_deref())
            .await
            .map_err(attribute_conflict)
    }

    /// Reorder one item's attributes. The supplied id list must be a full
    /// permutation of the existing set; positions become 0..n-1 in the given
    /// order.
    pub async fn reorder_attributes(
        &self,
        item_id: &str,
        reorder: AttributeReorder,
    ) -> AppResult<()> {
        let existing = self.attributes.find_by_item(item_id).await?;
        let existing_keys: BTreeSet<String> = existing
            .iter()
            .filter_map(|a| a.attribute.id.as_ref())
            .map(|id| strip_table_prefix("attribute", &id.to_string()).to_string())
            .collect();

        let supplied: Vec<String> = reorder
            .attribute_ids
            .iter()
            .map(|id| strip_table_prefix("attribute", id).to_string())
            .collect();
        let supplied_set: BTreeSet<String> = supplied.iter().cloned().collect();

        if supplied.len() != existing.len() || supplied_set != existing_keys {
            return Err(AppError::validation(
                "attribute id list must exactly match the item's attributes",
            ));
        }

        let entries: Vec<(String, i32)> = supplied
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, i as i32))
            .collect();
        Ok(self.attributes.set_positions(&entries).await?)
    }

    /// Delete an attribute: removes its values, renumbers the remaining
    /// attributes, and deletes every variant of the owning item, since
    /// their combination keys are no longer guaranteed valid
    pub async fn delete_attribute(&self, id: &str) -> AppResult<()> {
        let attribute = self
            .attributes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::AttributeNotFound))?;

        let item_ref = attribute.item.clone();
        let deleted_key = strip_table_prefix("attribute", id).to_string();

        let remaining = self.attributes.find_by_item(&item_ref).await?;
        let renumber: Vec<(String, i32)> = remaining
            .iter()
            .filter_map(|a| a.attribute.id.as_ref())
            .map(|rid| strip_table_prefix("attribute", &rid.to_string()).to_string())
            .filter(|key| *key != deleted_key)
            .enumerate()
            .map(|(i, key)| (key, i as i32))
            .collect();

        Ok(self
            .attributes
            .delete_cascading(id, &item_ref, &renumber)
            .await?)
    }

    // =========================================================================
    // Variant CRUD
    // =========================================================================

    pub async fn list_variants(
        &self,
        item_id: &str,
        include_inactive: bool,
    ) -> AppResult<Vec<Variant>> {
        Ok(self
            .variants
            .find_by_item(item_id, include_inactive)
            .await?)
    }

    pub async fn get_variant(&self, id: &str) -> AppResult<Variant> {
        self.variants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::VariantNotFound))
    }

    /// Manually create one variant for an item
    pub async fn create_variant(&self, item_id: &str, data: VariantCreate) -> AppResult<Variant> {
        self.load_configurable_item(item_id).await?;

        if data.attributes.is_empty() {
            return Err(AppError::validation("attributes map must not be empty"));
        }

        let now = chrono::Utc::now().timestamp();
        let variant = Variant {
            id: None,
            item: canonical_id("item", item_id),
            sku: data.sku,
            attributes: data.attributes,
            price: data.price,
            stock: data.stock,
            thumbnail: data.thumbnail,
            gallery: data.gallery,
            is_active: data.is_active,
            created_at: now,
            updated_at: now,
        };

        self.variants.create(variant).await.map_err(sku_conflict)
    }

    /// Partial update; a SKU change re-validates global uniqueness
    pub async fn update_variant(&self, id: &str, data: VariantUpdate) -> AppResult<Variant> {
        self.variants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::VariantNotFound))?;

        let mut merge = serde_json::Map::new();
        if let Some(sku) = &data.sku {
            merge.insert("sku".into(), json!(sku));
        }
        if let Some(attributes) = &data.attributes {
            merge.insert("attributes".into(), json!(attributes));
        }
        if let Some(price) = data.price {
            merge.insert("price".into(), json!(price));
        }
        if let Some(stock) = data.stock {
            merge.insert("stock".into(), json!(stock));
        }
        if let Some(thumbnail) = &data.thumbnail {
            merge.insert("thumbnail".into(), json!(thumbnail));
        }
        if let Some(gallery) = &data.gallery {
            merge.insert("gallery".into(), json!(gallery));
        }
        if let Some(is_active) = data.is_active {
            merge.insert("is_active".into(), json!(is_active));
        }
        merge.insert(
            "updated_at".into(),
            json!(chrono::Utc::now().timestamp()),
        );

        self.variants
            .update(id, Value::Object(merge))
            .await
            .map_err(sku_conflict)
    }

    pub async fn delete_variant(&self, id: &str) -> AppResult<()> {
        if self.variants.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::VariantNotFound))
        }
    }
}

/// Map a repository duplicate on the attribute name index to its own code
fn attribute_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::AttributeNameExists),
        other => other.into(),
    }
}

/// Map a repository duplicate on the SKU index to its own code
fn sku_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::SkuExists),
        other => other.into(),
    }
}

/// Residual race between the diff step and the commit: another writer
/// claimed a candidate SKU. The transaction rolled back whole.
fn generation_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::SkuExists,
            "SKU conflict occurred during generation",
        ),
        other => other.into(),
    }
}
