//! Variant Model
//!
//! One purchasable SKU derived from a CONFIGURABLE item. The `attributes`
//! mapping (machine name -> raw value token, one entry per variation
//! attribute) is the variant's identity key within its item and must
//! round-trip exactly through create/read/update.

use super::serde_record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use surrealdb::RecordId;
use validator::Validate;

/// Variant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(
        with = "serde_record::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// Owning item reference ("item:key")
    pub item: String,
    /// Globally unique
    pub sku: String,
    /// Combination identity: attribute machine name -> raw value token
    pub attributes: BTreeMap<String, String>,
    /// Absolute price, not an adjustment
    pub price: f64,
    pub stock: i64,
    pub thumbnail: Option<String>,
    pub gallery: Vec<String>,
    pub is_active: bool,
    /// Epoch seconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create variant payload (manual single-variant creation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VariantCreate {
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    pub attributes: BTreeMap<String, String>,
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i64,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update variant payload (partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VariantUpdate {
    #[validate(length(min = 1, max = 64))]
    pub sku: Option<String>,
    pub attributes: Option<BTreeMap<String, String>>,
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
    pub thumbnail: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}
