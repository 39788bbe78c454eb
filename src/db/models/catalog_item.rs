//! Catalog Item Model

use super::serde_record;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// How an item is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantMode {
    /// Sold directly, carries its own price/stock
    Simple,
    /// Sold only through variants; own price/stock fields are unused
    Configurable,
}

/// Catalog item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(
        with = "serde_record::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub image: Option<String>,
    pub mode: VariantMode,
    /// Base price for variant generation (CONFIGURABLE mode)
    pub base_price: Option<f64>,
    /// Direct sale price (SIMPLE mode only)
    pub price: Option<f64>,
    /// Direct sale stock (SIMPLE mode only)
    pub stock: Option<i64>,
    pub is_active: bool,
    /// Epoch seconds
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub brand: Option<String>,
    pub image: Option<String>,
    pub mode: VariantMode,
    pub base_price: Option<f64>,
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
}

/// Update item payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CatalogItemUpdate {
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
