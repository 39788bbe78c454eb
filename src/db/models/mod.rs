//! Database Models

// Serde helpers
pub mod serde_record;

// Catalog domain
pub mod attribute;
pub mod catalog_item;
pub mod variant;

// Re-exports
pub use attribute::{
    Attribute, AttributeCreate, AttributeKind, AttributeReorder, AttributeUpdate, AttributeValue,
    AttributeValueInput, AttributeWithValues, DisplayHint,
};
pub use catalog_item::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, VariantMode};
pub use variant::{Variant, VariantCreate, VariantUpdate};
