//! Variant generation engine
//!
//! Pure building blocks (combiner, pricing, sku) plus the lifecycle manager
//! that wires them to the repositories.

pub mod combiner;
pub mod manager;
pub mod pricing;
pub mod sku;

pub use combiner::{Combination, combine};
pub use manager::{
    CombinationPreview, GenerateRequest, GenerationPreview, GenerationReport, VariantManager,
};
pub use pricing::variant_price;
pub use sku::assign_sku;
