//! Attribute Model
//!
//! One configurable dimension of a CONFIGURABLE item, plus its allowed
//! values. Values live in their own table (`attribute_value`); the update
//! contract replaces the whole value list rather than merging.

use super::serde_record;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Value kind of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    Color,
    Select,
    Text,
    Numeric,
}

/// How the attribute is rendered in the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayHint {
    Button,
    Dropdown,
    Swatch,
    Radio,
}

impl Default for DisplayHint {
    fn default() -> Self {
        Self::Button
    }
}

/// Attribute entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(
        with = "serde_record::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// Owning item reference ("item:key")
    pub item: String,
    /// Machine name, unique within the owning item
    pub name: String,
    pub label: String,
    pub kind: AttributeKind,
    pub display: DisplayHint,
    pub is_required: bool,
    /// Whether this attribute participates in SKU generation
    pub is_variation: bool,
    /// 0-based, contiguous within the owning item
    pub position: i32,
    pub description: Option<String>,
}

/// Attribute value entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(
        with = "serde_record::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<RecordId>,
    /// Owning attribute reference ("attribute:key")
    pub attribute: String,
    /// Raw value token, used in SKU derivation and as the combination key
    pub value: String,
    pub label: String,
    pub description: Option<String>,
    pub color_code: Option<String>,
    pub image: Option<String>,
    /// Signed amount added to the base price when this value is selected
    pub price_adjustment: f64,
    /// 0-based, contiguous within the owning attribute
    pub position: i32,
    pub is_active: bool,
}

/// Attribute with its ordered value list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeWithValues {
    #[serde(flatten)]
    pub attribute: Attribute,
    pub values: Vec<AttributeValue>,
}

/// One value in a create/update payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeValueInput {
    #[validate(length(min = 1, max = 64))]
    pub value: String,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 32))]
    pub color_code: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub price_adjustment: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Create attribute payload (attribute + initial value list as one unit)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeCreate {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    pub kind: AttributeKind,
    #[serde(default)]
    pub display: DisplayHint,
    #[serde(default = "default_true")]
    pub is_required: bool,
    #[serde(default = "default_true")]
    pub is_variation: bool,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub values: Vec<AttributeValueInput>,
}

/// Update attribute payload
///
/// A supplied `values` list fully replaces the existing values
/// (delete-then-recreate), it is not a merge.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttributeUpdate {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub label: Option<String>,
    pub kind: Option<AttributeKind>,
    pub display: Option<DisplayHint>,
    pub is_required: Option<bool>,
    pub is_variation: Option<bool>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(nested)]
    pub values: Option<Vec<AttributeValueInput>>,
}

/// Reorder payload: the full ordered id list for one item
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeReorder {
    pub attribute_ids: Vec<String>,
}

fn default_true() -> bool {
    true
}
