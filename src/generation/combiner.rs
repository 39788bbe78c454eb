//! Combination Generator
//!
//! Pure cartesian-product expansion of an item's variation attributes.
//! Deterministic, no I/O: combinations are enumerated in attribute position
//! order and, within each attribute, in value position order. This ordering
//! fixes SKU numbering and preview index numbers.

use crate::db::models::{AttributeValue, AttributeWithValues};
use std::collections::BTreeMap;

/// One assignment of exactly one value to each variation attribute
#[derive(Debug, Clone)]
pub struct Combination {
    /// (attribute machine name, selected value), in attribute position order
    pub selections: Vec<(String, AttributeValue)>,
}

impl Combination {
    /// The persisted identity key: machine name -> raw value token
    pub fn selection_map(&self) -> BTreeMap<String, String> {
        self.selections
            .iter()
            .map(|(name, value)| (name.clone(), value.value.clone()))
            .collect()
    }
}

/// Expand the full set of combinations.
///
/// The result size is the product of the value counts. Any attribute with an
/// empty value list collapses the output to zero for the whole item; no
/// partial combinations are ever produced.
pub fn combine(attributes: &[AttributeWithValues]) -> Vec<Combination> {
    if attributes.is_empty() || attributes.iter().any(|a| a.values.is_empty()) {
        return vec![];
    }

    // Seed with the first attribute's values, one singleton per value
    let first = &attributes[0];
    let mut combinations: Vec<Combination> = first
        .values
        .iter()
        .map(|value| Combination {
            selections: vec![(first.attribute.name.clone(), value.clone())],
        })
        .collect();

    // Each further attribute branches every partial combination once per value
    for attr in &attributes[1..] {
        let mut next = Vec::with_capacity(combinations.len() * attr.values.len());
        for combination in &combinations {
            for value in &attr.values {
                let mut selections = combination.selections.clone();
                selections.push((attr.attribute.name.clone(), value.clone()));
                next.push(Combination { selections });
            }
        }
        combinations = next;
    }

    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Attribute, AttributeKind, DisplayHint};

    fn make_attribute(name: &str, position: i32, values: &[(&str, f64)]) -> AttributeWithValues {
        AttributeWithValues {
            attribute: Attribute {
                id: None,
                item: "item:test".to_string(),
                name: name.to_string(),
                label: name.to_string(),
                kind: AttributeKind::Select,
                display: DisplayHint::Button,
                is_required: true,
                is_variation: true,
                position,
                description: None,
            },
            values: values
                .iter()
                .enumerate()
                .map(|(i, (token, adj))| AttributeValue {
                    id: None,
                    attribute: format!("attribute:{name}"),
                    value: token.to_string(),
                    label: token.to_string(),
                    description: None,
                    color_code: None,
                    image: None,
                    price_adjustment: *adj,
                    position: i as i32,
                    is_active: true,
                })
                .collect(),
        }
    }

    #[test]
    fn output_size_is_product_of_value_counts() {
        let attrs = vec![
            make_attribute("color", 0, &[("red", 0.0), ("blue", 5.0)]),
            make_attribute("storage", 1, &[("64gb", 0.0), ("256gb", 20.0), ("512gb", 40.0)]),
            make_attribute("material", 2, &[("matte", 0.0), ("glossy", 0.0)]),
        ];
        assert_eq!(combine(&attrs).len(), 2 * 3 * 2);
    }

    #[test]
    fn enumeration_order_is_position_order() {
        let attrs = vec![
            make_attribute("color", 0, &[("red", 0.0), ("blue", 5.0)]),
            make_attribute("storage", 1, &[("64gb", 0.0), ("256gb", 20.0)]),
        ];
        let combos = combine(&attrs);
        let keys: Vec<Vec<&str>> = combos
            .iter()
            .map(|c| c.selections.iter().map(|(_, v)| v.value.as_str()).collect())
            .collect();
        assert_eq!(
            keys,
            vec![
                vec!["red", "64gb"],
                vec!["red", "256gb"],
                vec!["blue", "64gb"],
                vec!["blue", "256gb"],
            ]
        );
    }

    #[test]
    fn empty_value_list_collapses_whole_output() {
        let attrs = vec![
            make_attribute("color", 0, &[("red", 0.0), ("blue", 5.0)]),
            make_attribute("storage", 1, &[]),
        ];
        // No partial color-only combinations
        assert!(combine(&attrs).is_empty());
    }

    #[test]
    fn no_attributes_yields_no_combinations() {
        assert!(combine(&[]).is_empty());
    }

    #[test]
    fn selection_map_holds_one_entry_per_attribute() {
        let attrs = vec![
            make_attribute("color", 0, &[("red", 0.0)]),
            make_attribute("storage", 1, &[("64gb", 0.0)]),
        ];
        let combos = combine(&attrs);
        let map = combos[0].selection_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["color"], "red");
        assert_eq!(map["storage"], "64gb");
    }
}
