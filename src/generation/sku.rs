//! SKU Assigner
//!
//! Derives a candidate SKU from a combination: optional prefix, then the
//! upper-cased raw value token of every selection in generator order, joined
//! with a fixed separator. Uniqueness is the caller's concern, not this
//! function's.

use super::combiner::Combination;

const SEPARATOR: &str = "-";

/// Derive the candidate SKU for one combination.
///
/// `index` only matters for the degenerate fallback: when the joined result
/// is empty (no prefix and no tokens), a synthetic `VAR-<millis>-<index>`
/// token keeps the SKU non-empty.
pub fn assign_sku(prefix: Option<&str>, combination: &Combination, index: usize) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(combination.selections.len() + 1);
    if let Some(p) = prefix
        && !p.is_empty()
    {
        parts.push(p.to_string());
    }
    for (_, value) in &combination.selections {
        if !value.value.is_empty() {
            parts.push(value.value.to_uppercase());
        }
    }

    let sku = parts.join(SEPARATOR);
    if sku.is_empty() {
        format!("VAR-{}-{}", chrono::Utc::now().timestamp_millis(), index)
    } else {
        sku
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::AttributeValue;

    fn make_combination(tokens: &[&str]) -> Combination {
        Combination {
            selections: tokens
                .iter()
                .map(|token| {
                    (
                        "attr".to_string(),
                        AttributeValue {
                            id: None,
                            attribute: "attribute:test".to_string(),
                            value: token.to_string(),
                            label: token.to_string(),
                            description: None,
                            color_code: None,
                            image: None,
                            price_adjustment: 0.0,
                            position: 0,
                            is_active: true,
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn joins_uppercased_tokens_with_prefix() {
        let combo = make_combination(&["red", "64gb"]);
        assert_eq!(assign_sku(Some("TEE"), &combo, 0), "TEE-RED-64GB");
    }

    #[test]
    fn no_prefix_joins_tokens_only() {
        let combo = make_combination(&["blue", "256gb"]);
        assert_eq!(assign_sku(None, &combo, 0), "BLUE-256GB");
    }

    #[test]
    fn empty_prefix_is_dropped() {
        let combo = make_combination(&["blue"]);
        assert_eq!(assign_sku(Some(""), &combo, 0), "BLUE");
    }

    #[test]
    fn deterministic_for_identical_input() {
        let combo = make_combination(&["red", "64gb"]);
        let a = assign_sku(Some("SKU"), &combo, 3);
        let b = assign_sku(Some("SKU"), &combo, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_input_falls_back_to_synthetic_token() {
        let combo = make_combination(&[]);
        let sku = assign_sku(None, &combo, 7);
        assert!(sku.starts_with("VAR-"));
        assert!(sku.ends_with("-7"));
    }
}
