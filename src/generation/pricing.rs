//! Variant Price Calculator
//!
//! `variant price = base price + Σ price adjustment` over the selected
//! values. Uses rust_decimal for the additions so float noise never leaks
//! into stored prices; the sum itself is not rounded and no currency
//! conversion happens here.

use super::combiner::Combination;
use rust_decimal::prelude::*;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Price of one combination against a base price
pub fn variant_price(base_price: f64, combination: &Combination) -> f64 {
    let mut total = to_decimal(base_price);
    for (_, value) in &combination.selections {
        total += to_decimal(value.price_adjustment);
    }
    to_f64(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::AttributeValue;

    fn make_value(token: &str, adjustment: f64) -> AttributeValue {
        AttributeValue {
            id: None,
            attribute: "attribute:test".to_string(),
            value: token.to_string(),
            label: token.to_string(),
            description: None,
            color_code: None,
            image: None,
            price_adjustment: adjustment,
            position: 0,
            is_active: true,
        }
    }

    fn make_combination(values: &[(&str, f64)]) -> Combination {
        Combination {
            selections: values
                .iter()
                .map(|(token, adj)| (token.to_string(), make_value(token, *adj)))
                .collect(),
        }
    }

    #[test]
    fn sums_adjustments_onto_base() {
        let combo = make_combination(&[("blue", 5.0), ("256gb", 20.0)]);
        assert_eq!(variant_price(100.0, &combo), 125.0);
    }

    #[test]
    fn zero_adjustments_keep_base_price() {
        let combo = make_combination(&[("red", 0.0), ("64gb", 0.0)]);
        assert_eq!(variant_price(100.0, &combo), 100.0);
    }

    #[test]
    fn negative_adjustments_subtract() {
        let combo = make_combination(&[("clearance", -12.5), ("64gb", 0.0)]);
        assert_eq!(variant_price(100.0, &combo), 87.5);
    }

    #[test]
    fn decimal_addition_has_no_float_noise() {
        let combo = make_combination(&[("a", 0.1), ("b", 0.2)]);
        // 100 + 0.1 + 0.2 must be exactly 100.3, not 100.30000000000001
        assert_eq!(variant_price(100.0, &combo), 100.3);
    }
}
