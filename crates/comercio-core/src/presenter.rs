//! # Response Presenter
//!
//! Boundary transform applied once to every outbound payload.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {id: 1, price: 3905, nested: {id: 2, price: 100}}                     │
//! │                         │                                               │
//! │                         ▼  present()                                    │
//! │  {price: 39.05, nested: {price: 1.0}}                                  │
//! │                                                                         │
//! │  - "id" removed at every depth                                          │
//! │  - numeric "price" converted from cents to a two-place decimal          │
//! │  - arrays and nested objects walked with the same rules                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Running it twice is not safe: the second pass would divide prices by 100
//! again. Handlers call it exactly once, right before serialization.

use serde_json::{Map, Number, Value};

use crate::money::{fractional_minor_units_to_decimal, minor_units_to_decimal};
use crate::{INTERNAL_ID_FIELD, PRICE_FIELD};

/// Strips internal ids and converts prices throughout a JSON tree.
///
/// ## Example
/// ```rust
/// use comercio_core::present;
/// use serde_json::json;
///
/// let out = present(json!([{"id": 7, "pid": "a1", "price": 1099}]));
/// assert_eq!(out, json!([{"pid": "a1", "price": 10.99}]));
/// ```
pub fn present(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(present_object(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(present).collect()),
        scalar => scalar,
    }
}

fn present_object(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(key, _)| key != INTERNAL_ID_FIELD)
        .map(|(key, value)| {
            let value = if key == PRICE_FIELD {
                present_price(value)
            } else {
                present(value)
            };
            (key, value)
        })
        .collect()
}

/// Converts a numeric price. Anything else under the key is presented as usual.
fn present_price(value: Value) -> Value {
    let Value::Number(number) = &value else {
        return present(value);
    };

    let decimal = match number.as_i64() {
        Some(cents) => minor_units_to_decimal(cents),
        None => match number.as_f64() {
            Some(cents) => fractional_minor_units_to_decimal(cents),
            None => return value,
        },
    };

    Number::from_f64(decimal).map_or(value, Value::Number)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_ids_and_converts_prices_at_every_depth() {
        let input = json!({"id": 1, "price": 3905, "nested": {"id": 2, "price": 100}});
        let output = present(input);

        assert_eq!(output, json!({"price": 39.05, "nested": {"price": 1.0}}));
        assert!(output.get("id").is_none());
        assert!(output["nested"].get("id").is_none());
    }

    #[test]
    fn test_walks_arrays_of_objects() {
        let input = json!({
            "id": 3,
            "pid": "company-1",
            "products": [
                {"id": 10, "pid": "p-1", "price": 333},
                {"id": 11, "pid": "p-2", "price": 1}
            ]
        });

        assert_eq!(
            present(input),
            json!({
                "pid": "company-1",
                "products": [
                    {"pid": "p-1", "price": 3.33},
                    {"pid": "p-2", "price": 0.01}
                ]
            })
        );
    }

    #[test]
    fn test_top_level_list() {
        let input = json!([{"id": 1, "name": "Acme"}, {"id": 2, "name": "Globex"}]);
        assert_eq!(present(input), json!([{"name": "Acme"}, {"name": "Globex"}]));
    }

    #[test]
    fn test_non_numeric_price_is_untouched() {
        let input = json!({"price": "free", "other": {"price": null}});
        assert_eq!(present(input.clone()), input);
    }

    #[test]
    fn test_structured_price_is_still_walked() {
        let input = json!({"price": {"id": 4, "amount": 10}, "prices": [{"id": 5, "price": 250}]});
        assert_eq!(
            present(input),
            json!({"price": {"amount": 10}, "prices": [{"price": 2.5}]})
        );
    }

    #[test]
    fn test_fractional_cents_are_rounded() {
        assert_eq!(present(json!({"price": 3904.6})), json!({"price": 39.05}));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(present(json!("text")), json!("text"));
        assert_eq!(present(json!(42)), json!(42));
        assert_eq!(present(Value::Null), Value::Null);
    }

    #[test]
    fn test_only_exact_id_key_is_removed() {
        let input = json!({"id": 1, "pid": "x", "ownerId": 5});
        assert_eq!(present(input), json!({"pid": "x", "ownerId": 5}));
    }
}
