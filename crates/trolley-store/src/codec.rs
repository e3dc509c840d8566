//! # Cart Record Codec
//!
//! Serializes carts to and from their storage encoding: the cart JSON shape
//! (`{total, tax, items: [{sku, name, price, qty, subtotal}]}`) as a string
//! value under the cart-id key.
//!
//! ## Decode Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              What Counts as a Malformed Record                          │
//! │                                                                         │
//! │  "not json at all"                      → MalformedRecord              │
//! │  {"totals": 3}            (no items)    → MalformedRecord              │
//! │  {"items": [{"sku":"A"}]} (no price)    → MalformedRecord              │
//! │  {"items": []}            (empty cart)  → OK - valid empty state       │
//! │  {"items": [...]}         (no totals)   → OK - totals re-derived       │
//! │                                                                         │
//! │  Derived fields (subtotal/total/tax) are re-derived after decode, so   │
//! │  a decoded cart always satisfies the pricing invariants.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use trolley_core::Cart;

use crate::error::{StoreError, StoreResult};

/// Encodes a cart into its storage representation.
///
/// Encoding a well-formed in-memory cart cannot fail; the serde error path
/// is propagated as [`StoreError::MalformedRecord`] instead of panicking.
pub fn encode(cart: &Cart) -> StoreResult<String> {
    serde_json::to_string(cart).map_err(|e| StoreError::MalformedRecord(e.to_string()))
}

/// Decodes a stored value into a cart, validating its shape.
///
/// Fails with [`StoreError::MalformedRecord`] if the value is not valid
/// JSON, `items` is missing, or any item lacks `sku`/`name`/`price`/`qty`.
/// The derived fields are recomputed after decode.
pub fn decode(raw: &str) -> StoreResult<Cart> {
    let mut cart: Cart =
        serde_json::from_str(raw).map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
    cart.recalculate();
    Ok(cart)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trolley_core::{Money, ProductInfo};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            &ProductInfo {
                sku: "SKU1".to_string(),
                name: "Widget".to_string(),
                price: Money::from_cents(1000),
                instock: 5,
            },
            2,
        );
        cart
    }

    #[test]
    fn test_round_trip_preserves_cart() {
        let cart = sample_cart();
        let raw = encode(&cart).unwrap();
        let decoded = decode(&raw).unwrap();

        assert_eq!(decoded.item_count(), 1);
        let item = decoded.item("SKU1").unwrap();
        assert_eq!(item.qty, 2);
        assert_eq!(item.price.cents(), 1000);
        assert_eq!(item.subtotal.cents(), 2000);
        assert_eq!(decoded.total.cents(), 2000);
        assert_eq!(decoded.tax.cents(), 400);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode("not json at all").unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_rejects_missing_items() {
        let err = decode(r#"{"total": 3.0, "tax": 0.6}"#).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_rejects_item_missing_required_field() {
        // qty absent
        let raw = r#"{"items": [{"sku": "A", "name": "Thing", "price": 1.0}]}"#;
        assert!(matches!(decode(raw).unwrap_err(), StoreError::MalformedRecord(_)));

        // price absent
        let raw = r#"{"items": [{"sku": "A", "name": "Thing", "qty": 1}]}"#;
        assert!(matches!(decode(raw).unwrap_err(), StoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_rejects_non_sequence_items() {
        let err = decode(r#"{"items": "SKU1"}"#).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_decode_accepts_empty_cart_record() {
        let cart = decode(r#"{"total": 0, "tax": 0, "items": []}"#).unwrap();
        assert!(cart.is_empty());
        assert!(cart.total.is_zero());
    }

    #[test]
    fn test_decode_re_derives_totals() {
        // Record written with stale totals: the decoded cart re-derives them
        // from price × qty, so the pricing invariants hold.
        let raw = r#"{"total": 99.0, "tax": 0.0, "items": [
            {"sku": "A", "name": "Thing", "price": 10.0, "qty": 2}
        ]}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.item("A").unwrap().subtotal.cents(), 2000);
        assert_eq!(cart.total.cents(), 2000);
        assert_eq!(cart.tax.cents(), 400);
    }
}
