//! # Domain Types
//!
//! Core domain types used throughout the Trolley cart service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Cart       │   │    LineItem     │   │   ProductInfo   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  total (Money)  │   │  sku            │   │  sku            │       │
//! │  │  tax (Money)    │   │  name           │   │  name           │       │
//! │  │  items (Vec)    │   │  price (Money)  │   │  price (Money)  │       │
//! │  └─────────────────┘   │  qty (i64 > 0)  │   │  instock        │       │
//! │                        │  subtotal       │   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │    TaxRate      │                         │ ShippingRequest │       │
//! │  │  ─────────────  │                         │  ─────────────  │       │
//! │  │  bps (u32)      │                         │  distance       │       │
//! │  │  2000 = 20%     │                         │  cost (Money)   │       │
//! │  └─────────────────┘                         │  location       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart Invariants
//! - Exactly one line item per distinct SKU (same-SKU adds merge quantities)
//! - `qty` is always > 0 in a stored cart (qty 0 is a removal, not a line)
//! - `subtotal` = price × qty, `total` = Σ subtotals, `tax` = total × rate,
//!   all recomputed from scratch on every mutation, never patched

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{pricing, SHIPPING_SKU};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (the fixed cart VAT rate, [`crate::TAX_RATE_BPS`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product Info
// =============================================================================

/// A product as resolved by the external catalogue.
///
/// This is the catalogue's response contract; the cart keeps its own copy of
/// `name` and `price` in the line item so a stored cart never needs another
/// lookup to be displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Stock Keeping Unit - the catalogue's product key.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Current unit price.
    pub price: Money,

    /// Units in stock (informational; the cart does not reserve stock).
    pub instock: i64,
}

// =============================================================================
// Shipping Request
// =============================================================================

/// Payload for attaching shipping to a cart.
///
/// All three fields are required; a body missing any of them is rejected as
/// [`CoreError::ShippingDataMissing`] before the cart is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRequest {
    /// Shipping distance (units are the shipping calculator's concern).
    pub distance: f64,

    /// Shipping cost, becomes the unit price of the `SHIP` line item.
    pub cost: Money,

    /// Destination name, rendered as "shipping to {location}".
    pub location: String,
}

// =============================================================================
// Line Item
// =============================================================================

/// One SKU's quantity and price within a cart.
///
/// ## Design Notes
/// - `name` and `price` are copied from the catalogue at add time; the price
///   is refreshed on every add of the same SKU, not frozen at first add
/// - `subtotal` is derived (price × qty) and recomputed whenever qty or
///   price changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// SKU, or the synthetic `"SHIP"` for the shipping entry.
    pub sku: String,

    /// Product name at the time of the last add of this SKU.
    pub name: String,

    /// Unit price at the time of the last add of this SKU.
    pub price: Money,

    /// Quantity in cart (always > 0 once stored).
    pub qty: i64,

    /// Derived: price × qty. Tolerated as absent on decode and re-derived.
    #[serde(default)]
    pub subtotal: Money,
}

impl LineItem {
    /// Creates a new line item with its subtotal derived from price × qty.
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: Money, qty: i64) -> Self {
        let mut item = LineItem {
            sku: sku.into(),
            name: name.into(),
            price,
            qty,
            subtotal: Money::zero(),
        };
        item.recompute_subtotal();
        item
    }

    /// Re-derives `subtotal` from the current price and quantity.
    #[inline]
    pub fn recompute_subtotal(&mut self) {
        self.subtotal = pricing::line_subtotal(self.price, self.qty);
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A customer's in-progress collection of line items with derived totals.
///
/// ## Invariants
/// - Items are unique by `sku` (adding the same SKU merges quantities)
/// - `total`/`tax` always reflect the items at the moment of persistence;
///   every mutation ends with [`Cart::recalculate`]
/// - An empty cart is a valid, persistable state, distinct from "no record"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Derived: sum of all line-item subtotals.
    #[serde(default)]
    pub total: Money,

    /// Derived: total × tax rate.
    #[serde(default)]
    pub tax: Money,

    /// Line items in insertion/mutation order.
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart, merging with an existing line for the
    /// same SKU.
    ///
    /// ## Behavior
    /// - SKU already in cart: quantity increases by `qty`, and the unit
    ///   price/name refresh to the catalogue values of this call
    /// - SKU not in cart: appended as a new line item
    ///
    /// Quantity validation happens in the engine before the lookup; by the
    /// time this runs, `qty` is a positive amount.
    pub fn add_item(&mut self, product: &ProductInfo, qty: i64) {
        match self.items.iter_mut().find(|i| i.sku == product.sku) {
            Some(item) => {
                item.qty += qty;
                item.price = product.price;
                item.name = product.name.clone();
                item.recompute_subtotal();
            }
            None => {
                self.items
                    .push(LineItem::new(&product.sku, &product.name, product.price, qty));
            }
        }
        self.recalculate();
    }

    /// Sets the quantity of an existing line item (absolute set, not
    /// increment).
    ///
    /// ## Behavior
    /// - `qty` == 0: removes the line item (a removal request, not a
    ///   zero-quantity line)
    /// - SKU not in cart: [`CoreError::ItemNotInCart`]
    pub fn set_quantity(&mut self, sku: &str, qty: i64) -> CoreResult<()> {
        if qty == 0 {
            return self.remove_item(sku);
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.sku == sku)
            .ok_or_else(|| CoreError::ItemNotInCart { sku: sku.to_string() })?;

        item.qty = qty;
        item.recompute_subtotal();
        self.recalculate();
        Ok(())
    }

    /// Removes a line item by SKU.
    pub fn remove_item(&mut self, sku: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.sku != sku);

        if self.items.len() == initial_len {
            return Err(CoreError::ItemNotInCart { sku: sku.to_string() });
        }

        self.recalculate();
        Ok(())
    }

    /// Attaches shipping as the single synthetic `SHIP` line item.
    ///
    /// ## Behavior
    /// - No `SHIP` line yet: appended with qty 1
    /// - `SHIP` line present: replaced in place (re-adding shipping
    ///   overwrites, never accumulates)
    pub fn set_shipping(&mut self, shipping: &ShippingRequest) {
        let name = format!("shipping to {}", shipping.location);
        match self.items.iter_mut().find(|i| i.sku == SHIPPING_SKU) {
            Some(item) => {
                item.name = name;
                item.price = shipping.cost;
                item.qty = 1;
                item.recompute_subtotal();
            }
            None => {
                self.items
                    .push(LineItem::new(SHIPPING_SKU, name, shipping.cost, 1));
            }
        }
        self.recalculate();
    }

    /// Re-derives every subtotal plus the cart's total and tax.
    ///
    /// Every mutation path ends here, so a persisted cart always satisfies
    /// `subtotal = price × qty`, `total = Σ subtotals`, `tax = total × rate`.
    pub fn recalculate(&mut self) {
        for item in &mut self.items {
            item.recompute_subtotal();
        }
        self.total = pricing::cart_total(&self.items);
        self.tax = pricing::tax_on(self.total);
    }

    /// Returns the line item for a SKU, if present.
    pub fn item(&self, sku: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.sku == sku)
    }

    /// Returns the number of line items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
