//! # Pricing Module
//!
//! Pure functions computing line subtotals, cart totals, and tax.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      How Totals Are Derived                             │
//! │                                                                         │
//! │  LineItem.price × LineItem.qty                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  line_subtotal ──► LineItem.subtotal                                   │
//! │       │                                                                 │
//! │       ▼  (sum over all items)                                          │
//! │  cart_total ──► Cart.total                                             │
//! │       │                                                                 │
//! │       ▼  (× 20%, rounded half-up to the cent)                          │
//! │  tax_on ──► Cart.tax                                                   │
//! │                                                                         │
//! │  All three are recomputed together on every mutation.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No side effects, no failure modes - inputs are pre-validated by callers.

use crate::money::Money;
use crate::types::{LineItem, TaxRate};
use crate::TAX_RATE_BPS;

/// Computes a line subtotal: price × qty, exact in integer cents.
#[inline]
pub fn line_subtotal(price: Money, qty: i64) -> Money {
    price.multiply_quantity(qty)
}

/// Computes a cart total: the sum of all line-item subtotals.
///
/// Returns zero for an empty item sequence.
pub fn cart_total(items: &[LineItem]) -> Money {
    items.iter().map(|i| i.subtotal).sum()
}

/// Computes tax on a total at the fixed 20% rate, rounded half-up to the
/// cent. Returns zero when the total is zero.
pub fn tax_on(total: Money) -> Money {
    total.calculate_tax(TaxRate::from_bps(TAX_RATE_BPS))
}

// =============================================================================
// Unit Tests
// =============================================================================
