//! # trolley-core: Pure Business Logic for Trolley
//!
//! This crate is the **heart** of the Trolley cart service. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Surface (axum)                          │   │
//! │  │    /cart ──► /add ──► /update ──► /shipping ──► /rename        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Cart Engine (apps/cart-api)                  │   │
//! │  │    load record ──► apply mutation ──► recompute ──► persist    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trolley-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Cart    │  │   Money   │  │ subtotal  │  │   rules   │  │   │
//! │  │   │ LineItem  │  │  TaxRate  │  │ total/tax │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO REDIS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    trolley-store (Persistence)                  │   │
//! │  │              Redis commands, record codec, TTL refresh          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Cart, LineItem, ProductInfo, ShippingRequest)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Subtotal, total and tax computation
//! - [`error`] - Domain error types
//! - [`validation`] - Quantity validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Redis, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use trolley_core::money::Money;
//! use trolley_core::pricing;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1000); // 10.00
//!
//! // A line of 2 units
//! let subtotal = pricing::line_subtotal(price, 2);
//! assert_eq!(subtotal.cents(), 2000);
//!
//! // Cart tax at the fixed 20% rate
//! let tax = pricing::tax_on(subtotal);
//! assert_eq!(tax.cents(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trolley_core::Money` instead of
// `use trolley_core::money::Money`

pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed cart tax rate in basis points (2000 bps = 20%).
///
/// ## Why a constant?
/// Trolley currently serves a single jurisdiction with one VAT rate. The
/// pricing module takes the rate through [`types::TaxRate`], so a per-cart or
/// per-region rate only changes the call sites, not the math.
pub const TAX_RATE_BPS: u32 = 2000;

/// Synthetic SKU for the shipping line item.
///
/// A cart holds at most one line with this SKU; re-adding shipping replaces
/// the previous entry instead of accumulating.
pub const SHIPPING_SKU: &str = "SHIP";
