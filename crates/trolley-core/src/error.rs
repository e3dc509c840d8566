//! # Error Types
//!
//! Domain-specific error types for trolley-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trolley-core errors (this file)                                       │
//! │  └── CoreError        - Validation and cart-domain failures            │
//! │                                                                         │
//! │  trolley-store errors (separate crate)                                 │
//! │  └── StoreError       - Record missing, corrupt, backend down          │
//! │                                                                         │
//! │  cart-api errors (in app)                                              │
//! │  ├── CatalogueError   - Product lookup failures                        │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: CoreError / StoreError / CatalogueError → ApiError → client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, quantity, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent validation failures and cart-domain rule
/// violations. They are raised before any I/O happens, so a failed
/// operation leaves the stored cart untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Add requires a strictly positive quantity.
    ///
    /// ## When This Occurs
    /// - `GET /add/{id}/{sku}/{qty}` with qty ≤ 0
    #[error("quantity has to be greater than zero")]
    InvalidQuantity { qty: i64 },

    /// Update rejects negative quantities (zero means "remove").
    ///
    /// ## When This Occurs
    /// - `GET /update/{id}/{sku}/{qty}` with qty < 0
    #[error("negative quantity not allowed")]
    NegativeQuantity { qty: i64 },

    /// Update addressed a SKU that has no line item in the cart.
    #[error("not in cart")]
    ItemNotInCart { sku: String },

    /// Shipping payload lacked a required field.
    ///
    /// ## When This Occurs
    /// - `POST /shipping/{id}` body missing `distance`, `cost` or `location`
    #[error("shipping data missing")]
    ShippingDataMissing,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
