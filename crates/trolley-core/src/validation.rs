//! # Validation Module
//!
//! Quantity validation for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP routing (axum)                                          │
//! │  ├── Path/body deserialization (qty must parse as an integer)          │
//! │  └── Malformed requests never reach the engine                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── add: qty must be > 0                                              │
//! │  └── update: qty must be ≥ 0 (0 means "remove the line")               │
//! │                                                                         │
//! │  Validation runs BEFORE any catalogue or store I/O, so a rejected      │
//! │  request leaves the stored cart byte-for-byte unchanged.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};

/// Validates the quantity of an add operation.
///
/// ## Rules
/// - Must be strictly positive (an add of 0 or fewer units is meaningless)
///
/// ## Example
/// ```rust
/// use trolley_core::validation::validate_add_quantity;
///
/// assert!(validate_add_quantity(1).is_ok());
/// assert!(validate_add_quantity(0).is_err());
/// assert!(validate_add_quantity(-2).is_err());
/// ```
pub fn validate_add_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity { qty });
    }
    Ok(())
}

/// Validates the quantity of an update operation.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed: it is the removal request, handled by the cart
///
/// ## Example
/// ```rust
/// use trolley_core::validation::validate_update_quantity;
///
/// assert!(validate_update_quantity(3).is_ok());
/// assert!(validate_update_quantity(0).is_ok());
/// assert!(validate_update_quantity(-1).is_err());
/// ```
pub fn validate_update_quantity(qty: i64) -> CoreResult<()> {
    if qty < 0 {
        return Err(CoreError::NegativeQuantity { qty });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_quantity_must_be_positive() {
        assert!(validate_add_quantity(1).is_ok());
        assert!(validate_add_quantity(999).is_ok());
        assert_eq!(
            validate_add_quantity(0).unwrap_err(),
            CoreError::InvalidQuantity { qty: 0 }
        );
        assert_eq!(
            validate_add_quantity(-5).unwrap_err(),
            CoreError::InvalidQuantity { qty: -5 }
        );
    }

    #[test]
    fn test_update_quantity_allows_zero() {
        assert!(validate_update_quantity(0).is_ok());
        assert!(validate_update_quantity(10).is_ok());
        assert_eq!(
            validate_update_quantity(-1).unwrap_err(),
            CoreError::NegativeQuantity { qty: -1 }
        );
    }
}
