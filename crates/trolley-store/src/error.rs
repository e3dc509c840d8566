//! # Store Error Types
//!
//! Error types for cart persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Redis Error (redis::RedisError)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the domain meaning                    │
//! │       │                                                                 │
//! │       ├── NotFound        → 404 "cart not found" at the API            │
//! │       ├── MalformedRecord → 500 (corruption is surfaced, not masked)   │
//! │       └── Unavailable     → 503 (backend down, no stale data served)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Cart persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the cart id.
    ///
    /// ## When This Occurs
    /// - The cart was never created
    /// - The cart expired (absence after expiry is indistinguishable from
    ///   "never created")
    /// - The cart was deleted or renamed away
    #[error("cart not found")]
    NotFound,

    /// The stored value is not a valid cart record.
    ///
    /// ## When This Occurs
    /// - The value is not valid JSON
    /// - `items` is missing or not a sequence
    /// - An item lacks `sku`, `name`, `price` or `qty`
    ///
    /// Surfaced to the caller rather than treated as an empty cart, so data
    /// corruption is never silently masked.
    #[error("malformed cart record: {0}")]
    MalformedRecord(String),

    /// The Redis backend could not complete the request.
    #[error("cart store unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
