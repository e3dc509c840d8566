//! # API Error Types
//!
//! Unified error types for the cart engine and its HTTP surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Cart API                           │
//! │                                                                         │
//! │  CoreError            StoreError           CatalogueError              │
//! │  (validation,         (not found,          (product unknown,           │
//! │   not in cart)         corrupt, down)       catalogue down)            │
//! │       │                    │                    │                       │
//! │       └──────────────┬─────┴────────────────────┘                       │
//! │                      ▼                                                  │
//! │                 EngineError   ← what the engine returns (testable)     │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                  ApiError     ← {code, message} + HTTP status          │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │        400 "quantity has to be greater than zero"                      │
//! │        404 "cart not found" / "not in cart" / "product not found"      │
//! │        503 catalogue or store unavailable                              │
//! │        500 malformed cart record (corruption surfaced, not masked)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use trolley_core::CoreError;
use trolley_store::StoreError;

use crate::catalogue::CatalogueError;

// =============================================================================
// Engine Error
// =============================================================================

/// Everything a cart engine operation can fail with.
///
/// Engine methods return this rather than a pre-serialized HTTP error so
/// tests can match on the domain variant that actually occurred.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Validation or cart-domain rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure (missing record, corruption, backend down).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Catalogue lookup failure.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

// =============================================================================
// API Error
// =============================================================================

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is what a client receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "cart not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Cart, line item, or product not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Stored cart record is corrupt (500)
    MalformedRecord,

    /// Redis or the catalogue could not be reached (503)
    Unavailable,
}

impl ApiError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError { code, message: message.into() }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::MalformedRecord => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================
// Each source error carries its user-facing message in its Display impl;
// the conversions only decide the code (and therefore the status).

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match err {
            CoreError::InvalidQuantity { .. }
            | CoreError::NegativeQuantity { .. }
            | CoreError::ShippingDataMissing => ErrorCode::ValidationError,
            CoreError::ItemNotInCart { .. } => ErrorCode::NotFound,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::NotFound => ErrorCode::NotFound,
            StoreError::MalformedRecord(_) => ErrorCode::MalformedRecord,
            StoreError::Unavailable(_) => ErrorCode::Unavailable,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CatalogueError> for ApiError {
    fn from(err: CatalogueError) -> Self {
        let code = match err {
            CatalogueError::ProductNotFound { .. } => ErrorCode::NotFound,
            CatalogueError::Unavailable(_) => ErrorCode::Unavailable,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Core(e) => e.into(),
            EngineError::Store(e) => e.into(),
            EngineError::Catalogue(e) => e.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
