//! # Trolley Cart API
//!
//! HTTP cart service: one cart per customer session, stored in Redis with a
//! bounded lifetime, priced against an external product catalogue.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart API Service                                │
//! │                                                                         │
//! │  Client ───► axum routes ───► CartService ───► Redis (trolley-store)  │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                             CatalogueClient                             │
//! │                             (SKU → name/price)                          │
//! │                                                                         │
//! │  One operation = one read-mutate-write cycle:                          │
//! │  load record → apply mutation → recompute totals → persist (SETEX)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `LISTEN_PORT` - HTTP listen port (default: 8080)
//! - `REDIS_URL` - Redis connection string (default: redis://redis:6379)
//! - `CATALOGUE_URL` - catalogue base URL (default: http://catalogue:8080)
//! - `CART_TTL_SECS` - cart record lifetime, refreshed on every write
//!   (default: 3600)

pub mod catalogue;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;

// Re-exports
pub use config::AppConfig;
pub use error::{ApiError, EngineError};
pub use routes::Engine;
