//! # trolley-store: Persistence Layer for Trolley
//!
//! This crate provides cart persistence for the Trolley cart service.
//! It uses Redis as a key-value backend with TTL-bounded records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trolley Data Flow                                │
//! │                                                                         │
//! │  Cart Engine (apps/cart-api)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    trolley-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CartRepository│    │ RedisCartStore│    │    Codec     │  │   │
//! │  │   │   (trait)     │◄───│  (store.rs)   │───►│  (codec.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get/put/      │    │ GET / SETEX / │    │ Cart ⇄ JSON  │  │   │
//! │  │   │ delete/rename │    │ DEL / RENAME  │    │ validation   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Redis                                       │   │
//! │  │   one string value per cart id, expiring after the cart TTL    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`error`] - Store error types
//! - [`codec`] - Cart record encode/decode with shape validation
//! - [`store`] - The [`CartRepository`] trait and its Redis implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use trolley_store::{CartRepository, RedisCartStore};
//!
//! let store = RedisCartStore::connect("redis://redis:6379").await?;
//!
//! let mut cart = store.get("anonymous-42").await?;
//! // ... mutate ...
//! store.put("anonymous-42", &cart, Duration::from_secs(3600)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{CartRepository, RedisCartStore};
