//! # Cart Store
//!
//! The [`CartRepository`] trait and its Redis implementation.
//!
//! ## Key Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How Cart Records Live in Redis                          │
//! │                                                                         │
//! │  get(id)         GET id          → decode, miss ⇒ NotFound             │
//! │  put(id, cart)   SETEX id ttl v  → replaces record, refreshes TTL      │
//! │  delete(id)      DEL id          → returns whether a record existed    │
//! │  rename(a, b)    RENAME a b      → atomic transfer, overwrites b       │
//! │  ping()          PING            → health probe, never errors          │
//! │                                                                         │
//! │  One string value per cart id. Expiry does the lifecycle work: an      │
//! │  expired cart and a never-created cart are the same NotFound.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Trait?
//! The engine receives its store as a capability-scoped collaborator, not a
//! process-wide singleton. The trait seam is what lets engine tests run
//! against an in-memory double with no Redis in sight.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use trolley_core::Cart;

use crate::codec;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Repository Trait
// =============================================================================

/// Typed cart persistence, as consumed by the cart engine.
///
/// Implementations translate backend semantics into domain signals:
/// a backend miss becomes [`StoreError::NotFound`], a corrupt value becomes
/// [`StoreError::MalformedRecord`], and backend failure becomes
/// [`StoreError::Unavailable`].
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Loads and decodes the cart stored under `cart_id`.
    async fn get(&self, cart_id: &str) -> StoreResult<Cart>;

    /// Encodes and writes the cart, replacing any prior record and
    /// refreshing its TTL.
    async fn put(&self, cart_id: &str, cart: &Cart, ttl: Duration) -> StoreResult<()>;

    /// Removes the record. Returns whether it existed beforehand.
    async fn delete(&self, cart_id: &str) -> StoreResult<bool>;

    /// Atomically transfers the record at `old_id` to `new_id`, overwriting
    /// any record already there. Returns false when `old_id` has no record.
    async fn rename(&self, old_id: &str, new_id: &str) -> StoreResult<bool>;

    /// Backend reachability probe. Reports degradation as data, never as an
    /// error.
    async fn ping(&self) -> bool;
}

// =============================================================================
// Redis Implementation
// =============================================================================

/// Redis-backed [`CartRepository`].
///
/// Holds a [`ConnectionManager`], which multiplexes one reconnecting
/// connection; clones are cheap and every operation clones it, so the store
/// itself is freely shareable across request handlers.
#[derive(Clone)]
pub struct RedisCartStore {
    conn: ConnectionManager,
}

impl RedisCartStore {
    /// Connects to Redis at the given URL.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = RedisCartStore::connect("redis://redis:6379").await?;
    /// ```
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid redis url: {}", e)))?;
        let conn = ConnectionManager::new(client).await?;
        Ok(RedisCartStore { conn })
    }
}

#[async_trait]
impl CartRepository for RedisCartStore {
    async fn get(&self, cart_id: &str) -> StoreResult<Cart> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(cart_id).await?;
        match value {
            Some(raw) => codec::decode(&raw),
            None => Err(StoreError::NotFound),
        }
    }

    async fn put(&self, cart_id: &str, cart: &Cart, ttl: Duration) -> StoreResult<()> {
        let encoded = codec::encode(cart)?;
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(cart_id, encoded, ttl.as_secs()).await?;
        debug!(cart_id, ttl_secs = ttl.as_secs(), "cart record written");
        Ok(())
    }

    async fn delete(&self, cart_id: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(cart_id).await?;
        debug!(cart_id, removed, "cart record delete");
        Ok(removed > 0)
    }

    async fn rename(&self, old_id: &str, new_id: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        // RENAME is atomic on the backend and overwrites the target key.
        // Redis replies "no such key" when the source is absent; that is the
        // caller's CartNotFound, not a transport failure.
        let result = redis::cmd("RENAME")
            .arg(old_id)
            .arg(new_id)
            .query_async::<()>(&mut conn)
            .await;
        match result {
            Ok(()) => {
                debug!(old_id, new_id, "cart record renamed");
                Ok(true)
            }
            Err(e) if e.detail().is_some_and(|d| d.contains("no such key")) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .is_ok()
    }
}
