//! # Cart Service
//!
//! The cart mutation and pricing engine. Every externally visible operation
//! is one read-mutate-write sequence against a single cart key.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Cart Mutation                                    │
//! │                                                                         │
//! │  validate input (before any I/O)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load record ── NotFound? ──► per-operation policy:                    │
//! │       │                       • add/shipping: start from empty cart    │
//! │       │                       • update/get/delete/rename: CartNotFound │
//! │       ▼                                                                 │
//! │  (add only) catalogue lookup ── failure aborts, nothing persisted      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply mutation + recompute subtotals/total/tax together               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist with refreshed TTL ──► return the updated cart                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The store backend is the single source of truth and each operation is
//! self-contained, so there is no in-process locking. Concurrent mutations
//! of the *same* cart key are not serialized: last write wins, and one of
//! two racing increments can be lost. Operations on different keys are
//! fully independent.

use std::time::Duration;

use tracing::{debug, info};

use trolley_core::validation::{validate_add_quantity, validate_update_quantity};
use trolley_core::{Cart, ShippingRequest};
use trolley_store::{CartRepository, StoreError};

use crate::catalogue::ProductCatalogue;
use crate::error::EngineError;
use crate::services::health_service::HealthStatus;

// =============================================================================
// Load Policy
// =============================================================================

/// What a missing record means to the operation loading it.
///
/// Kept as an explicit policy so the load step stays uniform across
/// operations instead of each one re-implementing the conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CreatePolicy {
    /// Absence is a valid empty state - the implicit-creation path
    /// (`add_item`, `add_shipping`).
    IfAbsent,

    /// Absence is `CartNotFound` (`update_item`).
    MustExist,
}

// =============================================================================
// Cart Service
// =============================================================================

/// The cart engine, generic over its two collaborators.
///
/// The store and the catalogue are injected capabilities, not process-wide
/// singletons - engine tests run against in-memory doubles.
pub struct CartService<S, C> {
    store: S,
    catalogue: C,
    ttl: Duration,
}

impl<S, C> CartService<S, C>
where
    S: CartRepository,
    C: ProductCatalogue,
{
    /// Creates the engine with its collaborators and the record TTL.
    pub fn new(store: S, catalogue: C, ttl: Duration) -> Self {
        CartService { store, catalogue, ttl }
    }

    /// Loads the cart, applying the operation's missing-record policy.
    async fn load(&self, cart_id: &str, policy: CreatePolicy) -> Result<Cart, EngineError> {
        match self.store.get(cart_id).await {
            Ok(cart) => Ok(cart),
            Err(StoreError::NotFound) if policy == CreatePolicy::IfAbsent => Ok(Cart::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persists the cart with a refreshed TTL.
    async fn persist(&self, cart_id: &str, cart: &Cart) -> Result<(), EngineError> {
        self.store.put(cart_id, cart, self.ttl).await?;
        Ok(())
    }

    /// Returns the cart stored under `cart_id`.
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, EngineError> {
        debug!(cart_id, "get cart");
        Ok(self.store.get(cart_id).await?)
    }

    /// Removes the cart. Fails with `cart not found` if it did not exist.
    pub async fn delete_cart(&self, cart_id: &str) -> Result<(), EngineError> {
        if !self.store.delete(cart_id).await? {
            return Err(StoreError::NotFound.into());
        }
        info!(cart_id, "cart deleted");
        Ok(())
    }

    /// Adds `qty` units of `sku` to the cart, creating the cart if absent.
    ///
    /// The SKU is resolved through the catalogue on every add, so an
    /// existing line item picks up the current price, not the price at
    /// first add. A failed lookup aborts before anything is persisted.
    pub async fn add_item(&self, cart_id: &str, sku: &str, qty: i64) -> Result<Cart, EngineError> {
        validate_add_quantity(qty)?;

        let mut cart = self.load(cart_id, CreatePolicy::IfAbsent).await?;
        let product = self.catalogue.lookup(sku).await?;

        cart.add_item(&product, qty);
        self.persist(cart_id, &cart).await?;

        info!(cart_id, sku, qty, total = %cart.total, "item added");
        Ok(cart)
    }

    /// Sets the quantity of an existing line item (0 removes it).
    pub async fn update_item(
        &self,
        cart_id: &str,
        sku: &str,
        qty: i64,
    ) -> Result<Cart, EngineError> {
        validate_update_quantity(qty)?;

        let mut cart = self.load(cart_id, CreatePolicy::MustExist).await?;
        cart.set_quantity(sku, qty)?;
        self.persist(cart_id, &cart).await?;

        info!(cart_id, sku, qty, total = %cart.total, "item updated");
        Ok(cart)
    }

    /// Attaches shipping as the single `SHIP` line item, creating the cart
    /// if absent. Re-adding shipping replaces the previous entry.
    pub async fn add_shipping(
        &self,
        cart_id: &str,
        shipping: ShippingRequest,
    ) -> Result<Cart, EngineError> {
        let mut cart = self.load(cart_id, CreatePolicy::IfAbsent).await?;
        cart.set_shipping(&shipping);
        self.persist(cart_id, &cart).await?;

        info!(cart_id, location = %shipping.location, total = %cart.total, "shipping attached");
        Ok(cart)
    }

    /// Renames a cart: its content becomes addressable only under `new_id`.
    ///
    /// Uses the backend's atomic rename primitive; any cart already stored
    /// under `new_id` is overwritten, with no merge semantics.
    pub async fn rename_cart(&self, old_id: &str, new_id: &str) -> Result<Cart, EngineError> {
        if !self.store.rename(old_id, new_id).await? {
            return Err(StoreError::NotFound.into());
        }
        info!(old_id, new_id, "cart renamed");
        Ok(self.store.get(new_id).await?)
    }

    /// Engine liveness plus backend reachability. Never fails.
    pub async fn health(&self) -> HealthStatus {
        HealthStatus::report(self.store.ping().await)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use trolley_core::{CoreError, Money, ProductInfo};
    use trolley_store::StoreResult;

    use crate::catalogue::CatalogueError;

    // =========================================================================
    // Collaborator Doubles
    // =========================================================================

    /// In-memory stand-in for Redis. Also records the TTL of the last write
    /// and counts writes, so tests can assert what was (not) persisted.
    #[derive(Default)]
    struct MemoryStore {
        carts: Mutex<HashMap<String, Cart>>,
        last_ttl: Mutex<Option<Duration>>,
        writes: AtomicUsize,
        reachable: bool,
    }

    impl MemoryStore {
        fn new() -> Self {
            MemoryStore { reachable: true, ..Default::default() }
        }

        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CartRepository for &MemoryStore {
        async fn get(&self, cart_id: &str) -> StoreResult<Cart> {
            self.carts
                .lock()
                .unwrap()
                .get(cart_id)
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn put(&self, cart_id: &str, cart: &Cart, ttl: Duration) -> StoreResult<()> {
            self.carts.lock().unwrap().insert(cart_id.to_string(), cart.clone());
            *self.last_ttl.lock().unwrap() = Some(ttl);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete(&self, cart_id: &str) -> StoreResult<bool> {
            Ok(self.carts.lock().unwrap().remove(cart_id).is_some())
        }

        async fn rename(&self, old_id: &str, new_id: &str) -> StoreResult<bool> {
            let mut carts = self.carts.lock().unwrap();
            match carts.remove(old_id) {
                Some(cart) => {
                    carts.insert(new_id.to_string(), cart);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn ping(&self) -> bool {
            self.reachable
        }
    }

    /// Fixed product table standing in for the catalogue; counts lookups so
    /// tests can assert validation happens before any I/O.
    #[derive(Default)]
    struct FixedCatalogue {
        products: HashMap<String, ProductInfo>,
        lookups: AtomicUsize,
    }

    impl FixedCatalogue {
        fn with(products: &[(&str, i64)]) -> Self {
            FixedCatalogue {
                products: products
                    .iter()
                    .map(|(sku, cents)| {
                        (
                            sku.to_string(),
                            ProductInfo {
                                sku: sku.to_string(),
                                name: format!("Product {}", sku),
                                price: Money::from_cents(*cents),
                                instock: 100,
                            },
                        )
                    })
                    .collect(),
                lookups: AtomicUsize::new(0),
            }
        }

        fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductCatalogue for &FixedCatalogue {
        async fn lookup(&self, sku: &str) -> Result<ProductInfo, CatalogueError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.products
                .get(sku)
                .cloned()
                .ok_or_else(|| CatalogueError::ProductNotFound { sku: sku.to_string() })
        }
    }

    const TTL: Duration = Duration::from_secs(3600);

    fn engine<'a>(
        store: &'a MemoryStore,
        catalogue: &'a FixedCatalogue,
    ) -> CartService<&'a MemoryStore, &'a FixedCatalogue> {
        CartService::new(store, catalogue, TTL)
    }

    fn shipping(cost_cents: i64, location: &str) -> ShippingRequest {
        ShippingRequest {
            distance: 10.0,
            cost: Money::from_cents(cost_cents),
            location: location.to_string(),
        }
    }

    // =========================================================================
    // Add Item
    // =========================================================================

    #[tokio::test]
    async fn test_add_item_creates_cart_with_totals() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        let cart = engine.add_item("c1", "SKU1", 2).await.unwrap();

        let item = cart.item("SKU1").unwrap();
        assert_eq!(item.qty, 2);
        assert_eq!(item.price.cents(), 1000);
        assert_eq!(item.subtotal.cents(), 2000);
        assert_eq!(cart.total.cents(), 2000);
        assert_eq!(cart.tax.cents(), 400);

        // Persisted with the engine's TTL
        assert_eq!(*store.last_ttl.lock().unwrap(), Some(TTL));
        let stored = engine.get_cart("c1").await.unwrap();
        assert_eq!(stored.total.cents(), 2000);
    }

    #[tokio::test]
    async fn test_add_same_sku_twice_merges() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        let cart = engine.add_item("c1", "SKU1", 3).await.unwrap();

        assert_eq!(cart.item_count(), 1);
        let item = cart.item("SKU1").unwrap();
        assert_eq!(item.qty, 5);
        assert_eq!(item.subtotal.cents(), 5000);
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_qty_before_any_io() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        let err = engine.add_item("c1", "SKU1", 0).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::InvalidQuantity { qty: 0 })
        ));

        // Validation fired before the lookup and before any write
        assert_eq!(catalogue.lookup_count(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_add_unknown_sku_persists_nothing() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        let err = engine.add_item("c1", "UNKNOWN", 1).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Catalogue(CatalogueError::ProductNotFound { .. })
        ));

        assert_eq!(store.write_count(), 0);
        assert!(matches!(
            engine.get_cart("c1").await.unwrap_err(),
            EngineError::Store(StoreError::NotFound)
        ));
    }

    // =========================================================================
    // Update Item
    // =========================================================================

    #[tokio::test]
    async fn test_update_sets_absolute_quantity() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        let cart = engine.update_item("c1", "SKU1", 7).await.unwrap();

        assert_eq!(cart.item("SKU1").unwrap().qty, 7);
        assert_eq!(cart.total.cents(), 7000);
        assert_eq!(cart.tax.cents(), 1400);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000), ("SKU2", 300)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        engine.add_item("c1", "SKU2", 1).await.unwrap();

        let cart = engine.update_item("c1", "SKU1", 0).await.unwrap();

        assert_eq!(cart.item_count(), 1);
        assert!(cart.item("SKU1").is_none());
        assert_eq!(cart.total.cents(), 300);
        assert_eq!(cart.tax.cents(), 60);
    }

    #[tokio::test]
    async fn test_update_negative_qty_leaves_cart_unchanged() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        let writes_before = store.write_count();

        let err = engine.update_item("c1", "SKU1", -1).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::NegativeQuantity { qty: -1 })
        ));

        assert_eq!(store.write_count(), writes_before);
        assert_eq!(engine.get_cart("c1").await.unwrap().item("SKU1").unwrap().qty, 2);
    }

    #[tokio::test]
    async fn test_update_absent_cart_is_not_found() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        let err = engine.update_item("ghost", "SKU1", 1).await.unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_sku_not_in_cart() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        let err = engine.update_item("c1", "SKU9", 1).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::ItemNotInCart { .. })
        ));
    }

    // =========================================================================
    // Shipping
    // =========================================================================

    #[tokio::test]
    async fn test_shipping_joins_existing_cart() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 2).await.unwrap();
        let cart = engine.add_shipping("c1", shipping(500, "Town")).await.unwrap();

        let ship = cart.item("SHIP").unwrap();
        assert_eq!(ship.name, "shipping to Town");
        assert_eq!(ship.price.cents(), 500);
        assert_eq!(ship.qty, 1);
        assert_eq!(ship.subtotal.cents(), 500);
        assert_eq!(cart.total.cents(), 2500);
        assert_eq!(cart.tax.cents(), 500);
    }

    #[tokio::test]
    async fn test_shipping_creates_cart_when_absent() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::default();
        let engine = engine(&store, &catalogue);

        let cart = engine.add_shipping("fresh", shipping(900, "City")).await.unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total.cents(), 900);
    }

    #[tokio::test]
    async fn test_shipping_replaces_prior_shipping() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 1).await.unwrap();
        engine.add_shipping("c1", shipping(500, "Town")).await.unwrap();
        let cart = engine.add_shipping("c1", shipping(800, "City")).await.unwrap();

        assert_eq!(cart.item_count(), 2); // SKU1 + one SHIP line
        let ship = cart.item("SHIP").unwrap();
        assert_eq!(ship.name, "shipping to City");
        assert_eq!(ship.subtotal.cents(), 800);
        assert_eq!(cart.total.cents(), 1800);
    }

    // =========================================================================
    // Delete / Rename
    // =========================================================================

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("c1", "SKU1", 1).await.unwrap();
        engine.delete_cart("c1").await.unwrap();

        assert!(matches!(
            engine.get_cart("c1").await.unwrap_err(),
            EngineError::Store(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_absent_cart_is_not_found() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::default();
        let engine = engine(&store, &catalogue);

        assert!(matches!(
            engine.delete_cart("ghost").await.unwrap_err(),
            EngineError::Store(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_rename_moves_content_to_new_id() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("anon-7", "SKU1", 2).await.unwrap();
        let cart = engine.rename_cart("anon-7", "user-42").await.unwrap();

        assert_eq!(cart.item("SKU1").unwrap().qty, 2);
        assert!(matches!(
            engine.get_cart("anon-7").await.unwrap_err(),
            EngineError::Store(StoreError::NotFound)
        ));
        assert_eq!(engine.get_cart("user-42").await.unwrap().total.cents(), 2000);
    }

    #[tokio::test]
    async fn test_rename_absent_source_is_not_found() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::default();
        let engine = engine(&store, &catalogue);

        assert!(matches!(
            engine.rename_cart("ghost", "user-42").await.unwrap_err(),
            EngineError::Store(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_rename_overwrites_existing_target() {
        let store = MemoryStore::new();
        let catalogue = FixedCatalogue::with(&[("SKU1", 1000), ("SKU2", 300)]);
        let engine = engine(&store, &catalogue);

        engine.add_item("anon-7", "SKU1", 2).await.unwrap();
        engine.add_item("user-42", "SKU2", 1).await.unwrap();

        let cart = engine.rename_cart("anon-7", "user-42").await.unwrap();

        // No merge: the target now holds exactly the source content
        assert_eq!(cart.item_count(), 1);
        assert!(cart.item("SKU2").is_none());
        assert_eq!(cart.item("SKU1").unwrap().qty, 2);
    }

    // =========================================================================
    // Health
    // =========================================================================

    #[tokio::test]
    async fn test_health_reports_backend_reachability() {
        let catalogue = FixedCatalogue::default();

        let store = MemoryStore::new();
        let status = engine(&store, &catalogue).health().await;
        assert_eq!(status.app, "OK");
        assert!(status.redis);

        let unreachable = MemoryStore { reachable: false, ..Default::default() };
        let status = engine(&unreachable, &catalogue).health().await;
        assert_eq!(status.app, "OK");
        assert!(!status.redis);
    }
}
