//! # HTTP Routes
//!
//! Binds the HTTP surface to the cart engine.
//!
//! ## Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /health                    → {app: "OK", redis: bool}          │
//! │  GET    /cart/{id}                 → cart JSON | 404                   │
//! │  DELETE /cart/{id}                 → "OK"      | 404                   │
//! │  GET    /add/{id}/{sku}/{qty}      → cart JSON | 400/404               │
//! │  GET    /update/{id}/{sku}/{qty}   → cart JSON | 400/404               │
//! │  POST   /shipping/{id}             → cart JSON | 400                   │
//! │  GET    /rename/{from}/{to}        → cart JSON | 404                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers stay thin: extract, call the engine, convert. All status and
//! message decisions live in [`crate::error`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use trolley_core::{Cart, CoreError, ShippingRequest};
use trolley_store::RedisCartStore;

use crate::catalogue::CatalogueClient;
use crate::error::ApiError;
use crate::services::cart_service::CartService;
use crate::services::health_service::HealthStatus;

/// The engine as wired in production: Redis store + HTTP catalogue.
pub type Engine = CartService<RedisCartStore, CatalogueClient>;

/// Builds the router over a shared engine.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cart/{id}", get(get_cart).delete(delete_cart))
        .route("/add/{id}/{sku}/{qty}", get(add_item))
        .route("/update/{id}/{sku}/{qty}", get(update_item))
        .route("/shipping/{id}", post(add_shipping))
        .route("/rename/{from}/{to}", get(rename_cart))
        .with_state(engine)
}

/// `GET /health` - never fails; degraded Redis is reported as data.
async fn health(State(engine): State<Arc<Engine>>) -> Json<HealthStatus> {
    Json(engine.health().await)
}

/// `GET /cart/{id}`
async fn get_cart(
    State(engine): State<Arc<Engine>>,
    Path(id): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(engine.get_cart(&id).await?))
}

/// `DELETE /cart/{id}`
async fn delete_cart(
    State(engine): State<Arc<Engine>>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    engine.delete_cart(&id).await?;
    Ok("OK")
}

/// `GET /add/{id}/{sku}/{qty}`
async fn add_item(
    State(engine): State<Arc<Engine>>,
    Path((id, sku, qty)): Path<(String, String, i64)>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(engine.add_item(&id, &sku, qty).await?))
}

/// `GET /update/{id}/{sku}/{qty}`
async fn update_item(
    State(engine): State<Arc<Engine>>,
    Path((id, sku, qty)): Path<(String, String, i64)>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(engine.update_item(&id, &sku, qty).await?))
}

/// `POST /shipping/{id}`
///
/// A body that fails to deserialize into [`ShippingRequest`] (missing
/// `distance`, `cost` or `location`) is the `shipping data missing`
/// validation error, rejected before the engine runs.
async fn add_shipping(
    State(engine): State<Arc<Engine>>,
    Path(id): Path<String>,
    payload: Result<Json<ShippingRequest>, JsonRejection>,
) -> Result<Json<Cart>, ApiError> {
    let Json(shipping) = payload.map_err(|_| ApiError::from(CoreError::ShippingDataMissing))?;
    Ok(Json(engine.add_shipping(&id, shipping).await?))
}

/// `GET /rename/{from}/{to}`
async fn rename_cart(
    State(engine): State<Arc<Engine>>,
    Path((from, to)): Path<(String, String)>,
) -> Result<Json<Cart>, ApiError> {
    Ok(Json(engine.rename_cart(&from, &to).await?))
}
