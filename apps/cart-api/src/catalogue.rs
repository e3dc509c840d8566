//! # Catalogue Client
//!
//! Resolves SKUs to product name/price/stock via the external catalogue
//! service.
//!
//! ## Lookup Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalogue Lookup                                     │
//! │                                                                         │
//! │  GET {CATALOGUE_URL}/product/{sku}                                     │
//! │       │                                                                 │
//! │       ├── 200 {sku, name, price, instock}  → ProductInfo               │
//! │       ├── 404                              → ProductNotFound           │
//! │       └── transport error / other status /                             │
//! │           unparseable body                 → Unavailable               │
//! │                                                                         │
//! │  No retries in this layer: one failed lookup aborts the add            │
//! │  operation immediately.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

use trolley_core::ProductInfo;

// =============================================================================
// Errors
// =============================================================================

/// Catalogue lookup errors.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The catalogue reports the SKU unknown.
    #[error("product not found")]
    ProductNotFound { sku: String },

    /// The request could not be completed or the response could not be
    /// parsed as a product.
    #[error("catalogue unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Catalogue Trait
// =============================================================================

/// SKU resolution, as consumed by the cart engine.
///
/// The trait seam lets engine tests substitute a fixed product table for the
/// HTTP client.
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Resolves a SKU to its product info.
    async fn lookup(&self, sku: &str) -> Result<ProductInfo, CatalogueError>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// HTTP client for the external catalogue service.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogueClient {
    /// Creates a client for the catalogue at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogueClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ProductCatalogue for CatalogueClient {
    async fn lookup(&self, sku: &str) -> Result<ProductInfo, CatalogueError> {
        let url = format!("{}/product/{}", self.base_url, sku);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(sku, error = %e, "catalogue request failed");
            CatalogueError::Unavailable(e.to_string())
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogueError::ProductNotFound { sku: sku.to_string() });
        }

        if !response.status().is_success() {
            warn!(sku, status = %response.status(), "catalogue returned error status");
            return Err(CatalogueError::Unavailable(format!(
                "catalogue returned {}",
                response.status()
            )));
        }

        response.json::<ProductInfo>().await.map_err(|e| {
            warn!(sku, error = %e, "catalogue response not a product");
            CatalogueError::Unavailable(e.to_string())
        })
    }
}
