//! # Source Adapter Ports
//!
//! Port definitions for the three backend sources.
//!
//! Each backend capability gets its own trait so that implementations can be
//! wired independently. Adapters perform whatever transport they need (HTTP,
//! RPC, in-process) and map failures onto [`SourceError`]; the orchestrator
//! treats every adapter identically.
//!
//! # Examples
//!
//! ```ignore
//! use product_aggregator::infrastructure::sources::traits::ProductDetailsSource;
//!
//! #[derive(Debug)]
//! struct CatalogClient { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl ProductDetailsSource for CatalogClient {
//!     // ... implement get_product_details
//! }
//! ```
//!
//! [`SourceError`]: crate::infrastructure::sources::error::SourceError

use crate::domain::ids::{ProductId, UserId};
use crate::domain::models::{Inventory, ProductDetails, Recommendations};
use crate::infrastructure::sources::error::SourceCallResult;
use async_trait::async_trait;
use std::fmt;

/// Port for the product details backend.
#[async_trait]
pub trait ProductDetailsSource: Send + Sync + fmt::Debug {
    /// Fetches catalog details for the given product.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing the backend failure. The message
    /// is recorded verbatim as the source's status on the composite view.
    ///
    /// [`SourceError`]: crate::infrastructure::sources::error::SourceError
    async fn get_product_details(&self, product_id: &ProductId)
    -> SourceCallResult<ProductDetails>;
}

/// Port for the inventory backend.
#[async_trait]
pub trait InventorySource: Send + Sync + fmt::Debug {
    /// Fetches stock information for the given product.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing the backend failure.
    ///
    /// [`SourceError`]: crate::infrastructure::sources::error::SourceError
    async fn get_inventory(&self, product_id: &ProductId) -> SourceCallResult<Inventory>;
}

/// Port for the recommendations backend.
#[async_trait]
pub trait RecommendationsSource: Send + Sync + fmt::Debug {
    /// Fetches recommendations for the given (product, user) pair.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] describing the backend failure.
    ///
    /// [`SourceError`]: crate::infrastructure::sources::error::SourceError
    async fn get_recommendations(
        &self,
        product_id: &ProductId,
        user_id: &UserId,
    ) -> SourceCallResult<Recommendations>;
}
