//! # In-Memory Sources
//!
//! In-memory implementations of the source ports for testing.
//!
//! Each source is configured with a canned response or failure and an
//! optional artificial latency, making failure and timeout paths easy to
//! exercise without real backends.

use crate::domain::ids::{ProductId, UserId};
use crate::domain::models::{Inventory, ProductDetails, Recommendations};
use crate::infrastructure::sources::error::{SourceCallResult, SourceError};
use crate::infrastructure::sources::traits::{
    InventorySource, ProductDetailsSource, RecommendationsSource,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

/// Canned behavior shared by the in-memory sources.
#[derive(Debug)]
struct Stub<T> {
    response: Result<T, SourceError>,
    delay: Duration,
    calls: Mutex<u64>,
}

impl<T: Clone> Stub<T> {
    fn new(response: Result<T, SourceError>) -> Self {
        Self {
            response,
            delay: Duration::ZERO,
            calls: Mutex::new(0),
        }
    }

    async fn respond(&self) -> SourceCallResult<T> {
        *self.calls.lock() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }

    fn calls(&self) -> u64 {
        *self.calls.lock()
    }
}

/// In-memory implementation of [`ProductDetailsSource`].
#[derive(Debug)]
pub struct InMemoryProductDetailsSource {
    stub: Stub<ProductDetails>,
}

impl InMemoryProductDetailsSource {
    /// Creates a source that answers with the given details.
    #[must_use]
    pub fn responding(details: ProductDetails) -> Self {
        Self {
            stub: Stub::new(Ok(details)),
        }
    }

    /// Creates a source that fails every call with the given error.
    #[must_use]
    pub fn failing(error: SourceError) -> Self {
        Self {
            stub: Stub::new(Err(error)),
        }
    }

    /// Adds artificial latency before every response.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.stub.delay = delay;
        self
    }

    /// Returns how many times the source has been called.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.stub.calls()
    }
}

#[async_trait]
impl ProductDetailsSource for InMemoryProductDetailsSource {
    async fn get_product_details(
        &self,
        _product_id: &ProductId,
    ) -> SourceCallResult<ProductDetails> {
        self.stub.respond().await
    }
}

/// In-memory implementation of [`InventorySource`].
#[derive(Debug)]
pub struct InMemoryInventorySource {
    stub: Stub<Inventory>,
}

impl InMemoryInventorySource {
    /// Creates a source that answers with the given inventory.
    #[must_use]
    pub fn responding(inventory: Inventory) -> Self {
        Self {
            stub: Stub::new(Ok(inventory)),
        }
    }

    /// Creates a source that fails every call with the given error.
    #[must_use]
    pub fn failing(error: SourceError) -> Self {
        Self {
            stub: Stub::new(Err(error)),
        }
    }

    /// Adds artificial latency before every response.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.stub.delay = delay;
        self
    }

    /// Returns how many times the source has been called.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.stub.calls()
    }
}

#[async_trait]
impl InventorySource for InMemoryInventorySource {
    async fn get_inventory(&self, _product_id: &ProductId) -> SourceCallResult<Inventory> {
        self.stub.respond().await
    }
}

/// In-memory implementation of [`RecommendationsSource`].
#[derive(Debug)]
pub struct InMemoryRecommendationsSource {
    stub: Stub<Recommendations>,
}

impl InMemoryRecommendationsSource {
    /// Creates a source that answers with the given recommendations.
    #[must_use]
    pub fn responding(recommendations: Recommendations) -> Self {
        Self {
            stub: Stub::new(Ok(recommendations)),
        }
    }

    /// Creates a source that fails every call with the given error.
    #[must_use]
    pub fn failing(error: SourceError) -> Self {
        Self {
            stub: Stub::new(Err(error)),
        }
    }

    /// Adds artificial latency before every response.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.stub.delay = delay;
        self
    }

    /// Returns how many times the source has been called.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.stub.calls()
    }
}

#[async_trait]
impl RecommendationsSource for InMemoryRecommendationsSource {
    async fn get_recommendations(
        &self,
        _product_id: &ProductId,
        _user_id: &UserId,
    ) -> SourceCallResult<Recommendations> {
        self.stub.respond().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responding_source_returns_payload() {
        let source = InMemoryProductDetailsSource::responding(ProductDetails::new(
            ProductId::new("p1"),
            "Widget",
        ));

        let details = source
            .get_product_details(&ProductId::new("p1"))
            .await
            .unwrap();
        assert_eq!(details.name(), "Widget");
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn failing_source_returns_error() {
        let source = InMemoryInventorySource::failing(SourceError::upstream("DB down"));

        let result = source.get_inventory(&ProductId::new("p1")).await;
        assert_eq!(result.unwrap_err().to_string(), "DB down");
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_source_sleeps_before_answering() {
        let source = InMemoryRecommendationsSource::responding(Recommendations::new(
            ProductId::new("p1"),
            UserId::new("u1"),
            vec![],
        ))
        .with_delay(Duration::from_millis(250));

        let started = tokio::time::Instant::now();
        source
            .get_recommendations(&ProductId::new("p1"), &UserId::new("u1"))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
