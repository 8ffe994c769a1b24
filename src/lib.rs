//! # Product Aggregator
//!
//! Concurrent product view aggregation engine.
//!
//! Given a product and a user, this crate fans out to three independent
//! backend sources (catalog details, inventory, recommendations) in
//! parallel on a shared bounded worker pool, waits no longer than a
//! configured budget, and assembles whatever resolved into an immutable
//! [`CompositeView`] annotated with per-source status. Any subset of
//! sources failing or running late degrades the view; it never fails the
//! request.
//!
//! # Architecture
//!
//! - [`domain`]: immutable data model ([`CompositeView`], [`SourceResult`],
//!   payload types)
//! - [`infrastructure`]: source adapter ports and the shared
//!   [`SourcePool`](infrastructure::SourcePool)
//! - [`application`]: the [`AggregationOrchestrator`]
//! - [`config`], [`telemetry`]: configuration surface and tracing setup
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use product_aggregator::application::AggregationOrchestrator;
//! use product_aggregator::domain::{Inventory, ProductDetails, ProductId, Recommendations, UserId};
//! use product_aggregator::infrastructure::sources::{
//!     InMemoryInventorySource, InMemoryProductDetailsSource, InMemoryRecommendationsSource,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = AggregationOrchestrator::with_defaults(
//!     Arc::new(InMemoryProductDetailsSource::responding(
//!         ProductDetails::new(ProductId::new("p1"), "Widget"),
//!     )),
//!     Arc::new(InMemoryInventorySource::responding(
//!         Inventory::new(ProductId::new("p1"), 5),
//!     )),
//!     Arc::new(InMemoryRecommendationsSource::responding(
//!         Recommendations::new(ProductId::new("p1"), UserId::new("u1"), vec![]),
//!     )),
//! );
//!
//! let view = engine
//!     .aggregate(&ProductId::new("p1"), &UserId::new("u1"))
//!     .await
//!     .unwrap();
//! assert!(view.is_complete());
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{AggregationError, AggregationOrchestrator, AggregationResult};
pub use config::{AggregationConfig, PoolConfig};
pub use domain::{CompositeView, SourceResult, SourceStatus, SourceStatusSet};
