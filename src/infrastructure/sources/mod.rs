//! # Source Adapters
//!
//! Ports and implementations for the three backend sources.
//!
//! - [`traits`]: the [`ProductDetailsSource`], [`InventorySource`] and
//!   [`RecommendationsSource`] ports
//! - [`error`]: [`SourceError`] and the [`SourceCallResult`] alias
//! - [`in_memory`]: canned implementations for testing

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::{SourceCallResult, SourceError};
pub use in_memory::{
    InMemoryInventorySource, InMemoryProductDetailsSource, InMemoryRecommendationsSource,
};
pub use traits::{InventorySource, ProductDetailsSource, RecommendationsSource};
