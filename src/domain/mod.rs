//! # Domain Model
//!
//! Immutable data types for the aggregation core.
//!
//! ## Identity Types
//!
//! - [`ProductId`], [`UserId`]: opaque string-based identifiers
//!
//! ## Payloads
//!
//! - [`ProductDetails`], [`Inventory`], [`Recommendations`]: per-source data
//!
//! ## Outcomes
//!
//! - [`SourceResult`]: tagged outcome of one backend call
//! - [`SourceStatus`], [`SourceStatusSet`]: statuses recorded on the view
//! - [`CompositeView`]: the merged, partially-complete result

pub mod composite_view;
pub mod ids;
pub mod models;
pub mod source_result;

pub use composite_view::{CompositeView, SourceStatusSet};
pub use ids::{ProductId, UserId};
pub use models::{Inventory, ProductDetails, Recommendations};
pub use source_result::{
    STATUS_OK, STATUS_REJECTED, STATUS_TIMEOUT, STATUS_UNRESOLVED, Source, SourceResult,
    SourceStatus,
};
