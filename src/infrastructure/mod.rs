//! # Infrastructure
//!
//! Adapters and shared runtime resources.
//!
//! - [`sources`]: ports for the three backend sources plus in-memory
//!   implementations
//! - [`pool`]: the shared bounded worker pool all source calls run on

pub mod pool;
pub mod sources;

pub use pool::{PoolError, SourcePool};
