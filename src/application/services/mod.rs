//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`AggregationOrchestrator`]: concurrent fan-out over the three sources

pub mod aggregation;

pub use aggregation::{AggregationError, AggregationOrchestrator, AggregationResult};
