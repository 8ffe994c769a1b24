//! # Application Layer
//!
//! Use-case orchestration over the domain model and infrastructure ports.

pub mod services;

pub use services::{AggregationError, AggregationOrchestrator, AggregationResult};
