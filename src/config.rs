//! # Configuration
//!
//! Recognized options for the aggregation core.
//!
//! All timing options are in milliseconds. Defaults match the documented
//! design values and apply field-by-field, so a configuration file or
//! environment only needs to name the options it overrides.
//!
//! # Examples
//!
//! ```
//! use product_aggregator::config::AggregationConfig;
//!
//! let config = AggregationConfig::default()
//!     .with_per_source_timeout_ms(500)
//!     .with_overall_wait_buffer_ms(200);
//!
//! assert_eq!(config.overall_wait_ms(), 700);
//! ```

use serde::Deserialize;
use std::time::Duration;

const DEFAULT_PER_SOURCE_TIMEOUT_MS: u64 = 700;
const DEFAULT_OVERALL_WAIT_BUFFER_MS: u64 = 300;
const DEFAULT_POOL_CORE_SIZE: usize = 8;
const DEFAULT_POOL_MAX_SIZE: usize = 32;
const DEFAULT_POOL_QUEUE_CAPACITY: usize = 128;
const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 60_000;

/// Sizing options for the shared worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Resident workers kept alive regardless of load.
    pub core_size: usize,
    /// Upper bound on concurrent workers.
    pub max_size: usize,
    /// Capacity of the pending-job queue.
    pub queue_capacity: usize,
    /// Idle period after which workers above the floor retire.
    pub idle_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            core_size: DEFAULT_POOL_CORE_SIZE,
            max_size: DEFAULT_POOL_MAX_SIZE,
            queue_capacity: DEFAULT_POOL_QUEUE_CAPACITY,
            idle_timeout_ms: DEFAULT_POOL_IDLE_TIMEOUT_MS,
        }
    }
}

/// Configuration for the aggregation orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Per-source deadline for each backend call.
    pub per_source_timeout_ms: u64,
    /// Extra budget for the overall wait beyond the per-source deadline.
    ///
    /// The buffer absorbs scheduling jitter, not genuine extra service
    /// time: under normal conditions every per-source deadline has fired
    /// before the overall wait expires.
    pub overall_wait_buffer_ms: u64,
    /// Worker pool sizing.
    pub pool: PoolConfig,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            per_source_timeout_ms: DEFAULT_PER_SOURCE_TIMEOUT_MS,
            overall_wait_buffer_ms: DEFAULT_OVERALL_WAIT_BUFFER_MS,
            pool: PoolConfig::default(),
        }
    }
}

impl AggregationConfig {
    /// Sets the per-source timeout.
    #[must_use]
    pub fn with_per_source_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.per_source_timeout_ms = timeout_ms;
        self
    }

    /// Sets the overall wait buffer.
    #[must_use]
    pub fn with_overall_wait_buffer_ms(mut self, buffer_ms: u64) -> Self {
        self.overall_wait_buffer_ms = buffer_ms;
        self
    }

    /// Sets the worker pool sizing.
    #[must_use]
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Returns the per-source deadline as a [`Duration`].
    #[must_use]
    pub fn per_source_timeout(&self) -> Duration {
        Duration::from_millis(self.per_source_timeout_ms)
    }

    /// Returns the overall wait budget in milliseconds.
    ///
    /// Always strictly larger than the per-source timeout when the buffer
    /// is non-zero.
    #[must_use]
    pub fn overall_wait_ms(&self) -> u64 {
        self.per_source_timeout_ms
            .saturating_add(self.overall_wait_buffer_ms)
    }

    /// Returns the overall wait budget as a [`Duration`].
    #[must_use]
    pub fn overall_wait(&self) -> Duration {
        Duration::from_millis(self.overall_wait_ms())
    }

    /// Loads configuration from an optional `aggregator` file plus
    /// `AGGREGATOR_*` environment variables, over the defaults.
    ///
    /// Top-level options map directly (`AGGREGATOR_PER_SOURCE_TIMEOUT_MS`);
    /// pool options nest with a double underscore
    /// (`AGGREGATOR_POOL__MAX_SIZE`).
    ///
    /// A `.env` file in the working directory is honored if present.
    ///
    /// # Errors
    ///
    /// Returns a [`config::ConfigError`] if a source cannot be read or a
    /// value cannot be deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::File::with_name("aggregator").required(false))
            .add_source(
                config::Environment::with_prefix("AGGREGATOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_values() {
        let config = AggregationConfig::default();
        assert_eq!(config.per_source_timeout_ms, 700);
        assert_eq!(config.overall_wait_buffer_ms, 300);
        assert_eq!(config.overall_wait_ms(), 1000);
        assert_eq!(config.pool.core_size, 8);
        assert_eq!(config.pool.max_size, 32);
        assert_eq!(config.pool.queue_capacity, 128);
        assert_eq!(config.pool.idle_timeout_ms, 60_000);
    }

    #[test]
    fn builder_overrides() {
        let config = AggregationConfig::default()
            .with_per_source_timeout_ms(100)
            .with_overall_wait_buffer_ms(50)
            .with_pool(PoolConfig {
                core_size: 2,
                max_size: 4,
                queue_capacity: 8,
                idle_timeout_ms: 1000,
            });

        assert_eq!(config.overall_wait(), Duration::from_millis(150));
        assert_eq!(config.pool.max_size, 4);
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let config: AggregationConfig = serde_json::from_str(
            r#"{"per_source_timeout_ms": 250, "pool": {"max_size": 16}}"#,
        )
        .unwrap();

        assert_eq!(config.per_source_timeout_ms, 250);
        assert_eq!(config.overall_wait_buffer_ms, 300);
        assert_eq!(config.pool.max_size, 16);
        assert_eq!(config.pool.core_size, 8);
    }

    #[test]
    fn environment_overrides_use_double_underscore_for_pool_options() {
        let mut vars = config::Map::new();
        vars.insert(
            "AGGREGATOR_PER_SOURCE_TIMEOUT_MS".to_owned(),
            "250".to_owned(),
        );
        vars.insert("AGGREGATOR_POOL__MAX_SIZE".to_owned(), "16".to_owned());

        let config: AggregationConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("AGGREGATOR")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.per_source_timeout_ms, 250);
        assert_eq!(config.pool.max_size, 16);
        assert_eq!(config.overall_wait_buffer_ms, 300);
        assert_eq!(config.pool.core_size, 8);
    }

    #[test]
    fn overall_wait_saturates() {
        let config = AggregationConfig::default()
            .with_per_source_timeout_ms(u64::MAX)
            .with_overall_wait_buffer_ms(1);
        assert_eq!(config.overall_wait_ms(), u64::MAX);
    }
}
