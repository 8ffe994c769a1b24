//! # Source Outcomes
//!
//! Terminal outcome of one backend call for one aggregation request.
//!
//! This module provides:
//! - [`Source`]: names the three backend sources
//! - [`SourceResult`]: tagged success-or-failure outcome of one call
//! - [`SourceStatus`]: the value-erased status recorded on the composite view
//!
//! A `SourceResult` is created exactly once per call attempt, by the
//! orchestrator, when that attempt's outcome becomes known. Failure reasons
//! are short machine-usable strings and are treated as opaque data: they are
//! recorded verbatim and never re-interpreted.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string recorded for a successfully resolved source.
pub const STATUS_OK: &str = "OK";

/// Status string recorded when a source misses its per-source deadline.
pub const STATUS_TIMEOUT: &str = "Timeout";

/// Status string recorded when the worker pool rejects a submission.
pub const STATUS_REJECTED: &str = "rejected";

/// Status string recorded when an outcome is still unresolved at read-back.
///
/// Distinct from [`STATUS_TIMEOUT`]: this is the forced status for a slot
/// whose per-source deadline had not yet fired when the overall wait expired.
pub const STATUS_UNRESOLVED: &str = "timeout";

/// The three backend sources the aggregator fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Product catalog details.
    Details,
    /// Stock information.
    Inventory,
    /// Personalized recommendations.
    Recommendations,
}

impl Source {
    /// All sources, in declaration order.
    pub const ALL: [Self; 3] = [Self::Details, Self::Inventory, Self::Recommendations];

    /// Returns the canonical lowercase name of the source.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Inventory => "inventory",
            Self::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged outcome of one backend call.
///
/// Exactly one variant is ever populated. `Failed` carries the reason as a
/// short opaque string, not a full error chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceResult<T> {
    /// The call produced a value.
    Ok(T),
    /// The call failed, timed out or was rejected; the reason is opaque.
    Failed(String),
}

impl<T> SourceResult<T> {
    /// Wraps a successful value.
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Records a failure with the given opaque reason.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    /// Returns true if the call produced a value.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns the value, if the call succeeded.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Returns the status recorded on the composite view for this outcome.
    #[must_use]
    pub fn status(&self) -> SourceStatus {
        match self {
            Self::Ok(_) => SourceStatus::Ok,
            Self::Failed(reason) => SourceStatus::Failed(reason.clone()),
        }
    }

    /// Splits the outcome into its optional value and status.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, SourceStatus) {
        match self {
            Self::Ok(value) => (Some(value), SourceStatus::Ok),
            Self::Failed(reason) => (None, SourceStatus::Failed(reason)),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for SourceResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Per-source status as recorded on the composite view.
///
/// Renders as `"OK"` on success or the opaque failure reason otherwise, and
/// serializes to a plain string in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceStatus {
    /// The source resolved successfully.
    Ok,
    /// The source failed; the reason is carried verbatim.
    Failed(String),
}

impl SourceStatus {
    /// Returns true if the source resolved successfully.
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => STATUS_OK,
            Self::Failed(reason) => reason,
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SourceStatus {
    fn from(status: &str) -> Self {
        if status == STATUS_OK {
            Self::Ok
        } else {
            Self::Failed(status.to_string())
        }
    }
}

impl Serialize for SourceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SourceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = SourceStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a source status string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SourceStatus::from(v))
            }
        }

        deserializer.deserialize_str(StatusVisitor)
    }
}
