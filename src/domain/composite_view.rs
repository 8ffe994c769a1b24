//! # Composite View
//!
//! The merged, partially-complete result returned to the caller.
//!
//! A [`CompositeView`] holds the three optional source payloads plus a
//! [`SourceStatusSet`] recording how each source resolved. It is constructed
//! once, atomically, from the three terminal outcomes and never mutated
//! afterwards.
//!
//! Invariant: a payload field is present if and only if the corresponding
//! outcome was `Ok`; absence always pairs with a non-`"OK"` status entry.
//! [`CompositeView::from_outcomes`] enforces this by construction.

use crate::domain::models::{Inventory, ProductDetails, Recommendations};
use crate::domain::source_result::{Source, SourceResult, SourceStatus};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-source statuses for one aggregation request.
///
/// All three sources are always present, regardless of outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatusSet {
    /// Status of the product details call.
    details: SourceStatus,
    /// Status of the inventory call.
    inventory: SourceStatus,
    /// Status of the recommendations call.
    recommendations: SourceStatus,
}

impl SourceStatusSet {
    /// Creates a status set from the three per-source statuses.
    #[must_use]
    pub fn new(
        details: SourceStatus,
        inventory: SourceStatus,
        recommendations: SourceStatus,
    ) -> Self {
        Self {
            details,
            inventory,
            recommendations,
        }
    }

    /// Returns the status recorded for the given source.
    #[must_use]
    pub fn get(&self, source: Source) -> &SourceStatus {
        match source {
            Source::Details => &self.details,
            Source::Inventory => &self.inventory,
            Source::Recommendations => &self.recommendations,
        }
    }

    /// Returns the status of the product details call.
    #[inline]
    #[must_use]
    pub fn details(&self) -> &SourceStatus {
        &self.details
    }

    /// Returns the status of the inventory call.
    #[inline]
    #[must_use]
    pub fn inventory(&self) -> &SourceStatus {
        &self.inventory
    }

    /// Returns the status of the recommendations call.
    #[inline]
    #[must_use]
    pub fn recommendations(&self) -> &SourceStatus {
        &self.recommendations
    }

    /// Returns true if all three sources resolved successfully.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        Source::ALL.iter().all(|s| self.get(*s).is_ok())
    }

    /// Returns the number of sources that resolved successfully.
    #[must_use]
    pub fn ok_count(&self) -> usize {
        Source::ALL.iter().filter(|s| self.get(**s).is_ok()).count()
    }
}

impl fmt::Display for SourceStatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "details={} inventory={} recommendations={}",
            self.details, self.inventory, self.recommendations
        )
    }
}

/// The aggregation result: three optional payloads plus per-source status.
///
/// Degraded data availability is signaled through the status set, never
/// through the absence of a view. An all-failed view is a valid,
/// non-exceptional result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeView {
    /// Catalog details, present iff the details source resolved `Ok`.
    product_details: Option<ProductDetails>,
    /// Stock information, present iff the inventory source resolved `Ok`.
    inventory: Option<Inventory>,
    /// Recommendations, present iff the recommendations source resolved `Ok`.
    recommendations: Option<Recommendations>,
    /// How each of the three sources resolved.
    status: SourceStatusSet,
}

impl CompositeView {
    /// Builds a view from the three terminal outcomes.
    ///
    /// Each payload field is populated from its `Ok` value or left absent,
    /// and the status set is derived from the same outcomes, so the
    /// presence-iff-`OK` invariant holds by construction.
    #[must_use]
    pub fn from_outcomes(
        details: SourceResult<ProductDetails>,
        inventory: SourceResult<Inventory>,
        recommendations: SourceResult<Recommendations>,
    ) -> Self {
        let (product_details, details_status) = details.into_parts();
        let (inventory, inventory_status) = inventory.into_parts();
        let (recommendations, recommendations_status) = recommendations.into_parts();

        Self {
            product_details,
            inventory,
            recommendations,
            status: SourceStatusSet::new(details_status, inventory_status, recommendations_status),
        }
    }

    /// Returns the product details, if that source resolved.
    #[inline]
    #[must_use]
    pub fn product_details(&self) -> Option<&ProductDetails> {
        self.product_details.as_ref()
    }

    /// Returns the inventory, if that source resolved.
    #[inline]
    #[must_use]
    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.as_ref()
    }

    /// Returns the recommendations, if that source resolved.
    #[inline]
    #[must_use]
    pub fn recommendations(&self) -> Option<&Recommendations> {
        self.recommendations.as_ref()
    }

    /// Returns the per-source status set.
    #[inline]
    #[must_use]
    pub fn status(&self) -> &SourceStatusSet {
        &self.status
    }

    /// Returns true if all three payloads are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.all_ok()
    }
}

impl fmt::Display for CompositeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompositeView({}/3 sources: {})",
            self.status.ok_count(),
            self.status
        )
    }
}

// Deserialization validates the presence-iff-OK invariant instead of
// trusting wire input: a document pairing a present payload with a failure
// status (or an absent one with "OK") is refused.
impl<'de> Deserialize<'de> for CompositeView {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            product_details: Option<ProductDetails>,
            #[serde(default)]
            inventory: Option<Inventory>,
            #[serde(default)]
            recommendations: Option<Recommendations>,
            status: SourceStatusSet,
        }

        let raw = Raw::deserialize(deserializer)?;

        let presences = [
            (Source::Details, raw.product_details.is_some()),
            (Source::Inventory, raw.inventory.is_some()),
            (Source::Recommendations, raw.recommendations.is_some()),
        ];
        for (source, present) in presences {
            if present != raw.status.get(source).is_ok() {
                return Err(de::Error::custom(format!(
                    "{source} payload presence does not match its status"
                )));
            }
        }

        Ok(Self {
            product_details: raw.product_details,
            inventory: raw.inventory,
            recommendations: raw.recommendations,
            status: raw.status,
        })
    }
}
