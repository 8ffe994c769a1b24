//! # Source Payload Models
//!
//! Data returned by the three backend sources.
//!
//! These are plain immutable data holders: private fields, constructors and
//! read-only accessors. The aggregator never inspects their contents beyond
//! moving them into the composite view.

use crate::domain::ids::{ProductId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog details for a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// The product this record describes.
    product_id: ProductId,
    /// Display name.
    name: String,
    /// Optional long-form description.
    description: Option<String>,
    /// Unit price in minor currency units, when priced.
    price_minor: Option<u64>,
}

impl ProductDetails {
    /// Creates new product details.
    #[must_use]
    pub fn new(product_id: ProductId, name: impl Into<String>) -> Self {
        Self {
            product_id,
            name: name.into(),
            description: None,
            price_minor: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the unit price in minor currency units.
    #[must_use]
    pub fn with_price_minor(mut self, price_minor: u64) -> Self {
        self.price_minor = Some(price_minor);
        self
    }

    /// Returns the product ID.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the unit price in minor currency units, if priced.
    #[inline]
    #[must_use]
    pub fn price_minor(&self) -> Option<u64> {
        self.price_minor
    }
}

impl fmt::Display for ProductDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductDetails({}: {})", self.product_id, self.name)
    }
}

/// Stock information for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// The product this record describes.
    product_id: ProductId,
    /// Units currently in stock.
    in_stock: u64,
    /// Warehouse or region code the count was read from.
    location: Option<String>,
}

impl Inventory {
    /// Creates a new inventory record.
    #[must_use]
    pub fn new(product_id: ProductId, in_stock: u64) -> Self {
        Self {
            product_id,
            in_stock,
            location: None,
        }
    }

    /// Sets the warehouse or region code.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the product ID.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the units currently in stock.
    #[inline]
    #[must_use]
    pub fn in_stock(&self) -> u64 {
        self.in_stock
    }

    /// Returns the warehouse or region code, if known.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns true if at least one unit is in stock.
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.in_stock > 0
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inventory({}: {} in stock)", self.product_id, self.in_stock)
    }
}

/// Personalized recommendations for a (product, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// The product the recommendations relate to.
    product_id: ProductId,
    /// The user the recommendations were computed for.
    user_id: UserId,
    /// Recommended product IDs, best match first.
    items: Vec<ProductId>,
}

impl Recommendations {
    /// Creates a new recommendations record.
    #[must_use]
    pub fn new(product_id: ProductId, user_id: UserId, items: Vec<ProductId>) -> Self {
        Self {
            product_id,
            user_id,
            items,
        }
    }

    /// Returns the product ID.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the user ID.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the recommended product IDs, best match first.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    /// Returns true if no recommendations were produced.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recommendations({} for {}: {} items)",
            self.product_id,
            self.user_id,
            self.items.len()
        )
    }
}
