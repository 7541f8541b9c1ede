use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::ids::id_millis;
use crate::timestamp::parse_timestamp_millis;
use crate::{Error, Result};

/// A product record in the catalog.
///
/// Stored documents are not validated on write, so every field is read
/// leniently: missing text is empty, unparseable numbers are zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "coerce::text")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: String,
    #[serde(default, deserialize_with = "coerce::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "coerce::text")]
    pub category: String,
    #[serde(default, deserialize_with = "coerce::count")]
    pub stock: u64,
    #[serde(default, deserialize_with = "coerce::opt_text", skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_number", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_count", skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

impl Product {
    /// Builds a product from an untyped JSON value.
    ///
    /// Fails only when the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidProduct("Invalid product or missing storeId".into()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the owning store, if any.
    #[must_use]
    pub fn store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    /// Recency used for newest-first ordering, in epoch milliseconds.
    ///
    /// A parseable `createdAt` wins; otherwise the millis encoded in a
    /// `prod_<millis>` id; otherwise `0`.
    #[must_use]
    pub fn effective_timestamp(&self) -> i64 {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp_millis)
            .or_else(|| id_millis(&self.id))
            .unwrap_or(0)
    }

    /// Overwrites every field present in `patch`. Identity fields are kept.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            self.category.clone_from(category);
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(created_at) = &patch.created_at {
            self.created_at = (!created_at.is_empty()).then(|| created_at.clone());
        }
        if let Some(image) = &patch.image {
            self.image = (!image.is_empty()).then(|| image.clone());
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        if let Some(reviews) = patch.reviews {
            self.reviews = Some(reviews);
        }
    }
}

/// The mutable subset of a [`Product`], addressed by `id` and `storeId`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "coerce::text")]
    pub id: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub store_id: String,
    #[serde(default, deserialize_with = "coerce::patch_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::patch_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_number", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "coerce::patch_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_count", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(default, deserialize_with = "coerce::patch_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "coerce::patch_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_number", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_count", skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u64>,
}

impl ProductPatch {
    /// Builds a patch from an untyped JSON value, requiring `id` and `storeId`.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidProduct("Invalid product or missing id/storeId".into()));
        }
        let patch: Self = serde_json::from_value(value)?;
        if patch.id.is_empty() || patch.store_id.is_empty() {
            return Err(Error::InvalidProduct("Invalid product or missing id/storeId".into()));
        }
        Ok(patch)
    }
}
