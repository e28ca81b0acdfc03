//! Create/update payloads for listings, with field validation and the
//! canonical defaulting step.
//!
//! Both payloads live here (rather than in `db`) because the client crate
//! sends them and the api crate validates them; only persistence lives
//! elsewhere.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

/// Payload for creating a listing.
///
/// `images` and `available` are optional on the wire; [`CreateListing::normalize`]
/// fills their defaults in one place before the payload reaches persistence.
#[derive(Debug, Clone, PartialEq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListing {
    #[validate(length(min = 3, max = 100, message = "must be 3-100 characters"))]
    pub unit_name: String,

    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub unit_number: String,

    #[validate(length(min = 3, max = 100, message = "must be 3-100 characters"))]
    pub project: String,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 5, max = 200, message = "must be 5-200 characters"))]
    pub address: String,

    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub city: String,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub bedrooms: i32,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub bathrooms: i32,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub area: f64,

    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,

    pub available: Option<bool>,
}

impl CreateListing {
    /// Validate all fields, returning a single field-detailed error.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate().map_err(CoreError::from_validation)?;
        Ok(self)
    }

    /// Fill defaults for omitted optional fields: `images = []`,
    /// `available = true`. This is the only place defaults are applied.
    pub fn normalize(mut self) -> Self {
        self.images.get_or_insert_with(Vec::new);
        self.available.get_or_insert(true);
        self
    }
}

/// Sparse update payload: absent fields leave the stored value untouched.
///
/// Every field is an explicit `Option`, so the set of patchable fields is
/// fixed at compile time.
#[derive(Debug, Clone, Default, PartialEq, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListing {
    #[validate(length(min = 3, max = 100, message = "must be 3-100 characters"))]
    pub unit_name: Option<String>,

    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub unit_number: Option<String>,

    #[validate(length(min = 3, max = 100, message = "must be 3-100 characters"))]
    pub project: Option<String>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 5, max = 200, message = "must be 5-200 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub city: Option<String>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub bathrooms: Option<i32>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub area: Option<f64>,

    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,

    pub available: Option<bool>,
}

impl UpdateListing {
    /// Validate all present fields.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate().map_err(CoreError::from_validation)?;
        Ok(self)
    }
}

/// An image reference must be an absolute http(s) URL or a local upload
/// path (leading `/`).
fn validate_image_urls(images: &[String]) -> Result<(), ValidationError> {
    for url in images {
        let ok = url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/');
        if !ok {
            return Err(ValidationError::new("url")
                .with_message("each image must be an absolute URL or an upload path".into()));
        }
    }
    Ok(())
}
