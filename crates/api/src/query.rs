//! Query-string parameters for the listing endpoints.
//!
//! Kept flat (no `#[serde(flatten)]`) because query-string deserialization
//! of typed fields inside flattened structs is unreliable; the struct is
//! split into filter and pagination halves after validation.

use serde::Deserialize;
use validator::Validate;

use rentora_core::error::CoreError;
use rentora_core::filter::ListingFilter;
use rentora_core::page::{PageRequest, SortField, SortOrder};

/// `GET /apartments` query parameters: filters plus pagination and sort.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub project: Option<String>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub max_price: Option<f64>,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub min_bedrooms: Option<i32>,
    #[validate(range(min = 0, message = "must be non-negative"))]
    pub max_bedrooms: Option<i32>,

    #[validate(range(min = 0, message = "must be non-negative"))]
    pub min_bathrooms: Option<i32>,
    #[validate(range(min = 0, message = "must be non-negative"))]
    pub max_bathrooms: Option<i32>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub min_area: Option<f64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub max_area: Option<f64>,

    pub available: Option<bool>,

    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "must be 1-100"))]
    pub limit: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl ListingQuery {
    /// Validate all present fields, returning field-detailed errors.
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate().map_err(CoreError::from_validation)?;
        Ok(self)
    }

    /// The filter half of the query.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            search: self.search.clone(),
            city: self.city.clone(),
            project: self.project.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_bedrooms: self.min_bedrooms,
            max_bedrooms: self.max_bedrooms,
            min_bathrooms: self.min_bathrooms,
            max_bathrooms: self.max_bathrooms,
            min_area: self.min_area,
            max_area: self.max_area,
            available: self.available,
        }
    }

    /// The pagination/sort half of the query, with defaults applied.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::resolve(self.page, self.limit, self.sort_by, self.sort_order)
    }
}
