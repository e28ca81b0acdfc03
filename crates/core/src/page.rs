//! Pagination and sort calculation for listing queries.
//!
//! Lives in `core` (zero internal deps) so the repository layer and the
//! client store share one definition of page math and sortable columns.

use serde::{Deserialize, Serialize};

/// Default number of listings per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of listings per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Fields a listing query may sort by.
///
/// Enumerated so the repository layer maps each variant to a fixed column
/// name; client-supplied sort input never reaches SQL as a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Area,
    Bedrooms,
    Bathrooms,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// The `listings` column this field sorts on.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Area => "area",
            SortField::Bedrooms => "bedrooms",
            SortField::Bathrooms => "bathrooms",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolved pagination and ordering for a single query.
///
/// Built from the optional query-string fields via [`PageRequest::resolve`];
/// after that point every consumer sees concrete values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::resolve(None, None, None, None)
    }
}

impl PageRequest {
    /// Apply defaults and clamp out-of-range values.
    ///
    /// `page` is clamped to >= 1, `limit` to 1..=[`MAX_PAGE_SIZE`]. A page
    /// past the end of the result set is left as-is: the query legitimately
    /// returns zero rows and [`PageMeta::compute`] still reports correct
    /// navigation flags.
    pub fn resolve(
        page: Option<i64>,
        limit: Option<i64>,
        sort_by: Option<SortField>,
        sort_order: Option<SortOrder>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            sort_by: sort_by.unwrap_or_default(),
            sort_order: sort_order.unwrap_or_default(),
        }
    }

    /// Number of rows to skip. Saturates so an absurdly large page is just
    /// an offset past the end, not an overflow.
    pub fn offset(self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ORDER BY` clause fragment, built from the enumerated column set.
    pub fn order_clause(self) -> String {
        format!("{} {}", self.sort_by.column(), self.sort_order.keyword())
    }
}

/// Page metadata returned alongside every listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: i64,
    pub items_per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Compute metadata for a page of `total_items` results.
    pub fn compute(page: &PageRequest, total_items: i64) -> Self {
        // Ceiling division; limit is always >= 1.
        let total_pages = (total_items + page.limit - 1) / page.limit;
        Self {
            current_page: page.page,
            items_per_page: page.limit,
            total_items,
            total_pages,
            has_next_page: page.page < total_pages,
            has_previous_page: page.page > 1,
        }
    }
}

/// Paginated response envelope: `{ data, meta }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
