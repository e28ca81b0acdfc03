//! Listing entity model.
//!
//! The create/update payloads live in `rentora_core::listing` because the
//! client crate sends them too; only the stored row shape is defined here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rentora_core::types::{DbId, Timestamp};

/// A row from the `listings` table.
///
/// Serialized in camelCase to match the public API wire format.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: DbId,
    pub unit_name: String,
    pub unit_number: String,
    pub project: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    pub images: Vec<String>,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
