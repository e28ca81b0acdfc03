//! Client-side view of a listing record.

use rand::Rng;
use serde::{Deserialize, Serialize};

use rentora_core::listing::{CreateListing, UpdateListing};
use rentora_core::types::{DbId, Timestamp};

/// A listing as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

impl Listing {
    /// Whether this record only exists locally (optimistic create not yet
    /// reconciled). Server identities are always positive.
    pub fn is_provisional(&self) -> bool {
        self.id < 0
    }

    /// Synthesize a full provisional record from a create payload. Server
    /// side defaults are mirrored here so the optimistic entry looks like
    /// what the server will eventually return.
    pub fn provisional(payload: &CreateListing) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: provisional_id(),
            unit_name: payload.unit_name.clone(),
            unit_number: payload.unit_number.clone(),
            project: payload.project.clone(),
            description: payload.description.clone(),
            address: payload.address.clone(),
            city: payload.city.clone(),
            price: payload.price,
            bedrooms: payload.bedrooms,
            bathrooms: payload.bathrooms,
            area: payload.area,
            images: payload.images.clone().unwrap_or_default(),
            available: payload.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge a sparse patch over a copy of this record, refreshing
    /// `updated_at`.
    pub fn merged(&self, patch: &UpdateListing) -> Self {
        let mut merged = self.clone();
        if let Some(v) = &patch.unit_name {
            merged.unit_name = v.clone();
        }
        if let Some(v) = &patch.unit_number {
            merged.unit_number = v.clone();
        }
        if let Some(v) = &patch.project {
            merged.project = v.clone();
        }
        if let Some(v) = &patch.description {
            merged.description = Some(v.clone());
        }
        if let Some(v) = &patch.address {
            merged.address = v.clone();
        }
        if let Some(v) = &patch.city {
            merged.city = v.clone();
        }
        if let Some(v) = patch.price {
            merged.price = v;
        }
        if let Some(v) = patch.bedrooms {
            merged.bedrooms = v;
        }
        if let Some(v) = patch.bathrooms {
            merged.bathrooms = v;
        }
        if let Some(v) = patch.area {
            merged.area = v;
        }
        if let Some(v) = &patch.images {
            merged.images = v.clone();
        }
        if let Some(v) = patch.available {
            merged.available = v;
        }
        merged.updated_at = chrono::Utc::now();
        merged
    }
}

/// Generate a provisional identity in the negative namespace, never
/// colliding with a server-assigned (positive) id.
fn provisional_id() -> DbId {
    -rand::rng().random_range(1..=i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateListing {
        CreateListing {
            unit_name: "Garden View Apartment".to_string(),
            unit_number: "A-101".to_string(),
            project: "Palm Hills".to_string(),
            description: None,
            address: "12 Street Ninety, New Cairo".to_string(),
            city: "Cairo".to_string(),
            price: 15000.0,
            bedrooms: 3,
            bathrooms: 2,
            area: 145.5,
            images: None,
            available: None,
        }
    }

    #[test]
    fn provisional_records_live_in_the_negative_namespace() {
        let listing = Listing::provisional(&payload());
        assert!(listing.id < 0);
        assert!(listing.is_provisional());
        assert!(listing.available);
        assert!(listing.images.is_empty());
    }

    #[test]
    fn merged_applies_only_present_fields() {
        let listing = Listing::provisional(&payload());
        let patch = UpdateListing {
            bedrooms: Some(4),
            ..Default::default()
        };
        let merged = listing.merged(&patch);
        assert_eq!(merged.bedrooms, 4);
        assert_eq!(merged.city, "Cairo");
        assert!(merged.updated_at >= listing.updated_at);
    }
}
