//! The HTTP surface of the listings API, behind a trait so the store and
//! facade can be exercised against a mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rentora_core::listing::{CreateListing, UpdateListing};
use rentora_core::page::{PageEnvelope, SortField, SortOrder};
use rentora_core::types::DbId;

use crate::error::ClientError;
use crate::model::Listing;

/// Query parameters for `list`, serialized straight into the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bathrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// The listings endpoints the store needs.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    async fn create(&self, payload: &CreateListing) -> Result<Listing, ClientError>;
    async fn list(&self, query: &ListQuery) -> Result<PageEnvelope<Listing>, ClientError>;
    async fn get(&self, id: DbId) -> Result<Listing, ClientError>;
    async fn update(&self, id: DbId, patch: &UpdateListing) -> Result<Listing, ClientError>;
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// Error body shape returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed implementation talking to a running API server.
pub struct HttpListingsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpListingsApi {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`; the
    /// `/api/v1` prefix is appended here.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// Decode a success body, or turn a non-2xx response into
    /// [`ClientError::Api`] using the server's error message when present.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        Err(Self::api_error(status, response).await)
    }

    async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ClientError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ListingsApi for HttpListingsApi {
    async fn create(&self, payload: &CreateListing) -> Result<Listing, ClientError> {
        let response = self
            .client
            .post(self.url("/apartments"))
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn list(&self, query: &ListQuery) -> Result<PageEnvelope<Listing>, ClientError> {
        let response = self
            .client
            .get(self.url("/apartments"))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get(&self, id: DbId) -> Result<Listing, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/apartments/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: DbId, patch: &UpdateListing) -> Result<Listing, ClientError> {
        let response = self
            .client
            .patch(self.url(&format!("/apartments/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/apartments/{id}")))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::api_error(status, response).await)
    }
}
