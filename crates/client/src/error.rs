use rentora_core::types::DbId;

/// Errors surfaced by the client library.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the request (4xx/5xx with an error body).
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An optimistic mutation referenced a record absent from local state.
    /// This is a client-side bug signal, not a server error; the operation
    /// is aborted before any network call.
    #[error("Listing {0} is not present in the local store")]
    NotInStore(DbId),

    /// The server response could not be decoded.
    #[error("Failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),
}
