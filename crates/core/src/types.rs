/// Internal database identifier (BIGINT).
pub type DbId = i64;

/// Canonical timestamp type, serialized as ISO-8601 UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
