/// Deal identifiers are opaque backend-assigned strings, stable for the
/// deal's lifetime.
pub type DealId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
