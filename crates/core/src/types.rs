/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Placeholder rendered wherever display data is missing or unparsable.
pub const PLACEHOLDER: &str = "---";
