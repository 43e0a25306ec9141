//! Primitive types shared by every courseware crate.

/// Primary key of every course table (`BIGSERIAL`).
pub type DbId = i64;

/// Course dates, availability windows and row timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
