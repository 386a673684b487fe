use serde::Serializer;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Format timestamps take on the wire and on pages, e.g. `2024-03-01 09:30:00`.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde `serialize_with` helper writing a [`Timestamp`] in
/// [`DISPLAY_TIME_FORMAT`].
pub fn serialize_display_time<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(DISPLAY_TIME_FORMAT))
}
