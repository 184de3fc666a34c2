//! The stored submission record.

use chrono::{DateTime, Utc};
use formkit_forms::Record;
use serde::{Deserialize, Serialize};

/// A validated record accepted by the store.
///
/// Serializes as `{"id": 1, "data": {...}, "createdAt": "2024-01-01T00:00:00.000Z"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Store-assigned id, starting at 1 and never reused.
    pub id: u64,
    /// The submitted field values.
    pub data: Record,
    /// When the submission was first created. Updates do not change it.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Returns `createdAt` in its wire format.
    pub fn created_at_string(&self) -> String {
        timestamp::format(&self.created_at)
    }
}

/// ISO-8601 UTC with millisecond precision and a `Z` suffix.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Formats `instant` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    pub fn format(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
