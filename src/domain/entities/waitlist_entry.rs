use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One signup record. Immutable once written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Opaque identifier. Legacy files use millisecond timestamps here,
    /// so it stays a plain string rather than a `Uuid`.
    pub id: String,
    pub email: String,
    /// Stored as `YYYY-MM-DDTHH:MM:SS.sssZ`.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Builds a fresh entry with a random id.
    ///
    /// `not_before` is the timestamp of the last stored entry, if any; the new
    /// entry is never stamped earlier than it even if the wall clock stepped back.
    pub fn new(email: String, not_before: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now().trunc_subsecs(3);
        let timestamp = match not_before {
            Some(last) if last > now => last,
            _ => now,
        };

        Self {
            id: Uuid::new_v4().to_string(),
            email,
            timestamp,
        }
    }
}

/// RFC 3339 with exactly three fractional digits and a `Z` suffix, so records
/// written by the pre-versioned store keep their exact text when rewritten.
/// Inputs with other precisions are accepted and normalized to milliseconds.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(D::Error::custom)
    }
}
