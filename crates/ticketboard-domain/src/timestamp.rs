//! Permissive timestamps.
//!
//! Ticket dates arrive as ISO-8601 strings from the listing endpoint and
//! from persisted storage. A malformed string must not reject the whole
//! ticket; it parses to an invalid timestamp and the ticket keeps flowing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point in time that may be invalid (the NaN-date analog).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(Option<DateTime<Utc>>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Some(Utc::now()))
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(Some(dt))
    }

    /// Parse an ISO-8601 string. Never fails: anything unparseable becomes
    /// an invalid timestamp.
    pub fn parse(s: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Self(Some(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Self(Some(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Self(Some(naive.and_utc()));
            }
        }
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Short date for display, e.g. "Jan 15, 2024".
    pub fn format_date(&self) -> String {
        match self.0 {
            Some(dt) => dt.format("%b %-d, %Y").to_string(),
            None => "Invalid date".to_string(),
        }
    }

    /// Relative age against `now`, e.g. "3 days ago".
    pub fn age_from(&self, now: DateTime<Utc>) -> String {
        let Some(dt) = self.0 else {
            return "unknown".to_string();
        };
        let secs = (now - dt).num_seconds().max(0);
        let (count, unit) = match secs {
            0..=59 => return "just now".to_string(),
            60..=3599 => (secs / 60, "minute"),
            3600..=86_399 => (secs / 3600, "hour"),
            86_400..=2_591_999 => (secs / 86_400, "day"),
            2_592_000..=31_535_999 => (secs / 2_592_000, "month"),
            _ => (secs / 31_536_000, "year"),
        };
        if count == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{count} {unit}s ago")
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Null and malformed strings both land on the invalid timestamp.
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(s) => Timestamp::parse(&s),
            None => Timestamp::invalid(),
        })
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("invalid"),
        }
    }
}
