use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// The instant a displayed paste stops being available.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExpiryTarget {
    expires_at: DateTime<Utc>,
}

impl ExpiryTarget {
    pub fn new(expires_at: DateTime<Utc>) -> Self {
        Self { expires_at }
    }

    /// Parses the value of a page's expiry attribute.
    ///
    /// Accepts RFC 3339, naive ISO-8601 date times (taken as UTC) and integer
    /// epoch milliseconds. Returns `None` for anything else so the caller can
    /// leave the element untouched.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(expires_at) = DateTime::parse_from_rfc3339(value) {
            return Some(Self::new(expires_at.with_timezone(&Utc)));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(Self::new(Utc.from_utc_datetime(&naive)));
            }
        }

        value
            .parse::<i64>()
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Self::new)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Milliseconds left until expiry, negative once elapsed.
    pub fn remaining_millis(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_milliseconds()
    }
}
