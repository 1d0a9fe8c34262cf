use chrono::{DateTime, Duration, Utc};

/// Lifetime choices offered by the new paste form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PasteLifetime {
    Never,
    TenMinutes,
    OneHour,
    OneDay,
    OneMonth,
}

impl PasteLifetime {
    /// Unknown codes never expire.
    pub fn from_form_code(code: &str) -> Self {
        match code.trim() {
            "1" => PasteLifetime::TenMinutes,
            "2" => PasteLifetime::OneHour,
            "3" => PasteLifetime::OneDay,
            "4" => PasteLifetime::OneMonth,
            _ => PasteLifetime::Never,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasteLifetime::Never => "Never",
            PasteLifetime::TenMinutes => "10 Minutes",
            PasteLifetime::OneHour => "1 Hour",
            PasteLifetime::OneDay => "1 Day",
            PasteLifetime::OneMonth => "1 Month",
        }
    }

    pub fn duration(self) -> Option<Duration> {
        match self {
            PasteLifetime::Never => None,
            PasteLifetime::TenMinutes => Some(Duration::minutes(10)),
            PasteLifetime::OneHour => Some(Duration::hours(1)),
            PasteLifetime::OneDay => Some(Duration::days(1)),
            PasteLifetime::OneMonth => Some(Duration::days(30)),
        }
    }

    pub fn expires_at(self, created: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|duration| created + duration)
    }
}

/// Whether a paste was created with the ten minute lifetime, allowing for a
/// minute of slack either way.
pub fn is_ten_minute_expiration(created: DateTime<Utc>, expires: Option<DateTime<Utc>>) -> bool {
    match expires {
        Some(expires) => {
            let total_minutes = (expires - created).num_milliseconds() as f64 / 60_000.0;
            (9.0..=11.0).contains(&total_minutes)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn form_codes_map_to_lifetimes() {
        assert_eq!(PasteLifetime::from_form_code("0"), PasteLifetime::Never);
        assert_eq!(PasteLifetime::from_form_code("1"), PasteLifetime::TenMinutes);
        assert_eq!(PasteLifetime::from_form_code("4"), PasteLifetime::OneMonth);
        assert_eq!(PasteLifetime::from_form_code("9"), PasteLifetime::Never);
    }

    #[test]
    fn expiry_follows_lifetime() {
        assert_eq!(PasteLifetime::Never.expires_at(created()), None);
        assert_eq!(
            PasteLifetime::OneMonth.expires_at(created()),
            Some(created() + Duration::days(30))
        );
    }

    #[test]
    fn ten_minute_expiration_allows_a_minute_of_slack() {
        let expires = PasteLifetime::TenMinutes.expires_at(created());
        assert!(is_ten_minute_expiration(created(), expires));
        assert!(is_ten_minute_expiration(
            created(),
            Some(created() + Duration::seconds(11 * 60))
        ));
        assert!(!is_ten_minute_expiration(
            created(),
            Some(created() + Duration::seconds(11 * 60 + 1))
        ));
        assert!(!is_ten_minute_expiration(
            created(),
            PasteLifetime::OneHour.expires_at(created())
        ));
        assert!(!is_ten_minute_expiration(created(), None));
    }
}
