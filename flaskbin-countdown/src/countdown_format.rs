use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

use crate::{RemainingTime, EXPIRED_TEXT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountdownFormatError {
    #[error("smoothing label {label} must lie within [{low}, {high}]")]
    LabelOutsideBand { low: i64, high: i64, label: i64 },

    #[error("smoothing band [{low}, {high}] may not stray more than one minute from label {label}")]
    BandTooWide { low: i64, high: i64, label: i64 },

    #[error("unknown countdown granularity {0:?}")]
    UnknownGranularity(String),
}

/// How finely the remaining time is displayed, and how often it is refreshed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Seconds,
    Minutes,
}

impl Granularity {
    pub fn tick_period(self) -> Duration {
        match self {
            Granularity::Seconds => Duration::from_secs(1),
            Granularity::Minutes => Duration::from_secs(60),
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Seconds
    }
}

impl FromStr for Granularity {
    type Err = CountdownFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "seconds" | "second" | "s" => Ok(Granularity::Seconds),
            "minutes" | "minute" | "m" => Ok(Granularity::Minutes),
            _ => Err(CountdownFormatError::UnknownGranularity(value.to_string())),
        }
    }
}

/// Whole-minute range which collapses to a single "N minutes remaining" label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SmoothingBand {
    low: i64,
    high: i64,
    label: i64,
}

impl SmoothingBand {
    pub fn new(low: i64, high: i64, label: i64) -> Result<Self, CountdownFormatError> {
        if label < low || label > high {
            return Err(CountdownFormatError::LabelOutsideBand { low, high, label });
        }

        if label - low > 1 || high - label > 1 {
            return Err(CountdownFormatError::BandTooWide { low, high, label });
        }

        Ok(Self { low, high, label })
    }

    /// The `[9, 11]` band around the ten minute paste lifetime.
    pub fn ten_minutes() -> Self {
        Self {
            low: 9,
            high: 11,
            label: 10,
        }
    }

    pub fn label(&self) -> i64 {
        self.label
    }

    pub fn contains(&self, total_minutes: i64) -> bool {
        total_minutes >= self.low && total_minutes <= self.high
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountdownText {
    Remaining(String),
    Expired,
}

impl CountdownText {
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownText::Expired)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CountdownText::Remaining(text) => text,
            CountdownText::Expired => EXPIRED_TEXT,
        }
    }
}

impl fmt::Display for CountdownText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One display policy: a single granularity, optionally smoothed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CountdownFormat {
    pub granularity: Granularity,
    pub smoothing: Option<SmoothingBand>,
}

impl CountdownFormat {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            smoothing: None,
        }
    }

    pub fn with_smoothing(mut self, band: SmoothingBand) -> Self {
        self.smoothing = Some(band);
        self
    }

    pub fn format(&self, distance_millis: i64) -> CountdownText {
        let remaining = match RemainingTime::from_millis(distance_millis) {
            Some(remaining) => remaining,
            None => return CountdownText::Expired,
        };

        if let Some(band) = self.smoothing {
            if band.contains(remaining.total_minutes()) {
                return CountdownText::Remaining(format!("{} minutes remaining", band.label()));
            }
        }

        let mut units = Vec::with_capacity(4);
        if remaining.days > 0 {
            units.push(format!("{}d", remaining.days));
        }
        if remaining.days > 0 || remaining.hours > 0 {
            units.push(format!("{}h", remaining.hours));
        }

        match self.granularity {
            Granularity::Seconds => {
                if !units.is_empty() || remaining.minutes > 0 {
                    units.push(format!("{}m", remaining.minutes));
                }
                units.push(format!("{}s", remaining.seconds));
            }
            Granularity::Minutes => {
                units.push(format!("{}m", remaining.minutes));
            }
        }

        CountdownText::Remaining(units.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds() -> CountdownFormat {
        CountdownFormat::new(Granularity::Seconds)
    }

    fn minutes() -> CountdownFormat {
        CountdownFormat::new(Granularity::Minutes)
    }

    #[test]
    fn elapsed_distance_is_expired() {
        let smoothed = seconds().with_smoothing(SmoothingBand::ten_minutes());
        for format in [seconds(), minutes(), smoothed] {
            assert_eq!(format.format(0), CountdownText::Expired);
            assert_eq!(format.format(-1), CountdownText::Expired);
            assert_eq!(format.format(-86_400_000 * 365), CountdownText::Expired);
            assert_eq!(format.format(-1).to_string(), "Expired");
        }
    }

    #[test]
    fn seconds_granularity_omits_leading_zero_units() {
        assert_eq!(seconds().format(90_061_000).as_str(), "1d 1h 1m 1s");
        assert_eq!(seconds().format(45_000).as_str(), "45s");
        assert_eq!(seconds().format(600_000).as_str(), "10m 0s");
        assert_eq!(seconds().format(3_600_000).as_str(), "1h 0m 0s");
        assert_eq!(seconds().format(86_400_000).as_str(), "1d 0h 0m 0s");
        assert_eq!(seconds().format(999).as_str(), "0s");
    }

    #[test]
    fn minutes_granularity_drops_seconds() {
        assert_eq!(minutes().format(90_061_000).as_str(), "1d 1h 1m");
        assert_eq!(minutes().format(45_000).as_str(), "0m");
        assert_eq!(minutes().format(3_659_000).as_str(), "1h 0m");
    }

    #[test]
    fn smoothing_band_collapses_near_ten_minutes() {
        let format = seconds().with_smoothing(SmoothingBand::ten_minutes());
        assert_eq!(format.format(600_000).as_str(), "10 minutes remaining");
        assert_eq!(format.format(9 * 60_000).as_str(), "10 minutes remaining");
        assert_eq!(format.format(12 * 60_000 - 1).as_str(), "10 minutes remaining");
        assert_eq!(format.format(12 * 60_000).as_str(), "12m 0s");
        assert_eq!(format.format(9 * 60_000 - 1).as_str(), "8m 59s");
    }

    #[test]
    fn smoothing_band_rejects_far_labels() {
        assert_eq!(
            SmoothingBand::new(9, 11, 12),
            Err(CountdownFormatError::LabelOutsideBand {
                low: 9,
                high: 11,
                label: 12
            })
        );
        assert_eq!(
            SmoothingBand::new(5, 15, 10),
            Err(CountdownFormatError::BandTooWide {
                low: 5,
                high: 15,
                label: 10
            })
        );
        assert_eq!(SmoothingBand::new(9, 11, 10), Ok(SmoothingBand::ten_minutes()));
    }

    #[test]
    fn parses_granularity_names() {
        assert_eq!("seconds".parse(), Ok(Granularity::Seconds));
        assert_eq!("m".parse(), Ok(Granularity::Minutes));
        assert_eq!(
            "hours".parse::<Granularity>(),
            Err(CountdownFormatError::UnknownGranularity("hours".to_string()))
        );
        assert_eq!(Granularity::Minutes.tick_period(), Duration::from_secs(60));
    }
}
