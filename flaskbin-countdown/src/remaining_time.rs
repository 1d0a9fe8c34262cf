const MILLIS_PER_SECOND: i64 = 1000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// A positive remaining duration split into calendar-free units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemainingTime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RemainingTime {
    /// Returns `None` when the distance has already elapsed.
    pub fn from_millis(distance: i64) -> Option<Self> {
        if distance <= 0 {
            return None;
        }

        Some(Self {
            days: distance / MILLIS_PER_DAY,
            hours: (distance / MILLIS_PER_HOUR) % 24,
            minutes: (distance / MILLIS_PER_MINUTE) % 60,
            seconds: (distance / MILLIS_PER_SECOND) % 60,
        })
    }

    pub fn total_minutes(&self) -> i64 {
        (self.days * 24 + self.hours) * 60 + self.minutes
    }

    pub fn as_millis(&self) -> i64 {
        self.days * MILLIS_PER_DAY
            + self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_distance_has_no_remaining_time() {
        assert_eq!(RemainingTime::from_millis(0), None);
        assert_eq!(RemainingTime::from_millis(-1), None);
        assert_eq!(RemainingTime::from_millis(i64::MIN), None);
    }

    #[test]
    fn decomposes_into_each_unit() {
        assert_eq!(
            RemainingTime::from_millis(90_061_000),
            Some(RemainingTime {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1,
            })
        );
    }

    #[test]
    fn decomposition_truncates_below_one_second() {
        for distance in [1, 999, 1_000, 59_999, 600_000, 3_599_999, 86_400_001, 987_654_321] {
            let remaining = RemainingTime::from_millis(distance).unwrap();
            let reconstructed = remaining.as_millis();
            assert!(reconstructed <= distance, "{} > {}", reconstructed, distance);
            assert!(distance < reconstructed + 1000, "{} too small", reconstructed);
        }
    }

    #[test]
    fn total_minutes_spans_larger_units() {
        let remaining = RemainingTime::from_millis(90_061_000).unwrap();
        assert_eq!(remaining.total_minutes(), 24 * 60 + 60 + 1);
    }
}
