use chrono::{DateTime, Utc};

/// Formats how long ago `then` was, the way paste listings show it.
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    if seconds < 60 {
        return format!("{} seconds ago", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} minutes ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} hours ago", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{} days ago", days);
    }

    let months = days / 30;
    if months < 12 {
        return format!("{} months ago", months);
    }

    format!("{} years ago", months / 12)
}
