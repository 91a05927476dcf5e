//! Release timestamp parsing and rendering

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// Parse a registry-supplied timestamp
///
/// Registries disagree on the format, so several are tried in turn:
/// - RFC 3339 ("2024-01-15T10:30:00.123Z")
/// - naive ISO-8601 without offset, read as UTC ("2024-01-15T10:30:00")
/// - RFC 2822, as sent in HTTP `Last-Modified` headers
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // Collapse runs of whitespace that some servers put in header values
    let raw = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc2822(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render the distance between `at` and `now` in words ("3 days ago")
pub fn humanize(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(at);
    let (past, delta) = if delta < TimeDelta::zero() {
        (false, -delta)
    } else {
        (true, delta)
    };

    let seconds = delta.num_seconds();
    let phrase = match seconds {
        0..10 => return "just now".to_string(),
        10..45 => "seconds".to_string(),
        45..90 => "a minute".to_string(),
        90..2700 => format!("{} minutes", (seconds + 30) / 60),
        2700..5400 => "an hour".to_string(),
        5400..79200 => format!("{} hours", (seconds + 1800) / 3600),
        79200..129600 => "a day".to_string(),
        _ => {
            let days = delta.num_days();
            match days {
                0..30 => format!("{} days", days.max(2)),
                30..45 => "a month".to_string(),
                45..320 => format!("{} months", ((days + 15) / 30).max(2)),
                320..548 => "a year".to_string(),
                _ => format!("{} years", ((days + 182) / 365).max(2)),
            }
        }
    };

    if past {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}
