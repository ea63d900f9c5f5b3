use crate::error::{DashboardError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO8601_DURATION: Regex =
        Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern must compile");
}

/// Shortens large numbers with a K/M/B suffix and one decimal, e.g. 1500 -> "1.5K".
/// Values below 1000 are printed as they are.
pub fn format_compact_number(number: f64) -> String {
    if number >= 1_000_000_000.0 {
        format!("{:.1}B", number / 1_000_000_000.0)
    } else if number >= 1_000_000.0 {
        format!("{:.1}M", number / 1_000_000.0)
    } else if number >= 1_000.0 {
        format!("{:.1}K", number / 1_000.0)
    } else {
        number.to_string()
    }
}

/// Parse ISO8601 duration string (PT1H2M3S) into `H:MM:SS`, or `MM:SS` below an hour.
pub fn parse_iso8601_duration(duration: &str) -> Result<String> {
    let captures = ISO8601_DURATION
        .captures(duration)
        .ok_or_else(|| DashboardError::MalformedDuration(duration.to_string()))?;

    let component = |index: usize| -> Result<u64> {
        captures.get(index).map_or(Ok(0), |m| {
            m.as_str()
                .parse::<u64>()
                .map_err(|_| DashboardError::MalformedDuration(duration.to_string()))
        })
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    if hours > 0 {
        Ok(format!("{hours}:{minutes:02}:{seconds:02}"))
    } else {
        Ok(format!("{minutes:02}:{seconds:02}"))
    }
}

pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}
