use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Parses the timestamp shapes the platform API emits: RFC 3339 with an
/// offset, or a bare local date-time read in `local`.
pub fn parse_timestamp(s: &str, local: FixedOffset) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = from_rfc3339(s) {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| local.from_local_datetime(&naive).single())
        .map(|dt| dt.with_timezone(&Utc))
}

/// `"{minutes}m {seconds}s"`, truncating. Negative input clamps to zero and
/// `None` renders as an empty string.
pub fn format_duration(millis: Option<i64>) -> String {
    let Some(millis) = millis else {
        return String::new();
    };
    let millis = millis.max(0);
    let minutes = millis / MILLIS_PER_MINUTE;
    let seconds = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    format!("{}m {}s", minutes, seconds)
}

pub fn format_duration_from_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> String {
    match (start, end) {
        (Some(start), Some(end)) => {
            let diff = (end - start).num_milliseconds().max(0);
            format_duration(Some(diff))
        }
        _ => String::new(),
    }
}

/// Elapsed solve time: an explicit duration wins, then the span between the
/// test start and the submission, else nothing.
pub fn elapsed_time(
    millis: Option<i64>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> String {
    match millis {
        Some(_) => format_duration(millis),
        None => format_duration_from_range(start, end),
    }
}

/// Renders in the shape of an en-US `toLocaleString`, e.g. `1/1/2024, 10:05:00 AM`.
pub fn format_locale_datetime(dt: DateTime<Utc>, offset: FixedOffset) -> String {
    dt.with_timezone(&offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

pub fn utc_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}
