//! Age column formatting

use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

/// Shown when an object carries no creation timestamp
pub const UNKNOWN_AGE: &str = "<unknown>";

/// Human readable time elapsed since `created`, relative to now
pub fn to_age(created: Option<&Time>) -> String {
    match created {
        Some(time) => format_age(time.0, Utc::now()),
        None => UNKNOWN_AGE.to_string(),
    }
}

/// Format the elapsed time between `created` and `now` in its largest unit
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(created);

    if duration.num_seconds() < 60 {
        format!("{}s", duration.num_seconds().max(0))
    } else if duration.num_minutes() < 60 {
        format!("{}m", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h", duration.num_hours())
    } else {
        format!("{}d", duration.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs_ago: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        (now - Duration::seconds(secs_ago), now)
    }

    #[test]
    fn test_format_age_units() {
        let (c, n) = at(42);
        assert_eq!(format_age(c, n), "42s");
        let (c, n) = at(5 * 60 + 3);
        assert_eq!(format_age(c, n), "5m");
        let (c, n) = at(3 * 3600 + 59);
        assert_eq!(format_age(c, n), "3h");
        let (c, n) = at(2 * 86_400 + 3600);
        assert_eq!(format_age(c, n), "2d");
    }

    #[test]
    fn test_format_age_clock_skew() {
        let (c, n) = at(-30);
        assert_eq!(format_age(c, n), "0s");
    }

    #[test]
    fn test_missing_timestamp() {
        assert_eq!(to_age(None), UNKNOWN_AGE);
    }

    #[test]
    fn test_to_age_from_time() {
        let time = Time(Utc::now() - Duration::minutes(5));
        assert_eq!(to_age(Some(&time)), "5m");
    }
}
