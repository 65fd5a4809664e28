// Relative time formatting ("3 hours ago", "in 2 days").
//
// Bucket boundaries follow the widely used "distance to now" wording, so the
// terminal reader and the web front end describe the same article the same way.

use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Parse a stored RFC 3339 timestamp.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Describe `then` relative to `now`, with an "ago" / "in" suffix.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let distance = distance(then, now);
    if then > now {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

/// Relative time for a stored timestamp, or the raw string if it doesn't parse.
pub fn time_ago_str(raw: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(raw) {
        Some(then) => time_ago(then, now),
        None => raw.to_string(),
    }
}

/// The distance between two instants in words, without a suffix.
pub fn distance(a: DateTime<Utc>, b: DateTime<Utc>) -> String {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    let seconds = (later - earlier).num_seconds();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 2 {
        if minutes == 0 {
            return "less than a minute".to_string();
        }
        return plural(minutes, "minute");
    }
    if minutes < 45 {
        return plural(minutes, "minute");
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {}", plural(hours, "hour"));
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return plural(days, "day");
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return format!("about {}", plural(months, "month"));
    }

    let months = calendar_months_between(earlier, later);
    if months < 12 {
        let nearest = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return plural(nearest, "month");
    }

    let past_whole_years = months % 12;
    let years = months / 12;
    if past_whole_years < 3 {
        format!("about {}", plural(years, "year"))
    } else if past_whole_years < 9 {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

/// Whole calendar months from `earlier` to `later`.
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);
    let later_key = (later.day(), later.num_seconds_from_midnight());
    let earlier_key = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_key < earlier_key {
        months -= 1;
    }
    months
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        time_ago(now() - d, now())
    }

    #[test]
    fn test_seconds() {
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(0)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(40)), "1 minute ago");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(44)), "44 minutes ago");
        assert_eq!(ago(Duration::minutes(45)), "about 1 hour ago");
        assert_eq!(ago(Duration::minutes(89)), "about 1 hour ago");
        assert_eq!(ago(Duration::minutes(90)), "about 2 hours ago");
        assert_eq!(ago(Duration::hours(23)), "about 23 hours ago");
    }

    #[test]
    fn test_days_and_months() {
        assert_eq!(ago(Duration::hours(24)), "1 day ago");
        assert_eq!(ago(Duration::hours(41)), "1 day ago");
        assert_eq!(ago(Duration::hours(42)), "2 days ago");
        assert_eq!(ago(Duration::days(29)), "29 days ago");
        assert_eq!(ago(Duration::days(30)), "about 1 month ago");
        assert_eq!(ago(Duration::days(59)), "about 2 months ago");
        assert_eq!(ago(Duration::days(100)), "3 months ago");
    }

    #[test]
    fn test_years() {
        assert_eq!(ago(Duration::days(366)), "about 1 year ago");
        assert_eq!(ago(Duration::days(365 + 150)), "over 1 year ago");
        assert_eq!(ago(Duration::days(365 + 300)), "almost 2 years ago");
    }

    #[test]
    fn test_future_uses_in() {
        assert_eq!(time_ago(now() + Duration::hours(3), now()), "in about 3 hours");
    }

    #[test]
    fn test_time_ago_str() {
        assert_eq!(time_ago_str("2024-06-15T09:00:00Z", now()), "about 3 hours ago");
        assert_eq!(time_ago_str("yesterday-ish", now()), "yesterday-ish");
    }
}
