//! Date Helpers
//!
//! The backend sends due dates as `YYYY-MM-DD` or full RFC 3339 timestamps.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// "May 3", or "May 3, 2027" outside the current year
pub fn short_label(s: &str, today: NaiveDate) -> Option<String> {
    let date = parse_date(s)?;
    if date.year() == today.year() {
        Some(date.format("%b %-d").to_string())
    } else {
        Some(date.format("%b %-d, %Y").to_string())
    }
}

pub fn is_overdue(s: &str, today: NaiveDate) -> bool {
    parse_date(s).map(|d| d < today).unwrap_or(false)
}

/// Value for `<input type="date">`
pub fn input_value(s: Option<&str>) -> String {
    s.and_then(parse_date).map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// "just now", "5m ago", "3h ago", "2d ago", then the date
pub fn relative_time(s: &str, now: DateTime<Utc>) -> String {
    let Ok(ts) = DateTime::parse_from_rfc3339(s.trim()) else {
        return s.to_string();
    };
    let secs = (now - ts.with_timezone(&Utc)).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        86_400..=604_799 => format!("{}d ago", secs / 86_400),
        _ => ts.format("%b %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_both_formats() {
        assert_eq!(parse_date("2024-05-01"), Some(day(2024, 5, 1)));
        assert_eq!(parse_date("2024-05-01T00:00:00Z"), Some(day(2024, 5, 1)));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_labels_and_overdue() {
        let today = day(2024, 6, 10);
        assert_eq!(short_label("2024-05-01", today).as_deref(), Some("May 1"));
        assert_eq!(short_label("2025-01-02", today).as_deref(), Some("Jan 2, 2025"));
        assert!(is_overdue("2024-06-09", today));
        assert!(!is_overdue("2024-06-10", today));
        assert_eq!(input_value(Some("2024-05-01T12:00:00Z")), "2024-05-01");
        assert_eq!(input_value(None), "");
    }

    #[test]
    fn test_relative_time() {
        let now = DateTime::parse_from_rfc3339("2024-06-10T12:00:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(relative_time("2024-06-10T11:59:30Z", now), "just now");
        assert_eq!(relative_time("2024-06-10T11:55:00Z", now), "5m ago");
        assert_eq!(relative_time("2024-06-10T09:00:00Z", now), "3h ago");
        assert_eq!(relative_time("2024-06-08T12:00:00Z", now), "2d ago");
        assert_eq!(relative_time("2024-01-01T12:00:00Z", now), "Jan 1, 2024");
    }
}
