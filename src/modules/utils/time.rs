use chrono::{DateTime, Days, Utc};

/// Format an expiration instant the way it appears in reminder mails
pub fn format_expiration(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Add whole calendar days to an instant.
///
/// Saturates at the largest representable instant instead of overflowing.
pub fn add_calendar_days(instant: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    instant
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Convert a Unix timestamp (seconds) into a UTC instant
pub fn from_unix_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiration_formatting() {
        let instant = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_expiration(&instant), "2021-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_add_calendar_days_crosses_leap_february() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 2, 19, 0, 0, 0).unwrap();
        assert_eq!(add_calendar_days(now, 30), expected);
    }

    #[test]
    fn test_add_calendar_days_crosses_year() {
        let now = Utc.with_ymd_and_hms(2023, 12, 15, 8, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 14, 8, 30, 0).unwrap();
        assert_eq!(add_calendar_days(now, 30), expected);
    }

    #[test]
    fn test_add_calendar_days_saturates() {
        let near_end = DateTime::<Utc>::MAX_UTC;
        assert_eq!(add_calendar_days(near_end, 1), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_from_unix_timestamp() {
        let instant = from_unix_timestamp(1609459200).unwrap(); // 2021-01-01 00:00:00
        assert_eq!(format_expiration(&instant), "2021-01-01 00:00:00 UTC");
    }
}
