//! Time source and file stamp formatting for snapshots

use chrono::{DateTime, Utc};

/// Source of the current time for snapshot stamps
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const STAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S-%3fZ";

/// ISO-8601 time with millisecond precision, `:` and `.` replaced by `-`.
///
/// Stamps of the same year range sort lexicographically in time order.
pub fn format_stamp(time: DateTime<Utc>) -> String {
    time.format(STAMP_FORMAT).to_string()
}

/// Parse a stamp produced by [`format_stamp`]
pub fn parse_stamp(stamp: &str) -> Option<DateTime<Utc>> {
    let (date, time) = stamp.split_once('T')?;
    let time = time.strip_suffix('Z')?;
    let mut parts = time.splitn(4, '-');
    let (hours, minutes, seconds, millis) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    let iso = format!("{}T{}:{}:{}.{}Z", date, hours, minutes, seconds, millis);
    DateTime::parse_from_rfc3339(&iso)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_stamp() {
        let time = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 5).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_stamp(time), "2026-10-16T09-30-05-042Z");
    }

    #[test]
    fn test_parse_stamp_inverts_format() {
        let time = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);
        assert_eq!(parse_stamp(&format_stamp(time)), Some(time));
    }

    #[test]
    fn test_parse_stamp_rejects_garbage() {
        assert_eq!(parse_stamp("yesterday"), None);
        assert_eq!(parse_stamp("2026-10-16T09-30-05Z"), None);
    }

    #[test]
    fn test_stamps_sort_in_time_order() {
        let base = Utc.with_ymd_and_hms(2026, 10, 16, 9, 59, 59).unwrap();
        let later = base + chrono::Duration::milliseconds(1001);
        assert!(format_stamp(base) < format_stamp(later));
    }
}
