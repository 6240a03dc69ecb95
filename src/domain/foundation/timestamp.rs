//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
///
/// Transcript ordering relies on `Ord`: messages sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Returns the start of the calendar day containing this timestamp.
    pub fn start_of_day(&self) -> Self {
        Self(
            self.0
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always a valid time")
                .and_utc(),
        )
    }

    /// Returns the start of the week (Sunday 00:00:00 UTC) containing this
    /// timestamp. Weekly dashboard stats bucket sessions with this boundary.
    pub fn start_of_week(&self) -> Self {
        let days_from_sunday = self.0.weekday().num_days_from_sunday() as i64;
        self.minus_days(days_from_sunday).start_of_day()
    }

    /// Returns the date portion as an ISO `YYYY-MM-DD` string.
    pub fn date_key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> Timestamp {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        Timestamp::from_datetime(naive.and_utc())
    }

    #[test]
    fn ordering_follows_chronology() {
        let earlier = ts("2026-01-01 10:00:00");
        let later = ts("2026-01-01 10:00:01");
        assert!(earlier < later);
        assert!(earlier.is_before(&later));
    }

    #[test]
    fn start_of_day_zeroes_time() {
        let t = ts("2026-03-15 17:45:12");
        assert_eq!(t.start_of_day(), ts("2026-03-15 00:00:00"));
    }

    #[test]
    fn start_of_week_lands_on_sunday() {
        // 2026-03-18 is a Wednesday; the preceding Sunday is 2026-03-15.
        let t = ts("2026-03-18 09:30:00");
        let week_start = t.start_of_week();
        assert_eq!(week_start, ts("2026-03-15 00:00:00"));
        assert_eq!(week_start.as_datetime().weekday(), Weekday::Sun);
    }

    #[test]
    fn start_of_week_is_identity_on_sunday_midnight() {
        let t = ts("2026-03-15 00:00:00");
        assert_eq!(t.start_of_week(), t);
    }

    #[test]
    fn date_key_formats_iso_date() {
        assert_eq!(ts("2026-03-05 23:59:59").date_key(), "2026-03-05");
    }
}
