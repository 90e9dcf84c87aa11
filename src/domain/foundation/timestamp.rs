//! UTC instants used for audit fields and quote expiry.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp offset by a signed duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Calendar day in UTC. Preferred travel dates are compared against it.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Formats as RFC 3339 for API responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn fixed(s: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    #[test]
    fn now_lies_between_surrounding_clock_reads() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn is_before_agrees_with_ord() {
        let earlier = fixed("2024-01-15T10:30:00Z");
        let later = fixed("2024-01-16T10:30:00Z");

        assert!(earlier.is_before(&later));
        assert!(!later.is_before(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn date_is_the_utc_calendar_day() {
        let late_evening = fixed("2024-01-15T23:59:59-05:00");
        assert_eq!(late_evening.date(), NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }

    #[test]
    fn duration_since_is_signed() {
        let a = fixed("2024-01-15T00:00:00Z");
        let b = a.add_days(3);

        assert_eq!(b.duration_since(&a), Duration::days(3));
        assert_eq!(a.duration_since(&b), Duration::days(-3));
    }

    #[test]
    fn minus_days_inverts_add_days() {
        let a = fixed("2024-03-01T12:00:00Z");
        assert_eq!(a.add_days(10).minus_days(10), a);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = fixed("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_datetime().year(), 2024);
    }
}
