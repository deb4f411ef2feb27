//! Time-of-day handling for departure and arrival columns.
//!
//! The trips table stores times in whatever form the scraper produced:
//! bare "HH:MM:SS" values, full timestamps, sometimes 12-hour clock strings.
//! Only the wall-clock part matters for filtering, so everything is reduced
//! to a `NaiveTime` and the date is thrown away.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use super::InvalidLabel;

/// Formats tried, in order, for strings without a date component.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Formats tried, in order, for strings with a date component.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Extract the time of day from a raw time or timestamp string.
///
/// Returns `None` for anything unparsable; callers drop such rows from
/// time-window comparisons instead of failing.
///
/// # Examples
///
/// ```
/// use bus_search::domain::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// let t = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
/// assert_eq!(parse_time_of_day("07:30:00"), Some(t));
/// assert_eq!(parse_time_of_day("2024-08-10 07:30:00"), Some(t));
/// assert_eq!(parse_time_of_day("7:30 AM"), Some(t));
/// assert_eq!(parse_time_of_day("soon"), None);
/// ```
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.time())
        })
}

/// A fixed part of the day used to filter departures and arrivals.
///
/// The four buckets are non-overlapping and together cover all 24 hours:
///
/// | Bucket    | Range               |
/// |-----------|---------------------|
/// | Night     | 00:00:00 – 05:59:59 |
/// | Morning   | 06:00:00 – 11:59:59 |
/// | Afternoon | 12:00:00 – 17:59:59 |
/// | Evening   | 18:00:00 – 23:59:59 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeBucket {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeBucket {
    /// All buckets in the order they are offered to the user.
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Morning,
        TimeBucket::Afternoon,
        TimeBucket::Evening,
        TimeBucket::Night,
    ];

    /// The bucket a time of day falls into.
    ///
    /// Bucketing is by hour, so sub-second values such as 11:59:59.5 still
    /// land in exactly one bucket.
    pub fn of(time: NaiveTime) -> Self {
        match time.hour() {
            0..=5 => TimeBucket::Night,
            6..=11 => TimeBucket::Morning,
            12..=17 => TimeBucket::Afternoon,
            _ => TimeBucket::Evening,
        }
    }

    /// Inclusive start and end of the bucket, to whole seconds.
    pub fn bounds(self) -> (NaiveTime, NaiveTime) {
        let (start, end) = match self {
            TimeBucket::Night => (0, 5),
            TimeBucket::Morning => (6, 11),
            TimeBucket::Afternoon => (12, 17),
            TimeBucket::Evening => (18, 23),
        };
        (
            NaiveTime::from_hms_opt(start, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(end, 59, 59).unwrap_or_default(),
        )
    }

    /// Whether a time of day falls inside this bucket.
    pub fn contains(self, time: NaiveTime) -> bool {
        TimeBucket::of(time) == self
    }

    /// Display label, also the value submitted by the dashboard form.
    pub fn label(self) -> &'static str {
        match self {
            TimeBucket::Morning => "Morning",
            TimeBucket::Afternoon => "Afternoon",
            TimeBucket::Evening => "Evening",
            TimeBucket::Night => "Night",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeBucket {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TimeBucket::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidLabel::new("time bucket", s))
    }
}
