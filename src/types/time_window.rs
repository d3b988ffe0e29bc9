//! Resolves the single-hour query window used for air-quality requests.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// The most recently completed hour, expressed as a calendar date and an hour of day.
///
/// The proxy is always queried for exactly one hour, so `date_from == date_to` and
/// `time_from == time_to`.
///
/// # Examples
///
/// ```
/// use airmap::TimeWindow;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 1)
///     .unwrap()
///     .and_hms_opt(0, 15, 0)
///     .unwrap();
/// let window = TimeWindow::preceding_hour(now);
/// assert_eq!(window.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(window.hour, 23);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub date: NaiveDate,
    /// Hour of day, `0..=23`.
    pub hour: u32,
}

impl TimeWindow {
    /// Returns the hour immediately preceding the hour of `now`.
    ///
    /// At midnight this rolls back to hour 23 of the previous calendar day.
    pub fn preceding_hour(now: NaiveDateTime) -> Self {
        let previous = now - Duration::hours(1);
        Self {
            date: previous.date(),
            hour: previous.hour(),
        }
    }

    /// Resolves the window against the local wall clock.
    pub fn now() -> Self {
        Self::preceding_hour(Local::now().naive_local())
    }

    /// Date formatted the way the proxy expects it (`YYYY-MM-DD`).
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn hour_param(&self) -> String {
        self.hour.to_string()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.date_param(), self.hour)
    }
}
