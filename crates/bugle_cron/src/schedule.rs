//! Recurrence rules for scheduled jobs.

use crate::{ScheduleError, ScheduleErrorKind, ScheduleResult};
use chrono::{Datelike, Days, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::str::FromStr;

/// Decides when a job fires next.
pub trait Schedule: Send + Sync {
    /// The earliest firing instant at or after `now`.
    ///
    /// Must be deterministic for equal `now`.
    fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime;
}

/// A time of day on a 24-hour clock, parsed from `"HH:MM"`.
///
/// # Examples
///
/// ```
/// use bugle_cron::DayTime;
///
/// let at: DayTime = "09:30".parse().unwrap();
/// assert_eq!(at.hour(), 9);
/// assert_eq!(at.minute(), 30);
/// assert!("25:00".parse::<DayTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    time: NaiveTime,
}

impl DayTime {
    /// Create a time of day from hour and minute.
    pub fn new(hour: u32, minute: u32) -> ScheduleResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| Self { time })
            .ok_or_else(|| {
                ScheduleError::new(ScheduleErrorKind::InvalidTimeFormat(format!(
                    "{hour:02}:{minute:02}"
                )))
            })
    }

    /// The underlying time of day.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Hour on the 24-hour clock.
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Minute of the hour.
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }
}

impl FromStr for DayTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(|time| Self { time })
            .map_err(|_| ScheduleError::new(ScheduleErrorKind::InvalidTimeFormat(s.to_string())))
    }
}

impl std::fmt::Display for DayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.time.format("%H:%M"))
    }
}

/// Fires Monday through Friday at a fixed time of day.
///
/// If `now` is already past today's firing time, or today falls on a
/// weekend, the rule advances to the next working day.
#[derive(Debug, Clone, Copy)]
pub struct EveryWorkingDay {
    /// Time of day the rule fires at.
    pub at: DayTime,
}

impl EveryWorkingDay {
    /// Create a rule firing every working day at `at`.
    pub fn new(at: DayTime) -> Self {
        Self { at }
    }
}

impl Schedule for EveryWorkingDay {
    fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
        let mut candidate = now.date().and_time(self.at.time());
        if candidate < now {
            candidate = next_day(candidate, self.at.time());
        }
        while !is_working_day(candidate.weekday()) {
            candidate = next_day(candidate, self.at.time());
        }
        candidate
    }
}

fn next_day(candidate: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    (candidate.date() + Days::new(1)).and_time(at)
}

fn is_working_day(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(line: &str) -> DayTime {
        line.parse().unwrap()
    }

    fn when(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_valid_day_times() {
        let nine = at("09:00");
        assert_eq!(nine.hour(), 9);
        assert_eq!(nine.minute(), 0);
        assert_eq!(nine.to_string(), "09:00");
    }

    #[test]
    fn rejects_malformed_day_times() {
        for bad in ["24:01", "9", "aa:bb", "12:60", ""] {
            let err = bad.parse::<DayTime>().unwrap_err();
            assert!(
                matches!(err.kind, ScheduleErrorKind::InvalidTimeFormat(_)),
                "{bad} parsed unexpectedly"
            );
        }
    }

    #[test]
    fn out_of_range_components_rejected() {
        assert!(DayTime::new(24, 0).is_err());
        assert!(DayTime::new(9, 60).is_err());
        assert!(DayTime::new(23, 59).is_ok());
    }

    #[test]
    fn fires_later_today_when_time_ahead() {
        // 2025-01-06 is a Monday.
        let rule = EveryWorkingDay::new(at("09:00"));
        let next = rule.next_fire(when(2025, 1, 6, 8, 0));
        assert_eq!(next, when(2025, 1, 6, 9, 0));
    }

    #[test]
    fn friday_past_fire_time_rolls_to_monday() {
        // 2025-01-03 is a Friday.
        let rule = EveryWorkingDay::new(at("09:00"));
        let next = rule.next_fire(when(2025, 1, 3, 10, 0));
        assert_eq!(next, when(2025, 1, 6, 9, 0));
    }

    #[test]
    fn weekend_rolls_to_monday() {
        // 2025-01-04 is a Saturday.
        let rule = EveryWorkingDay::new(at("09:00"));
        let next = rule.next_fire(when(2025, 1, 4, 12, 0));
        assert_eq!(next, when(2025, 1, 6, 9, 0));
    }

    #[test]
    fn exact_fire_instant_counts_as_due_today() {
        let rule = EveryWorkingDay::new(at("09:00"));
        let now = when(2025, 1, 6, 9, 0);
        assert_eq!(rule.next_fire(now), now);
    }
}
