//! Duty periods and the interval algebra over them.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// A stretch of time one person is on duty.
///
/// Timestamps are local wall-clock. `start` is inclusive, `end` exclusive,
/// and `start < end` for every period a provider hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyPeriod {
    /// Name of the person on duty, as the provider reports it
    pub user: String,
    /// When the assignment begins
    pub start: NaiveDateTime,
    /// When the assignment ends
    pub end: NaiveDateTime,
}

impl DutyPeriod {
    /// Create a duty period.
    pub fn new(user: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            user: user.into(),
            start,
            end,
        }
    }

    /// Whether `instant` falls inside this period.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Partition periods by user, each list in chronological order.
///
/// The map is a `BTreeMap` so iteration order is stable across runs.
pub fn group_by_user(periods: &[DutyPeriod]) -> BTreeMap<String, Vec<DutyPeriod>> {
    let mut by_user: BTreeMap<String, Vec<DutyPeriod>> = BTreeMap::new();
    for period in periods {
        by_user
            .entry(period.user.clone())
            .or_default()
            .push(period.clone());
    }
    for runs in by_user.values_mut() {
        runs.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    }
    by_user
}

/// Coalesce each user's overlapping or exactly adjacent periods.
///
/// Periods belonging to different users never merge, even when they touch.
/// The result is the minimal set of non-overlapping periods per user,
/// sorted by start time with ties broken by user name.
pub fn merge(periods: &[DutyPeriod]) -> Vec<DutyPeriod> {
    let mut merged = Vec::with_capacity(periods.len());
    for (_, runs) in group_by_user(periods) {
        let mut runs = runs.into_iter();
        let Some(mut open) = runs.next() else {
            continue;
        };
        for run in runs {
            if run.start <= open.end {
                if run.end > open.end {
                    open.end = run.end;
                }
            } else {
                merged.push(open);
                open = run;
            }
        }
        merged.push(open);
    }
    merged.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.user.cmp(&b.user)));
    merged
}

/// Split merged periods into the one covering `now` and the upcoming ones.
///
/// The current period satisfies `start <= now < end`; when several overlap
/// `now` the earliest start wins. Upcoming periods are those starting
/// strictly after `now`, in chronological order.
pub fn split_current_and_next(
    now: NaiveDateTime,
    periods: &[DutyPeriod],
) -> (Option<DutyPeriod>, Vec<DutyPeriod>) {
    let current = periods
        .iter()
        .filter(|period| period.contains(now))
        .min_by(|a, b| a.start.cmp(&b.start).then_with(|| a.user.cmp(&b.user)))
        .cloned();

    let mut next: Vec<DutyPeriod> = periods
        .iter()
        .filter(|period| period.start > now)
        .cloned()
        .collect();
    next.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.user.cmp(&b.user)));

    (current, next)
}
