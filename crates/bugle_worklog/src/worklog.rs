//! Worklog records and aggregation.

use std::collections::BTreeMap;

/// One logged stretch of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worklog {
    /// Tracker login of the person who logged the time
    pub author: String,
    /// Logged duration in seconds
    pub seconds: u64,
}

impl Worklog {
    /// Create a worklog record.
    pub fn new(author: impl Into<String>, seconds: u64) -> Self {
        Self {
            author: author.into(),
            seconds,
        }
    }
}

/// Sum logged seconds per author, sorted by author for stable output.
///
/// # Examples
///
/// ```
/// use bugle_worklog::{Worklog, total_seconds_by_author};
///
/// let logs = [Worklog::new("bob", 3600), Worklog::new("alice", 900), Worklog::new("bob", 1800)];
/// let totals = total_seconds_by_author(&logs);
///
/// assert_eq!(totals["alice"], 900);
/// assert_eq!(totals["bob"], 5400);
/// ```
pub fn total_seconds_by_author(worklogs: &[Worklog]) -> BTreeMap<String, u64> {
    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for worklog in worklogs {
        *totals.entry(worklog.author.clone()).or_default() += worklog.seconds;
    }
    totals
}
