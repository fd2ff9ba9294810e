//! The worklog provider seam.

use crate::{Worklog, WorklogResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Source of logged-time records.
#[async_trait]
pub trait WorklogProvider: Send + Sync {
    /// Worklogs started inside `[from, to)` by any of `authors`.
    async fn logged_time(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        authors: &[String],
    ) -> WorklogResult<Vec<Worklog>>;
}
