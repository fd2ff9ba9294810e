//! The duty provider seam.

use crate::{DutyPeriod, OncallResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Source of on-call assignments.
#[async_trait]
pub trait DutyProvider: Send + Sync {
    /// Duty periods for `schedule_id` overlapping `[from, to)`.
    ///
    /// Timestamps are local wall-clock on both sides of the seam.
    async fn users_on_duty(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        schedule_id: &str,
    ) -> OncallResult<Vec<DutyPeriod>>;
}
