//! The polling scheduler loop.

use crate::{Schedule, ScheduleResult};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// A unit of work the scheduler can run.
#[async_trait]
pub trait Job: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &str;

    /// Perform the work for a firing at `now`.
    async fn run(&self, now: NaiveDateTime) -> ScheduleResult<()>;
}

struct JobEntry {
    next_at: NaiveDateTime,
    schedule: Box<dyn Schedule>,
    task: Arc<dyn Job>,
}

/// Polls the wall clock and runs jobs that came due.
///
/// The loop wakes on a fixed interval, runs every job whose firing time
/// has passed, and asks the job's schedule for the next one. A failing
/// job is logged and neither stops the loop nor the other jobs due in
/// the same tick.
pub struct Scheduler {
    jobs: Vec<JobEntry>,
    poll_interval: Duration,
}

impl Scheduler {
    /// Create a scheduler with the default one-minute poll interval.
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll interval. Shorter intervals only sharpen firing
    /// precision, they never make a job run more than once per due time.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Register a job. Its first firing time is computed immediately.
    pub fn add_job(&mut self, schedule: Box<dyn Schedule>, task: Arc<dyn Job>) {
        let now = chrono::Local::now().naive_local();
        let next_at = schedule.next_fire(now);
        debug!(job = task.name(), next_at = %next_at, "Registered job");
        self.jobs.push(JobEntry {
            next_at,
            schedule,
            task,
        });
    }

    /// Run the polling loop forever. Callers spawn this onto its own task.
    pub async fn run(mut self) {
        info!(
            jobs = self.jobs.len(),
            poll_interval = ?self.poll_interval,
            "Scheduler started"
        );
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            let now = chrono::Local::now().naive_local();
            for entry in &mut self.jobs {
                if entry.next_at > now {
                    continue;
                }
                info!(job = entry.task.name(), "Running scheduled job");
                if let Err(e) = entry.task.run(now).await {
                    error!(job = entry.task.name(), error = %e, "Scheduled job failed");
                }
                entry.next_at = entry.schedule.next_fire(now);
                debug!(job = entry.task.name(), next_at = %entry.next_at, "Job rescheduled");
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScheduleError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Due immediately on registration, then not for another day.
    struct OnceNow {
        armed: AtomicBool,
    }

    impl OnceNow {
        fn new() -> Self {
            Self {
                armed: AtomicBool::new(true),
            }
        }
    }

    impl Schedule for OnceNow {
        fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
            if self.armed.swap(false, Ordering::SeqCst) {
                now
            } else {
                now + chrono::Duration::hours(24)
            }
        }
    }

    #[derive(Default)]
    struct CountingJob {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &str {
            "counting"
        }

        async fn run(&self, _now: NaiveDateTime) -> ScheduleResult<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingJob;

    #[async_trait]
    impl Job for FailingJob {
        fn name(&self) -> &str {
            "failing"
        }

        async fn run(&self, _now: NaiveDateTime) -> ScheduleResult<()> {
            Err(ScheduleError::job_failed("failing", "boom"))
        }
    }

    #[tokio::test]
    async fn due_job_fires_once_then_waits() {
        let mut scheduler = Scheduler::new().with_poll_interval(Duration::from_millis(10));
        let job = Arc::new(CountingJob::default());
        scheduler.add_job(Box::new(OnceNow::new()), job.clone());

        let handle = tokio::spawn(scheduler.run());
        tokio::time::sleep(Duration::from_millis(120)).await;
        handle.abort();

        assert_eq!(job.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_job_does_not_starve_others() {
        let mut scheduler = Scheduler::new().with_poll_interval(Duration::from_millis(10));
        let survivor = Arc::new(CountingJob::default());
        scheduler.add_job(Box::new(OnceNow::new()), Arc::new(FailingJob));
        scheduler.add_job(Box::new(OnceNow::new()), survivor.clone());

        let handle = tokio::spawn(scheduler.run());
        tokio::time::sleep(Duration::from_millis(120)).await;
        handle.abort();

        assert_eq!(survivor.runs.load(Ordering::SeqCst), 1);
    }
}
