//! Error types for scheduling operations.

/// Result type for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Error kinds for scheduling operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScheduleErrorKind {
    /// A time of day string did not parse as `HH:MM`.
    #[display("Invalid time format: {_0:?} is not HH:MM")]
    InvalidTimeFormat(String),

    /// A scheduled job reported a failure.
    #[display("Job '{}' failed: {}", job, message)]
    JobFailed {
        /// Name of the failing job.
        job: String,
        /// What the job reported.
        message: String,
    },
}

/// Scheduling error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schedule error: {} at {}:{}", kind, file, line)]
pub struct ScheduleError {
    /// Error kind.
    pub kind: ScheduleErrorKind,
    /// File where the error was raised.
    pub file: &'static str,
    /// Line where the error was raised.
    pub line: u32,
}

impl ScheduleError {
    /// Create a new scheduling error.
    #[track_caller]
    pub fn new(kind: ScheduleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
        }
    }

    /// Wrap a job failure, keeping the job name for the log line.
    #[track_caller]
    pub fn job_failed(job: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(ScheduleErrorKind::JobFailed {
            job: job.into(),
            message: message.to_string(),
        })
    }
}
