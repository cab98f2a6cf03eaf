use crate::domain::TaskId;
use thiserror::Error;

/// Non-fatal timer transitions; state is left unchanged when one is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerWarning {
    #[error("stop the active timer (task {active}) before starting another")]
    AnotherTaskRunning { active: TaskId },
    #[error("no active timer for task {0}")]
    NoActiveTimer(TaskId),
    #[error("no timer is running")]
    NotRunning,
    #[error("task {0} does not exist")]
    UnknownTask(TaskId),
}

/// Errors raised by the scheduling core
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    #[error("task id {0} is already in use")]
    DuplicateId(TaskId),
    #[error("invalid start time `{0}`, expected HH:MM")]
    InvalidTime(String),
    #[error("invalid day `{0}`")]
    InvalidDay(String),
    #[error("invalid priority `{0}`, expected low|medium|high")]
    InvalidPriority(String),
    #[error("duration must be a positive number of minutes")]
    ZeroDuration,
    #[error("invalid duration `{0}`, expected whole minutes")]
    InvalidDuration(String),
    #[error("no task id left after {0}")]
    IdsExhausted(TaskId),
    #[error(transparent)]
    Timer(#[from] TimerWarning),
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ScheduleError {
    /// Warnings are reported to the user but never abort the caller
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Timer(_))
    }
}
