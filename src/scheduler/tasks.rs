//! Scheduled task definitions.
//!
//! Defines the [`ScheduledTask`] type and the outcome types the runner
//! records after each execution.

use std::time::{SystemTime, UNIX_EPOCH};

/// Built-in task that re-fetches the quote and personalized message.
pub const TASK_REFRESH_CONTENT: &str = "refresh_content";

/// Outcome of executing a scheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully with a summary message.
    Success(String),
    /// Task failed with an error message.
    Error(String),
}

impl TaskResult {
    /// Short text stored in run history.
    pub fn summary(&self) -> String {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg.clone(),
        }
    }

    /// History outcome for this result.
    pub fn outcome(&self) -> TaskRunOutcome {
        match self {
            Self::Success(_) => TaskRunOutcome::Success,
            Self::Error(_) => TaskRunOutcome::Failed,
        }
    }
}

/// Whether a recorded run succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRunOutcome {
    /// Executor reported success.
    Success,
    /// Executor reported an error.
    Failed,
}

/// One entry of scheduler run history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunRecord {
    /// Task that ran.
    pub task_id: String,
    /// Unix epoch seconds when execution started.
    pub started_at: u64,
    /// Unix epoch seconds when execution finished.
    pub finished_at: u64,
    /// Success or failure.
    pub outcome: TaskRunOutcome,
    /// Summary text from the executor.
    pub summary: String,
}

/// A task that runs at a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    /// Unique task identifier (e.g. `"refresh_content"`).
    pub id: String,
    /// Human-readable task name.
    pub name: String,
    /// Seconds between runs.
    pub interval_secs: u64,
    /// Unix epoch seconds of the last run, if any.
    pub last_run: Option<u64>,
    /// Unix epoch seconds at which the task becomes due.
    pub next_run: Option<u64>,
    /// Whether the task is enabled.
    pub enabled: bool,
}

impl ScheduledTask {
    /// Create an enabled task whose first run is one interval from now.
    pub fn new(id: impl Into<String>, name: impl Into<String>, interval_secs: u64) -> Self {
        Self::new_at(id, name, interval_secs, now_epoch_secs())
    }

    /// Create an enabled task whose first run is one interval after `now`.
    pub fn new_at(
        id: impl Into<String>,
        name: impl Into<String>,
        interval_secs: u64,
        now: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interval_secs,
            last_run: None,
            next_run: Some(now.saturating_add(interval_secs)),
            enabled: true,
        }
    }

    /// Returns `true` if the task is enabled and due at `now`.
    pub fn is_due_at(&self, now: u64) -> bool {
        self.enabled && self.next_run.is_none_or(|next| now >= next)
    }

    /// Returns `true` if the task is enabled and due now.
    pub fn is_due(&self) -> bool {
        self.is_due_at(now_epoch_secs())
    }

    /// Record a run at `now` and push the next run one interval out.
    pub fn mark_run_at(&mut self, now: u64) {
        self.last_run = Some(now);
        self.next_run = Some(now.saturating_add(self.interval_secs));
    }

    /// Make the task due on the next tick.
    pub fn mark_due_now(&mut self) {
        self.next_run = Some(now_epoch_secs());
    }

    /// Human-readable interval, e.g. `"every 1 hour"`.
    pub fn interval_description(&self) -> String {
        describe_interval(self.interval_secs)
    }
}

/// Describe an interval in the largest whole unit, e.g. `"every 5 minutes"`.
pub fn describe_interval(secs: u64) -> String {
    let (count, unit) = if secs >= 3600 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("every {count} {unit}{plural}")
}

/// Returns current UTC seconds since epoch.
pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_due_until_interval_passes() {
        let task = ScheduledTask::new_at(TASK_REFRESH_CONTENT, "Refresh", 3600, 1_000);
        assert!(!task.is_due_at(1_000));
        assert!(!task.is_due_at(4_599));
        assert!(task.is_due_at(4_600));
    }

    #[test]
    fn mark_run_pushes_next_run() {
        let mut task = ScheduledTask::new_at("t", "T", 60, 0);
        task.mark_run_at(60);
        assert_eq!(task.last_run, Some(60));
        assert_eq!(task.next_run, Some(120));
        assert!(!task.is_due_at(119));
        assert!(task.is_due_at(120));
    }

    #[test]
    fn disabled_task_is_never_due() {
        let mut task = ScheduledTask::new_at("t", "T", 0, 0);
        task.enabled = false;
        assert!(!task.is_due_at(u64::MAX));
    }

    #[test]
    fn due_now_makes_task_due() {
        let mut task = ScheduledTask::new("t", "T", 3600);
        assert!(!task.is_due());
        task.mark_due_now();
        assert!(task.is_due());
    }

    #[test]
    fn interval_descriptions() {
        let describe = |secs| ScheduledTask::new_at("t", "T", secs, 0).interval_description();
        assert_eq!(describe(3600), "every 1 hour");
        assert_eq!(describe(7200), "every 2 hours");
        assert_eq!(describe(300), "every 5 minutes");
        assert_eq!(describe(90), "every 90 seconds");
    }

    #[test]
    fn result_outcomes() {
        assert_eq!(
            TaskResult::Success("ok".to_owned()).outcome(),
            TaskRunOutcome::Success
        );
        let err = TaskResult::Error("boom".to_owned());
        assert_eq!(err.outcome(), TaskRunOutcome::Failed);
        assert_eq!(err.summary(), "boom");
    }
}
