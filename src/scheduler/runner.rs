//! Scheduler background loop.
//!
//! Spawns a tokio task that periodically checks for due tasks and
//! executes them. Run history is kept in memory only.

use crate::scheduler::tasks::{
    self, ScheduledTask, TASK_REFRESH_CONTENT, TaskResult, TaskRunRecord,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default interval between scheduler ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Number of run-history entries to keep.
const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Callback type for executing a task.
///
/// Takes the full scheduled task and returns a [`TaskResult`].
pub type TaskExecutor = Box<dyn Fn(&ScheduledTask) -> TaskResult + Send + Sync>;

/// Background scheduler that runs periodic tasks.
pub struct Scheduler {
    /// Registered tasks.
    tasks: Vec<ScheduledTask>,
    /// Recent run history.
    history: Vec<TaskRunRecord>,
    /// Channel for reporting task results.
    result_tx: mpsc::UnboundedSender<TaskResult>,
    /// Task executor callback.
    executor: Option<TaskExecutor>,
    /// Time between polls of the due-task list.
    tick_interval: Duration,
    /// Max history entries kept in memory.
    max_history_entries: usize,
}

impl Scheduler {
    /// Create a new scheduler with the given result channel.
    pub fn new(result_tx: mpsc::UnboundedSender<TaskResult>) -> Self {
        Self {
            tasks: Vec::new(),
            history: Vec::new(),
            result_tx,
            executor: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_history_entries: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the executor callback for running tasks.
    pub fn with_executor(mut self, executor: TaskExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Override the poll interval. Zero is clamped to one millisecond.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Override the in-memory run-history limit.
    pub fn with_history_limit(mut self, max_entries: usize) -> Self {
        self.max_history_entries = max_entries.max(1);
        self
    }

    /// Register the built-in content refresh task.
    ///
    /// The first run happens one interval from now. Calling this twice keeps
    /// the first registration.
    pub fn with_content_refresh(&mut self, interval_secs: u64) {
        self.add_task_if_missing(ScheduledTask::new(
            TASK_REFRESH_CONTENT,
            "Refresh quote and message",
            interval_secs,
        ));
    }

    /// Add (or replace) a task.
    pub fn add_task(&mut self, task: ScheduledTask) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            self.tasks.push(task);
        }
    }

    fn add_task_if_missing(&mut self, task: ScheduledTask) {
        let exists = self.tasks.iter().any(|existing| existing.id == task.id);
        if !exists {
            self.tasks.push(task);
        }
    }

    /// Returns registered tasks.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Returns scheduler run history.
    pub fn history(&self) -> &[TaskRunRecord] {
        &self.history
    }

    /// Enables or disables a task by ID. Returns `true` when found.
    pub fn set_task_enabled(&mut self, task_id: &str, enabled: bool) -> bool {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.enabled = enabled;
            return true;
        }
        false
    }

    /// Marks a task due now. Returns `true` when found.
    pub fn mark_task_due_now(&mut self, task_id: &str) -> bool {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.mark_due_now();
            return true;
        }
        false
    }

    /// Start the scheduler background loop.
    ///
    /// The loop ends when `cancel` fires or the result channel closes.
    pub fn run(mut self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "scheduler started with {} tasks, polling every {:?}",
                self.tasks.len(),
                self.tick_interval
            );
            let mut interval = tokio::time::interval(self.tick_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        info!("scheduler stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        if !self.tick() {
                            debug!("scheduler result channel closed, stopping");
                            break;
                        }
                    }
                }
            }
        })
    }

    /// Execute one scheduler tick at the current time.
    ///
    /// Returns `false` once the result channel is closed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(tasks::now_epoch_secs())
    }

    /// Execute one scheduler tick as if the clock read `now`.
    ///
    /// Returns `false` once the result channel is closed.
    pub fn tick_at(&mut self, now: u64) -> bool {
        let due_ids: Vec<String> = self
            .tasks
            .iter()
            .filter(|t| t.is_due_at(now))
            .map(|t| t.id.clone())
            .collect();

        for task_id in due_ids {
            let Some(task_snapshot) = self.tasks.iter().find(|t| t.id == task_id).cloned() else {
                continue;
            };

            let started_at = now;
            let result = self.execute_task(&task_snapshot);
            let finished_at = tasks::now_epoch_secs().max(started_at);

            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.mark_run_at(now);
            }

            self.push_history(TaskRunRecord {
                task_id: task_snapshot.id.clone(),
                started_at,
                finished_at,
                outcome: result.outcome(),
                summary: result.summary(),
            });

            if self.result_tx.send(result).is_err() {
                return false;
            }
        }

        !self.result_tx.is_closed()
    }

    fn push_history(&mut self, run: TaskRunRecord) {
        self.history.push(run);
        if self.history.len() > self.max_history_entries {
            let drop_count = self.history.len() - self.max_history_entries;
            self.history.drain(0..drop_count);
        }
    }

    /// Execute a single task.
    fn execute_task(&self, task: &ScheduledTask) -> TaskResult {
        debug!("executing scheduled task: {}", task.id);

        match &self.executor {
            Some(executor) => executor(task),
            None => TaskResult::Error(format!("no executor for task {}", task.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::scheduler::tasks::TaskRunOutcome;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_scheduler() -> (Scheduler, mpsc::UnboundedReceiver<TaskResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Scheduler::new(tx), rx)
    }

    #[test]
    fn new_scheduler_has_no_tasks() {
        let (scheduler, _rx) = make_scheduler();
        assert!(scheduler.tasks().is_empty());
    }

    #[test]
    fn content_refresh_is_idempotent() {
        let (mut scheduler, _rx) = make_scheduler();
        scheduler.with_content_refresh(3600);
        scheduler.with_content_refresh(60);

        assert_eq!(scheduler.tasks().len(), 1);
        assert_eq!(scheduler.tasks()[0].id, TASK_REFRESH_CONTENT);
        assert_eq!(scheduler.tasks()[0].interval_secs, 3600);
    }

    #[test]
    fn tick_executes_due_tasks_and_records_history() {
        let (scheduler, mut rx) = make_scheduler();
        let mut scheduler = scheduler.with_executor(Box::new(|task| {
            TaskResult::Success(format!("ran {}", task.id))
        }));
        scheduler.add_task(ScheduledTask::new_at("due", "Due Task", 60, 0));

        assert!(scheduler.tick_at(60));

        let result = rx.try_recv().expect("result available");
        assert_eq!(result, TaskResult::Success("ran due".to_owned()));
        assert_eq!(scheduler.history().len(), 1);
        assert_eq!(scheduler.history()[0].task_id, "due");
        assert_eq!(scheduler.history()[0].outcome, TaskRunOutcome::Success);
        assert_eq!(scheduler.tasks()[0].next_run, Some(120));
    }

    #[test]
    fn tick_skips_tasks_not_yet_due() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let (scheduler, mut rx) = make_scheduler();
        let mut scheduler = scheduler.with_executor(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            TaskResult::Success("ran".to_owned())
        }));
        scheduler.add_task(ScheduledTask::new_at("hourly", "Hourly", 3600, 0));

        for minute in 1..60 {
            scheduler.tick_at(minute * 60);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());

        scheduler.tick_at(3600);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn executor_errors_are_recorded() {
        let (scheduler, mut rx) = make_scheduler();
        let mut scheduler =
            scheduler.with_executor(Box::new(|_| TaskResult::Error("boom".to_owned())));
        scheduler.add_task(ScheduledTask::new_at("err", "Error Task", 0, 0));

        scheduler.tick_at(0);

        assert_eq!(
            rx.try_recv().expect("result"),
            TaskResult::Error("boom".to_owned())
        );
        assert_eq!(scheduler.history()[0].outcome, TaskRunOutcome::Failed);
    }

    #[test]
    fn missing_executor_reports_error() {
        let (mut scheduler, mut rx) = make_scheduler();
        scheduler.add_task(ScheduledTask::new_at("lonely", "Lonely", 0, 0));

        scheduler.tick_at(0);

        assert!(matches!(rx.try_recv(), Ok(TaskResult::Error(_))));
    }

    #[test]
    fn disabled_tasks_do_not_run() {
        let (scheduler, mut rx) = make_scheduler();
        let mut scheduler =
            scheduler.with_executor(Box::new(|_| TaskResult::Success("ran".to_owned())));
        scheduler.add_task(ScheduledTask::new_at("t", "T", 0, 0));
        assert!(scheduler.set_task_enabled("t", false));
        assert!(!scheduler.set_task_enabled("missing", false));

        scheduler.tick_at(100);

        assert!(rx.try_recv().is_err());
        assert!(scheduler.history().is_empty());
    }

    #[test]
    fn run_history_is_bounded() {
        let (scheduler, _rx) = make_scheduler();
        let mut scheduler = scheduler
            .with_history_limit(2)
            .with_executor(Box::new(|task| TaskResult::Success(task.id.clone())));

        scheduler.add_task(ScheduledTask::new_at("a", "A", 0, 0));
        scheduler.add_task(ScheduledTask::new_at("b", "B", 0, 0));
        scheduler.add_task(ScheduledTask::new_at("c", "C", 0, 0));

        scheduler.tick_at(0);

        let ids: Vec<&str> = scheduler
            .history()
            .iter()
            .map(|r| r.task_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn closed_channel_stops_ticking() {
        let (scheduler, rx) = make_scheduler();
        let mut scheduler =
            scheduler.with_executor(Box::new(|_| TaskResult::Success("ran".to_owned())));
        scheduler.add_task(ScheduledTask::new_at("t", "T", 0, 0));
        drop(rx);

        assert!(!scheduler.tick_at(0));
    }

    #[tokio::test]
    async fn run_starts_ticks_and_stops_on_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx)
            .with_tick_interval(Duration::from_millis(10))
            .with_executor(Box::new(|_| TaskResult::Success("ran".to_owned())));
        let mut task = ScheduledTask::new("async_test", "Async", 3600);
        task.mark_due_now();
        scheduler.add_task(task);

        let cancel = CancellationToken::new();
        let handle = scheduler.run(cancel.clone());

        let result = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(
            result.expect("no timeout"),
            Some(TaskResult::Success("ran".to_owned()))
        );

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop exits")
            .expect("task joins");
    }
}
