//! The application: UI state, worker dispatch and the event loop.
//!
//! [`App`] owns the session and is the only thing that mutates it. Backend
//! calls run on worker tasks ([`actions`]) and come back as [`AppEvent`]s on
//! an unbounded channel; the scheduler posts [`AppEvent::RefreshDue`] on the
//! same channel.

pub mod actions;
pub mod event;
pub mod settings;
pub mod state;

pub use event::{AppEvent, AppEventSender};
pub use settings::{FormOutcome, SettingsField, SettingsForm, SettingsUpdate};
pub use state::{Action, AppState, Popup};

use crate::api::{ApiError, BackendClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::scheduler::tasks::describe_interval;
use crate::scheduler::{Scheduler, TASK_REFRESH_CONTENT, TaskExecutor, TaskResult};
use crate::session::ClientSession;
use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The running client.
pub struct App {
    state: AppState,
    config: ClientConfig,
    /// Client for the backend URL it was built from.
    client: Option<(String, BackendClient)>,
    events_tx: AppEventSender,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    task_results: Option<mpsc::UnboundedReceiver<TaskResult>>,
    cancel: CancellationToken,
}

impl App {
    /// Create the app. Nothing talks to the backend until [`App::start`].
    pub fn new(config: ClientConfig, session: ClientSession) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState::new(session, describe_interval(config.refresh_interval_secs));
        Self {
            state,
            config,
            client: None,
            events_tx: AppEventSender::new(tx),
            events_rx: rx,
            task_results: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Current UI state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Handle for posting events to this app.
    pub fn sender(&self) -> AppEventSender {
        self.events_tx.clone()
    }

    /// Token that stops the scheduler.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Register, then fetch once the register reply is in, and start the
    /// hourly refresh scheduler.
    pub fn start(&mut self) -> JoinHandle<()> {
        info!(client_id = %self.state.session.client_id(), "starting client");
        match self.client() {
            Ok(client) => {
                actions::spawn_register(client, self.sender());
            }
            Err(e) => {
                self.handle_event(AppEvent::Registered(Err(e)));
            }
        }

        let (result_tx, result_rx) = mpsc::unbounded_channel();
        self.task_results = Some(result_rx);
        let mut scheduler = Scheduler::new(result_tx)
            .with_tick_interval(self.config.tick_interval())
            .with_executor(content_refresh_executor(self.events_tx.clone()));
        scheduler.with_content_refresh(self.config.refresh_interval_secs);
        scheduler.run(self.cancel.clone())
    }

    fn client(&mut self) -> std::result::Result<BackendClient, ApiError> {
        let url = self.state.session.backend_url.clone();
        match &self.client {
            Some((cached_url, client)) if *cached_url == url => Ok(client.clone()),
            _ => {
                let client = BackendClient::new(
                    &url,
                    self.state.session.client_id().clone(),
                    self.config.request_timeout(),
                )?;
                debug!(backend_url = %client.base_url(), "backend client created");
                self.client = Some((url, client.clone()));
                Ok(client)
            }
        }
    }

    /// Perform an action. Returns `false` when the app should exit.
    pub fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Refresh => match self.client() {
                Ok(client) => {
                    self.state.begin_fetch();
                    actions::spawn_fetch(client, self.state.session.user_name.clone(), self.sender());
                }
                Err(e) => {
                    self.state.apply(AppEvent::ContentFetched(Err(e)));
                }
            },
            Action::Ping => match self.client() {
                Ok(client) => {
                    actions::spawn_ping(client, self.sender());
                }
                Err(e) => {
                    self.state.apply(AppEvent::Pinged(Err(e)));
                }
            },
        }
        true
    }

    /// Apply a worker event. Returns `false` when the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match self.state.apply(event) {
            Some(action) => self.perform(action),
            None => true,
        }
    }

    /// Apply a key press. Returns `false` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state.handle_key(key) {
            Some(action) => self.perform(action),
            None => true,
        }
    }

    /// Wait for the next worker event.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    /// Run the interactive client until the user quits.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Terminal`] if drawing or reading input fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let scheduler = self.start();
        let mut input = EventStream::new();
        let result = self.event_loop(terminal, &mut input).await;

        self.cancel.cancel();
        if let Err(e) = scheduler.await {
            warn!("scheduler task ended abnormally: {e}");
        }
        info!("client shut down");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        input: &mut EventStream,
    ) -> Result<()> {
        loop {
            terminal
                .draw(|frame| crate::tui::render::draw(frame, &self.state))
                .map_err(|e| ClientError::Terminal(e.to_string()))?;

            let keep_running = tokio::select! {
                maybe_input = input.next() => match maybe_input {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(_)) => true,
                    Some(Err(e)) => return Err(ClientError::Terminal(e.to_string())),
                    None => false,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
                Some(result) = recv_task_result(&mut self.task_results) => {
                    log_task_result(&result);
                    true
                }
            };

            if !keep_running {
                return Ok(());
            }
        }
    }
}

/// Executor for the scheduler: turns a due refresh task into an
/// [`AppEvent::RefreshDue`] so the fetch uses the live session.
fn content_refresh_executor(tx: AppEventSender) -> TaskExecutor {
    Box::new(move |task| {
        if task.id != TASK_REFRESH_CONTENT {
            return TaskResult::Error(format!("unknown task {}", task.id));
        }
        if tx.is_closed() {
            return TaskResult::Error("UI loop is gone".to_owned());
        }
        tx.send(AppEvent::RefreshDue);
        TaskResult::Success("content refresh dispatched".to_owned())
    })
}

async fn recv_task_result(
    rx: &mut Option<mpsc::UnboundedReceiver<TaskResult>>,
) -> Option<TaskResult> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn log_task_result(result: &TaskResult) {
    match result {
        TaskResult::Success(summary) => debug!("scheduled task: {summary}"),
        TaskResult::Error(err) => warn!("scheduled task failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::scheduler::ScheduledTask;
    use crate::session::ClientId;

    fn app(url: &str) -> App {
        let config = ClientConfig {
            backend_url: url.to_owned(),
            ..ClientConfig::default()
        };
        let session = ClientSession::new(
            ClientId::from_start_time(std::time::UNIX_EPOCH),
            "Friend",
            url,
        );
        App::new(config, session)
    }

    #[test]
    fn refresh_executor_posts_refresh_due() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let executor = content_refresh_executor(AppEventSender::new(tx));

        let task = ScheduledTask::new(TASK_REFRESH_CONTENT, "Refresh", 3600);
        assert!(matches!(executor(&task), TaskResult::Success(_)));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::RefreshDue)));

        let other = ScheduledTask::new("other", "Other", 3600);
        assert!(matches!(executor(&other), TaskResult::Error(_)));
    }

    #[test]
    fn refresh_executor_reports_closed_loop() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let executor = content_refresh_executor(AppEventSender::new(tx));
        let task = ScheduledTask::new(TASK_REFRESH_CONTENT, "Refresh", 3600);
        assert!(matches!(executor(&task), TaskResult::Error(_)));
    }

    #[test]
    fn invalid_backend_url_fails_without_network() {
        let mut app = app("not a url");
        assert!(app.perform(Action::Refresh));
        assert!(app.state().status.starts_with("Connection error: invalid backend URL"));

        app.perform(Action::Ping);
        assert_eq!(app.state().status, "Ping failed - backend not available");
    }

    #[tokio::test]
    async fn start_with_invalid_url_ends_on_fetch_status() {
        let mut app = app("not a url");
        let scheduler = app.start();
        assert!(app.state().status.starts_with("Connection error: invalid backend URL"));

        app.cancel_token().cancel();
        scheduler.await.expect("scheduler joins");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app("http://localhost:9");
        assert!(!app.perform(Action::Quit));
    }

    #[tokio::test]
    async fn client_is_rebuilt_when_url_changes() {
        let mut app = app("http://localhost:9");
        let first = app.client().expect("client");
        assert_eq!(first.base_url(), "http://localhost:9");
        assert_eq!(app.client().expect("client").base_url(), "http://localhost:9");

        app.state.session.backend_url = "http://localhost:10/".to_owned();
        assert_eq!(app.client().expect("client").base_url(), "http://localhost:10");
    }
}
