//! UI state and its transitions.
//!
//! [`AppState`] is mutated only on the UI loop. Worker results arrive as
//! [`AppEvent`]s; key presses arrive as crossterm events. Both may ask the
//! loop to perform an [`Action`].

use super::event::AppEvent;
use super::settings::{FormOutcome, SettingsForm};
use crate::api::{Operation, status};
use crate::session::ClientSession;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

/// Side effect the UI loop should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fetch the quote and message again.
    Refresh,
    /// Send a ping.
    Ping,
    /// Leave the application.
    Quit,
}

/// Modal message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    /// Box title.
    pub title: String,
    /// Box text.
    pub body: String,
}

/// Everything the window shows.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session fields.
    pub session: ClientSession,
    /// Quote text, once fetched.
    pub quote: Option<String>,
    /// Personalized message text, once fetched.
    pub message: Option<String>,
    /// Status line.
    pub status: String,
    /// Time of the last successful fetch.
    pub last_updated: Option<DateTime<Local>>,
    /// Open message box, if any.
    pub popup: Option<Popup>,
    /// Open settings form, if any.
    pub settings: Option<SettingsForm>,
    /// How often content refreshes on its own.
    pub refresh_schedule: String,
}

impl AppState {
    /// Initial state for a session.
    pub fn new(session: ClientSession, refresh_schedule: impl Into<String>) -> Self {
        Self {
            session,
            quote: None,
            message: None,
            status: status::READY.to_owned(),
            last_updated: None,
            popup: None,
            settings: None,
            refresh_schedule: refresh_schedule.into(),
        }
    }

    /// Mark a fetch as started.
    pub fn begin_fetch(&mut self) {
        self.status = status::FETCHING.to_owned();
    }

    /// Apply a worker result.
    ///
    /// Returns the follow-up action, if any. The first fetch follows the
    /// register reply whatever its outcome.
    pub fn apply(&mut self, event: AppEvent) -> Option<Action> {
        match event {
            AppEvent::Registered(Ok(())) => {
                self.status = Operation::Register.success_status(&Local::now());
                return Some(Action::Refresh);
            }
            AppEvent::Registered(Err(e)) => {
                warn!("registration failed: {e}");
                self.status = Operation::Register.failure_status(&e);
                return Some(Action::Refresh);
            }
            AppEvent::ContentFetched(Ok(content)) => {
                self.quote = Some(content.quote.text);
                self.message = Some(content.message.to_string());
                self.status = Operation::Fetch.success_status(&content.fetched_at);
                self.last_updated = Some(content.fetched_at);
            }
            AppEvent::ContentFetched(Err(e)) => {
                warn!("content fetch failed: {e}");
                self.status = Operation::Fetch.failure_status(&e);
            }
            AppEvent::Pinged(Ok(ack)) => {
                self.popup = Some(Popup {
                    title: "Backend Response".to_owned(),
                    body: ack.message,
                });
                self.status = Operation::Ping.success_status(&Local::now());
            }
            AppEvent::Pinged(Err(e)) => {
                warn!("ping failed: {e}");
                self.status = Operation::Ping.failure_status(&e);
            }
            AppEvent::RefreshDue => return Some(Action::Refresh),
        }
        None
    }

    /// Apply a key press.
    ///
    /// An open popup swallows the next key; an open settings form takes all
    /// keys until it is saved or cancelled.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }
        if self.popup.take().is_some() {
            return None;
        }
        if let Some(form) = self.settings.as_mut() {
            return match form.handle_key(key) {
                FormOutcome::Editing => None,
                FormOutcome::Cancelled => {
                    self.settings = None;
                    None
                }
                FormOutcome::Saved(update) => {
                    self.settings = None;
                    info!(
                        user_name = %update.user_name,
                        backend_url = %update.backend_url,
                        "settings saved"
                    );
                    self.session.update(update.user_name, update.backend_url);
                    Some(Action::Refresh)
                }
            };
        }
        match key.code {
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('p') => Some(Action::Ping),
            KeyCode::Char('s') => {
                self.settings = Some(SettingsForm::from_session(&self.session));
                None
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}
