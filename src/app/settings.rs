//! Settings form for the user name and backend URL.
//!
//! Holds raw input strings while the user types; values are only checked on
//! submit.

use crate::api::parse_backend_url;
use crate::session::ClientSession;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Field that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    /// "Your Name".
    #[default]
    Name,
    /// "Backend URL".
    BackendUrl,
}

impl SettingsField {
    fn toggle(self) -> Self {
        match self {
            Self::Name => Self::BackendUrl,
            Self::BackendUrl => Self::Name,
        }
    }
}

/// Values accepted by [`SettingsForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// Trimmed user name.
    pub user_name: String,
    /// Trimmed backend URL.
    pub backend_url: String,
}

/// What a key press did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Still editing.
    Editing,
    /// User backed out; discard the form.
    Cancelled,
    /// User saved valid values.
    Saved(SettingsUpdate),
}

/// Open settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Name being edited.
    pub name: String,
    /// Backend URL being edited.
    pub backend_url: String,
    /// Field receiving input.
    pub focus: SettingsField,
    /// Validation error from the last submit attempt.
    pub error: Option<String>,
}

impl SettingsForm {
    /// Open the form pre-filled from the session.
    pub fn from_session(session: &ClientSession) -> Self {
        Self {
            name: session.user_name.clone(),
            backend_url: session.backend_url.clone(),
            focus: SettingsField::Name,
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            SettingsField::Name => &mut self.name,
            SettingsField::BackendUrl => &mut self.backend_url,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Enter => {
                return match self.submit() {
                    Ok(update) => FormOutcome::Saved(update),
                    Err(msg) => {
                        self.error = Some(msg);
                        FormOutcome::Editing
                    }
                };
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = self.focus.toggle();
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_mut().push(c);
            }
            _ => {}
        }
        FormOutcome::Editing
    }

    /// Validate the current input.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for display inside the form.
    pub fn submit(&self) -> Result<SettingsUpdate, String> {
        let user_name = self.name.trim();
        if user_name.is_empty() {
            return Err("Name cannot be empty".to_owned());
        }
        let backend_url = self.backend_url.trim();
        parse_backend_url(backend_url).map_err(|e| e.to_string())?;
        Ok(SettingsUpdate {
            user_name: user_name.to_owned(),
            backend_url: backend_url.to_owned(),
        })
    }
}
