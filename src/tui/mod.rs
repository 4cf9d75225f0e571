//! Terminal window setup and teardown.
//!
//! The terminal is put into raw mode on the alternate screen; [`restore`]
//! must run on every exit path, including errors.

pub mod render;

use crate::error::{ClientError, Result};
use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen.
///
/// ratatui also installs a panic hook that restores the terminal.
///
/// # Errors
///
/// Returns [`ClientError::Terminal`] if the terminal cannot be prepared.
pub fn init() -> Result<DefaultTerminal> {
    ratatui::try_init().map_err(|e| ClientError::Terminal(e.to_string()))
}

/// Leave raw mode and the alternate screen.
///
/// # Errors
///
/// Returns [`ClientError::Terminal`] if the terminal cannot be restored.
pub fn restore() -> Result<()> {
    ratatui::try_restore().map_err(|e| ClientError::Terminal(e.to_string()))
}
