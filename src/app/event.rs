//! Events marshalled from worker tasks back onto the UI loop.

use crate::api::{ApiError, DailyContent, PingAck};
use tokio::sync::mpsc::UnboundedSender;

/// Something the UI loop has to react to.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Startup registration finished.
    Registered(Result<(), ApiError>),
    /// A content fetch finished.
    ContentFetched(Result<DailyContent, ApiError>),
    /// A manual ping finished.
    Pinged(Result<PingAck, ApiError>),
    /// The scheduler decided the content is stale.
    RefreshDue,
}

/// Cloneable handle workers use to post [`AppEvent`]s to the UI loop.
#[derive(Clone, Debug)]
pub struct AppEventSender {
    app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    /// Wrap the sending half of the UI event channel.
    pub fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event to the UI loop. If it fails, we swallow the
    /// error and log it.
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.app_event_tx.send(event) {
            tracing::error!("failed to send event: {e}");
        }
    }

    /// Returns `true` once the UI loop has gone away.
    pub fn is_closed(&self) -> bool {
        self.app_event_tx.is_closed()
    }
}
