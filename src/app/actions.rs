//! Worker tasks for backend calls.
//!
//! Each call runs on the runtime's worker pool and reports back through
//! [`AppEventSender`]. Workers get a snapshot of the session fields when they
//! are spawned; nothing is cancelled, so overlapping fetches race and the
//! last one to finish wins.

use super::event::{AppEvent, AppEventSender};
use crate::api::BackendClient;
use chrono::Local;
use tokio::task::JoinHandle;
use tracing::debug;

/// Announce this client to the backend.
pub fn spawn_register(client: BackendClient, tx: AppEventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.register().await;
        debug!(ok = result.is_ok(), "register finished");
        tx.send(AppEvent::Registered(result));
    })
}

/// Fetch the quote and the personalized message for `user_name`.
pub fn spawn_fetch(client: BackendClient, user_name: String, tx: AppEventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.fetch_daily_content(&user_name, Local::now()).await;
        debug!(ok = result.is_ok(), "content fetch finished");
        tx.send(AppEvent::ContentFetched(result));
    })
}

/// Ping the backend.
pub fn spawn_ping(client: BackendClient, tx: AppEventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.ping().await;
        debug!(ok = result.is_ok(), "ping finished");
        tx.send(AppEvent::Pinged(result));
    })
}
