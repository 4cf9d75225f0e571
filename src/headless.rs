//! One-shot mode: register, fetch once, print.

use crate::api::{BackendClient, DailyContent, Operation};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::ClientSession;
use chrono::Local;
use tracing::{info, warn};

/// Register and fetch content once.
///
/// A failed registration is logged and does not stop the fetch.
///
/// # Errors
///
/// Returns [`ClientError::Api`](crate::ClientError::Api) if the backend URL is
/// invalid or the fetch fails.
pub async fn fetch_once(config: &ClientConfig, session: &ClientSession) -> Result<DailyContent> {
    let client = BackendClient::new(
        &session.backend_url,
        session.client_id().clone(),
        config.request_timeout(),
    )?;

    match client.register().await {
        Ok(()) => info!("{}", Operation::Register.success_status(&Local::now())),
        Err(e) => warn!("{}: {e}", Operation::Register.failure_status(&e)),
    }

    let content = client
        .fetch_daily_content(&session.user_name, Local::now())
        .await?;
    info!("{}", Operation::Fetch.success_status(&content.fetched_at));
    Ok(content)
}

/// Plain-text rendering for stdout.
pub fn format_content(content: &DailyContent) -> String {
    format!("\"{}\"\n\n{}\n", content.quote.text, content.message)
}
