//! HTTP client for the motivation backend.
//!
//! Every call is a single request bounded by the client timeout. There is no
//! retry: callers turn failures into a status line via
//! [`Operation::failure_status`](super::status::Operation::failure_status).

use super::error::ApiError;
use super::types::{DailyContent, PersonalizedMessage, PingAck, PingAction, PingRequest, Quote};
use crate::session::ClientId;
use crate::time_of_day::TimeOfDay;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Presence and liveness endpoint.
pub const PING_PATH: &str = "/api/ping";
/// Quote-of-the-day endpoint.
pub const DAILY_QUOTE_PATH: &str = "/api/quotes/daily";
/// Personalized message endpoint.
pub const PERSONALIZED_MESSAGE_PATH: &str = "/api/messages/personalized";

/// Parse and check a backend base URL.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] unless the value is an absolute
/// `http`/`https` URL with a host.
pub fn parse_backend_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ApiError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme '{other}'"
            )));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ApiError::InvalidUrl(format!("{trimmed}: missing host")));
    }
    Ok(url)
}

/// Client bound to one backend URL and one client identity.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client_id: ClientId,
    http: reqwest::Client,
}

impl BackendClient {
    /// Create a client for `backend_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL is not usable.
    pub fn new(backend_url: &str, client_id: ClientId, timeout: Duration) -> Result<Self, ApiError> {
        let url = parse_backend_url(backend_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_owned(),
            client_id,
            http,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identity sent with register and ping.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Announce this client to the backend.
    ///
    /// Any 2xx counts as success; the body is ignored.
    pub async fn register(&self) -> Result<(), ApiError> {
        self.post_ping(PingAction::Register).await?;
        debug!(client_id = %self.client_id, "registered with backend");
        Ok(())
    }

    /// Liveness check. Returns the backend's reply text.
    pub async fn ping(&self) -> Result<PingAck, ApiError> {
        let response = self.post_ping(PingAction::Ping).await?;
        decode_json(PING_PATH, response).await
    }

    /// Fetch the quote of the day.
    pub async fn fetch_quote(&self) -> Result<Quote, ApiError> {
        let response = self.send_get(DAILY_QUOTE_PATH, &[]).await?;
        let response = ensure_success(DAILY_QUOTE_PATH, response)?;
        decode_json(DAILY_QUOTE_PATH, response).await
    }

    /// Fetch the personalized message for `name` at `time_of_day`.
    pub async fn fetch_message(
        &self,
        name: &str,
        time_of_day: TimeOfDay,
    ) -> Result<PersonalizedMessage, ApiError> {
        let query = [("name", name), ("time", time_of_day.as_str())];
        let response = self.send_get(PERSONALIZED_MESSAGE_PATH, &query).await?;
        let response = ensure_success(PERSONALIZED_MESSAGE_PATH, response)?;
        decode_json(PERSONALIZED_MESSAGE_PATH, response).await
    }

    /// Fetch both the quote and the personalized message.
    ///
    /// The bucket is taken from the local hour of `now`. Both requests are in
    /// flight together and the fetch fails if either fails. Errors are
    /// reported in a fixed order whatever finishes first: transport failures,
    /// then status codes, then unreadable bodies, quote before message.
    pub async fn fetch_daily_content(
        &self,
        name: &str,
        now: DateTime<Local>,
    ) -> Result<DailyContent, ApiError> {
        let time_of_day = TimeOfDay::at(&now);
        debug!(%time_of_day, "fetching daily content");
        let query = [("name", name), ("time", time_of_day.as_str())];
        let (quote, message) = tokio::join!(
            self.send_get(DAILY_QUOTE_PATH, &[]),
            self.send_get(PERSONALIZED_MESSAGE_PATH, &query),
        );
        let (quote, message) = (quote?, message?);
        let quote = ensure_success(DAILY_QUOTE_PATH, quote)?;
        let message = ensure_success(PERSONALIZED_MESSAGE_PATH, message)?;
        Ok(DailyContent {
            quote: decode_json(DAILY_QUOTE_PATH, quote).await?,
            message: decode_json(PERSONALIZED_MESSAGE_PATH, message).await?,
            time_of_day,
            fetched_at: now,
        })
    }

    async fn send_get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.get(self.endpoint(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(path, &e))
    }

    async fn post_ping(&self, action: PingAction) -> Result<reqwest::Response, ApiError> {
        let body = PingRequest {
            client_id: self.client_id.clone(),
            action,
        };
        let response = self
            .http
            .post(self.endpoint(PING_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(PING_PATH, &e))?;
        ensure_success(PING_PATH, response)
    }
}

fn ensure_success(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            endpoint: endpoint.to_owned(),
            code: status.as_u16(),
        })
    }
}

async fn decode_json<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::from_reqwest(endpoint, &e))?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_owned(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn client(url: &str) -> BackendClient {
        BackendClient::new(
            url,
            ClientId::from_start_time(std::time::UNIX_EPOCH),
            Duration::from_secs(1),
        )
        .expect("client")
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(
            client("https://example.com/").endpoint(PING_PATH),
            "https://example.com/api/ping"
        );
        assert_eq!(
            client("http://localhost:3000/base/").endpoint(DAILY_QUOTE_PATH),
            "http://localhost:3000/base/api/quotes/daily"
        );
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(matches!(
            parse_backend_url("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_backend_url("example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(parse_backend_url("  https://example.com  ").is_ok());
    }
}
