//! Wire types for the motivation backend.

use crate::session::ClientId;
use crate::time_of_day::TimeOfDay;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `GET /api/quotes/daily` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text.
    #[serde(rename = "quote")]
    pub text: String,
}

/// `GET /api/messages/personalized` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedMessage {
    /// Greeting line addressed to the user.
    pub greeting: String,
    /// Main message body.
    #[serde(rename = "message")]
    pub body: String,
    /// Line specific to the requested time of day.
    pub time_based_message: String,
}

impl fmt::Display for PersonalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\n{}\n\n{}",
            self.greeting, self.body, self.time_based_message
        )
    }
}

/// What a `POST /api/ping` announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PingAction {
    /// Sent once at startup.
    Register,
    /// Sent when the user asks for a liveness check.
    Ping,
}

/// `POST /api/ping` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingRequest {
    /// Session identifier.
    pub client_id: ClientId,
    /// Register or ping.
    pub action: PingAction,
}

/// `POST /api/ping` response body for a ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingAck {
    /// Text shown to the user.
    pub message: String,
}

/// Result of one successful content fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyContent {
    /// Quote of the day.
    pub quote: Quote,
    /// Personalized message.
    pub message: PersonalizedMessage,
    /// Bucket the message was requested for.
    pub time_of_day: TimeOfDay,
    /// Local time the fetch was started.
    pub fetched_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn quote_reads_quote_field() {
        let quote: Quote = serde_json::from_value(json!({
            "quote": "Keep going.",
            "author": "ignored"
        }))
        .unwrap();
        assert_eq!(quote.text, "Keep going.");
    }

    #[test]
    fn message_reads_renamed_fields() {
        let message: PersonalizedMessage = serde_json::from_value(json!({
            "greeting": "Good morning, Ada!",
            "message": "Today is yours.",
            "timeBasedMessage": "Start strong."
        }))
        .unwrap();
        assert_eq!(message.body, "Today is yours.");
        assert_eq!(message.time_based_message, "Start strong.");
        assert_eq!(
            message.to_string(),
            "Good morning, Ada!\n\nToday is yours.\n\nStart strong."
        );
    }

    #[test]
    fn message_missing_field_is_rejected() {
        let result: Result<PersonalizedMessage, _> =
            serde_json::from_value(json!({ "greeting": "Hi" }));
        assert!(result.is_err());
    }

    #[test]
    fn ping_request_uses_camel_case() {
        let request = PingRequest {
            client_id: ClientId::from_start_time(std::time::UNIX_EPOCH),
            action: PingAction::Register,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "clientId": "desktop_client_0", "action": "register" })
        );
    }
}
