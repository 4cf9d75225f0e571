//! Client identity and the user-editable session fields.

use crate::config::ClientConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier sent with register/ping requests.
///
/// Derived from the process start time and fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Build the identifier for a process that started at `started_at`.
    pub fn from_start_time(started_at: SystemTime) -> Self {
        let secs = started_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(format!("desktop_client_{secs}"))
    }

    /// The identifier of the running process. The first call fixes it.
    pub fn for_process() -> Self {
        static PROCESS_ID: OnceLock<ClientId> = OnceLock::new();
        PROCESS_ID
            .get_or_init(|| Self::from_start_time(SystemTime::now()))
            .clone()
    }

    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-process session.
///
/// `user_name` and `backend_url` change through the settings form;
/// `client_id` never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession {
    client_id: ClientId,
    /// Name used for the personalized greeting.
    pub user_name: String,
    /// Base URL of the backend.
    pub backend_url: String,
}

impl ClientSession {
    /// Create a session with an explicit identifier.
    pub fn new(
        client_id: ClientId,
        user_name: impl Into<String>,
        backend_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            user_name: user_name.into(),
            backend_url: backend_url.into(),
        }
    }

    /// Create the process session from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            ClientId::for_process(),
            config.user_name.clone(),
            config.backend_url.clone(),
        )
    }

    /// The fixed client identifier.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Replace the editable fields.
    pub fn update(&mut self, user_name: String, backend_url: String) {
        self.user_name = user_name;
        self.backend_url = backend_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn client_id_uses_start_seconds() {
        let started = UNIX_EPOCH + Duration::from_millis(1_700_000_000_999);
        assert_eq!(
            ClientId::from_start_time(started).as_str(),
            "desktop_client_1700000000"
        );
    }

    #[test]
    fn process_id_is_stable() {
        assert_eq!(ClientId::for_process(), ClientId::for_process());
        assert!(ClientId::for_process().as_str().starts_with("desktop_client_"));
    }

    #[test]
    fn update_keeps_client_id() {
        let id = ClientId::from_start_time(UNIX_EPOCH);
        let mut session = ClientSession::new(id.clone(), "Friend", "http://a");
        session.update("Ada".to_owned(), "http://b".to_owned());
        assert_eq!(session.client_id(), &id);
        assert_eq!(session.user_name, "Ada");
        assert_eq!(session.backend_url, "http://b");
    }
}
