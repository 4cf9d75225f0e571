//! Status-line text for backend operations.

use super::error::ApiError;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Status shown before anything has happened.
pub const READY: &str = "Ready";
/// Status shown while a content fetch is in flight.
pub const FETCHING: &str = "Fetching content...";

/// A user-visible backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Startup registration.
    Register,
    /// Quote and message fetch.
    Fetch,
    /// Manual liveness check.
    Ping,
}

impl Operation {
    /// Status after the operation succeeded at `at`.
    pub fn success_status<Tz>(self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Self::Register => "Connected to backend".to_owned(),
            Self::Fetch => format!("Updated at {}", at.format("%H:%M:%S")),
            Self::Ping => "Ping successful".to_owned(),
        }
    }

    /// Status after the operation failed with `err`.
    ///
    /// Only a non-2xx status reads as a rejection. A 2xx response with an
    /// unreadable body is reported like a connection failure.
    pub fn failure_status(self, err: &ApiError) -> String {
        match (self, err.is_rejected()) {
            (Self::Register, true) => "Failed to register with backend".to_owned(),
            (Self::Register, false) => "Backend not available".to_owned(),
            (Self::Fetch, true) => "Failed to fetch content".to_owned(),
            (Self::Fetch, false) => format!("Connection error: {err}"),
            (Self::Ping, true) => "Ping failed".to_owned(),
            (Self::Ping, false) => "Ping failed - backend not available".to_owned(),
        }
    }
}
