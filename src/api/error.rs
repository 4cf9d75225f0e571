//! Errors raised by backend requests.

/// Failure of a single backend request.
///
/// Every variant names the endpoint path so log lines point at the call
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The configured backend URL is malformed.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),

    /// No response within the request timeout.
    #[error("request to {endpoint} timed out")]
    Timeout {
        /// Endpoint path.
        endpoint: String,
    },

    /// Connection refused, DNS failure or similar.
    #[error("cannot connect to {endpoint}: {detail}")]
    Connect {
        /// Endpoint path.
        endpoint: String,
        /// Transport error text.
        detail: String,
    },

    /// The backend answered with a non-success status code.
    #[error("{endpoint} returned HTTP {code}")]
    Status {
        /// Endpoint path.
        endpoint: String,
        /// HTTP status code.
        code: u16,
    },

    /// The backend answered 2xx but the body did not match the expected shape.
    #[error("cannot decode response from {endpoint}: {detail}")]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// Parser error text.
        detail: String,
    },

    /// Any other transport failure.
    #[error("request to {endpoint} failed: {detail}")]
    Request {
        /// Endpoint path.
        endpoint: String,
        /// Transport error text.
        detail: String,
    },
}

impl ApiError {
    /// Returns `true` when the backend answered with a non-success status.
    ///
    /// Everything else, an unreadable 2xx body included, means no usable
    /// answer came back.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Map a `reqwest` error raised while talking to `endpoint`.
    pub(crate) fn from_reqwest(endpoint: &str, err: &reqwest::Error) -> Self {
        let endpoint = endpoint.to_owned();
        if err.is_timeout() {
            Self::Timeout { endpoint }
        } else if err.is_connect() {
            Self::Connect {
                endpoint,
                detail: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                endpoint,
                detail: err.to_string(),
            }
        } else {
            Self::Request {
                endpoint,
                detail: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_status_codes_are_rejections() {
        assert!(
            ApiError::Status {
                endpoint: "/api/ping".to_owned(),
                code: 500
            }
            .is_rejected()
        );
        assert!(
            !ApiError::Timeout {
                endpoint: "/api/ping".to_owned()
            }
            .is_rejected()
        );
        assert!(!ApiError::InvalidUrl("x".to_owned()).is_rejected());
        assert!(
            !ApiError::Decode {
                endpoint: "/api/quotes/daily".to_owned(),
                detail: "eof".to_owned()
            }
            .is_rejected()
        );
    }

    #[test]
    fn display_names_endpoint() {
        let err = ApiError::Status {
            endpoint: "/api/quotes/daily".to_owned(),
            code: 503,
        };
        assert_eq!(err.to_string(), "/api/quotes/daily returned HTTP 503");
    }
}
