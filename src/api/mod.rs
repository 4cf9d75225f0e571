//! Motivation backend API.
//!
//! Three calls make up the whole protocol:
//!
//! - `POST /api/ping` with `{"clientId", "action": "register" | "ping"}`
//! - `GET /api/quotes/daily`
//! - `GET /api/messages/personalized?name=&time=`

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::{BackendClient, parse_backend_url};
pub use error::ApiError;
pub use status::Operation;
pub use types::{DailyContent, PersonalizedMessage, PingAck, PingAction, PingRequest, Quote};
