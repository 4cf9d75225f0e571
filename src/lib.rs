//! Daily Motivation: a desktop client for a quote-of-the-day backend.
//!
//! The client shows the backend's daily quote and a greeting personalized
//! by name and time of day, refreshes both every hour, and lets the user
//! ping the backend or change their name and backend URL.
//!
//! # Architecture
//!
//! - **api**: the three backend calls (register, fetch content, ping) and
//!   the mapping of failures to status text
//! - **scheduler**: a 60-second polling loop over interval tasks; the client
//!   registers one hourly refresh task
//! - **app**: UI state, worker dispatch and the event loop that ties them
//!   together
//! - **tui**: the terminal window

pub mod api;
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod headless;
pub mod logging;
pub mod scheduler;
pub mod session;
pub mod time_of_day;
pub mod tui;

pub use api::{ApiError, BackendClient, DailyContent, PersonalizedMessage, Quote};
pub use app::App;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use session::{ClientId, ClientSession};
pub use time_of_day::TimeOfDay;
