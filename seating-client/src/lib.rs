//! Seating Client - HTTP backend for the seating engine
//!
//! [`HttpClient`] talks to the event backend's REST API and implements
//! [`SeatingStore`](seating_engine::SeatingStore), so a
//! [`SeatingSession`](seating_engine::SeatingSession) can persist through it.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::error::ApiResponse;
