//! Shared types for the seating workspace
//!
//! Data model, change vocabulary and error types used by both the
//! seating engine and the HTTP client.

pub mod error;
pub mod models;
pub mod sync;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Guest, Position, Seat, TableNode, TableType};
pub use sync::{ChangeAction, ChangeKind};
