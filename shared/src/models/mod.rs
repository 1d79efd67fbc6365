//! Data models
//!
//! Shared between the seating engine and the HTTP collaborator.
//! All IDs are `String` (UUIDs issued by the backend or the engine).

pub mod guest;
pub mod table_node;

// Re-exports
pub use guest::*;
pub use table_node::*;
