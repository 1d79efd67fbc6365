//! Persistence collaborator
//!
//! The engine never talks to a backend directly; it goes through
//! [`SeatingStore`]. Writes are idempotent upserts keyed by entity id, so
//! overlapping flushes are safe.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{Guest, TableNode};
use thiserror::Error;

/// Persistence failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::NotFound(_) => ErrorCode::NotFound,
            StoreError::Unauthorized => ErrorCode::NotAuthenticated,
            StoreError::Network(_) => ErrorCode::NetworkError,
            StoreError::Rejected(_) | StoreError::Unavailable(_) => ErrorCode::PersistenceFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Backend operations the seating engine depends on
#[async_trait]
pub trait SeatingStore: Send + Sync {
    async fn load_guests(&self, event_id: &str) -> StoreResult<Vec<Guest>>;

    async fn load_table_nodes(&self, event_id: &str) -> StoreResult<Vec<TableNode>>;

    async fn create_table_node(&self, node: &TableNode) -> StoreResult<()>;

    /// Bulk upsert
    async fn update_table_nodes(&self, nodes: &[TableNode]) -> StoreResult<()>;

    async fn delete_table_node(&self, id: &str) -> StoreResult<()>;

    /// Bulk upsert
    async fn update_guests(&self, guests: &[Guest]) -> StoreResult<()>;

    async fn delete_guest(&self, id: &str) -> StoreResult<()>;
}
