//! Seating Engine - seating-chart layout and assignment core
//!
//! # Overview
//!
//! - **Layout** (`layout`): seat distribution, table dimensions, seat positions
//! - **Chart** (`chart`): seat/guest occupancy state machine
//! - **Tracking** (`tracking`): dirty set, flush, idle-triggered flush
//! - **Store** (`store`): persistence collaborator trait and in-memory store
//! - **Session** (`session`): one event's editing session wiring it all up
//!
//! # Module Layout
//!
//! ```text
//! seating-engine/src/
//! ├── core/          # configuration
//! ├── common/        # logging
//! ├── layout/        # geometry (pure functions)
//! ├── chart/         # occupancy rules
//! ├── tracking/      # change tracking, idle flush
//! ├── store/         # SeatingStore, MemoryStore
//! ├── notice.rs      # user-facing notifications
//! └── session.rs     # SeatingSession
//! ```

pub mod chart;
pub mod common;
pub mod core;
pub mod layout;
pub mod notice;
pub mod session;
pub mod store;
pub mod tracking;

pub use chart::{ChartError, ChartResult, SeatingChart};
pub use common::{init_from_config, init_logger, init_logger_with_file};
pub use crate::core::EngineConfig;
pub use notice::{Notifier, SeatingNotice};
pub use session::SeatingSession;
pub use store::{MemoryStore, SeatingStore, StoreError, StoreResult};
pub use tracking::{ChangeTracker, FlushReport, IdleFlushWorker, IdleTimer};

// Re-export shared types used in the public API
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::models::{Guest, Position, Seat, TableNode, TableNodeCreate, TableType};
