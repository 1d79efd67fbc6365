//! Common infrastructure
//!
//! - Logging setup

pub mod logger;

pub use logger::{init_from_config, init_logger, init_logger_with_file};
