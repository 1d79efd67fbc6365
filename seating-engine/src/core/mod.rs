//! Core configuration
//!
//! - [`EngineConfig`] - idle flush timing, notice capacity, logging options

pub mod config;

pub use config::EngineConfig;
