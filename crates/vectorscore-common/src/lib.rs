//! Vectorscore Common - Shared utilities: logging and configuration
//!
//! This crate provides common functionality used by the vectorscore
//! binaries.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{init_logging, LogConfig, LogFormat};
