//! Configuration for the statekit lab
//!
//! This crate provides:
//! - Directory paths for persisted data and logs
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
