//! Configuration module for the mys-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation and user ID parsing

pub mod loader;
pub mod validation;

pub use loader::{Config, NetworkConfig, OptionsConfig, Pacing, TargetConfig};
pub use validation::{parse_uid, validate_config};
