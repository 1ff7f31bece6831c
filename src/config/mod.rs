//! Configuration module for styleforge
//!
//! Provides types and loading for `styleforge.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, load_config_file, ConfigError};
pub use schema::*;
