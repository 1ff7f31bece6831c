//! Configuration loading and discovery for `styleforge.toml`
//!
//! Provides functions to find and load configuration. Both TOML and JSON5
//! (`styleforge.json`) files are accepted.

use super::schema::StyleConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names tried in each directory, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["styleforge.toml", "styleforge.json"];

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// JSON5 parsing error
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },
    /// Extension is neither TOML nor JSON
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Find a config file by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a config file is found
/// - `None` if none exists in this directory or any parent
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find a config file by walking up from a specific directory.
///
/// Useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config()`] to locate one. With no config file anywhere, returns
/// [`StyleConfig::default()`].
///
/// When the file does not set `cwd`, the directory containing the file
/// becomes the project root.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("app/styleforge.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<StyleConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no styleforge config found, using defaults");
            Ok(StyleConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<StyleConfig, ConfigError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let mut config = parse_config(path, &contents)?;

    if config.cwd.is_none() {
        config.cwd = path.parent().map(|p| p.to_path_buf());
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Parse config text, choosing the format from the file extension.
pub fn parse_config(path: &Path, contents: &str) -> Result<StyleConfig, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(contents)
            .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source }),
        Some("json") | Some("json5") => json5::from_str(contents)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source }),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
