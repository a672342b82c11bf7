mod config;

pub use config::{Config, GoalsConfig, ProfileConfig, TasksConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/minddoer[-dev]/` based on MINDDOER_ENV.
///
/// Set MINDDOER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MINDDOER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("minddoer-dev")
    } else {
        base_dir.join("minddoer")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
