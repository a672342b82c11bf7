//! TOML-based application configuration.
//!
//! Stores:
//! - Profile details used to personalize messages
//! - Defaults applied when adding tasks mid-day
//! - Goal memory retrieval settings
//!
//! Configuration is stored at `~/.config/minddoer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::profile::{MotivationStyle, SleepSchedule, UserProfile};
use crate::task::{EnergyRequirement, Priority, TaskCategory, TaskDefaults};

/// Profile section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_bedtime")]
    pub bedtime: String,
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default)]
    pub motivation_style: MotivationStyle,
}

/// Defaults for tasks added through the mutation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    #[serde(default)]
    pub default_category: TaskCategory,
    #[serde(default)]
    pub default_energy: EnergyRequirement,
}

/// Goal memory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Number of matches returned by `goals query`
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Embedding dimension for new indexes
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/minddoer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

// Default functions
fn default_name() -> String {
    "User".into()
}
fn default_timezone() -> String {
    "Local".into()
}
fn default_bedtime() -> String {
    SleepSchedule::default().bedtime
}
fn default_wake_time() -> String {
    SleepSchedule::default().wake_time
}
fn default_minutes() -> u32 {
    30
}
fn default_top_k() -> usize {
    2
}
fn default_dimension() -> usize {
    256
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            timezone: default_timezone(),
            bedtime: default_bedtime(),
            wake_time: default_wake_time(),
            motivation_style: MotivationStyle::default(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        let defaults = TaskDefaults::default();
        Self {
            default_priority: defaults.priority,
            default_minutes: defaults.estimated_minutes,
            default_category: defaults.category,
            default_energy: defaults.energy_required,
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            dimension: default_dimension(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: ProfileConfig::default(),
            tasks: TasksConfig::default(),
            goals: GoalsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the default cannot
    /// be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Defaults for the task mutation API.
    pub fn task_defaults(&self) -> TaskDefaults {
        TaskDefaults {
            priority: self.tasks.default_priority,
            estimated_minutes: self.tasks.default_minutes,
            category: self.tasks.default_category,
            energy_required: self.tasks.default_energy,
        }
    }

    /// Profile for `name`, or the configured name when `None`.
    pub fn user_profile(&self, name: Option<&str>) -> UserProfile {
        let mut profile = UserProfile::new(name.unwrap_or(&self.profile.name));
        profile.timezone = self.profile.timezone.clone();
        profile.sleep_schedule = SleepSchedule {
            bedtime: self.profile.bedtime.clone(),
            wake_time: self.profile.wake_time.clone(),
        };
        profile.motivation_style = self.profile.motivation_style;
        profile
    }
}
