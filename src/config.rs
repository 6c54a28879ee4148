// This file is part of the product SceneTag.
// SPDX-FileCopyrightText: 2026 SceneTag Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

const MAX_PREFIX_CHARS: usize = 8;

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_database_path() -> String {
    "tags.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), err))
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|err| {
            ConfigError::LoadError(format!("Failed to parse {}: {}", path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config.yaml` from the runtime root, writing a default file
    /// on first run. The bool reports whether the file was created.
    pub fn load_or_init(root: &Path) -> Result<(Config, bool), ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            let content = serde_yaml::to_string(&config).map_err(|err| {
                ConfigError::LoadError(format!("Failed to serialize default config: {}", err))
            })?;
            fs::write(&path, content).map_err(|err| {
                ConfigError::LoadError(format!("Failed to write {}: {}", path.display(), err))
            })?;
            return Ok((config, true));
        }
        Ok((Config::load(&path)?, false))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "bot.prefix must not be empty".to_string(),
            ));
        }
        if self.bot.prefix.chars().count() > MAX_PREFIX_CHARS {
            return Err(ConfigError::ValidationError(format!(
                "bot.prefix must be at most {} characters",
                MAX_PREFIX_CHARS
            )));
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(
                "bot.prefix must not contain whitespace".to_string(),
            ));
        }
        if self.database.path.is_empty() {
            return Err(ConfigError::ValidationError(
                "database.path must not be empty".to_string(),
            ));
        }
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                other
            ))),
        }
    }
}
