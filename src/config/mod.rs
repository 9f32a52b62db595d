//! Configuration management for mongo-transformer
//!
//! Configuration is read from a TOML file and then overridden by command-line
//! flags. Precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. `MONGO_TRANSFORMER_LOG` for the log filter
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "MONGO_TRANSFORMER_LOG";

/// Largest indent accepted for pretty output
const MAX_INDENT: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (json, jsonp)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// How BSON types are mapped to JSON
    #[serde(default = "default_mode")]
    pub mode: JsonMode,

    /// Enable pretty printing
    #[serde(default)]
    pub pretty: bool,

    /// Indentation width for pretty printing
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Colour pretty-printed output
    #[serde(default)]
    pub color: bool,

    /// Default JSONP callback name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain JSON
    ///
    /// A single document is written as an object, anything else as an array.
    Json,

    /// JSON wrapped in a callback invocation: `callback(<json>)`
    Jsonp,
}

/// BSON to JSON mapping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JsonMode {
    /// Relaxed Extended JSON
    ///
    /// Numbers are native JSON numbers where that loses nothing; ObjectIds
    /// and dates keep their `$oid` / `$date` wrappers.
    Relaxed,

    /// Canonical Extended JSON
    ///
    /// Every BSON type keeps a wrapper, e.g. `{"$numberInt": "1"}`.
    Canonical,

    /// Plain JSON types only
    ///
    /// Example: `{"_id": "65705d84dfc3f3b5094e1f72", "at": "2023-12-06T11:39:48.373Z"}`
    Simplified,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_mode() -> JsonMode {
    JsonMode::Relaxed
}

fn default_indent() -> usize {
    2
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            mode: default_mode(),
            pretty: false,
            indent: default_indent(),
            color: false,
            callback: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file and validate it
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::InvalidFormat(format!("{}: {e}", path.display())),
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFormat(format!("{}: {e}", path.display())))?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_path();
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mongo-transformer")
            .join("config.toml")
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.indent > MAX_INDENT {
            return Err(ConfigError::InvalidValue {
                field: "output.indent".to_string(),
                value: self.output.indent.to_string(),
            }
            .into());
        }

        if let Some(callback) = &self.output.callback
            && callback.is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "output.callback".to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
