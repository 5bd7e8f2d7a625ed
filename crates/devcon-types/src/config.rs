//! Console configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working console:
//!
//! ```toml
//! duplicate_policy = "replace"
//! history_capacity = 200
//! dedupe_history = true
//! max_log_lines = 1000
//! startup_commands = ["help"]
//!
//! [palette]
//! warning = "#FFCC00"
//! error = "#FF5050"
//! exception = "#FF40FF"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::color::Color;
use crate::error::{ConsoleError, Result};

/// What the command registry does when a name is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first command and report the newcomer as a duplicate.
    #[default]
    Reject,
    /// The last registration wins and takes over the existing slot.
    Replace,
}

/// Colors used when the console log is formatted with markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogPalette {
    pub warning: Color,
    pub error: Color,
    pub exception: Color,
}

impl Default for LogPalette {
    fn default() -> Self {
        Self {
            warning: Color::rgb(255, 204, 0),
            error: Color::rgb(255, 80, 80),
            exception: Color::rgb(255, 64, 255),
        }
    }
}

/// Top-level console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Maximum history entries; `None` keeps every line.
    pub history_capacity: Option<usize>,
    /// Skip recording a line identical to the newest history entry.
    pub dedupe_history: bool,
    /// Maximum lines retained by the console log.
    pub max_log_lines: usize,
    /// Lines submitted by `ConsoleSession::run_startup`.
    pub startup_commands: Vec<String>,
    pub palette: LogPalette,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            history_capacity: None,
            dedupe_history: false,
            max_log_lines: 500,
            startup_commands: vec!["clear".to_string(), "help".to_string()],
            palette: LogPalette::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded console config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_log_lines == 0 {
            return Err(ConsoleError::Config(
                "max_log_lines must be at least 1".to_string(),
            ));
        }
        if self.history_capacity == Some(0) {
            return Err(ConsoleError::Config(
                "history_capacity must be at least 1 (omit it for no limit)".to_string(),
            ));
        }
        Ok(())
    }
}
