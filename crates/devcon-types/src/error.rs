//! Error types for DEVCON.

use std::io;

/// Errors produced by the console engine.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("duplicate command name: {}", .names.join(", "))]
    DuplicateCommand { names: Vec<String> },

    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),

    #[error("no more history")]
    NoMoreHistory,

    #[error("empty command line")]
    EmptyCommandLine,

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
