//! In-process developer console engine.
//!
//! The console is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The dispatcher resolves the
//! first token of a line and forwards the rest to the command, while the
//! suggestion session ranks registered commands or past input against
//! whatever the operator is typing. `ConsoleSession` ties the pieces
//! together for a host UI.

mod builtins;
mod command;
mod console_log;
mod dispatch;
mod history;
pub mod provider;
mod registry;
mod session;
pub mod suggest;

/// Register the console's own commands (help, list, clear, suggestions-context).
pub use builtins::register_builtins;
/// A single executable command trait.
pub use command::Command;
/// Output produced by a command (text or a signal for the session).
pub use command::CommandOutput;
/// A command built from a closure.
pub use command::FnCommand;
/// Severity-tagged console output buffer.
pub use console_log::{ConsoleLog, LogLevel, LogLine};
/// Line dispatcher handed to every command.
pub use dispatch::{Dispatcher, ExecutionOutcome};
/// Command-line history with up/down recall.
pub use history::HistoryBuffer;
/// Registry of available commands.
pub use registry::CommandRegistry;
/// The orchestrator a host UI drives.
pub use session::ConsoleSession;
