//! Line dispatch: resolve the command token and hand over the rest.

use devcon_types::error::{ConsoleError, Result};

use crate::command::CommandOutput;
use crate::console_log::ConsoleLog;
use crate::history::HistoryBuffer;
use crate::registry::CommandRegistry;

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The first token did not name a registered command.
    CommandNotFound { name: String },
    /// The command ran with `arguments` and produced `output`.
    Dispatched {
        command: String,
        arguments: String,
        output: CommandOutput,
    },
}

/// Dispatches lines against a registry, recording them into history.
///
/// The dispatcher is also what a command receives while it runs, so a
/// command body can read the registry, write to the console log, or call
/// `execute` again for a nested line.
///
/// Signals produced by a nested line are consumed where they occur: `Clear`
/// empties the log at once and a context switch is queued for the session
/// (see `take_context_switches`). The calling command sees
/// `CommandOutput::None` in their place.
pub struct Dispatcher<'a> {
    registry: &'a CommandRegistry,
    history: &'a mut HistoryBuffer,
    log: &'a mut ConsoleLog,
    depth: usize,
    context_switches: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        history: &'a mut HistoryBuffer,
        log: &'a mut ConsoleLog,
    ) -> Self {
        Self {
            registry,
            history,
            log,
            depth: 0,
            context_switches: 0,
        }
    }

    pub fn registry(&self) -> &'a CommandRegistry {
        self.registry
    }

    pub fn history(&self) -> &HistoryBuffer {
        &*self.history
    }

    pub fn log(&mut self) -> &mut ConsoleLog {
        &mut *self.log
    }

    /// Execute a raw command line.
    ///
    /// The line is recorded into history and echoed to the log before the
    /// lookup, so it stays recallable even if the command fails. An unknown
    /// command is an ordinary outcome; an error from the command body is
    /// returned unchanged.
    pub fn execute(&mut self, raw_line: &str) -> Result<ExecutionOutcome> {
        if raw_line.trim().is_empty() {
            return Err(ConsoleError::EmptyCommandLine);
        }

        self.history.record(raw_line);
        self.log.info(format!("> {raw_line}"));

        let token = command_token(raw_line);
        let registry = self.registry;
        let Some(command) = registry.get(token) else {
            self.log.error(format!(
                "There is no command with name \"{token}\". Enter \"help\" to see command usage."
            ));
            return Ok(ExecutionOutcome::CommandNotFound {
                name: token.to_string(),
            });
        };

        let arguments = raw_line
            .get(command.name().len()..)
            .unwrap_or_default()
            .trim();
        log::debug!("Dispatching '{}' with {arguments:?}", command.name());
        self.depth += 1;
        let result = command.execute(arguments, self);
        self.depth -= 1;
        let mut output = result?;
        if self.depth > 0 {
            output = self.consume_signal(output);
        }

        Ok(ExecutionOutcome::Dispatched {
            command: command.name().to_string(),
            arguments: arguments.to_string(),
            output,
        })
    }

    /// Context switches requested by nested lines since the last call.
    pub fn take_context_switches(&mut self) -> usize {
        std::mem::take(&mut self.context_switches)
    }

    fn consume_signal(&mut self, output: CommandOutput) -> CommandOutput {
        match output {
            CommandOutput::Clear => {
                self.log.clear();
                CommandOutput::None
            },
            CommandOutput::SwitchSuggestionContext => {
                self.context_switches += 1;
                CommandOutput::None
            },
            other => other,
        }
    }
}

/// The text before the first whitespace character, or the whole line.
pub(crate) fn command_token(line: &str) -> &str {
    line.split(char::is_whitespace).next().unwrap_or(line)
}
