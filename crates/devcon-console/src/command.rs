//! The `Command` trait and the closure-backed `FnCommand`.

use devcon_types::error::Result;

use crate::dispatch::Dispatcher;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Text appended to the console log.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the console log.
    Clear,
    /// Signal to toggle the suggestion context (commands <-> history).
    SwitchSuggestionContext,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types). Unique, no whitespace.
    fn name(&self) -> &str;

    /// One-line description for `list`.
    fn description(&self) -> &str;

    /// Display-only usage summary shown next to the name in suggestions.
    fn options_hint(&self) -> &str {
        ""
    }

    /// Execute the command with everything after its name.
    ///
    /// `args` has surrounding whitespace trimmed. The dispatcher gives access
    /// to the registry, the console log and nested `execute` calls.
    fn execute(&self, args: &str, shell: &mut Dispatcher<'_>) -> Result<CommandOutput>;
}

type Handler = Box<dyn Fn(&str, &mut Dispatcher<'_>) -> Result<CommandOutput>>;

/// A command whose body is a closure.
pub struct FnCommand {
    name: String,
    description: String,
    options_hint: String,
    handler: Handler,
}

impl FnCommand {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &mut Dispatcher<'_>) -> Result<CommandOutput> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            options_hint: String::new(),
            handler: Box::new(handler),
        }
    }

    /// Set the usage summary shown in suggestions.
    pub fn with_options_hint(mut self, hint: impl Into<String>) -> Self {
        self.options_hint = hint.into();
        self
    }

    /// Box the command for registration.
    pub fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn options_hint(&self) -> &str {
        &self.options_hint
    }

    fn execute(&self, args: &str, shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        (self.handler)(args, shell)
    }
}

impl std::fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("options_hint", &self.options_hint)
            .finish_non_exhaustive()
    }
}
