//! The console session a host UI drives.

use devcon_types::config::ConsoleConfig;
use devcon_types::error::{ConsoleError, Result};

use crate::builtins::register_builtins;
use crate::command::{Command, CommandOutput};
use crate::console_log::ConsoleLog;
use crate::dispatch::{Dispatcher, ExecutionOutcome};
use crate::history::HistoryBuffer;
use crate::registry::CommandRegistry;
use crate::suggest::{Suggestion, SuggestionContext, SuggestionSession};

/// Owns the registry, history, suggestions and log of one console.
///
/// Every method corresponds to an input event from the host (a submitted
/// line, an edit, a navigation key). The session mirrors the input text it
/// has been told about so that context switches and forced refreshes can
/// rank against it.
pub struct ConsoleSession {
    config: ConsoleConfig,
    registry: CommandRegistry,
    history: HistoryBuffer,
    suggestions: SuggestionSession,
    log: ConsoleLog,
    input: String,
    open: bool,
}

impl ConsoleSession {
    /// Create a session with the built-in commands registered.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let mut registry = CommandRegistry::new(config.duplicate_policy);
        register_builtins(&mut registry)?;

        let history = match config.history_capacity {
            Some(cap) => HistoryBuffer::with_capacity(cap),
            None => HistoryBuffer::new(),
        }
        .dedupe_consecutive(config.dedupe_history);

        Ok(Self {
            log: ConsoleLog::new(config.max_log_lines),
            config,
            registry,
            history,
            suggestions: SuggestionSession::new(),
            input: String::new(),
            open: false,
        })
    }

    /// Submit the configured startup lines. Failures are logged, not fatal.
    pub fn run_startup(&mut self) {
        let lines = self.config.startup_commands.clone();
        for line in &lines {
            if let Err(e) = self.submit(line) {
                log::warn!("Startup command '{line}' failed: {e}");
            }
        }
    }

    pub fn register_commands<I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        let result = self.registry.register_all(commands);
        if let Err(ref e) = result {
            self.log.warning(format!("Command registration: {e}"));
        }
        result
    }

    /// Execute a submitted line.
    ///
    /// The input is cleared first, as the host clears its text field on
    /// submit. Signals returned by the command are applied to the session,
    /// as are context switches requested by lines it ran in turn. A failing
    /// command is logged as an exception and its error returned.
    pub fn submit(&mut self, line: &str) -> Result<ExecutionOutcome> {
        if line.trim().is_empty() {
            return Err(ConsoleError::EmptyCommandLine);
        }
        self.text_changed("");

        let mut dispatcher = Dispatcher::new(&self.registry, &mut self.history, &mut self.log);
        let result = dispatcher.execute(line);
        let nested_switches = dispatcher.take_context_switches();
        for _ in 0..nested_switches {
            self.switch_suggestion_context();
        }

        match result {
            Ok(outcome) => {
                if let ExecutionOutcome::Dispatched { ref output, .. } = outcome {
                    self.apply_output(output);
                }
                Ok(outcome)
            },
            Err(e) => {
                self.log.exception(&e);
                Err(e)
            },
        }
    }

    fn apply_output(&mut self, output: &CommandOutput) {
        match output {
            CommandOutput::Text(text) => {
                if !text.is_empty() {
                    self.log.info(text.as_str());
                }
            },
            CommandOutput::None => {},
            CommandOutput::Clear => self.log.clear(),
            CommandOutput::SwitchSuggestionContext => self.switch_suggestion_context(),
        }
    }

    /// The host's input text changed.
    ///
    /// Editing a recalled line ends history browsing, so the next recall
    /// starts again from the newest entry.
    pub fn text_changed(&mut self, text: &str) {
        if self.history.current() != Some(text) {
            self.history.reset();
        }
        self.input = text.to_string();
        self.refresh_suggestions(false);
    }

    /// Recompute suggestions for the current input. A refresh that leaves
    /// nothing to show hides the panel, and a hidden panel always falls back
    /// to the commands context.
    fn refresh_suggestions(&mut self, forced: bool) {
        let source = self
            .suggestions
            .context()
            .source(&self.registry, &self.history);
        self.suggestions.refresh(source.as_ref(), &self.input, forced);
        if !self.suggestions.is_shown() {
            self.suggestions.set_context(SuggestionContext::Commands);
        }
    }

    /// Toggle commands <-> history and show the new context's results.
    ///
    /// Switching to an empty history shows nothing, so the session lands
    /// back on commands.
    pub fn switch_suggestion_context(&mut self) {
        let next = self.suggestions.context().toggled();
        self.suggestions.set_context(next);
        self.refresh_suggestions(true);
    }

    /// Show suggestions even for empty input.
    pub fn force_show_suggestions(&mut self) {
        self.refresh_suggestions(true);
    }

    /// Hide the suggestion list: back to the commands context, unforced
    /// refresh of the current input, nothing selected.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.set_context(SuggestionContext::Commands);
        self.refresh_suggestions(false);
        self.suggestions.deselect();
    }

    /// Recall an older line. Meaningful while no suggestions are shown.
    pub fn navigate_history_up(&mut self) -> Option<String> {
        let line = self.history.try_move_up().ok()?.to_string();
        self.input.clone_from(&line);
        Some(line)
    }

    /// Recall a newer line; `None` once past the newest entry.
    pub fn navigate_history_down(&mut self) -> Option<String> {
        let line = self.history.try_move_down().ok()?.to_string();
        self.input.clone_from(&line);
        Some(line)
    }

    pub fn navigate_suggestion_up(&mut self) -> Option<Suggestion> {
        self.suggestions.move_selection_up();
        self.suggestions.selected().cloned()
    }

    pub fn navigate_suggestion_down(&mut self) -> Option<Suggestion> {
        self.suggestions.move_selection_down();
        self.suggestions.selected().cloned()
    }

    /// Choose the selected (or first) suggestion.
    ///
    /// The input becomes the suggestion's completion followed by a space,
    /// and is handled as a text change.
    pub fn commit_suggestion(&mut self) -> Option<Suggestion> {
        let chosen = self.suggestions.commit_selection()?.clone();
        let text = format!("{} ", chosen.item.completion());
        self.text_changed(&text);
        Some(chosen)
    }

    /// Show or hide the console. Opening resets the suggestion context;
    /// either way the input is cleared. Returns whether it is now open.
    pub fn toggle_visibility(&mut self) -> bool {
        self.open = !self.open;
        if self.open {
            self.suggestions.set_context(SuggestionContext::Commands);
        }
        self.text_changed("");
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn suggestions(&self) -> &SuggestionSession {
        &self.suggestions
    }

    pub fn log(&self) -> &ConsoleLog {
        &self.log
    }

    /// The console log formatted with the configured palette.
    pub fn render_log(&self) -> String {
        self.log.render_markup(&self.config.palette)
    }
}
