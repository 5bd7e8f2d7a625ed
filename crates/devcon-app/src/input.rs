//! Maps stdin lines to console input events.
//!
//! A terminal has no arrow or tab keys we can read line by line, so the
//! keys a graphical host would bind are spelled as `:`-prefixed words.

use devcon_console::{ConsoleSession, ExecutionOutcome};

/// One host input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    HistoryUp,
    HistoryDown,
    SuggestionUp,
    SuggestionDown,
    Commit,
    SwitchContext,
    ShowSuggestions,
    Dismiss,
    Toggle,
    PrintLog,
    Quit,
    /// The input field now holds this text.
    Type(String),
    /// Enter pressed on this line.
    Submit(String),
}

/// Whether the driver loop keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

pub const KEYS_HELP: &str = "\
keys: :up :down (history)  :prev :next (suggestions)  :tab (choose)
      :ctx (switch context)  :show  :esc  :toggle  :log  :quit
      ?text sets the input without submitting; enter on an empty line submits it";

pub fn parse(line: &str) -> Action {
    match line {
        ":up" => Action::HistoryUp,
        ":down" => Action::HistoryDown,
        ":prev" => Action::SuggestionUp,
        ":next" => Action::SuggestionDown,
        ":tab" => Action::Commit,
        ":ctx" => Action::SwitchContext,
        ":show" => Action::ShowSuggestions,
        ":esc" => Action::Dismiss,
        ":toggle" => Action::Toggle,
        ":log" => Action::PrintLog,
        ":quit" | ":q" => Action::Quit,
        _ => match line.strip_prefix('?') {
            Some(text) => Action::Type(text.to_string()),
            None => Action::Submit(line.to_string()),
        },
    }
}

/// Apply one action to the session.
///
/// An empty submit sends whatever the session holds as input, so a line
/// recalled with `:up` or completed with `:tab` can be run with a bare enter.
pub fn handle(action: Action, session: &mut ConsoleSession) -> InputResult {
    match action {
        Action::HistoryUp => {
            if session.navigate_history_up().is_none() {
                log::debug!("No older history entry");
            }
        },
        Action::HistoryDown => {
            if session.navigate_history_down().is_none() {
                session.text_changed("");
            }
        },
        Action::SuggestionUp => {
            session.navigate_suggestion_up();
        },
        Action::SuggestionDown => {
            session.navigate_suggestion_down();
        },
        Action::Commit => {
            session.commit_suggestion();
        },
        Action::SwitchContext => session.switch_suggestion_context(),
        Action::ShowSuggestions => session.force_show_suggestions(),
        Action::Dismiss => session.dismiss_suggestions(),
        Action::Toggle => {
            let open = session.toggle_visibility();
            log::info!("Console {}", if open { "opened" } else { "closed" });
        },
        Action::PrintLog => println!("{}", session.render_log()),
        Action::Quit => return InputResult::Quit,
        Action::Type(text) => session.text_changed(&text),
        Action::Submit(line) => {
            let line = if line.trim().is_empty() {
                session.input().to_string()
            } else {
                line
            };
            match session.submit(&line) {
                Ok(ExecutionOutcome::CommandNotFound { name }) => {
                    log::debug!("Unknown command '{name}'");
                },
                Ok(ExecutionOutcome::Dispatched { .. }) => {},
                // Already in the console log.
                Err(e) => log::debug!("Submit failed: {e}"),
            }
        },
    }
    InputResult::Continue
}
