//! Commands every console session carries.

use devcon_types::error::Result;

use crate::command::{Command, CommandOutput};
use crate::dispatch::Dispatcher;
use crate::registry::CommandRegistry;

const HELP_TEXT: &str = "\
To call a command                - enter the command name and its arguments
    for example: \"command_name arg_1 arg_2\"
To see all commands              - enter \"list\"
---------------------------------
To force show suggestions        - use the host's show-suggestions key
To switch suggestions context    - use the host's switch-context key or enter \"suggestions-context\"
    available contexts: commands, history
To select suggestions            - use ArrowUp and ArrowDown
To choose a suggestion           - press Tab or Enter
To choose the first suggestion   - press Tab when nothing is selected
To search history                - use ArrowUp and ArrowDown when suggestions are not shown
---------------------------------";

/// Register the console's own commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    reg.register_all([
        Box::new(HelpCmd) as Box<dyn Command>,
        Box::new(ListCmd),
        Box::new(ClearCmd),
        Box::new(SuggestionsContextCmd),
    ])
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Print help"
    }
    fn execute(&self, _args: &str, _shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(HELP_TEXT.to_string()))
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

struct ListCmd;
impl Command for ListCmd {
    fn name(&self) -> &str {
        "list"
    }
    fn description(&self) -> &str {
        "Print all command names with descriptions"
    }
    fn execute(&self, _args: &str, shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        let mut out = String::new();
        for (name, description) in shell.registry().list_commands() {
            out.push_str(&format!("  - {name}\n        {description}\n"));
        }
        Ok(CommandOutput::Text(out.trim_end().to_string()))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear console log"
    }
    fn execute(&self, _args: &str, _shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// suggestions-context
// ---------------------------------------------------------------------------

struct SuggestionsContextCmd;
impl Command for SuggestionsContextCmd {
    fn name(&self) -> &str {
        "suggestions-context"
    }
    fn description(&self) -> &str {
        "Switch suggestions context"
    }
    fn execute(&self, _args: &str, _shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::SwitchSuggestionContext)
    }
}
