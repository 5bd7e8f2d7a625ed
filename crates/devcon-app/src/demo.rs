//! Demo command providers.

use std::cell::Cell;
use std::rc::Rc;

use devcon_console::provider::CommandProvider;
use devcon_console::{Command, CommandOutput, ExecutionOutcome, FnCommand};
use devcon_types::error::ConsoleError;

/// Text utilities.
pub struct TextCommands;

impl CommandProvider for TextCommands {
    fn owner(&self) -> &str {
        "Text"
    }

    fn commands(&self) -> Vec<Box<dyn Command>> {
        vec![
            FnCommand::new("echo", "Print the arguments", |args, _| {
                Ok(CommandOutput::Text(args.to_string()))
            })
            .with_options_hint("text")
            .boxed(),
            FnCommand::new("upper", "Print the arguments in upper case", |args, _| {
                Ok(CommandOutput::Text(args.to_uppercase()))
            })
            .with_options_hint("text")
            .boxed(),
            FnCommand::new("reset", "Print nothing, loudly", |_, shell| {
                shell.log().warning("text reset is a no-op");
                Ok(CommandOutput::None)
            })
            .boxed(),
        ]
    }
}

/// A counter shared by its commands.
#[derive(Default)]
pub struct CounterCommands {
    value: Rc<Cell<i64>>,
}

impl CommandProvider for CounterCommands {
    fn owner(&self) -> &str {
        "Counter"
    }

    fn commands(&self) -> Vec<Box<dyn Command>> {
        let add = Rc::clone(&self.value);
        let reset = Rc::clone(&self.value);
        vec![
            FnCommand::new("add", "Add an integer to the counter", move |args, _| {
                let n: i64 = args
                    .parse()
                    .map_err(|e| ConsoleError::Command(format!("add {args:?}: {e}")))?;
                add.set(add.get() + n);
                Ok(CommandOutput::Text(format!("counter = {}", add.get())))
            })
            .with_options_hint("n")
            .boxed(),
            FnCommand::new("reset", "Set the counter to zero", move |_, _| {
                reset.set(0);
                Ok(CommandOutput::Text("counter = 0".to_string()))
            })
            .boxed(),
            FnCommand::new("repeat", "Run a line several times", |args, shell| {
                let (count, line) = args.split_once(char::is_whitespace).ok_or_else(|| {
                    ConsoleError::Command("usage: repeat <count> <line>".to_string())
                })?;
                let count: usize = count
                    .parse()
                    .map_err(|e| ConsoleError::Command(format!("repeat count: {e}")))?;
                for _ in 0..count {
                    if let ExecutionOutcome::Dispatched {
                        output: CommandOutput::Text(text),
                        ..
                    } = shell.execute(line.trim())?
                    {
                        shell.log().info(text);
                    }
                }
                Ok(CommandOutput::None)
            })
            .with_options_hint("count line")
            .boxed(),
        ]
    }
}
