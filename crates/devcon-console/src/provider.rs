//! Command providers: the seam for code that discovers commands.
//!
//! How commands are found (build-time tables, plugin manifests, explicit
//! lists) is up to the provider. Providers only hand over `Command` values;
//! this module resolves name clashes between providers and feeds the result
//! through `ConsoleSession::register_commands`.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use devcon_types::error::Result;

use crate::command::{Command, CommandOutput};
use crate::dispatch::Dispatcher;
use crate::session::ConsoleSession;

/// Something that contributes commands to a console.
pub trait CommandProvider {
    /// Owner name used to prefix commands whose names clash.
    fn owner(&self) -> &str;

    fn commands(&self) -> Vec<Box<dyn Command>>;
}

/// A command exposed under a different name.
struct Prefixed {
    name: String,
    inner: Box<dyn Command>,
}

impl Command for Prefixed {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn options_hint(&self) -> &str {
        self.inner.options_hint()
    }

    fn execute(&self, args: &str, shell: &mut Dispatcher<'_>) -> Result<CommandOutput> {
        self.inner.execute(args, shell)
    }
}

/// Collect the commands of every provider.
///
/// A name offered by more than one command is ambiguous: each of those
/// commands is renamed `owner.name`. Unique names are kept as they are.
pub fn disambiguate(providers: &[&dyn CommandProvider]) -> Vec<Box<dyn Command>> {
    let collected: Vec<(&str, Box<dyn Command>)> = providers
        .iter()
        .flat_map(|p| p.commands().into_iter().map(move |c| (p.owner(), c)))
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, cmd) in &collected {
        *counts.entry(cmd.name().to_string()).or_default() += 1;
    }

    collected
        .into_iter()
        .map(|(owner, cmd)| {
            if counts[cmd.name()] > 1 {
                let name = format!("{owner}.{}", cmd.name());
                log::debug!("Renaming ambiguous command '{}' to '{name}'", cmd.name());
                Box::new(Prefixed { name, inner: cmd }) as Box<dyn Command>
            } else {
                cmd
            }
        })
        .collect()
}

/// Disambiguate and register the commands of every provider, logging how
/// long it took.
pub fn register_from_providers(
    session: &mut ConsoleSession,
    providers: &[&dyn CommandProvider],
) -> Result<()> {
    log::info!("Collecting commands from {} providers...", providers.len());
    let started = Instant::now();

    let commands = disambiguate(providers);
    let count = commands.len();
    let result = session.register_commands(commands);

    let elapsed = started.elapsed();
    log::log!(
        elapsed_level(elapsed),
        "Collected {count} commands in {}.{:03}s",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );
    result
}

fn elapsed_level(elapsed: Duration) -> log::Level {
    match elapsed.as_secs() {
        0 => log::Level::Info,
        1 => log::Level::Warn,
        _ => log::Level::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;
    use devcon_types::config::ConsoleConfig;
    use devcon_types::error::ConsoleError;

    struct Static {
        owner: &'static str,
        names: &'static [&'static str],
    }

    impl CommandProvider for Static {
        fn owner(&self) -> &str {
            self.owner
        }

        fn commands(&self) -> Vec<Box<dyn Command>> {
            let owner = self.owner;
            self.names
                .iter()
                .map(|&name| {
                    FnCommand::new(name, format!("from {owner}"), move |args, _| {
                        Ok(CommandOutput::Text(format!("{owner}:{args}")))
                    })
                    .with_options_hint("value")
                    .boxed()
                })
                .collect()
        }
    }

    fn names(commands: &[Box<dyn Command>]) -> Vec<&str> {
        commands.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn unique_names_are_untouched() {
        let a = Static {
            owner: "Player",
            names: &["jump"],
        };
        let b = Static {
            owner: "World",
            names: &["time"],
        };
        let commands = disambiguate(&[&a, &b]);
        assert_eq!(names(&commands), vec!["jump", "time"]);
    }

    #[test]
    fn clashing_names_get_owner_prefix() {
        let a = Static {
            owner: "Player",
            names: &["reset", "jump"],
        };
        let b = Static {
            owner: "World",
            names: &["reset"],
        };
        let commands = disambiguate(&[&a, &b]);
        assert_eq!(
            names(&commands),
            vec!["Player.reset", "jump", "World.reset"]
        );
        assert_eq!(commands[2].description(), "from World");
        assert_eq!(commands[2].options_hint(), "value");
    }

    #[test]
    fn prefixed_commands_dispatch_to_inner() {
        let a = Static {
            owner: "Player",
            names: &["reset"],
        };
        let b = Static {
            owner: "World",
            names: &["reset"],
        };
        let mut session = ConsoleSession::new(ConsoleConfig {
            startup_commands: Vec::new(),
            ..ConsoleConfig::default()
        })
        .unwrap();
        register_from_providers(&mut session, &[&a, &b]).unwrap();
        assert!(session.registry().contains("World.reset"));
        assert!(!session.registry().contains("reset"));

        session.submit("World.reset all").unwrap();
        assert_eq!(session.log().last().unwrap().text, "World:all");
    }

    #[test]
    fn provider_clashing_with_builtin_is_rejected() {
        let a = Static {
            owner: "Game",
            names: &["help", "spawn"],
        };
        let mut session = ConsoleSession::new(ConsoleConfig::default()).unwrap();
        let err = register_from_providers(&mut session, &[&a]).unwrap_err();
        assert!(matches!(err, ConsoleError::DuplicateCommand { .. }));
        assert!(session.registry().contains("spawn"));
    }

    #[test]
    fn elapsed_thresholds() {
        assert_eq!(elapsed_level(Duration::from_millis(300)), log::Level::Info);
        assert_eq!(elapsed_level(Duration::from_millis(1500)), log::Level::Warn);
        assert_eq!(elapsed_level(Duration::from_secs(4)), log::Level::Error);
    }
}
