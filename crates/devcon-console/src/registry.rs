//! Command registry with conflict-safe registration.

use std::collections::HashMap;

use devcon_types::config::DuplicatePolicy;
use devcon_types::error::{ConsoleError, Result};

use crate::command::Command;

/// Registry of available commands.
///
/// Commands are kept in registration order; `all()` and everything built on
/// it (the `list` output, command suggestions) see that order.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    index: HashMap<String, usize>,
    policy: DuplicatePolicy,
}

impl CommandRegistry {
    /// Create an empty registry with the given collision policy.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a single command.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        self.register_all([cmd])
    }

    /// Register a batch of commands.
    ///
    /// Names are validated up front: if any name is empty or contains
    /// whitespace, nothing from the batch is registered. Under
    /// `DuplicatePolicy::Reject` every non-conflicting command is still
    /// registered and the error lists each rejected name. Under
    /// `DuplicatePolicy::Replace` the later command takes over the slot of
    /// the earlier one.
    pub fn register_all<I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        let commands: Vec<Box<dyn Command>> = commands.into_iter().collect();
        if let Some(bad) = commands.iter().find(|c| !is_valid_name(c.name())) {
            return Err(ConsoleError::InvalidCommandName(bad.name().to_string()));
        }

        let mut rejected = Vec::new();
        for cmd in commands {
            let name = cmd.name().to_string();
            match (self.index.get(&name).copied(), self.policy) {
                (None, _) => {
                    log::debug!("Registered command '{name}'");
                    self.index.insert(name, self.commands.len());
                    self.commands.push(cmd);
                },
                (Some(slot), DuplicatePolicy::Replace) => {
                    log::warn!("Command '{name}' replaced by a later registration");
                    self.commands[slot] = cmd;
                },
                (Some(_), DuplicatePolicy::Reject) => {
                    log::warn!("Command '{name}' is already registered, skipping");
                    rejected.push(name);
                },
            }
        }

        if rejected.is_empty() {
            Ok(())
        } else {
            Err(ConsoleError::DuplicateCommand { names: rejected })
        }
    }

    /// Look up a command by its exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.index.get(name).map(|&i| self.commands[i].as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All commands in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// (name, description) pairs in registration order.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.all().map(|c| (c.name(), c.description())).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
