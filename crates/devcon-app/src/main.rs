//! DEVCON line-driven host.
//!
//! Reads stdin one line at a time and feeds it to a `ConsoleSession` the
//! way a graphical host feeds key events. New console lines are printed
//! after every event, followed by the suggestion list when one is shown.
//! Pass a TOML config path as the first argument (or set `DEVCON_CONFIG`).

mod demo;
mod input;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};

use devcon_console::ConsoleSession;
use devcon_console::provider::register_from_providers;
use devcon_types::config::ConsoleConfig;

use input::InputResult;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEVCON_CONFIG").ok())
        .map(PathBuf::from);
    let config = match config_path {
        Some(path) => ConsoleConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConsoleConfig::default(),
    };
    log::info!(
        "Starting DEVCON (history cap {:?}, log cap {})",
        config.history_capacity,
        config.max_log_lines,
    );

    let mut session = ConsoleSession::new(config)?;
    let counter = demo::CounterCommands::default();
    if let Err(e) = register_from_providers(&mut session, &[&demo::TextCommands, &counter]) {
        log::warn!("Some demo commands were not registered: {e}");
    }

    session.toggle_visibility();
    session.run_startup();

    println!("{}", input::KEYS_HELP);
    let mut printed = print_new_lines(&session, 0);

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let action = input::parse(line.trim_end_matches('\r'));
        if input::handle(action, &mut session) == InputResult::Quit {
            break;
        }
        printed = print_new_lines(&session, printed);
        print_suggestions(&session);
        println!("{}> {}", session.suggestions().title(), session.input());
    }

    log::info!("DEVCON shut down");
    Ok(())
}

/// Print console lines written since `printed`, returning the new mark.
fn print_new_lines(session: &ConsoleSession, printed: u64) -> u64 {
    let log = session.log();
    let fresh = usize::try_from(log.written() - printed).unwrap_or(usize::MAX);
    let palette = &session.config().palette;
    for line in log.tail(fresh) {
        println!("{}", line.markup(palette));
    }
    log.written()
}

fn print_suggestions(session: &ConsoleSession) {
    let suggestions = session.suggestions();
    if !suggestions.is_shown() {
        return;
    }
    for (i, s) in suggestions.results().iter().enumerate() {
        let marker = if suggestions.selected_index() == Some(i) {
            '*'
        } else {
            ' '
        };
        println!("  {marker} {}", s.display);
    }
}
