//! Severity-tagged console output.
//!
//! Every line is forwarded to the `log` facade and kept in a bounded buffer
//! the host UI can draw. Formatting with color markup is provided; drawing
//! is left to the host.

use std::collections::VecDeque;
use std::fmt;

use devcon_types::config::LogPalette;

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Exception,
}

/// A single line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
}

impl LogLine {
    /// Wrap the text in `<color=#RRGGBB>..</color>` for non-info levels.
    pub fn markup(&self, palette: &LogPalette) -> String {
        let color = match self.level {
            LogLevel::Info => return self.text.clone(),
            LogLevel::Warning => palette.warning,
            LogLevel::Error => palette.error,
            LogLevel::Exception => palette.exception,
        };
        format!("<color={}>{}</color>", color.to_hex(), self.text)
    }
}

/// Bounded buffer of console lines, oldest first.
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    lines: VecDeque<LogLine>,
    max_lines: usize,
    written: u64,
}

impl ConsoleLog {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            written: 0,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::info!("{text}");
        self.push(LogLevel::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::warn!("{text}");
        self.push(LogLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("{text}");
        self.push(LogLevel::Error, text);
    }

    /// Record a failure raised by a command body.
    pub fn exception(&mut self, error: &dyn fmt::Display) {
        let text = error.to_string();
        log::error!("command failed: {text}");
        self.push(LogLevel::Exception, text);
    }

    fn push(&mut self, level: LogLevel, text: String) {
        self.lines.push_back(LogLine { level, text });
        self.written += 1;
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Lines pushed since creation. Not reset by `clear` or eviction, so a
    /// host can draw only what arrived since its last look.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// The most recent `count` retained lines, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &LogLine> {
        self.lines.iter().skip(self.lines.len().saturating_sub(count))
    }

    pub fn last(&self) -> Option<&LogLine> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines formatted with `LogLine::markup`, one per row.
    pub fn render_markup(&self, palette: &LogPalette) -> String {
        self.lines
            .iter()
            .map(|line| line.markup(palette))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcon_types::color::Color;

    fn palette() -> LogPalette {
        LogPalette {
            warning: Color::rgb(255, 255, 0),
            error: Color::rgb(255, 0, 0),
            exception: Color::rgb(255, 0, 255),
        }
    }

    #[test]
    fn lines_keep_level_and_order() {
        let mut log = ConsoleLog::new(10);
        log.info("one");
        log.warning("two");
        log.error("three");
        let levels: Vec<LogLevel> = log.lines().map(|l| l.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Info, LogLevel::Warning, LogLevel::Error]
        );
        assert_eq!(log.last().unwrap().text, "three");
    }

    #[test]
    fn cap_drops_oldest() {
        let mut log = ConsoleLog::new(2);
        log.info("a");
        log.info("b");
        log.info("c");
        let texts: Vec<&str> = log.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "c"]);
    }

    #[test]
    fn exception_uses_display() {
        let mut log = ConsoleLog::new(4);
        let err = devcon_types::error::ConsoleError::Command("boom".into());
        log.exception(&err);
        let line = log.last().unwrap();
        assert_eq!(line.level, LogLevel::Exception);
        assert_eq!(line.text, "command error: boom");
    }

    #[test]
    fn markup_colors_non_info_levels() {
        let p = palette();
        let info = LogLine {
            level: LogLevel::Info,
            text: "plain".into(),
        };
        let warn = LogLine {
            level: LogLevel::Warning,
            text: "careful".into(),
        };
        assert_eq!(info.markup(&p), "plain");
        assert_eq!(warn.markup(&p), "<color=#FFFF00>careful</color>");
    }

    #[test]
    fn render_markup_joins_lines() {
        let mut log = ConsoleLog::new(4);
        log.info("> help");
        log.error("nope");
        assert_eq!(
            log.render_markup(&palette()),
            "> help\n<color=#FF0000>nope</color>"
        );
    }

    #[test]
    fn clear_empties_buffer() {
        let mut log = ConsoleLog::new(4);
        log.info("x");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.written(), 1);
    }

    #[test]
    fn tail_follows_written_counter() {
        let mut log = ConsoleLog::new(3);
        for text in ["a", "b", "c", "d", "e"] {
            log.info(text);
        }
        assert_eq!(log.written(), 5);
        let tail: Vec<&str> = log.tail(2).map(|l| l.text.as_str()).collect();
        assert_eq!(tail, vec!["d", "e"]);
        assert_eq!(log.tail(10).count(), 3);
    }
}
