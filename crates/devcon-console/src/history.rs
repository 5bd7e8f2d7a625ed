//! Command-line history with up/down recall.

use devcon_types::error::{ConsoleError, Result};

/// Ordered log of submitted lines (oldest first) with a browsing cursor.
///
/// The cursor is either `None` ("not browsing") or a valid index into the
/// entries. Recording a line always ends browsing.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    entries: Vec<String>,
    cursor: Option<usize>,
    capacity: Option<usize>,
    dedupe: bool,
}

impl HistoryBuffer {
    /// Unbounded history that records every line.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `capacity` entries, evicting the oldest.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::default()
        }
    }

    /// Skip lines identical to the newest entry.
    pub fn dedupe_consecutive(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Append a line verbatim. Blank lines are ignored.
    pub fn record(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.cursor = None;
        if self.dedupe && self.entries.last().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push(line.to_string());
        if let Some(cap) = self.capacity
            && self.entries.len() > cap
        {
            self.entries.remove(0);
        }
    }

    /// Step toward older entries.
    ///
    /// From "not browsing" this lands on the newest entry. At the oldest
    /// entry the cursor stays put and `NoMoreHistory` is returned.
    pub fn try_move_up(&mut self) -> Result<&str> {
        let next = match self.cursor {
            None => self.entries.len().checked_sub(1),
            Some(i) => i.checked_sub(1),
        };
        let i = next.ok_or(ConsoleError::NoMoreHistory)?;
        self.cursor = Some(i);
        Ok(&self.entries[i])
    }

    /// Step toward newer entries.
    ///
    /// Moving past the newest entry ends browsing and returns
    /// `NoMoreHistory`, telling the caller to fall back to an empty line.
    pub fn try_move_down(&mut self) -> Result<&str> {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                Ok(&self.entries[i + 1])
            },
            _ => {
                self.cursor = None;
                Err(ConsoleError::NoMoreHistory)
            },
        }
    }

    /// Stop browsing without touching the entries.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// The entry under the cursor, if browsing.
    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|i| self.entries[i].as_str())
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Entries oldest first.
    pub fn all(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
