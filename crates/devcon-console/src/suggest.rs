//! Ranked suggestions over registered commands or input history.
//!
//! Both sources share `rank`: keep the items whose key contains the input,
//! then order them by where the match starts, latest first. A prefix match
//! (index 0) therefore ranks *after* a match further into the key, so with
//! commands `clear` and `list` the input `l` yields `clear` before `list`.
//! The sort is stable, so equal positions keep the base order (registration
//! order for commands, oldest-first for history).

use std::cmp::Reverse;

use crate::history::HistoryBuffer;
use crate::registry::CommandRegistry;

/// What a suggestion resolves to when chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionItem {
    /// A registered command, by canonical name.
    Command(String),
    /// A previously submitted line.
    History(String),
}

impl SuggestionItem {
    /// Text that replaces the input when the suggestion is chosen.
    pub fn completion(&self) -> &str {
        match self {
            Self::Command(name) => name,
            Self::History(line) => line,
        }
    }
}

/// A presentation label plus the item it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub display: String,
    pub item: SuggestionItem,
}

/// A collection that can be filtered and ranked against partial input.
pub trait SuggestionSource {
    /// Label identifying the context in the UI.
    fn title(&self) -> &'static str;

    fn suggestions(&self, input: &str) -> Vec<Suggestion>;
}

/// Filter `items` to those whose key contains `input`, ordered by the
/// character index of the first match, descending.
pub fn rank<'a, T, I, K>(items: I, input: &str, key: K) -> Vec<&'a T>
where
    T: ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
    K: Fn(&T) -> &str,
{
    let mut matches: Vec<(usize, &'a T)> = items
        .into_iter()
        .filter_map(|item| {
            let k = key(item);
            k.find(input).map(|byte| (k[..byte].chars().count(), item))
        })
        .collect();
    matches.sort_by_key(|&(pos, _)| Reverse(pos));
    matches.into_iter().map(|(_, item)| item).collect()
}

/// Suggestions drawn from the command registry.
pub struct CommandSuggestions<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> CommandSuggestions<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }
}

impl SuggestionSource for CommandSuggestions<'_> {
    fn title(&self) -> &'static str {
        SuggestionContext::Commands.title()
    }

    fn suggestions(&self, input: &str) -> Vec<Suggestion> {
        rank(self.registry.all(), input, |c| c.name())
            .into_iter()
            .map(|c| Suggestion {
                display: format!("{} [{}]", c.name(), c.options_hint()),
                item: SuggestionItem::Command(c.name().to_string()),
            })
            .collect()
    }
}

/// Suggestions drawn from previously submitted lines.
pub struct HistorySuggestions<'a> {
    history: &'a HistoryBuffer,
}

impl<'a> HistorySuggestions<'a> {
    pub fn new(history: &'a HistoryBuffer) -> Self {
        Self { history }
    }
}

impl SuggestionSource for HistorySuggestions<'_> {
    fn title(&self) -> &'static str {
        SuggestionContext::History.title()
    }

    fn suggestions(&self, input: &str) -> Vec<Suggestion> {
        rank(self.history.all(), input, |line| line.as_str())
            .into_iter()
            .map(|line| Suggestion {
                display: line.clone(),
                item: SuggestionItem::History(line.clone()),
            })
            .collect()
    }
}

/// Which collection the suggestion session draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionContext {
    #[default]
    Commands,
    History,
}

impl SuggestionContext {
    pub fn title(self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::History => "history",
        }
    }

    /// The other context.
    pub fn toggled(self) -> Self {
        match self {
            Self::Commands => Self::History,
            Self::History => Self::Commands,
        }
    }

    /// Build the source for this context over the given collections.
    pub fn source<'a>(
        self,
        registry: &'a CommandRegistry,
        history: &'a HistoryBuffer,
    ) -> Box<dyn SuggestionSource + 'a> {
        match self {
            Self::Commands => Box::new(CommandSuggestions::new(registry)),
            Self::History => Box::new(HistorySuggestions::new(history)),
        }
    }
}

/// Active context, current results and the selection cursor.
///
/// `selected`, when set, always indexes `results`. Selection movement is
/// clamped at both ends; with nothing selected either direction selects the
/// first (best-ranked) result.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSession {
    context: SuggestionContext,
    results: Vec<Suggestion>,
    selected: Option<usize>,
}

impl SuggestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> SuggestionContext {
        self.context
    }

    pub fn title(&self) -> &'static str {
        self.context.title()
    }

    /// Switch context, dropping results and selection.
    pub fn set_context(&mut self, context: SuggestionContext) {
        self.context = context;
        self.results.clear();
        self.selected = None;
    }

    /// Recompute results from `source`.
    ///
    /// Unless `forced`, empty input hides suggestions (no results).
    pub fn refresh(&mut self, source: &dyn SuggestionSource, input: &str, forced: bool) {
        self.selected = None;
        if !forced && input.is_empty() {
            self.results.clear();
            return;
        }
        self.results = source.suggestions(input);
    }

    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }

    /// Whether there is anything for the UI to show.
    pub fn is_shown(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.selected.map(|i| &self.results[i])
    }

    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// The selected suggestion, or the first result (now selected) when
    /// nothing is selected. `None` when there are no results.
    pub fn commit_selection(&mut self) -> Option<&Suggestion> {
        if self.results.is_empty() {
            return None;
        }
        let i = *self.selected.get_or_insert(0);
        self.results.get(i)
    }

    /// Drop results and selection, keeping the context.
    pub fn clear(&mut self) {
        self.results.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandOutput, FnCommand};

    fn registry(names: &[&str]) -> CommandRegistry {
        let mut reg = CommandRegistry::default();
        reg.register_all(
            names
                .iter()
                .map(|n| FnCommand::new(*n, "", |_, _| Ok(CommandOutput::None)).boxed()),
        )
        .unwrap();
        reg
    }

    fn completions(results: &[Suggestion]) -> Vec<&str> {
        results.iter().map(|s| s.item.completion()).collect()
    }

    #[test]
    fn later_match_ranks_before_prefix_match() {
        let reg = registry(&["clear", "help", "list"]);
        let results = CommandSuggestions::new(&reg).suggestions("l");
        // "help" matches at 2, "clear" at 1, "list" at 0.
        assert_eq!(completions(&results), vec!["help", "clear", "list"]);
    }

    #[test]
    fn clear_ranks_before_list() {
        let reg = registry(&["clear", "list"]);
        let results = CommandSuggestions::new(&reg).suggestions("l");
        assert_eq!(completions(&results), vec!["clear", "list"]);
    }

    #[test]
    fn match_is_case_sensitive_substring() {
        let reg = registry(&["Reload", "reload-all", "save"]);
        let results = CommandSuggestions::new(&reg).suggestions("re");
        assert_eq!(completions(&results), vec!["reload-all"]);
    }

    #[test]
    fn empty_input_keeps_base_order() {
        let reg = registry(&["zeta", "alpha", "mid"]);
        let results = CommandSuggestions::new(&reg).suggestions("");
        assert_eq!(completions(&results), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn ties_keep_base_order() {
        let reg = registry(&["tp", "ta", "tb"]);
        let results = CommandSuggestions::new(&reg).suggestions("t");
        assert_eq!(completions(&results), vec!["tp", "ta", "tb"]);
    }

    #[test]
    fn command_label_includes_options_hint() {
        let mut reg = CommandRegistry::default();
        reg.register(
            FnCommand::new("spawn", "", |_, _| Ok(CommandOutput::None))
                .with_options_hint("kind count")
                .boxed(),
        )
        .unwrap();
        let results = CommandSuggestions::new(&reg).suggestions("sp");
        assert_eq!(results[0].display, "spawn [kind count]");
        assert_eq!(results[0].item, SuggestionItem::Command("spawn".into()));
    }

    #[test]
    fn history_source_uses_raw_lines() {
        let mut history = HistoryBuffer::new();
        history.record("spawn crate");
        history.record("kill all");
        history.record("respawn");
        let results = HistorySuggestions::new(&history).suggestions("spawn");
        assert_eq!(completions(&results), vec!["respawn", "spawn crate"]);
        assert_eq!(results[0].display, "respawn");
        assert_eq!(results[0].item, SuggestionItem::History("respawn".into()));
    }

    #[test]
    fn match_index_counts_characters() {
        // "é" is two bytes; by characters both keys match at index 1.
        let items = ["éx", "ax"];
        let ranked = rank(items.iter().copied(), "x", |s| s);
        assert_eq!(ranked, vec!["éx", "ax"]);
    }

    #[test]
    fn sources_have_titles() {
        let reg = CommandRegistry::default();
        let history = HistoryBuffer::new();
        assert_eq!(CommandSuggestions::new(&reg).title(), "commands");
        assert_eq!(HistorySuggestions::new(&history).title(), "history");
        assert_eq!(
            SuggestionContext::History.source(&reg, &history).title(),
            "history"
        );
        assert_eq!(SuggestionContext::Commands.toggled(), SuggestionContext::History);
    }

    // -- Session --

    fn session_with(reg: &CommandRegistry, input: &str) -> SuggestionSession {
        let mut session = SuggestionSession::new();
        session.refresh(&CommandSuggestions::new(reg), input, false);
        session
    }

    #[test]
    fn unforced_empty_input_hides_results() {
        let reg = registry(&["help"]);
        let mut session = session_with(&reg, "he");
        assert!(session.is_shown());
        session.refresh(&CommandSuggestions::new(&reg), "", false);
        assert!(!session.is_shown());
    }

    #[test]
    fn forced_empty_input_shows_everything() {
        let reg = registry(&["help", "list"]);
        let mut session = SuggestionSession::new();
        session.refresh(&CommandSuggestions::new(&reg), "", true);
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn refresh_clears_selection() {
        let reg = registry(&["help", "list"]);
        let mut session = session_with(&reg, "l");
        session.move_selection_down();
        assert!(session.selected().is_some());
        session.refresh(&CommandSuggestions::new(&reg), "l", false);
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn set_context_clears_results_and_selection() {
        let reg = registry(&["help"]);
        let mut session = session_with(&reg, "h");
        session.move_selection_down();
        session.set_context(SuggestionContext::History);
        assert_eq!(session.context(), SuggestionContext::History);
        assert_eq!(session.title(), "history");
        assert!(session.results().is_empty());
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn selection_is_clamped() {
        let reg = registry(&["aa", "ab", "ac"]);
        let mut session = session_with(&reg, "a");
        session.move_selection_up();
        assert_eq!(session.selected_index(), Some(0));
        session.move_selection_up();
        assert_eq!(session.selected_index(), Some(0));
        for _ in 0..5 {
            session.move_selection_down();
        }
        assert_eq!(session.selected_index(), Some(2));
        session.move_selection_up();
        assert_eq!(session.selected_index(), Some(1));
    }

    #[test]
    fn first_move_down_selects_top() {
        let reg = registry(&["aa", "ab"]);
        let mut session = session_with(&reg, "a");
        session.move_selection_down();
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn moves_on_empty_results_do_nothing() {
        let mut session = SuggestionSession::new();
        session.move_selection_down();
        session.move_selection_up();
        assert_eq!(session.selected_index(), None);
    }

    #[test]
    fn deselect_keeps_results() {
        let reg = registry(&["aa", "ab"]);
        let mut session = session_with(&reg, "a");
        session.move_selection_down();
        session.deselect();
        assert_eq!(session.selected_index(), None);
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn commit_without_selection_picks_first() {
        let reg = registry(&["clear", "list"]);
        let mut session = session_with(&reg, "l");
        let chosen = session.commit_selection().cloned().unwrap();
        assert_eq!(chosen.item.completion(), "clear");
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn commit_returns_selected() {
        let reg = registry(&["clear", "list"]);
        let mut session = session_with(&reg, "l");
        session.move_selection_down();
        session.move_selection_down();
        let chosen = session.commit_selection().unwrap();
        assert_eq!(chosen.item.completion(), "list");
    }

    #[test]
    fn commit_on_empty_results_is_none() {
        let reg = registry(&["help"]);
        let mut session = session_with(&reg, "zzz");
        assert!(session.commit_selection().is_none());
        assert_eq!(session.selected_index(), None);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ranked_items_contain_input_in_descending_position(
                keys in proptest::collection::vec("[abc]{0,8}", 0..20),
                input in "[abc]{0,2}",
            ) {
                let ranked = rank(keys.iter(), &input, |k| k.as_str());
                let expected = keys.iter().filter(|k| k.contains(input.as_str())).count();
                prop_assert_eq!(ranked.len(), expected);
                let positions: Vec<usize> = ranked
                    .iter()
                    .map(|k| k.find(input.as_str()).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }
}
