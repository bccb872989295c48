use crate::models::Selection;
use ropey::Rope;
use std::collections::BTreeSet;

use super::completion;
use super::text;

/// Text and autocomplete state of one open file.
#[derive(Debug, Clone)]
pub struct EditorState {
    text: Rope,
    selection: Selection,
    keywords: BTreeSet<String>,
    variable_directives: BTreeSet<String>,
    suggestions: Vec<String>,
    selected_suggestion: usize,
    autocomplete_visible: bool,
    key_repeat_guard: bool,
    line_index: usize,
    word_to_search: String,
    dirty: bool,
    edit_version: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            selection: Selection::default(),
            keywords: BTreeSet::new(),
            variable_directives: BTreeSet::new(),
            suggestions: Vec::new(),
            selected_suggestion: 0,
            autocomplete_visible: false,
            key_repeat_guard: false,
            line_index: 0,
            word_to_search: String::new(),
            dirty: false,
            edit_version: 0,
        }
    }

    pub fn from_text(content: &str) -> Self {
        Self {
            text: Rope::from_str(content),
            ..Self::new()
        }
    }

    pub fn text(&self) -> &Rope {
        &self.text
    }

    pub fn text_string(&self) -> String {
        self.text.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Insertion point; edits happen at the start of the selection.
    pub fn cursor(&self) -> usize {
        self.selection.start()
    }

    pub fn cursor_row_col(&self) -> (usize, usize) {
        text::row_col(&self.text, self.cursor())
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamped(self.text.len_chars());
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.set_selection(pos, pos);
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn variable_directives(&self) -> &BTreeSet<String> {
        &self.variable_directives
    }

    pub fn set_vocabulary(&mut self, keywords: BTreeSet<String>, variable_directives: BTreeSet<String>) {
        self.keywords = keywords;
        self.variable_directives = variable_directives;
        self.clear_suggestions();
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected_suggestion(&self) -> usize {
        self.selected_suggestion
    }

    pub fn selected_suggestion_text(&self) -> Option<&str> {
        self.suggestions
            .get(self.selected_suggestion)
            .map(String::as_str)
    }

    pub fn is_autocomplete_visible(&self) -> bool {
        self.autocomplete_visible
    }

    pub fn is_key_repeat_guard_active(&self) -> bool {
        self.key_repeat_guard
    }

    pub(super) fn set_key_repeat_guard(&mut self, active: bool) {
        self.key_repeat_guard = active;
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub(super) fn bump_line_index(&mut self) {
        self.line_index = self.line_index.saturating_add(1);
    }

    pub fn word_to_search(&self) -> &str {
        &self.word_to_search
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn edit_version(&self) -> u64 {
        self.edit_version
    }

    /// Clears the dirty flag if nothing changed since `version` was written.
    pub fn mark_saved(&mut self, version: u64) -> bool {
        if version != self.edit_version || !self.dirty {
            return false;
        }
        self.dirty = false;
        true
    }

    /// Shows `suggestions` for the typed `word`; an empty list hides the popup.
    pub fn show_suggestions(&mut self, word: impl Into<String>, suggestions: Vec<String>) {
        self.word_to_search = word.into();
        self.autocomplete_visible = !suggestions.is_empty();
        self.suggestions = suggestions;
        self.selected_suggestion = 0;
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected_suggestion = 0;
        self.autocomplete_visible = false;
        self.word_to_search.clear();
    }

    pub(super) fn select_next_suggestion(&mut self) {
        if self.selected_suggestion + 1 < self.suggestions.len() {
            self.selected_suggestion += 1;
        }
    }

    pub(super) fn select_prev_suggestion(&mut self) {
        self.selected_suggestion = self.selected_suggestion.saturating_sub(1);
    }

    /// Replaces `start..end` with `insert` and returns the char offset after the inserted text.
    pub(super) fn replace_range(&mut self, start: usize, end: usize, insert: &str) -> usize {
        let len = self.text.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start < end {
            self.text.remove(start..end);
        }
        if !insert.is_empty() {
            self.text.insert(start, insert);
        }
        self.dirty = true;
        self.edit_version = self.edit_version.saturating_add(1);
        start + insert.chars().count()
    }

    /// Replaces the selection with `insert`, leaving the cursor after it.
    pub fn insert_at_cursor(&mut self, insert: &str) {
        let sel = self.selection;
        let after = self.replace_range(sel.start(), sel.end(), insert);
        self.set_cursor(after);
    }

    /// Recomputes suggestions from the word before the cursor.
    pub fn refresh_completion(&mut self) {
        if !self.selection.is_empty() {
            self.clear_suggestions();
            return;
        }

        let prefix = text::prefix_before(&self.text, self.cursor());
        if prefix.is_empty() {
            self.clear_suggestions();
            return;
        }

        let symbols = completion::declared_symbols(&self.text, &self.variable_directives);
        let candidates = self
            .keywords
            .iter()
            .chain(self.variable_directives.iter())
            .chain(symbols.iter())
            .map(String::as_str);
        let suggestions = completion::filter_suggestions(&prefix, candidates);
        self.show_suggestions(prefix, suggestions);
    }
}
