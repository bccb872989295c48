//! Key-driven editing: suggestion navigation, completion accept, auto-indent and Tab.

use crate::core::{KeyCode, KeyInput};

use super::state::EditorState;
use super::text;

/// Result of feeding one key event to [`handle_key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The event was handled and must not reach the default text input.
    pub consumed: bool,
    /// Enter moved to a new line; the view should follow the cursor.
    pub scroll: bool,
}

impl KeyOutcome {
    const IGNORED: Self = Self {
        consumed: false,
        scroll: false,
    };

    const CONSUMED: Self = Self {
        consumed: true,
        scroll: false,
    };
}

/// Applies the first matching rule for `key` to `state`.
///
/// While the repeat guard is set, Down/Up/Enter/Tab presses are ignored; any key release
/// clears it again.
pub fn handle_key(state: &mut EditorState, key: KeyInput) -> KeyOutcome {
    if key.is_release() {
        state.set_key_repeat_guard(false);
        return KeyOutcome::IGNORED;
    }

    if state.is_key_repeat_guard_active() {
        return KeyOutcome::IGNORED;
    }

    let visible = state.is_autocomplete_visible();
    let outcome = match key.code {
        KeyCode::Down if visible => {
            state.select_next_suggestion();
            KeyOutcome::CONSUMED
        }
        KeyCode::Up if visible => {
            state.select_prev_suggestion();
            KeyOutcome::CONSUMED
        }
        KeyCode::Enter if visible => {
            accept_suggestion(state);
            KeyOutcome::CONSUMED
        }
        KeyCode::Enter => {
            state.bump_line_index();
            let before = text::text_before(state.text(), state.cursor());
            state.insert_at_cursor(&text::newline_for(&before));
            KeyOutcome {
                consumed: true,
                scroll: true,
            }
        }
        KeyCode::Tab => {
            state.insert_at_cursor(text::INDENT);
            state.clear_suggestions();
            KeyOutcome::CONSUMED
        }
        _ => return KeyOutcome::IGNORED,
    };

    state.set_key_repeat_guard(true);
    outcome
}

fn accept_suggestion(state: &mut EditorState) {
    let Some(suggestion) = state.selected_suggestion_text().map(str::to_string) else {
        tracing::debug!("autocomplete visible without suggestions");
        state.clear_suggestions();
        return;
    };

    let cursor = state.cursor();
    let word = text::word_range_at(state.text(), cursor);
    let typed = state.word_to_search().chars().count();
    state.replace_range(word.start, word.end, &suggestion);

    let target = (cursor + suggestion.chars().count()).saturating_sub(typed);
    state.set_cursor(target);
    state.clear_suggestions();
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/key.rs"]
mod tests;
