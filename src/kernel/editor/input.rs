use crate::core::{KeyCode, KeyInput};

use super::state::EditorState;
use super::text;

impl EditorState {
    /// Default text-field behaviour for keys the key handler left unconsumed.
    ///
    /// Returns whether the state changed.
    pub fn apply_text_input(&mut self, key: KeyInput) -> bool {
        if key.is_release() {
            return false;
        }

        match key.code {
            KeyCode::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert_at_cursor(ch.encode_utf8(&mut buf));
                self.refresh_completion();
                true
            }
            KeyCode::Enter => {
                self.insert_at_cursor("\n");
                self.clear_suggestions();
                true
            }
            KeyCode::Backspace => {
                let sel = self.selection();
                let changed = if !sel.is_empty() {
                    self.replace_range(sel.start(), sel.end(), "");
                    self.set_cursor(sel.start());
                    true
                } else if sel.start() > 0 {
                    let at = self.replace_range(sel.start() - 1, sel.start(), "");
                    self.set_cursor(at);
                    true
                } else {
                    false
                };
                self.refresh_completion();
                changed
            }
            KeyCode::Delete => {
                let sel = self.selection();
                let end = if sel.is_empty() {
                    (sel.end() + 1).min(self.len_chars())
                } else {
                    sel.end()
                };
                if sel.start() == end {
                    return false;
                }
                self.replace_range(sel.start(), end, "");
                self.set_cursor(sel.start());
                self.refresh_completion();
                true
            }
            KeyCode::Esc => {
                let changed = self.is_autocomplete_visible();
                self.clear_suggestions();
                changed
            }
            KeyCode::Left => self.move_cursor_to(self.cursor().saturating_sub(1)),
            KeyCode::Right => {
                let sel = self.selection();
                let target = if sel.is_empty() {
                    sel.end() + 1
                } else {
                    sel.end()
                };
                self.move_cursor_to(target.min(self.len_chars()))
            }
            KeyCode::Home => self.move_cursor_to(text::line_start(self.text(), self.cursor())),
            KeyCode::End => self.move_cursor_to(text::line_end(self.text(), self.cursor())),
            // Arrow keys belong to the suggestion list while it is shown.
            KeyCode::Up | KeyCode::Down if self.is_autocomplete_visible() => false,
            KeyCode::Up => self.move_vertically(-1),
            KeyCode::Down => self.move_vertically(1),
            KeyCode::Tab | KeyCode::Other => false,
        }
    }

    fn move_cursor_to(&mut self, pos: usize) -> bool {
        let before = self.selection();
        self.set_cursor(pos);
        let moved = self.selection() != before;
        if moved {
            self.clear_suggestions();
        }
        moved
    }

    fn move_vertically(&mut self, delta: isize) -> bool {
        let (row, col) = self.cursor_row_col();
        let target_row = row.saturating_add_signed(delta);
        if target_row == row || target_row >= self.text().len_lines() {
            return false;
        }
        let pos = text::offset_of(self.text(), target_row, col);
        self.move_cursor_to(pos)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/input.rs"]
mod tests;
