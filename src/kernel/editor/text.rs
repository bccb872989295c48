//! Text helpers shared by the key handler and the completion logic.
//!
//! Every offset here is a char offset into the rope.

use ropey::Rope;
use unicode_xid::UnicodeXID;

/// Indent unit inserted by Tab and by auto-indenting Enter.
pub const INDENT: &str = "   ";

const SECTION_DIRECTIVES: [&str; 3] = [".data", ".bss", ".text"];

pub fn is_word_char(ch: char) -> bool {
    ch == '_' || ch == '.' || UnicodeXID::is_xid_continue(ch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordRange {
    pub start: usize,
    pub end: usize,
}

impl WordRange {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The run of word chars touching `cursor`, extended both ways.
pub fn word_range_at(rope: &Rope, cursor: usize) -> WordRange {
    let cursor = cursor.min(rope.len_chars());

    let mut start = cursor;
    let mut back = rope.chars_at(cursor);
    while let Some(ch) = back.prev() {
        if !is_word_char(ch) {
            break;
        }
        start -= 1;
    }

    let mut end = cursor;
    for ch in rope.chars_at(cursor) {
        if !is_word_char(ch) {
            break;
        }
        end += 1;
    }

    WordRange { start, end }
}

/// The word chars typed immediately before `cursor`.
pub fn prefix_before(rope: &Rope, cursor: usize) -> String {
    let cursor = cursor.min(rope.len_chars());
    let range = word_range_at(rope, cursor);
    rope.slice(range.start..cursor).to_string()
}

pub fn text_before(rope: &Rope, cursor: usize) -> String {
    rope.slice(..cursor.min(rope.len_chars())).to_string()
}

/// Decides whether Enter should indent the new line.
///
/// Rules are checked in a fixed order: trailing colon on non-blank text, a line that already
/// carries an indent run (but is not a bare indent), then a section directive as the last token.
pub fn needs_indent(before_cursor: &str) -> bool {
    if !before_cursor.trim().is_empty() && before_cursor.ends_with(':') {
        return true;
    }

    let last_line = before_cursor.rsplit(|c: char| c == '\n' || c == '\r').next().unwrap_or("");
    if last_line.contains(INDENT) && last_line != INDENT {
        return true;
    }

    let last_token = before_cursor.rsplit(char::is_whitespace).next().unwrap_or("");
    SECTION_DIRECTIVES.contains(&last_token)
}

pub fn newline_for(before_cursor: &str) -> String {
    if needs_indent(before_cursor) {
        format!("\n{INDENT}")
    } else {
        "\n".to_string()
    }
}

/// Char offset of the start of the line containing `pos`.
pub fn line_start(rope: &Rope, pos: usize) -> usize {
    let pos = pos.min(rope.len_chars());
    rope.line_to_char(rope.char_to_line(pos))
}

/// Char offset of the end of the line containing `pos`, before its line break.
pub fn line_end(rope: &Rope, pos: usize) -> usize {
    let pos = pos.min(rope.len_chars());
    let line = rope.char_to_line(pos);
    let start = rope.line_to_char(line);
    let slice = rope.line(line);
    let mut len = slice.len_chars();
    let mut chars = slice.chars_at(len);
    while let Some(ch) = chars.prev() {
        if ch == '\n' || ch == '\r' {
            len -= 1;
        } else {
            break;
        }
    }
    start + len
}

/// `(row, col)` of a char offset.
pub fn row_col(rope: &Rope, pos: usize) -> (usize, usize) {
    let pos = pos.min(rope.len_chars());
    let row = rope.char_to_line(pos);
    (row, pos - rope.line_to_char(row))
}

/// Char offset of `(row, col)`, clamped to the line contents.
pub fn offset_of(rope: &Rope, row: usize, col: usize) -> usize {
    let last_row = rope.len_lines().saturating_sub(1);
    let row = row.min(last_row);
    let start = rope.line_to_char(row);
    let end = line_end(rope, start);
    (start + col).min(end)
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/text.rs"]
mod tests;
