use super::*;

#[test]
fn word_chars_include_dot_and_underscore() {
    assert!(is_word_char('a'));
    assert!(is_word_char('9'));
    assert!(is_word_char('_'));
    assert!(is_word_char('.'));
    assert!(is_word_char('é'));
    assert!(!is_word_char(' '));
    assert!(!is_word_char(','));
    assert!(!is_word_char(':'));
}

#[test]
fn word_range_extends_both_ways() {
    let rope = Rope::from_str("mov eax, ebx");
    assert_eq!(word_range_at(&rope, 6), WordRange { start: 4, end: 7 });
    assert_eq!(word_range_at(&rope, 4), WordRange { start: 4, end: 7 });
    assert_eq!(word_range_at(&rope, 7), WordRange { start: 4, end: 7 });
}

#[test]
fn word_range_between_separators_is_empty() {
    let rope = Rope::from_str("a , b");
    let range = word_range_at(&rope, 2);
    assert!(range.is_empty());
    assert_eq!(range.start, 2);
}

#[test]
fn word_range_clamps_cursor() {
    let rope = Rope::from_str("mov");
    assert_eq!(word_range_at(&rope, 99), WordRange { start: 0, end: 3 });
}

#[test]
fn prefix_is_word_text_before_cursor() {
    let rope = Rope::from_str("    .da x");
    assert_eq!(prefix_before(&rope, 7), ".da");
    assert_eq!(prefix_before(&rope, 5), ".");
    assert_eq!(prefix_before(&rope, 8), "");
}

#[test]
fn text_before_stops_at_cursor() {
    let rope = Rope::from_str("abc\ndef");
    assert_eq!(text_before(&rope, 5), "abc\nd");
    assert_eq!(text_before(&rope, 100), "abc\ndef");
}

#[test]
fn label_line_indents() {
    assert!(needs_indent("start:"));
    assert!(needs_indent("section .text\n_start:"));
    assert_eq!(newline_for("loop:"), "\n   ");
}

#[test]
fn blank_text_with_colon_does_not_indent_by_colon_rule() {
    assert!(!needs_indent(""));
    assert!(!needs_indent("\n"));
}

#[test]
fn indented_line_keeps_indent() {
    assert!(needs_indent("main:\n   mov eax, 1"));
    assert!(needs_indent("   push ebp"));
}

#[test]
fn bare_indent_line_does_not_indent() {
    assert!(!needs_indent("main:\n   mov eax, 1\n   "));
    assert_eq!(newline_for("   "), "\n");
}

#[test]
fn section_directive_indents() {
    assert!(needs_indent("section .data"));
    assert!(needs_indent(".bss"));
    assert!(needs_indent("section .text"));
    assert!(!needs_indent("section .rodata"));
}

#[test]
fn plain_line_gets_plain_newline() {
    assert!(!needs_indent("mov eax, 1"));
    assert_eq!(newline_for("mov eax, 1"), "\n");
}

#[test]
fn line_bounds_exclude_line_break() {
    let rope = Rope::from_str("ab\r\ncde\nf");
    assert_eq!(line_start(&rope, 1), 0);
    assert_eq!(line_end(&rope, 1), 2);
    assert_eq!(line_start(&rope, 6), 4);
    assert_eq!(line_end(&rope, 6), 7);
    assert_eq!(line_end(&rope, 9), 9);
}

#[test]
fn row_col_round_trips_through_offset_of() {
    let rope = Rope::from_str("one\ntwo\nthree");
    assert_eq!(row_col(&rope, 5), (1, 1));
    assert_eq!(offset_of(&rope, 1, 1), 5);
    assert_eq!(offset_of(&rope, 0, 10), 3);
    assert_eq!(offset_of(&rope, 10, 2), 10);
}
