use super::*;

fn press(code: KeyCode) -> KeyInput {
    KeyInput::press(code)
}

fn release(code: KeyCode) -> KeyInput {
    KeyInput::release(code)
}

fn with_suggestions(text: &str, cursor: usize, word: &str, suggestions: &[&str]) -> EditorState {
    let mut state = EditorState::from_text(text);
    state.set_cursor(cursor);
    state.show_suggestions(word, suggestions.iter().map(|s| s.to_string()).collect());
    state
}

/// Press then release, as a physical key stroke.
fn stroke(state: &mut EditorState, code: KeyCode) -> KeyOutcome {
    let outcome = handle_key(state, press(code));
    handle_key(state, release(code));
    outcome
}

#[test]
fn down_never_passes_last_suggestion() {
    let mut state = with_suggestions("mo", 2, "mo", &["mov", "movsx", "movzx"]);
    for _ in 0..10 {
        let outcome = stroke(&mut state, KeyCode::Down);
        assert!(outcome.consumed);
    }
    assert_eq!(state.selected_suggestion(), 2);
    assert_eq!(state.selected_suggestion_text(), Some("movzx"));
}

#[test]
fn up_never_goes_below_zero() {
    let mut state = with_suggestions("mo", 2, "mo", &["mov", "movsx"]);
    stroke(&mut state, KeyCode::Down);
    for _ in 0..5 {
        stroke(&mut state, KeyCode::Up);
    }
    assert_eq!(state.selected_suggestion(), 0);
}

#[test]
fn enter_accepts_selected_suggestion() {
    // The typed word "ax" ends at offset 6; accepting there keeps the cursor formula
    // `cursor + len(suggestion) - len(word)` at the end of the inserted word.
    let mut state = with_suggestions("mov ax,", 6, "ax", &["axbx"]);
    let outcome = handle_key(&mut state, press(KeyCode::Enter));

    assert!(outcome.consumed);
    assert!(!outcome.scroll);
    assert_eq!(state.text_string(), "mov axbx,");
    assert_eq!(state.cursor(), 8);
    assert!(!state.is_autocomplete_visible());
    assert!(state.suggestions().is_empty());
    assert_eq!(state.selected_suggestion(), 0);
    assert_eq!(state.line_index(), 0);
}

#[test]
fn enter_accepts_the_navigated_suggestion() {
    let mut state = with_suggestions("    mo", 6, "mo", &["mov", "movzx"]);
    stroke(&mut state, KeyCode::Down);
    handle_key(&mut state, press(KeyCode::Enter));
    assert_eq!(state.text_string(), "    movzx");
    assert_eq!(state.cursor(), 9);
}

#[test]
fn empty_suggestion_list_leaves_enter_to_indent_rule() {
    let mut state = EditorState::from_text("x");
    state.set_cursor(1);
    state.show_suggestions("x", Vec::new());
    assert!(!state.is_autocomplete_visible());

    let outcome = handle_key(&mut state, press(KeyCode::Enter));
    assert!(outcome.consumed);
    assert!(outcome.scroll);
    assert_eq!(state.text_string(), "x\n");
}

#[test]
fn guard_blocks_handled_keys_until_release() {
    let mut state = with_suggestions("mo", 2, "mo", &["mov", "movsx", "movzx"]);
    assert!(handle_key(&mut state, press(KeyCode::Down)).consumed);
    assert!(state.is_key_repeat_guard_active());

    let before = state.clone();
    for code in [KeyCode::Down, KeyCode::Up, KeyCode::Enter, KeyCode::Tab] {
        let outcome = handle_key(&mut state, press(code));
        assert_eq!(outcome, KeyOutcome::default());
        assert_eq!(state.text_string(), before.text_string());
        assert_eq!(state.cursor(), before.cursor());
        assert_eq!(state.selected_suggestion(), before.selected_suggestion());
        assert_eq!(state.is_autocomplete_visible(), before.is_autocomplete_visible());
        assert_eq!(state.line_index(), before.line_index());
    }

    let outcome = handle_key(&mut state, release(KeyCode::Down));
    assert!(!outcome.consumed);
    assert!(!state.is_key_repeat_guard_active());
    assert!(handle_key(&mut state, press(KeyCode::Down)).consumed);
}

#[test]
fn enter_after_label_indents() {
    let mut state = EditorState::from_text("loop:");
    state.set_cursor(5);
    let outcome = handle_key(&mut state, press(KeyCode::Enter));

    assert!(outcome.consumed);
    assert!(outcome.scroll);
    assert_eq!(state.text_string(), "loop:\n   ");
    assert_eq!(state.cursor(), 9);
    assert_eq!(state.line_index(), 1);
}

#[test]
fn enter_after_section_directive_indents() {
    let mut state = EditorState::from_text("section .data");
    state.set_cursor(13);
    handle_key(&mut state, press(KeyCode::Enter));
    assert_eq!(state.text_string(), "section .data\n   ");
}

#[test]
fn enter_on_plain_line_inserts_newline_only() {
    let mut state = EditorState::from_text("mov eax, 1");
    state.set_cursor(10);
    handle_key(&mut state, press(KeyCode::Enter));
    assert_eq!(state.text_string(), "mov eax, 1\n");
    assert_eq!(state.cursor(), 11);
}

#[test]
fn enter_inside_indented_block_keeps_indent() {
    let mut state = EditorState::from_text("main:\n   push ebp");
    state.set_cursor(17);
    stroke(&mut state, KeyCode::Enter);
    stroke(&mut state, KeyCode::Enter);
    assert_eq!(state.text_string(), "main:\n   push ebp\n   \n");
    assert_eq!(state.line_index(), 2);
}

#[test]
fn enter_splits_line_at_cursor() {
    let mut state = EditorState::from_text("start: mov");
    state.set_cursor(6);
    handle_key(&mut state, press(KeyCode::Enter));
    assert_eq!(state.text_string(), "start:\n    mov");
}

#[test]
fn tab_inserts_three_spaces() {
    let mut state = EditorState::from_text("mov");
    state.set_cursor(0);
    let outcome = handle_key(&mut state, press(KeyCode::Tab));
    assert_eq!(outcome, KeyOutcome { consumed: true, scroll: false });
    assert_eq!(state.text_string(), "   mov");
    assert_eq!(state.cursor(), 3);
}

#[test]
fn tab_dismisses_suggestions() {
    let mut state = with_suggestions("mo", 2, "mo", &["mov"]);
    stroke(&mut state, KeyCode::Tab);

    assert_eq!(state.text_string(), "mo   ");
    assert!(!state.is_autocomplete_visible());
    assert!(state.suggestions().is_empty());
    assert_eq!(state.word_to_search(), "");

    let outcome = stroke(&mut state, KeyCode::Enter);
    assert!(outcome.scroll);
    assert_eq!(state.text_string(), "mo   \n   ");
    assert_eq!(state.cursor(), 9);
}

#[test]
fn tab_replaces_selection() {
    let mut state = EditorState::from_text("abcdef");
    state.set_selection(1, 4);
    handle_key(&mut state, press(KeyCode::Tab));
    assert_eq!(state.text_string(), "a   ef");
    assert_eq!(state.cursor(), 4);
}

#[test]
fn arrows_without_list_are_not_consumed() {
    let mut state = EditorState::from_text("a\nb");
    for code in [KeyCode::Down, KeyCode::Up, KeyCode::Left, KeyCode::Char('x')] {
        assert!(!handle_key(&mut state, press(code)).consumed);
    }
    assert_eq!(state.text_string(), "a\nb");
    assert!(!state.is_key_repeat_guard_active());
}

#[test]
fn release_is_never_consumed() {
    let mut state = EditorState::from_text("");
    assert_eq!(
        handle_key(&mut state, release(KeyCode::Enter)),
        KeyOutcome::default()
    );
}
