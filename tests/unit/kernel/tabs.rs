use super::*;

use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[test]
fn open_tab_reads_file_and_activates_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("boot.asm");
    std::fs::write(&path, "mov ax, 0x07c0\n").unwrap();

    let mut tabs = TabsState::new();
    let id = tabs.open_tab(&path).unwrap();

    assert_eq!(tabs.len(), 1);
    let tab = tabs.active_tab().unwrap();
    assert_eq!(tab.id, id);
    assert_eq!(tab.title, "boot.asm");
    assert_eq!(tab.editor.text_string(), "mov ax, 0x07c0\n");
    assert!(tab.config.is_none());
}

#[test]
fn missing_file_is_an_error_and_changes_nothing() {
    let dir = tempdir().unwrap();
    let mut tabs = TabsState::new();
    tabs.open_tab_with_content(dir.path().join("a.asm"), "");

    let err = tabs.open_tab(dir.path().join("missing.asm")).unwrap_err();
    assert!(matches!(err, EditorError::FileRead { .. }));
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.active_index(), Some(0));
}

#[test]
fn reopening_a_path_selects_existing_tab() {
    let mut tabs = TabsState::new();
    let first = tabs.open_tab_with_content("/w/a.asm", "a");
    tabs.open_tab_with_content("/w/b.asm", "b");
    assert_eq!(tabs.active_index(), Some(1));

    let again = tabs.open_tab_with_content("/w/a.asm", "changed");
    assert_eq!(again, first);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs.active_index(), Some(0));
    assert_eq!(tabs.active_tab().unwrap().editor.text_string(), "a");
}

#[test]
fn next_and_prev_wrap_around() {
    let mut tabs = TabsState::new();
    for name in ["/w/a.asm", "/w/b.asm", "/w/c.asm"] {
        tabs.open_tab_with_content(name, "");
    }
    assert!(tabs.next());
    assert_eq!(tabs.active_index(), Some(0));
    assert!(tabs.prev());
    assert_eq!(tabs.active_index(), Some(2));
    assert!(!tabs.select(2));
    assert!(!tabs.select(7));
}

#[test]
fn single_tab_does_not_cycle() {
    let mut tabs = TabsState::new();
    assert!(!tabs.next());
    tabs.open_tab_with_content("/w/a.asm", "");
    assert!(!tabs.next());
    assert!(!tabs.prev());
}

#[test]
fn closing_activates_last_tab() {
    let mut tabs = TabsState::new();
    let a = tabs.open_tab_with_content("/w/a.asm", "");
    tabs.open_tab_with_content("/w/b.asm", "");
    tabs.open_tab_with_content("/w/c.asm", "");
    tabs.select(0);

    assert!(tabs.close_tab(a));
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs.active_tab().unwrap().title, "c.asm");
    assert!(!tabs.close_tab(a));
    assert!(tabs.find_by_path(Path::new("/w/a.asm")).is_none());
}

#[test]
fn closing_everything_leaves_no_active_tab() {
    let mut tabs = TabsState::new();
    let a = tabs.open_tab_with_content("/w/a.asm", "");
    tabs.close_tab(a);
    assert!(tabs.is_empty());
    assert!(tabs.active_tab().is_none());
    assert_eq!(tabs.active_index(), None);
}

#[test]
fn observers_see_every_change() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let mut tabs = TabsState::new();
    tabs.subscribe(move |event| sink.lock().unwrap().push(*event));

    let a = tabs.open_tab_with_content("/w/a.asm", "");
    let b = tabs.open_tab_with_content("/w/b.asm", "");
    tabs.select(0);
    tabs.close_tab(b);

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            TabsEvent::Opened(a),
            TabsEvent::Opened(b),
            TabsEvent::Selected(a),
            TabsEvent::Closed(b),
        ]
    );
}

#[test]
fn dirty_tabs_are_marked_in_title() {
    let mut tabs = TabsState::new();
    tabs.open_tab_with_content("/w/a.asm", "");
    let tab = tabs.active_tab_mut().unwrap();
    assert_eq!(tab.display_title(), "a.asm");
    tab.editor.insert_at_cursor("nop");
    assert_eq!(tab.display_title(), "\u{25cf} a.asm");
}

#[test]
fn viewport_follows_cursor_rows() {
    let mut viewport = ViewportState {
        line_offset: 0,
        height: 3,
    };
    assert!(!viewport.follow(2));
    assert!(viewport.follow(5));
    assert_eq!(viewport.line_offset, 3);
    assert!(viewport.follow(1));
    assert_eq!(viewport.line_offset, 1);
}
