use super::*;

fn doc() -> SyntaxDocument {
    SyntaxDocument::parse(r#"{"instructions": ["mov", "int"], "registers": ["ax", "eax"]}"#).unwrap()
}

fn kinds<'a>(line: &'a str, doc: Option<&SyntaxDocument>) -> Vec<(&'a str, HighlightKind)> {
    highlight_line(line, doc)
        .into_iter()
        .map(|s| (&line[s.start..s.end], s.kind))
        .collect()
}

#[test]
fn instruction_line_with_comment() {
    let doc = doc();
    let mov = HighlightKind::Keyword(doc.category_of("mov").unwrap());
    let reg = HighlightKind::Keyword(doc.category_of("ax").unwrap());

    assert_eq!(
        kinds("    mov ax, 0x10 ; load", Some(&doc)),
        vec![
            ("mov", mov),
            ("ax", reg),
            ("0x10", HighlightKind::Number),
            ("; load", HighlightKind::Comment),
        ]
    );
}

#[test]
fn labels_only_at_line_start() {
    assert_eq!(
        kinds("start: jmp start", None),
        vec![("start:", HighlightKind::Label)]
    );
    assert!(kinds("mov x:", None).is_empty());
}

#[test]
fn strings_hide_their_contents() {
    let doc = doc();
    assert_eq!(
        kinds(r#"msg db "mov ax", 0"#, Some(&doc)),
        vec![
            (r#""mov ax""#, HighlightKind::String),
            ("0", HighlightKind::Number),
        ]
    );
}

#[test]
fn register_prefixes_and_case() {
    let doc = doc();
    let reg = HighlightKind::Keyword(doc.category_of("eax").unwrap());
    assert_eq!(kinds("push %EAX", Some(&doc))[0], ("%EAX", reg));
}

#[test]
fn numeric_forms() {
    for line in ["10", "0FFh", "0b1010", "0XAB"] {
        assert_eq!(kinds(line, None), vec![(line, HighlightKind::Number)]);
    }
}

#[test]
fn unknown_words_are_plain() {
    assert!(kinds("foo bar", Some(&doc())).is_empty());
}
