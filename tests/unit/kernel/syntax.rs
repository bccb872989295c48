use super::*;

use tempfile::tempdir;

const NASM: &str = r#"{
    "instructions": ["mov", "add", "jmp"],
    "registers": { "general": ["ax", "bx"], "segment": ["cs"] },
    "directives": [".data", ".text"],
    "variables": ["db", "dw"],
    "misc": { "constants": ["equ"], "other": [" ", 42, null] }
}"#;

fn category(doc: &SyntaxDocument, word: &str) -> Option<String> {
    doc.category_of(word)
        .and_then(|idx| doc.category_name(idx))
        .map(str::to_string)
}

#[test]
fn top_level_keys_become_categories() {
    let doc = SyntaxDocument::parse(NASM).unwrap();
    assert_eq!(category(&doc, "mov").as_deref(), Some("instructions"));
    assert_eq!(category(&doc, "bx").as_deref(), Some("registers"));
    assert_eq!(category(&doc, "cs").as_deref(), Some("registers"));
    assert_eq!(category(&doc, ".data").as_deref(), Some("directives"));
    assert_eq!(category(&doc, "equ").as_deref(), Some("misc"));
    assert_eq!(category(&doc, "nothing"), None);
}

#[test]
fn lookup_ignores_ascii_case() {
    let doc = SyntaxDocument::parse(NASM).unwrap();
    assert_eq!(doc.category_of("MOV"), doc.category_of("mov"));
    assert!(doc.category_of("Ax").is_some());
}

#[test]
fn keywords_collects_every_word_and_skips_blanks() {
    let doc = SyntaxDocument::parse(NASM).unwrap();
    let keywords = doc.keywords();
    for word in ["mov", "add", "jmp", "ax", "bx", "cs", ".data", ".text", "db", "dw", "equ"] {
        assert!(keywords.contains(word), "missing {word}");
    }
    assert_eq!(keywords.len(), 11);
}

#[test]
fn variable_directives_come_from_variable_keys_at_any_depth() {
    let doc = SyntaxDocument::parse(NASM).unwrap();
    let directives: Vec<_> = doc.variable_directives().iter().cloned().collect();
    assert_eq!(directives, vec!["db", "dw", "equ"]);
}

#[test]
fn top_level_array_uses_default_category() {
    let doc = SyntaxDocument::parse(r#"["mov", "int"]"#).unwrap();
    assert_eq!(category(&doc, "int").as_deref(), Some("keywords"));
    assert!(doc.variable_directives().is_empty());
}

#[test]
fn scalars_and_malformed_json_are_rejected() {
    assert!(SyntaxDocument::parse("42").is_err());
    assert!(SyntaxDocument::parse("{ not json").is_err());
}

#[test]
fn load_reports_missing_and_invalid_files() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        SyntaxDocument::load(&missing),
        Err(EditorError::ConfigMissing(path)) if path == missing
    ));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{").unwrap();
    assert!(matches!(
        SyntaxDocument::load(&broken),
        Err(EditorError::ConfigParse { .. })
    ));

    let good = dir.path().join("nasm.json");
    std::fs::write(&good, NASM).unwrap();
    let doc = SyntaxDocument::load(&good).unwrap();
    assert!(doc.category_of("jmp").is_some());
}
