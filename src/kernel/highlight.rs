//! Line highlighting by regex matching against a configuration's keyword categories.

use regex::Regex;
use std::sync::OnceLock;

use super::syntax::SyntaxDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Comment,
    String,
    Number,
    Label,
    /// Index into [`SyntaxDocument::categories`].
    Keyword(usize),
}

/// Byte range of `line` with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

const TOKEN_PATTERN: &str = concat!(
    r#"(?P<comment>[;#].*$)"#,
    r#"|(?P<string>"(?:[^"\\]|\\.)*"?|'(?:[^'\\]|\\.)*'?)"#,
    r#"|(?P<number>\b(?:0[xX][0-9a-fA-F]+|0[bB][01]+|[0-9][0-9a-fA-F]*[hH]|[0-9]+)\b)"#,
    r#"|(?P<word>[%$]?[A-Za-z_.@][A-Za-z0-9_.@$]*:?)"#,
);

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Highlights one line (without its line break).
pub fn highlight_line(line: &str, doc: Option<&SyntaxDocument>) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();

    for caps in token_regex().captures_iter(line) {
        let (m, kind) = if let Some(m) = caps.name("comment") {
            (m, Some(HighlightKind::Comment))
        } else if let Some(m) = caps.name("string") {
            (m, Some(HighlightKind::String))
        } else if let Some(m) = caps.name("number") {
            (m, Some(HighlightKind::Number))
        } else if let Some(m) = caps.name("word") {
            (m, word_kind(line, m.start(), m.as_str(), doc))
        } else {
            continue;
        };

        if let Some(kind) = kind {
            spans.push(HighlightSpan {
                start: m.start(),
                end: m.end(),
                kind,
            });
        }
    }

    spans
}

fn word_kind(
    line: &str,
    start: usize,
    word: &str,
    doc: Option<&SyntaxDocument>,
) -> Option<HighlightKind> {
    if word.ends_with(':') && line[..start].trim().is_empty() {
        return Some(HighlightKind::Label);
    }

    let doc = doc?;
    let bare = word.trim_end_matches(':');
    doc.category_of(bare)
        .or_else(|| doc.category_of(bare.trim_start_matches(&['%', '$'][..])))
        .map(HighlightKind::Keyword)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/highlight.rs"]
mod tests;
