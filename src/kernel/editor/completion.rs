//! Prefix completion over configuration keywords and symbols declared in the buffer.

use ropey::Rope;
use std::collections::BTreeSet;

use super::text::is_word_char;

pub const MAX_SUGGESTIONS: usize = 50;

/// Names declared in `text`: labels (`loop:`) and data definitions (`msg db "hi"`).
pub fn declared_symbols(text: &Rope, variable_directives: &BTreeSet<String>) -> BTreeSet<String> {
    let mut symbols = BTreeSet::new();

    for line in text.lines() {
        let line = line.to_string();
        let code = line.split(';').next().unwrap_or("");
        let mut tokens = code.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        if let Some(label) = first.strip_suffix(':') {
            if is_symbol(label) {
                symbols.insert(label.to_string());
            }
            continue;
        }

        let Some(second) = tokens.next() else {
            continue;
        };
        let declares = variable_directives
            .iter()
            .any(|d| d.eq_ignore_ascii_case(second));
        if declares && is_symbol(first) {
            symbols.insert(first.to_string());
        }
    }

    symbols
}

fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if !ch.is_ascii_digit() && is_word_char(ch) => chars.all(is_word_char),
        _ => false,
    }
}

/// Candidates starting with `prefix` (ASCII case-insensitive), minus exact matches.
pub fn filter_suggestions<'a>(
    prefix: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    if prefix.is_empty() {
        return Vec::new();
    }

    let needle = prefix.to_ascii_lowercase();
    let matches: BTreeSet<&str> = candidates
        .into_iter()
        .filter(|c| !c.eq_ignore_ascii_case(prefix))
        .filter(|c| c.to_ascii_lowercase().starts_with(&needle))
        .collect();

    matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/completion.rs"]
mod tests;
