//! Syntax/autocomplete configuration documents.
//!
//! A configuration is a JSON object whose keys name keyword categories and whose values are
//! string arrays, optionally nested in further objects:
//!
//! ```json
//! {
//!   "instructions": ["mov", "add", "jmp"],
//!   "registers": { "general": ["ax", "bx"], "segment": ["cs", "ds"] },
//!   "directives": [".data", ".bss", ".text"],
//!   "variables": ["db", "dw", "dd"],
//!   "constants": ["equ"]
//! }
//! ```
//!
//! Top-level keys become highlight categories. Strings found under a `variables` or
//! `constants` key, at any depth, are also variable directives.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use super::error::{EditorError, Result};

const VARIABLE_KEYS: [&str; 2] = ["variables", "constants"];
const DEFAULT_CATEGORY: &str = "keywords";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategory {
    pub name: String,
    pub words: BTreeSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SyntaxDocument {
    categories: Vec<KeywordCategory>,
    variable_directives: BTreeSet<String>,
    index: FxHashMap<String, usize>,
}

impl SyntaxDocument {
    pub fn parse(json: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::from_value(&value)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EditorError::ConfigMissing(path.to_path_buf()));
            }
            Err(e) => return Err(EditorError::file_read(path, e)),
        };

        Self::parse(&json).map_err(|message| EditorError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_value(value: &Value) -> std::result::Result<Self, String> {
        let mut doc = Self::default();
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let directive = is_variable_key(key);
                    doc.collect(value, key, directive);
                }
            }
            Value::Array(_) => doc.collect(value, DEFAULT_CATEGORY, false),
            _ => return Err("expected a JSON object or array".to_string()),
        }
        Ok(doc)
    }

    fn collect(&mut self, value: &Value, category: &str, directive: bool) {
        match value {
            Value::String(word) => self.add_word(category, word, directive),
            Value::Array(items) => {
                for item in items {
                    self.collect(item, category, directive);
                }
            }
            Value::Object(map) => {
                for (key, value) in map {
                    self.collect(value, category, directive || is_variable_key(key));
                }
            }
            _ => {}
        }
    }

    fn add_word(&mut self, category: &str, word: &str, directive: bool) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }

        let idx = match self.categories.iter().position(|c| c.name == category) {
            Some(idx) => idx,
            None => {
                self.categories.push(KeywordCategory {
                    name: category.to_string(),
                    words: BTreeSet::new(),
                });
                self.categories.len() - 1
            }
        };

        self.categories[idx].words.insert(word.to_string());
        self.index.entry(word.to_ascii_lowercase()).or_insert(idx);
        if directive {
            self.variable_directives.insert(word.to_string());
        }
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn category_name(&self, idx: usize) -> Option<&str> {
        self.categories.get(idx).map(|c| c.name.as_str())
    }

    /// Every keyword of every category.
    pub fn keywords(&self) -> BTreeSet<String> {
        self.categories
            .iter()
            .flat_map(|c| c.words.iter().cloned())
            .collect()
    }

    pub fn variable_directives(&self) -> &BTreeSet<String> {
        &self.variable_directives
    }

    /// Category index of `word`, ignoring ASCII case.
    pub fn category_of(&self, word: &str) -> Option<usize> {
        self.index.get(&word.to_ascii_lowercase()).copied()
    }
}

fn is_variable_key(key: &str) -> bool {
    VARIABLE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/syntax.rs"]
mod tests;
