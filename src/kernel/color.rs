//! Hex colors and per-configuration color schemes.

use std::collections::BTreeMap;

use super::highlight::HighlightKind;
use super::syntax::SyntaxDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parses `#RRGGBB`. Anything else, including the short `#RGB` form, is rejected.
pub fn parse_hex_color(value: &str) -> Option<Rgb> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

pub const TEXT: Rgb = Rgb::new(0xAB, 0xB2, 0xBF);
const COMMENT: Rgb = Rgb::new(0x6A, 0x73, 0x7D);
const STRING: Rgb = Rgb::new(0x98, 0xC3, 0x79);
const NUMBER: Rgb = Rgb::new(0xD1, 0x9A, 0x66);
const LABEL: Rgb = Rgb::new(0xE5, 0xC0, 0x7B);
const KEYWORD: Rgb = Rgb::new(0x61, 0xAF, 0xEF);

pub const COMMENT_KEY: &str = "comment";
pub const STRING_KEY: &str = "string";
pub const NUMBER_KEY: &str = "number";
pub const LABEL_KEY: &str = "label";

fn builtin_color(category: &str) -> Option<Rgb> {
    let color = match category {
        COMMENT_KEY => COMMENT,
        STRING_KEY => STRING,
        NUMBER_KEY => NUMBER,
        LABEL_KEY => LABEL,
        "instructions" => Rgb::new(0xC6, 0x78, 0xDD),
        "registers" => Rgb::new(0xE0, 0x6C, 0x75),
        "directives" | "variables" | "constants" => Rgb::new(0x56, 0xB6, 0xC2),
        _ => return None,
    };
    Some(color)
}

/// Category name to color overrides; unset categories use built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    colors: BTreeMap<String, Rgb>,
}

impl ColorScheme {
    /// Builds a scheme from stored hex strings, skipping malformed entries.
    pub fn from_hex_map(map: &BTreeMap<String, String>) -> Self {
        let colors = map
            .iter()
            .filter_map(|(k, v)| parse_hex_color(v).map(|c| (k.clone(), c)))
            .collect();
        Self { colors }
    }

    pub fn to_hex_map(&self) -> BTreeMap<String, String> {
        self.colors
            .iter()
            .map(|(k, c)| (k.clone(), c.to_hex()))
            .collect()
    }

    /// Sets `category` from a hex string. Invalid input leaves the scheme untouched.
    pub fn set_hex(&mut self, category: &str, value: &str) -> bool {
        let Some(color) = parse_hex_color(&value.trim().to_ascii_uppercase()) else {
            return false;
        };
        self.colors.insert(category.to_string(), color);
        true
    }

    pub fn color_of(&self, category: &str) -> Rgb {
        self.colors
            .get(category)
            .copied()
            .or_else(|| builtin_color(category))
            .unwrap_or(KEYWORD)
    }

    pub fn color_for(&self, kind: HighlightKind, doc: Option<&SyntaxDocument>) -> Rgb {
        match kind {
            HighlightKind::Comment => self.color_of(COMMENT_KEY),
            HighlightKind::String => self.color_of(STRING_KEY),
            HighlightKind::Number => self.color_of(NUMBER_KEY),
            HighlightKind::Label => self.color_of(LABEL_KEY),
            HighlightKind::Keyword(idx) => doc
                .and_then(|d| d.category_name(idx))
                .map(|name| self.color_of(name))
                .unwrap_or(KEYWORD),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/color.rs"]
mod tests;
