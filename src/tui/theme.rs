//! UI colors, configurable through the `theme` section of the settings file.

use ratatui::style::Color;

use crate::kernel::color::Rgb;
use crate::kernel::services::ports::ThemeSettings;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub accent_fg: Color,
    pub selection_bg: Color,
    pub muted_fg: Color,
    pub prompt_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Indexed(6),
            inactive_border: Color::Indexed(8),
            accent_fg: Color::Indexed(3),
            selection_bg: Color::Indexed(8),
            muted_fg: Color::Indexed(8),
            prompt_fg: Color::Rgb(0x3B, 0xC3, 0x68),
        }
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    /// Overrides every color that parses; unknown names keep the current value.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let slots = [
            (&settings.focus_border, &mut self.focus_border),
            (&settings.inactive_border, &mut self.inactive_border),
            (&settings.accent_fg, &mut self.accent_fg),
            (&settings.selection_bg, &mut self.selection_bg),
            (&settings.muted_fg, &mut self.muted_fg),
            (&settings.prompt_fg, &mut self.prompt_fg),
        ];
        for (value, slot) in slots {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *slot = c;
            }
        }
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(c) = crate::kernel::color::parse_hex_color(v) {
        return Some(rgb(c));
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" => Color::Indexed(8),
        "white" => Color::Indexed(15),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        _ => return None,
    };

    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/theme.rs"]
mod tests;
