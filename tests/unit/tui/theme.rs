use super::*;

#[test]
fn default_settings_match_default_theme() {
    let theme = UiTheme::from_settings(&ThemeSettings::default());
    let default = UiTheme::default();
    assert_eq!(theme.focus_border, default.focus_border);
    assert_eq!(theme.inactive_border, default.inactive_border);
    assert_eq!(theme.prompt_fg, default.prompt_fg);
}

#[test]
fn named_and_hex_colors() {
    assert_eq!(parse_color("Cyan"), Some(Color::Indexed(6)));
    assert_eq!(parse_color(" dark_gray "), Some(Color::Indexed(8)));
    assert_eq!(parse_color("#FF0000"), Some(Color::Rgb(0xFF, 0, 0)));
    assert_eq!(parse_color("reset"), Some(Color::Reset));
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("#F00"), None);
    assert_eq!(parse_color("chartreuse"), None);
}

#[test]
fn invalid_entries_keep_previous_color() {
    let settings = ThemeSettings {
        focus_border: Some("not-a-color".to_string()),
        inactive_border: None,
        accent_fg: Some("#102030".to_string()),
        selection_bg: None,
        muted_fg: None,
        prompt_fg: None,
    };
    let theme = UiTheme::from_settings(&settings);
    assert_eq!(theme.focus_border, UiTheme::default().focus_border);
    assert_eq!(theme.accent_fg, Color::Rgb(0x10, 0x20, 0x30));
}

#[test]
fn rgb_converts_channels() {
    assert_eq!(rgb(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
}
