use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Settings database location; defaults to a file next to the settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_file: Option<PathBuf>,
    /// Shell used by the embedded terminal, e.g. `bash` or `cmd`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(default = "default_explorer_width")]
    pub explorer_width: u16,
    #[serde(default = "default_terminal_height")]
    pub terminal_height: u16,
    #[serde(default)]
    pub theme: ThemeSettings,
}

fn default_explorer_width() -> u16 {
    28
}

fn default_terminal_height() -> u16 {
    12
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            focus_border: Some("cyan".to_string()),
            inactive_border: Some("dark_gray".to_string()),
            accent_fg: Some("yellow".to_string()),
            selection_bg: Some("dark_gray".to_string()),
            muted_fg: Some("dark_gray".to_string()),
            prompt_fg: Some("#3BC368".to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_file: None,
            shell: None,
            explorer_width: default_explorer_width(),
            terminal_height: default_terminal_height(),
            theme: ThemeSettings::default(),
        }
    }
}
