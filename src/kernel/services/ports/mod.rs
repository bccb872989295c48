//! Service ports: traits + data contracts.

pub mod repository;
pub mod settings;

pub use repository::{
    ColorSchemeRecord, SelectedConfigRecord, SettingsRepository, SyntaxConfigRecord,
};
pub use settings::{Settings, ThemeSettings};
