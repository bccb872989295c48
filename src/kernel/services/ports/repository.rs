//! Persistence contract for syntax/autocomplete configurations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::kernel::error::Result;

/// A named configuration pointing at its JSON keyword file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxConfigRecord {
    pub id: u64,
    pub name: String,
    pub json_path: PathBuf,
}

/// "File X was last edited with configuration Y". Appended, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedConfigRecord {
    pub config_id: u64,
    pub file_path: PathBuf,
    pub option_name: String,
    pub json_path: PathBuf,
}

impl SelectedConfigRecord {
    pub fn for_file(config: &SyntaxConfigRecord, file_path: impl Into<PathBuf>) -> Self {
        Self {
            config_id: config.id,
            file_path: file_path.into(),
            option_name: config.name.clone(),
            json_path: config.json_path.clone(),
        }
    }

    pub fn config(&self) -> SyntaxConfigRecord {
        SyntaxConfigRecord {
            id: self.config_id,
            name: self.option_name.clone(),
            json_path: self.json_path.clone(),
        }
    }
}

/// Hex colors (`#RRGGBB`) per highlight category of one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSchemeRecord {
    pub config_id: u64,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

pub trait SettingsRepository: Send + Sync {
    fn all_configs(&self) -> Result<Vec<SyntaxConfigRecord>>;

    fn add_config(&self, name: &str, json_path: &Path) -> Result<SyntaxConfigRecord>;

    /// Deletes the configuration with its color scheme and selection history.
    fn delete_config(&self, id: u64) -> Result<bool>;

    /// Most recent selection recorded for `file_path`.
    fn selected_config_for(&self, file_path: &Path) -> Result<Option<SelectedConfigRecord>>;

    fn add_selected_config(&self, record: SelectedConfigRecord) -> Result<()>;

    fn color_schemes(&self) -> Result<Vec<ColorSchemeRecord>>;

    fn save_color_scheme(&self, record: ColorSchemeRecord) -> Result<()>;
}
