//! JSON-document settings database.
//!
//! The whole document lives in memory behind a mutex and is rewritten to disk after every
//! mutation (write to a sibling temp file, then rename).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::kernel::error::{EditorError, Result};
use crate::kernel::services::ports::{
    ColorSchemeRecord, SelectedConfigRecord, SettingsRepository, SyntaxConfigRecord,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    syntax_configs: Vec<SyntaxConfigRecord>,
    #[serde(default)]
    selected_configs: Vec<SelectedConfigRecord>,
    #[serde(default)]
    color_schemes: Vec<ColorSchemeRecord>,
}

pub struct JsonRepository {
    path: Option<PathBuf>,
    doc: Mutex<Document>,
}

impl JsonRepository {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let doc = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| EditorError::Database(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Document::default(),
            Err(e) => return Err(EditorError::file_read(&path, e)),
        };
        tracing::info!(path = %path.display(), "settings database opened");
        Ok(Self {
            path: Some(path),
            doc: Mutex::new(doc),
        })
    }

    /// A repository that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            doc: Mutex::new(Document::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Document>> {
        self.doc
            .lock()
            .map_err(|_| EditorError::Database("settings database lock poisoned".to_string()))
    }

    fn persist(&self, doc: &Document) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let write_err = |source| EditorError::FileWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let data = serde_json::to_string_pretty(doc)
            .map_err(|e| EditorError::Database(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, data).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    /// Applies `f` to a copy of the document; the copy replaces the live one only once it
    /// is on disk.
    fn update<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let mut doc = self.lock()?;
        let mut next = doc.clone();
        let out = f(&mut next);
        self.commit(&mut doc, next)?;
        Ok(out)
    }

    fn commit(&self, doc: &mut Document, next: Document) -> Result<()> {
        self.persist(&next)?;
        *doc = next;
        Ok(())
    }
}

impl SettingsRepository for JsonRepository {
    fn all_configs(&self) -> Result<Vec<SyntaxConfigRecord>> {
        Ok(self.lock()?.syntax_configs.clone())
    }

    fn add_config(&self, name: &str, json_path: &Path) -> Result<SyntaxConfigRecord> {
        let record = self.update(|doc| {
            doc.next_id = doc.next_id.saturating_add(1);
            let record = SyntaxConfigRecord {
                id: doc.next_id,
                name: name.to_string(),
                json_path: json_path.to_path_buf(),
            };
            doc.syntax_configs.push(record.clone());
            record
        })?;
        tracing::info!(id = record.id, name, "syntax configuration added");
        Ok(record)
    }

    fn delete_config(&self, id: u64) -> Result<bool> {
        let mut doc = self.lock()?;
        if !doc.syntax_configs.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        let mut next = doc.clone();
        next.syntax_configs.retain(|c| c.id != id);
        next.selected_configs.retain(|s| s.config_id != id);
        next.color_schemes.retain(|s| s.config_id != id);
        self.commit(&mut doc, next)?;
        tracing::info!(id, "syntax configuration deleted");
        Ok(true)
    }

    fn selected_config_for(&self, file_path: &Path) -> Result<Option<SelectedConfigRecord>> {
        let doc = self.lock()?;
        Ok(doc
            .selected_configs
            .iter()
            .rev()
            .find(|s| s.file_path == file_path)
            .cloned())
    }

    fn add_selected_config(&self, record: SelectedConfigRecord) -> Result<()> {
        self.update(|doc| doc.selected_configs.push(record))
    }

    fn color_schemes(&self) -> Result<Vec<ColorSchemeRecord>> {
        Ok(self.lock()?.color_schemes.clone())
    }

    fn save_color_scheme(&self, record: ColorSchemeRecord) -> Result<()> {
        self.update(|doc| {
            match doc
                .color_schemes
                .iter_mut()
                .find(|s| s.config_id == record.config_id)
            {
                Some(existing) => *existing = record,
                None => doc.color_schemes.push(record),
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/repository.rs"]
mod tests;
