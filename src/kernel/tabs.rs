//! Ordered collection of open files, one [`EditorState`] per tab.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::editor::EditorState;
use super::error::{EditorError, Result};
use super::services::ports::SyntaxConfigRecord;
use super::syntax::SyntaxDocument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub line_offset: usize,
    pub height: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            line_offset: 0,
            height: 20,
        }
    }
}

impl ViewportState {
    /// Scrolls just enough to keep `row` visible.
    pub fn follow(&mut self, row: usize) -> bool {
        let height = self.height.max(1);
        let prev = self.line_offset;
        if row < self.line_offset {
            self.line_offset = row;
        } else if row >= self.line_offset + height {
            self.line_offset = row + 1 - height;
        }
        self.line_offset != prev
    }
}

#[derive(Debug)]
pub struct TabModel {
    pub id: TabId,
    pub path: PathBuf,
    pub title: String,
    pub editor: EditorState,
    pub viewport: ViewportState,
    pub config: Option<SyntaxConfigRecord>,
    pub syntax: Option<Arc<SyntaxDocument>>,
}

impl TabModel {
    fn new(id: TabId, path: PathBuf, content: &str) -> Self {
        let title = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id,
            path,
            title,
            editor: EditorState::from_text(content),
            viewport: ViewportState::default(),
            config: None,
            syntax: None,
        }
    }

    pub fn display_title(&self) -> String {
        if self.editor.is_dirty() {
            format!("\u{25cf} {}", self.title)
        } else {
            self.title.clone()
        }
    }

    /// Installs a configuration's vocabulary into the editor.
    pub fn apply_config(&mut self, record: SyntaxConfigRecord, doc: Arc<SyntaxDocument>) {
        self.editor
            .set_vocabulary(doc.keywords(), doc.variable_directives().clone());
        self.config = Some(record);
        self.syntax = Some(doc);
    }

    pub fn follow_cursor(&mut self) -> bool {
        let (row, _) = self.editor.cursor_row_col();
        self.viewport.follow(row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabsEvent {
    Opened(TabId),
    Selected(TabId),
    Closed(TabId),
}

type Observer = Box<dyn FnMut(&TabsEvent) + Send>;

/// Open tabs in open order, unique by path.
#[derive(Default)]
pub struct TabsState {
    tabs: Vec<TabModel>,
    active: usize,
    next_id: u64,
    observers: Vec<Observer>,
}

impl fmt::Debug for TabsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabsState")
            .field("tabs", &self.tabs)
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TabsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked after every open, select and close.
    pub fn subscribe(&mut self, observer: impl FnMut(&TabsEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: TabsEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    pub fn tabs(&self) -> &[TabModel] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.tabs.is_empty()).then_some(self.active)
    }

    pub fn active_tab(&self) -> Option<&TabModel> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut TabModel> {
        self.tabs.get_mut(self.active)
    }

    pub fn tab(&self, id: TabId) -> Option<&TabModel> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut TabModel> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn find_by_path(&self, path: &Path) -> Option<usize> {
        self.tabs.iter().position(|t| t.path == path)
    }

    /// Reads `path` and opens it; unreadable files leave the tabs untouched.
    pub fn open_tab(&mut self, path: impl Into<PathBuf>) -> Result<TabId> {
        let path = path.into();
        if let Some(idx) = self.find_by_path(&path) {
            let id = self.tabs[idx].id;
            self.select(idx);
            return Ok(id);
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| EditorError::file_read(&path, e))?;
        Ok(self.open_tab_with_content(path, &content))
    }

    /// Opens already-read content. An already-open path is selected instead.
    pub fn open_tab_with_content(&mut self, path: impl Into<PathBuf>, content: &str) -> TabId {
        let path = path.into();
        if let Some(idx) = self.find_by_path(&path) {
            let id = self.tabs[idx].id;
            self.select(idx);
            return id;
        }

        self.next_id = self.next_id.saturating_add(1);
        let id = TabId::new(self.next_id);
        tracing::debug!(tab = id.raw(), path = %path.display(), "open tab");
        self.tabs.push(TabModel::new(id, path, content));
        self.active = self.tabs.len() - 1;
        self.notify(TabsEvent::Opened(id));
        id
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() || index == self.active {
            return false;
        }
        self.active = index;
        let id = self.tabs[index].id;
        self.notify(TabsEvent::Selected(id));
        true
    }

    pub fn next(&mut self) -> bool {
        match self.tabs.len() {
            0 | 1 => false,
            len => self.select((self.active + 1) % len),
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.tabs.len() {
            0 | 1 => false,
            len => self.select((self.active + len - 1) % len),
        }
    }

    /// Removes the tab with `id`; the last remaining tab becomes active.
    pub fn close_tab(&mut self, id: TabId) -> bool {
        let Some(idx) = self.tabs.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tabs.remove(idx);
        self.active = self.tabs.len().saturating_sub(1);
        tracing::debug!(tab = id.raw(), "close tab");
        self.notify(TabsEvent::Closed(id));
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tabs.rs"]
mod tests;
