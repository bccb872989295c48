use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::color::ColorScheme;
use super::services::ports::SyntaxConfigRecord;
use super::tabs::{TabId, TabsState};
use super::terminal::TerminalState;
use crate::models::{FileTree, FileTreeRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Explorer,
    Editor,
    Terminal,
}

#[derive(Debug)]
pub struct ExplorerState {
    pub tree: Option<FileTree>,
    pub rows: Vec<FileTreeRow>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub view_height: usize,
}

impl ExplorerState {
    pub fn new(tree: Option<FileTree>) -> Self {
        let mut state = Self {
            tree,
            rows: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            view_height: 20,
        };
        state.refresh_rows();
        state
    }

    pub fn refresh_rows(&mut self) {
        self.rows = self
            .tree
            .as_ref()
            .map(FileTree::flatten_for_view)
            .unwrap_or_default();
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        self.follow_selection();
    }

    pub fn selected_row(&self) -> Option<&FileTreeRow> {
        self.rows.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let last = self.rows.len() - 1;
        let next = self.selected.saturating_add_signed(delta).min(last);
        if next == self.selected {
            return false;
        }
        self.selected = next;
        self.follow_selection();
        true
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if height == self.view_height {
            return false;
        }
        self.view_height = height;
        self.follow_selection();
        true
    }

    fn follow_selection(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.view_height {
            self.scroll_offset = self.selected + 1 - self.view_height;
        }
    }
}

/// Modal list of configurations offered for the active tab.
#[derive(Debug, Clone, Default)]
pub struct ConfigPickerState {
    pub visible: bool,
    pub selected: usize,
    /// Tab the chosen configuration applies to.
    pub target: Option<TabId>,
}

#[derive(Debug)]
pub struct UiState {
    pub focus: FocusTarget,
    pub terminal_visible: bool,
    pub config_picker: ConfigPickerState,
    pub status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: FocusTarget::Editor,
            terminal_visible: false,
            config_picker: ConfigPickerState::default(),
            status: None,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub workspace_root: PathBuf,
    pub tabs: TabsState,
    pub explorer: ExplorerState,
    pub terminal: TerminalState,
    pub configs: Vec<SyntaxConfigRecord>,
    pub color_schemes: FxHashMap<u64, ColorScheme>,
    pub ui: UiState,
}

impl AppState {
    pub fn new(workspace_root: PathBuf, tree: Option<FileTree>) -> Self {
        Self {
            terminal: TerminalState::new(workspace_root.clone()),
            workspace_root,
            tabs: TabsState::new(),
            explorer: ExplorerState::new(tree),
            configs: Vec::new(),
            color_schemes: FxHashMap::default(),
            ui: UiState::default(),
        }
    }

    /// Color scheme of the configuration attached to the active tab.
    pub fn active_color_scheme(&self) -> Option<&ColorScheme> {
        let config = self.tabs.active_tab()?.config.as_ref()?;
        self.color_schemes.get(&config.id)
    }
}
