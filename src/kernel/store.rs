use crate::kernel::color::ColorScheme;
use crate::kernel::editor::handle_key;
use crate::kernel::services::ports::SelectedConfigRecord;

use super::{Action, AppState, Effect, FocusTarget};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn effects(state_changed: bool, effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed,
        }
    }
}

/// Owns [`AppState`]; every mutation goes through [`Store::dispatch`].
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::OpenPath(path) => DispatchResult::effects(false, vec![Effect::LoadFile(path)]),
            Action::FileLoaded { path, content } => {
                let id = self.state.tabs.open_tab_with_content(path.clone(), &content);
                self.state.ui.focus = FocusTarget::Editor;
                let needs_config = self
                    .state
                    .tabs
                    .tab(id)
                    .is_some_and(|t| t.config.is_none());
                let effects = if needs_config {
                    vec![Effect::ResolveSelectedConfig { tab: id, path }]
                } else {
                    Vec::new()
                };
                DispatchResult::effects(true, effects)
            }
            Action::FileLoadFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "open failed");
                self.set_status(format!("Cannot open {}: {}", path.display(), error))
            }
            Action::EditorKey(key) => self.editor_key(key),
            Action::EditorPaste(text) => {
                let Some(tab) = self.state.tabs.active_tab_mut() else {
                    return DispatchResult::changed(false);
                };
                if text.is_empty() {
                    return DispatchResult::changed(false);
                }
                tab.editor.insert_at_cursor(&text.replace("\r\n", "\n"));
                tab.editor.clear_suggestions();
                tab.follow_cursor();
                DispatchResult::changed(true)
            }
            Action::EditorSetViewHeight { height } => {
                let mut changed = false;
                if let Some(tab) = self.state.tabs.active_tab_mut() {
                    let height = height.max(1);
                    if tab.viewport.height != height {
                        tab.viewport.height = height;
                        tab.follow_cursor();
                        changed = true;
                    }
                }
                DispatchResult::changed(changed)
            }
            Action::SelectTab(index) => {
                let changed = self.state.tabs.select(index);
                DispatchResult::changed(changed)
            }
            Action::NextTab => DispatchResult::changed(self.state.tabs.next()),
            Action::PrevTab => DispatchResult::changed(self.state.tabs.prev()),
            Action::CloseActiveTab => {
                let Some(id) = self.state.tabs.active_tab().map(|t| t.id) else {
                    return DispatchResult::changed(false);
                };
                let changed = self.state.tabs.close_tab(id);
                if self.state.ui.config_picker.target == Some(id) {
                    self.state.ui.config_picker = Default::default();
                }
                DispatchResult::changed(changed)
            }
            Action::SaveActive => {
                let Some(tab) = self.state.tabs.active_tab() else {
                    return DispatchResult::changed(false);
                };
                let effect = Effect::WriteFile {
                    tab: tab.id,
                    path: tab.path.clone(),
                    content: tab.editor.text_string(),
                    version: tab.editor.edit_version(),
                };
                DispatchResult::effects(false, vec![effect])
            }
            Action::Saved {
                tab,
                version,
                success,
            } => {
                let Some(model) = self.state.tabs.tab_mut(tab) else {
                    return DispatchResult::changed(false);
                };
                if !success {
                    let message = format!("Failed to save {}", model.path.display());
                    return self.set_status(message);
                }
                let title = model.title.clone();
                model.editor.mark_saved(version);
                self.set_status(format!("Saved {}", title))
            }
            Action::ConfigsLoaded { configs, schemes } => {
                self.state.configs = configs;
                self.state.color_schemes = schemes
                    .iter()
                    .map(|s| (s.config_id, ColorScheme::from_hex_map(&s.colors)))
                    .collect();
                self.clamp_picker();
                DispatchResult::changed(true)
            }
            Action::ConfigMissing { record } => {
                tracing::warn!(id = record.id, path = %record.json_path.display(), "configuration file missing");
                self.state.configs.retain(|c| c.id != record.id);
                self.state.color_schemes.remove(&record.id);
                self.clamp_picker();
                let mut result = self.set_status(format!(
                    "JSON file not found at the specified path '{}'",
                    record.json_path.display()
                ));
                result.effects.push(Effect::DeleteConfig(record.id));
                result
            }
            Action::ConfigLoadFailed { record, error } => {
                tracing::warn!(id = record.id, error = %error, "configuration failed to load");
                self.set_status(format!("Configuration '{}': {}", record.name, error))
            }
            Action::NoSelectedConfig { tab } => {
                if self.state.tabs.tab(tab).is_none() {
                    return DispatchResult::changed(false);
                }
                self.open_picker(tab);
                DispatchResult::changed(true)
            }
            Action::ConfigResolved {
                tab,
                record,
                document,
            } => {
                let Some(model) = self.state.tabs.tab_mut(tab) else {
                    return DispatchResult::changed(false);
                };
                tracing::debug!(tab = tab.raw(), config = %record.name, "configuration applied");
                model.apply_config(record, document);
                DispatchResult::changed(true)
            }
            Action::ShowConfigPicker => {
                let Some(id) = self.state.tabs.active_tab().map(|t| t.id) else {
                    return DispatchResult::changed(false);
                };
                self.open_picker(id);
                DispatchResult::changed(true)
            }
            Action::HideConfigPicker => {
                let was_visible = self.state.ui.config_picker.visible;
                self.state.ui.config_picker = Default::default();
                DispatchResult::changed(was_visible)
            }
            Action::ConfigPickerMove(delta) => {
                let picker = &mut self.state.ui.config_picker;
                if !picker.visible || self.state.configs.is_empty() {
                    return DispatchResult::changed(false);
                }
                let last = self.state.configs.len() - 1;
                let next = picker.selected.saturating_add_signed(delta).min(last);
                let changed = next != picker.selected;
                picker.selected = next;
                DispatchResult::changed(changed)
            }
            Action::ConfigPickerAccept => self.accept_config(),
            Action::SetFocus(focus) => {
                let changed = self.state.ui.focus != focus;
                self.state.ui.focus = focus;
                if focus == FocusTarget::Terminal {
                    self.state.ui.terminal_visible = true;
                }
                DispatchResult::changed(changed)
            }
            Action::ToggleTerminal => {
                let ui = &mut self.state.ui;
                ui.terminal_visible = !ui.terminal_visible;
                ui.focus = if ui.terminal_visible {
                    FocusTarget::Terminal
                } else {
                    FocusTarget::Editor
                };
                DispatchResult::changed(true)
            }
            Action::TerminalInput(ch) => {
                self.state.terminal.push_char(ch);
                DispatchResult::changed(true)
            }
            Action::TerminalBackspace => {
                DispatchResult::changed(self.state.terminal.backspace())
            }
            Action::TerminalHistory(delta) => {
                DispatchResult::changed(self.state.terminal.recall(delta))
            }
            Action::TerminalSubmit => {
                let effects = self
                    .state
                    .terminal
                    .submit()
                    .map(Effect::RunTerminalCommand)
                    .into_iter()
                    .collect();
                DispatchResult::effects(true, effects)
            }
            Action::TerminalOutput {
                id,
                lines,
                exit_code,
            } => DispatchResult::changed(self.state.terminal.apply_output(id, lines, exit_code)),
            Action::ExplorerSetViewHeight { height } => {
                DispatchResult::changed(self.state.explorer.set_view_height(height))
            }
            Action::ExplorerMoveSelection { delta } => {
                DispatchResult::changed(self.state.explorer.move_selection(delta))
            }
            Action::ExplorerActivate => self.explorer_activate(),
            Action::DirLoaded { path, entries } => {
                let explorer = &mut self.state.explorer;
                let Some(tree) = explorer.tree.as_mut() else {
                    return DispatchResult::changed(false);
                };
                let Some(id) = tree.find_node_by_path(&path) else {
                    return DispatchResult::changed(false);
                };
                if let Err(e) = tree.set_children(id, entries) {
                    tracing::warn!(path = %path.display(), error = %e, "cannot apply directory listing");
                    return DispatchResult::changed(false);
                }
                explorer.refresh_rows();
                DispatchResult::changed(true)
            }
            Action::DirLoadFailed { path, error } => {
                if let Some(tree) = self.state.explorer.tree.as_mut() {
                    if let Some(id) = tree.find_node_by_path(&path) {
                        tree.set_load_state(id, crate::models::LoadState::NotLoaded);
                        tree.collapse(id);
                    }
                }
                self.state.explorer.refresh_rows();
                self.set_status(format!("Cannot read {}: {}", path.display(), error))
            }
        }
    }

    fn set_status(&mut self, message: String) -> DispatchResult {
        self.state.ui.status = Some(message);
        DispatchResult::changed(true)
    }

    fn editor_key(&mut self, key: crate::core::KeyInput) -> DispatchResult {
        let Some(tab) = self.state.tabs.active_tab_mut() else {
            return DispatchResult::changed(false);
        };

        let outcome = handle_key(&mut tab.editor, key);
        let mut changed = outcome.consumed;
        if !outcome.consumed {
            changed |= tab.editor.apply_text_input(key);
        }
        if changed || outcome.scroll {
            tab.follow_cursor();
        }
        if changed {
            self.state.ui.status = None;
        }
        DispatchResult::changed(changed)
    }

    fn open_picker(&mut self, tab: crate::kernel::TabId) {
        let picker = &mut self.state.ui.config_picker;
        picker.visible = true;
        picker.target = Some(tab);
        picker.selected = 0;
    }

    fn clamp_picker(&mut self) {
        let len = self.state.configs.len();
        let picker = &mut self.state.ui.config_picker;
        if picker.selected >= len {
            picker.selected = len.saturating_sub(1);
        }
    }

    fn accept_config(&mut self) -> DispatchResult {
        let picker = std::mem::take(&mut self.state.ui.config_picker);
        if !picker.visible {
            return DispatchResult::changed(false);
        }

        let Some(record) = self.state.configs.get(picker.selected).cloned() else {
            return DispatchResult::changed(true);
        };
        let Some(tab) = picker.target.and_then(|id| self.state.tabs.tab(id)) else {
            return DispatchResult::changed(true);
        };

        let persist = SelectedConfigRecord::for_file(&record, tab.path.clone());
        DispatchResult::effects(
            true,
            vec![
                Effect::LoadConfig {
                    tab: tab.id,
                    record,
                },
                Effect::PersistSelectedConfig(persist),
            ],
        )
    }

    fn explorer_activate(&mut self) -> DispatchResult {
        let explorer = &mut self.state.explorer;
        let Some(row) = explorer.selected_row().cloned() else {
            return DispatchResult::changed(false);
        };
        let Some(tree) = explorer.tree.as_mut() else {
            return DispatchResult::changed(false);
        };
        let path = tree.full_path(row.id);

        if !row.is_dir {
            return DispatchResult::effects(false, vec![Effect::LoadFile(path)]);
        }

        let mut effects = Vec::new();
        if !row.is_expanded && row.load_state == crate::models::LoadState::NotLoaded {
            tree.set_load_state(row.id, crate::models::LoadState::Loading);
            effects.push(Effect::LoadDir(path));
        }
        tree.toggle_expand(row.id);
        explorer.refresh_rows();
        DispatchResult::effects(true, effects)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
