//! Workbench: routes terminal input to kernel actions and runs the resulting effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::sync::mpsc::{self, Receiver};

use super::render;
use super::theme::UiTheme;
use crate::core::KeyInput;
use crate::kernel::services::adapters::AsyncRuntime;
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action, FocusTarget, Store};

const MAX_RUNTIME_DRAIN_PER_TICK: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue { changed: bool },
    Quit,
}

pub(super) struct PanelSizes {
    pub explorer_width: u16,
    pub terminal_height: u16,
}

pub struct Workbench {
    store: Store,
    runtime: AsyncRuntime,
    rx: Receiver<Action>,
    theme: UiTheme,
    sizes: PanelSizes,
    /// Set when the terminal never reports releases; each press is then followed by one.
    synthesize_release: bool,
    last_editor_height: Option<usize>,
    last_explorer_height: Option<usize>,
}

impl Workbench {
    pub fn new(
        store: Store,
        runtime: AsyncRuntime,
        rx: Receiver<Action>,
        settings: &Settings,
        reports_key_release: bool,
    ) -> Self {
        Self {
            store,
            runtime,
            rx,
            theme: UiTheme::from_settings(&settings.theme),
            sizes: PanelSizes {
                explorer_width: settings.explorer_width.max(10),
                terminal_height: settings.terminal_height.max(3),
            },
            synthesize_release: !reports_key_release,
            last_editor_height: None,
            last_explorer_height: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.runtime.run(effect);
        }
        result.state_changed
    }

    /// Applies actions the runtime finished since the last call.
    pub fn poll_runtime(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_RUNTIME_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(action) => changed |= self.dispatch(action),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("runtime channel closed");
                    break;
                }
            }
        }
        changed
    }

    pub fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Resize(_, _) => Flow::Continue { changed: true },
            Event::Paste(text) => {
                let changed = self.handle_paste(&text);
                Flow::Continue { changed }
            }
            _ => Flow::Continue { changed: false },
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Flow {
        let is_press = key.kind != KeyEventKind::Release;

        if is_press {
            if let Some(flow) = self.handle_global_key(&key) {
                return flow;
            }
        }

        let changed = if self.store.state().ui.config_picker.visible {
            is_press && self.handle_picker_key(&key)
        } else {
            match self.store.state().ui.focus {
                FocusTarget::Editor => self.handle_editor_key(key),
                FocusTarget::Explorer => is_press && self.handle_explorer_key(&key),
                FocusTarget::Terminal => is_press && self.handle_terminal_key(&key),
            }
        };
        Flow::Continue { changed }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> Option<Flow> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        let action = match key.code {
            KeyCode::Char('q') if ctrl => return Some(Flow::Quit),
            KeyCode::Char('s') if ctrl => Action::SaveActive,
            KeyCode::Char('w') if ctrl => Action::CloseActiveTab,
            KeyCode::Char('t') if ctrl => Action::ToggleTerminal,
            KeyCode::Char('p') if ctrl => Action::ShowConfigPicker,
            KeyCode::Char('e') if ctrl => {
                let focus = if self.store.state().ui.focus == FocusTarget::Explorer {
                    FocusTarget::Editor
                } else {
                    FocusTarget::Explorer
                };
                Action::SetFocus(focus)
            }
            KeyCode::Right if alt => Action::NextTab,
            KeyCode::Left if alt => Action::PrevTab,
            _ => return None,
        };
        Some(Flow::Continue {
            changed: self.dispatch(action),
        })
    }

    fn handle_picker_key(&mut self, key: &KeyEvent) -> bool {
        let action = match key.code {
            KeyCode::Up => Action::ConfigPickerMove(-1),
            KeyCode::Down => Action::ConfigPickerMove(1),
            KeyCode::Enter => Action::ConfigPickerAccept,
            KeyCode::Esc => Action::HideConfigPicker,
            _ => return false,
        };
        self.dispatch(action)
    }

    fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        // Releases bypass the modifier filter; they clear the repeat guard.
        if key.kind != KeyEventKind::Release
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        let input = KeyInput::from(key);
        let mut changed = self.dispatch(Action::EditorKey(input));
        if self.synthesize_release && !input.is_release() {
            changed |= self.dispatch(Action::EditorKey(KeyInput::release(input.code)));
        }
        changed
    }

    fn handle_explorer_key(&mut self, key: &KeyEvent) -> bool {
        let action = match key.code {
            KeyCode::Up => Action::ExplorerMoveSelection { delta: -1 },
            KeyCode::Down => Action::ExplorerMoveSelection { delta: 1 },
            KeyCode::PageUp => Action::ExplorerMoveSelection { delta: -10 },
            KeyCode::PageDown => Action::ExplorerMoveSelection { delta: 10 },
            KeyCode::Enter | KeyCode::Right => Action::ExplorerActivate,
            KeyCode::Esc => Action::SetFocus(FocusTarget::Editor),
            _ => return false,
        };
        self.dispatch(action)
    }

    fn handle_terminal_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let action = match key.code {
            KeyCode::Char(ch) => Action::TerminalInput(ch),
            KeyCode::Backspace => Action::TerminalBackspace,
            KeyCode::Enter => Action::TerminalSubmit,
            KeyCode::Up => Action::TerminalHistory(-1),
            KeyCode::Down => Action::TerminalHistory(1),
            KeyCode::Esc => Action::SetFocus(FocusTarget::Editor),
            _ => return false,
        };
        self.dispatch(action)
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        let mut changed = false;
        match self.store.state().ui.focus {
            FocusTarget::Terminal => {
                for ch in text.chars().filter(|c| !c.is_control()) {
                    changed |= self.dispatch(Action::TerminalInput(ch));
                }
            }
            FocusTarget::Editor => {
                changed = self.dispatch(Action::EditorPaste(text.to_string()));
            }
            FocusTarget::Explorer => {}
        }
        changed
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let heights = render::render_workbench(frame, self.store.state(), &self.theme, &self.sizes);
        self.last_editor_height = Some(heights.editor);
        self.last_explorer_height = Some(heights.explorer);
    }

    /// Pushes the view heights measured by the last render into the kernel.
    pub fn sync_view_heights(&mut self) -> bool {
        let mut changed = false;
        if let Some(height) = self.last_editor_height {
            changed |= self.dispatch(Action::EditorSetViewHeight { height });
        }
        if let Some(height) = self.last_explorer_height {
            changed |= self.dispatch(Action::ExplorerSetViewHeight { height });
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/workbench.rs"]
mod tests;
