//! Frontend-neutral key input consumed by the kernel.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    Esc,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub phase: KeyPhase,
}

impl KeyInput {
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            phase: KeyPhase::Press,
        }
    }

    pub const fn release(code: KeyCode) -> Self {
        Self {
            code,
            phase: KeyPhase::Release,
        }
    }

    pub fn is_release(&self) -> bool {
        self.phase == KeyPhase::Release
    }
}

#[cfg(feature = "tui")]
impl From<crossterm::event::KeyEvent> for KeyInput {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode as CtCode, KeyEventKind};

        let code = match event.code {
            CtCode::Char(ch) => KeyCode::Char(ch),
            CtCode::Enter => KeyCode::Enter,
            CtCode::Tab => KeyCode::Tab,
            CtCode::Up => KeyCode::Up,
            CtCode::Down => KeyCode::Down,
            CtCode::Left => KeyCode::Left,
            CtCode::Right => KeyCode::Right,
            CtCode::Home => KeyCode::Home,
            CtCode::End => KeyCode::End,
            CtCode::Backspace => KeyCode::Backspace,
            CtCode::Delete => KeyCode::Delete,
            CtCode::Esc => KeyCode::Esc,
            _ => KeyCode::Other,
        };
        // Held keys arrive as `Repeat`; they count as presses so the repeat guard can drop them.
        let phase = match event.kind {
            KeyEventKind::Release => KeyPhase::Release,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Press,
        };
        Self { code, phase }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
