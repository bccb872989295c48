use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use ratatui::Frame;
use ropey::Rope;
use unicode_width::UnicodeWidthChar;

use super::theme::{rgb, UiTheme};
use super::workbench::PanelSizes;
use crate::kernel::color::{ColorScheme, TEXT};
use crate::kernel::highlight::highlight_line;
use crate::kernel::syntax::SyntaxDocument;
use crate::kernel::terminal::CommandStatus;
use crate::kernel::{AppState, EditorState, FocusTarget};

const SUGGESTION_ROWS: usize = 8;
const PICKER_MAX_ROWS: u16 = 12;

pub(super) struct ViewHeights {
    pub editor: usize,
    pub explorer: usize,
}

pub(super) fn render_workbench(
    frame: &mut Frame,
    state: &AppState,
    theme: &UiTheme,
    sizes: &PanelSizes,
) -> ViewHeights {
    let area = frame.area();
    let terminal_height = if state.ui.terminal_visible {
        sizes.terminal_height.min(area.height.saturating_sub(5))
    } else {
        0
    };

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(terminal_height),
        Constraint::Length(1),
    ])
    .split(area);

    let explorer_width = sizes.explorer_width.min(rows[1].width / 2);
    let cols = Layout::horizontal([Constraint::Length(explorer_width), Constraint::Min(1)])
        .split(rows[1]);

    render_tabs(frame, rows[0], state, theme);
    let explorer = render_explorer(frame, cols[0], state, theme);
    let editor = render_editor(frame, cols[1], state, theme);
    if terminal_height > 0 {
        render_terminal(frame, rows[2], state, theme);
    }
    render_status(frame, rows[3], state, theme);

    if state.ui.config_picker.visible {
        render_config_picker(frame, area, state, theme);
    }

    ViewHeights { editor, explorer }
}

fn panel(title: String, focused: bool, theme: &UiTheme) -> Block<'static> {
    let border = if focused {
        theme.focus_border
    } else {
        theme.inactive_border
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

fn has_focus(state: &AppState, target: FocusTarget) -> bool {
    !state.ui.config_picker.visible && state.ui.focus == target
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    if state.tabs.is_empty() {
        let title = Span::styled(" asmpad", Style::default().fg(theme.muted_fg));
        frame.render_widget(Paragraph::new(Line::from(title)), area);
        return;
    }

    let titles: Vec<String> = state
        .tabs
        .tabs()
        .iter()
        .map(|t| t.display_title())
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tabs.active_index().unwrap_or(0))
        .style(Style::default().fg(theme.muted_fg))
        .highlight_style(
            Style::default()
                .fg(theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, area);
}

fn render_explorer(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) -> usize {
    let explorer = &state.explorer;
    let title = explorer
        .tree
        .as_ref()
        .and_then(|t| t.absolute_root().file_name())
        .map(|n| format!(" {} ", n.to_string_lossy()))
        .unwrap_or_else(|| " Explorer ".to_string());
    let focused = has_focus(state, FocusTarget::Explorer);
    let block = panel(title, focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let start = explorer.scroll_offset.min(explorer.rows.len());
    let end = (start + height).min(explorer.rows.len());

    let lines: Vec<Line> = explorer.rows[start..end]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let indent = "  ".repeat(row.depth as usize);
            let icon = match (row.is_dir, row.is_expanded) {
                (true, true) => "▼ ",
                (true, false) => "▶ ",
                (false, _) => "  ",
            };
            let text = format!("{}{}{}", indent, icon, row.name.to_string_lossy());

            let mut style = if row.is_dir {
                Style::default().fg(theme.accent_fg)
            } else {
                Style::default()
            };
            if start + i == explorer.selected && focused {
                style = style.bg(theme.selection_bg);
            }
            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
    height
}

/// One buffer line without its line break; tabs become single spaces so columns map 1:1.
fn display_line(rope: &Rope, row: usize) -> String {
    rope.line(row)
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}

fn highlighted_spans(
    line: &str,
    doc: Option<&SyntaxDocument>,
    scheme: &ColorScheme,
) -> Vec<Span<'static>> {
    let plain = Style::default().fg(rgb(TEXT));
    let mut spans = Vec::new();
    let mut pos = 0;

    for hl in highlight_line(line, doc) {
        if hl.start < pos {
            continue;
        }
        if hl.start > pos {
            spans.push(Span::styled(line[pos..hl.start].to_string(), plain));
        }
        let color = rgb(scheme.color_for(hl.kind, doc));
        spans.push(Span::styled(
            line[hl.start..hl.end].to_string(),
            Style::default().fg(color),
        ));
        pos = hl.end;
    }
    if pos < line.len() {
        spans.push(Span::styled(line[pos..].to_string(), plain));
    }
    spans
}

fn render_editor(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) -> usize {
    let focused = has_focus(state, FocusTarget::Editor);

    let Some(tab) = state.tabs.active_tab() else {
        let block = panel(" Editor ".to_string(), focused, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let hint = Paragraph::new("Open a file from the explorer (Ctrl+E)")
            .style(Style::default().fg(theme.muted_fg))
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return inner.height as usize;
    };

    let title = match &tab.config {
        Some(config) => format!(" {} [{}] ", tab.display_title(), config.name),
        None => format!(" {} ", tab.display_title()),
    };
    let block = panel(title, focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = inner.height as usize;
    let rope = tab.editor.text();
    let line_count = rope.len_lines();
    let gutter = line_count.to_string().len() + 1;
    let fallback = ColorScheme::default();
    let scheme = state.active_color_scheme().unwrap_or(&fallback);
    let doc = tab.syntax.as_deref();
    let offset = tab.viewport.line_offset.min(line_count.saturating_sub(1));
    let number_style = Style::default().fg(theme.muted_fg);

    let lines: Vec<Line> = (offset..(offset + height).min(line_count))
        .map(|row| {
            let text = display_line(rope, row);
            let mut spans = vec![Span::styled(
                format!("{:>width$} ", row + 1, width = gutter - 1),
                number_style,
            )];
            spans.extend(highlighted_spans(&text, doc, scheme));
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    let (row, col) = tab.editor.cursor_row_col();
    if row < offset || row >= offset + height || inner.width == 0 {
        return height;
    }
    let line = display_line(rope, row);
    let text_x: usize = line
        .chars()
        .take(col)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let x = inner.x + (gutter + text_x).min(inner.width as usize - 1) as u16;
    let y = inner.y + (row - offset) as u16;
    if focused {
        frame.set_cursor_position((x, y));
    }
    if tab.editor.is_autocomplete_visible() {
        render_suggestions(frame, inner, (x, y), &tab.editor, theme);
    }
    height
}

fn render_suggestions(
    frame: &mut Frame,
    bounds: Rect,
    cursor: (u16, u16),
    editor: &EditorState,
    theme: &UiTheme,
) {
    let items = editor.suggestions();
    if items.is_empty() || bounds.height < 3 {
        return;
    }

    let visible = items.len().min(SUGGESTION_ROWS);
    let selected = editor.selected_suggestion().min(items.len() - 1);
    let first = (selected + 1).saturating_sub(visible);
    let widest = items.iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let width = (widest as u16 + 4).min(bounds.width);
    let height = (visible as u16 + 2).min(bounds.height);
    let (cx, cy) = cursor;
    let y = if cy + 1 + height <= bounds.bottom() {
        cy + 1
    } else {
        cy.saturating_sub(height).max(bounds.y)
    };
    let x = cx.min(bounds.right().saturating_sub(width));
    let popup = Rect::new(x, y, width, height);

    let lines: Vec<Line> = items[first..first + visible]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if first + i == selected {
                Style::default()
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {} ", item), style))
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focus_border)),
        ),
        popup,
    );
}

fn render_terminal(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let focused = has_focus(state, FocusTarget::Terminal);
    let block = panel(" Terminal ".to_string(), focused, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let terminal = &state.terminal;
    let prompt_style = Style::default().fg(theme.prompt_fg);
    let muted = Style::default().fg(theme.muted_fg);
    let prompt = |dir: &std::path::Path| format!("[{}]~$ ", terminal.display_dir(dir));

    let mut lines: Vec<Line> = Vec::new();
    for entry in &terminal.entries {
        lines.push(Line::from(vec![
            Span::styled(prompt(&entry.cwd), prompt_style),
            Span::raw(entry.command.clone()),
        ]));
        lines.extend(entry.output.iter().map(|l| Line::from(l.clone())));
        match entry.status {
            CommandStatus::Running => lines.push(Line::from(Span::styled("running...", muted))),
            CommandStatus::Exited(Some(code)) if code != 0 => {
                lines.push(Line::from(Span::styled(format!("exit {}", code), muted)))
            }
            CommandStatus::Exited(_) => {}
        }
    }
    let current = prompt(&terminal.cwd);
    let cursor_x = (current.chars().count() + terminal.input.chars().count()) as u16;
    lines.push(Line::from(vec![
        Span::styled(current, prompt_style),
        Span::raw(terminal.input.clone()),
    ]));

    let height = inner.height as usize;
    let skip = lines.len().saturating_sub(height);
    let shown = lines.len() - skip;
    frame.render_widget(
        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()),
        inner,
    );

    if focused && shown > 0 && inner.width > 0 {
        let x = inner.x + cursor_x.min(inner.width - 1);
        let y = inner.y + shown as u16 - 1;
        frame.set_cursor_position((x, y));
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let message = state.ui.status.clone().unwrap_or_else(|| {
        "Ctrl+Q quit  Ctrl+S save  Ctrl+W close  Ctrl+E files  Ctrl+T terminal  Ctrl+P config"
            .to_string()
    });
    frame.render_widget(
        Paragraph::new(format!(" {}", message)).style(Style::default().fg(theme.muted_fg)),
        area,
    );

    if let Some(tab) = state.tabs.active_tab() {
        let (row, col) = tab.editor.cursor_row_col();
        let position = format!("Ln {}, Col {} ", row + 1, col + 1);
        frame.render_widget(
            Paragraph::new(position)
                .style(Style::default().fg(theme.accent_fg))
                .alignment(Alignment::Right),
            area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_config_picker(frame: &mut Frame, area: Rect, state: &AppState, theme: &UiTheme) {
    let picker = &state.ui.config_picker;
    let rows = (state.configs.len().max(1) as u16).min(PICKER_MAX_ROWS);
    let popup = centered(area, (area.width / 2).max(40), rows + 2);
    let block = panel(" Select configuration ".to_string(), true, theme);
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    if state.configs.is_empty() {
        let hint = Paragraph::new("No configurations. Add one with: asmpad add-config NAME PATH")
            .style(Style::default().fg(theme.muted_fg));
        frame.render_widget(hint, inner);
        return;
    }

    let visible = inner.height as usize;
    let first = (picker.selected + 1).saturating_sub(visible);
    let lines: Vec<Line> = state
        .configs
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, config)| {
            let style = if i == picker.selected {
                Style::default()
                    .bg(theme.selection_bg)
                    .fg(theme.accent_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {}", config.name), style),
                Span::styled(
                    format!("  {}", config.json_path.display()),
                    Style::default().fg(theme.muted_fg),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
