//! Popup for editing the persisted column order, one label per line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::component::Component;
use super::Theme;

/// Events emitted by the order editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEditorEvent {
    /// User saved the edited text
    Save(String),
    /// User dismissed the editor without saving
    Cancel,
}

/// Multi-line text editor for the column order.
#[derive(Debug, Clone)]
pub struct OrderEditor {
    lines: Vec<String>,
    /// Cursor row
    row: usize,
    /// Cursor column, in characters
    col: usize,
    closed: bool,
}

impl OrderEditor {
    /// Opens the editor with `text` and the cursor at its end.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self {
            lines,
            row,
            col,
            closed: false,
        }
    }

    /// Current editor text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Cursor position as `(row, column)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn byte_offset(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_offset(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_offset(line, self.col);
        let rest = line.split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_offset(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    fn move_vertical(&mut self, up: bool) {
        if up && self.row > 0 {
            self.row -= 1;
        } else if !up && self.row + 1 < self.lines.len() {
            self.row += 1;
        }
        self.col = self.col.min(self.line_len(self.row));
    }
}

impl Component for OrderEditor {
    type Event = OrderEditorEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.closed = true;
                return Some(OrderEditorEvent::Save(self.text()));
            }
            (KeyCode::Esc, _) => {
                self.closed = true;
                return Some(OrderEditorEvent::Cancel);
            }
            (KeyCode::Enter, _) => self.insert_newline(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Left, _) => self.col = self.col.saturating_sub(1),
            (KeyCode::Right, _) => self.col = (self.col + 1).min(self.line_len(self.row)),
            (KeyCode::Up, _) => self.move_vertical(true),
            (KeyCode::Down, _) => self.move_vertical(false),
            (KeyCode::Home, _) => self.col = 0,
            (KeyCode::End, _) => self.col = self.line_len(self.row),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert_char(c),
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .map(|(row, text)| {
                if row != self.row {
                    return Line::from(Span::styled(text.clone(), Style::default().fg(theme.text)));
                }
                // Draw the cursor as a reversed cell
                let at = Self::byte_offset(text, self.col);
                let (before, after) = text.split_at(at);
                let mut rest = after.chars();
                let under = rest.next().map_or_else(|| " ".to_string(), String::from);
                Line::from(vec![
                    Span::styled(before.to_string(), Style::default().fg(theme.text)),
                    Span::styled(
                        under,
                        Style::default()
                            .fg(theme.text)
                            .add_modifier(Modifier::REVERSED),
                    ),
                    Span::styled(rest.as_str().to_string(), Style::default().fg(theme.text)),
                ])
            })
            .collect();

        let visible = chunks[0].height.saturating_sub(2) as usize;
        let scroll = self.row.saturating_sub(visible.saturating_sub(1));
        let editor = Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Column Order (one label per line) ")
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );
        f.render_widget(editor, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Ctrl+S", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Save  "),
            Span::styled("Esc", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel  "),
            Span::styled("Enter", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" New line"),
        ]))
        .style(Style::default().fg(theme.text).bg(theme.background))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[1]);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(editor: &mut OrderEditor, text: &str) {
        for c in text.chars() {
            editor.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_new_places_cursor_at_end() {
        let editor = OrderEditor::new("Todo\nDone");
        assert_eq!(editor.cursor(), (1, 4));
        assert_eq!(editor.text(), "Todo\nDone");
    }

    #[test]
    fn test_enter_inserts_newline() {
        let mut editor = OrderEditor::new("Todo");
        editor.handle_input(key(KeyCode::Enter));
        type_str(&mut editor, "Done");
        assert_eq!(editor.text(), "Todo\nDone");
        assert!(!editor.should_close());
    }

    #[test]
    fn test_enter_splits_line_at_cursor() {
        let mut editor = OrderEditor::new("TodoDone");
        for _ in 0..4 {
            editor.handle_input(key(KeyCode::Left));
        }
        editor.handle_input(key(KeyCode::Enter));
        assert_eq!(editor.text(), "Todo\nDone");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = OrderEditor::new("Todo\nDone");
        editor.handle_input(key(KeyCode::Home));
        editor.handle_input(key(KeyCode::Backspace));
        assert_eq!(editor.text(), "TodoDone");
        assert_eq!(editor.cursor(), (0, 4));
    }

    #[test]
    fn test_multibyte_labels() {
        let mut editor = OrderEditor::new("Fertig");
        editor.handle_input(key(KeyCode::Enter));
        type_str(&mut editor, "Später");
        editor.handle_input(key(KeyCode::Backspace));
        assert_eq!(editor.text(), "Fertig\nSpäte");
    }

    #[test]
    fn test_ctrl_s_saves() {
        let mut editor = OrderEditor::new("");
        type_str(&mut editor, "Backlog");
        let event = editor.handle_input(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(event, Some(OrderEditorEvent::Save("Backlog".to_string())));
        assert!(editor.should_close());
    }

    #[test]
    fn test_esc_cancels() {
        let mut editor = OrderEditor::new("Todo");
        assert_eq!(editor.handle_input(key(KeyCode::Esc)), Some(OrderEditorEvent::Cancel));
        assert!(editor.should_close());
    }
}
