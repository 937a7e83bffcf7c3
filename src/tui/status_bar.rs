//! Status bar widget for displaying status messages and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: last message, marking summary and key hints
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let message_style = if state.status_is_error {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.text)
        };

        let marked = state.source.marked().len();
        let marking_line = Line::from(vec![
            Span::styled("Marked: ", Style::default().fg(theme.primary)),
            Span::styled(
                marked.to_string(),
                Style::default().fg(if marked > 0 { theme.accent } else { theme.text_muted }),
            ),
            Span::styled("  Columns: ", Style::default().fg(theme.primary)),
            Span::styled(
                state
                    .builder
                    .board()
                    .map_or_else(|| "-".to_string(), |b| b.columns.len().to_string()),
                Style::default().fg(theme.text_secondary),
            ),
        ]);

        let hints = [
            ("Click", "mark"),
            ("Shift+Click", "add"),
            ("Esc", "clear"),
            ("o", "order"),
            ("p", "pin"),
            ("r", "reload"),
            ("?", "help"),
            ("q", "quit"),
        ];
        let mut hint_spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            hint_spans.push(Span::styled(
                key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            hint_spans.push(Span::styled(
                format!(" {action}  "),
                Style::default().fg(theme.text_muted),
            ));
        }

        let status = Paragraph::new(vec![
            Line::from(Span::styled(state.status_message.clone(), message_style)),
            marking_line,
            Line::from(hint_spans),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(status, area);
    }
}
