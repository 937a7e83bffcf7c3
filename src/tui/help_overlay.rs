//! Help overlay listing mouse gestures and key bindings, toggled with `?`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::component::Component;
use super::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "MOUSE",
        &[
            ("Click card", "Mark that record"),
            ("Click header", "Mark every record in the column"),
            ("Click background", "Clear the marking"),
            ("Shift+Click", "Add to the marking instead of replacing it"),
            ("Hover card", "Show its axis values"),
        ],
    ),
    (
        "BOARD",
        &[
            ("Left/Right", "Scroll columns"),
            ("Esc", "Clear the marking"),
            ("r", "Reload the data file"),
        ],
    ),
    (
        "COLUMN ORDER",
        &[
            ("o", "Edit the persisted column order"),
            ("p", "Pin the displayed order"),
        ],
    ),
    (
        "SYSTEM",
        &[("?", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ),
];

/// Events emitted by the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOverlayEvent {
    /// User dismissed the overlay
    Close,
}

/// Scrollable help overlay.
#[derive(Debug, Clone, Default)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    closed: bool,
}

impl HelpOverlay {
    /// Creates a help overlay scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (title, entries) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("═══ {title} ═══"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )));
            for (keys, description) in *entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<18}"), Style::default().fg(theme.success)),
                    Span::styled((*description).to_string(), Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines
    }

    fn total_lines() -> usize {
        SECTIONS.iter().map(|(_, entries)| entries.len() + 2).sum()
    }
}

impl Component for HelpOverlay {
    type Event = HelpOverlayEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => {
                self.closed = true;
                return Some(HelpOverlayEvent::Close);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.scroll_offset + 1 < Self::total_lines() {
                    self.scroll_offset += 1;
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        f.render_widget(Clear, area);
        let help = Paragraph::new(Self::content(theme))
            .scroll((u16::try_from(self.scroll_offset).unwrap_or(u16::MAX), 0))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );
        f.render_widget(help, area);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}
