//! Board widget: column layout, hit-testing and drawing.
//!
//! The layout is computed once per frame from the current board and kept so
//! mouse events can be mapped back to the element under the pointer.

use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::models::{Board, Card, ColumnKey, GestureTarget, RecordId};

/// Narrowest column drawn before the board starts scrolling horizontally.
pub const MIN_COLUMN_WIDTH: u16 = 22;

/// Screen area of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRegion {
    /// Record shown by the card
    pub record_id: RecordId,
    /// Card area
    pub area: Rect,
}

/// Screen areas of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRegion {
    /// Position of the column on the board
    pub column: usize,
    /// Column identity
    pub key: ColumnKey,
    /// Whole column block, borders included
    pub area: Rect,
    /// Header row (the block's top border carrying the title)
    pub header: Rect,
    /// Leading cards of the column that fit on screen
    pub cards: Vec<CardRegion>,
    /// Cards that did not fit
    pub hidden: usize,
}

/// Where everything on the board was drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Area given to the board
    pub area: Rect,
    /// Visible columns, left to right
    pub columns: Vec<ColumnRegion>,
}

fn card_height(card: &Card) -> u16 {
    u16::try_from(card.content_lines.len().max(1)).unwrap_or(u16::MAX)
}

impl BoardLayout {
    /// Lays out `board` in `area`, starting at column `offset`.
    #[must_use]
    pub fn compute(board: &Board, area: Rect, offset: usize) -> Self {
        let remaining = board.columns.len().saturating_sub(offset);
        if remaining == 0 || area.width == 0 || area.height < 2 {
            return Self {
                area,
                columns: Vec::new(),
            };
        }

        let fit = usize::from((area.width / MIN_COLUMN_WIDTH).max(1));
        let count = fit.min(remaining);
        let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
        let width = area.width / count_u16;

        let mut columns = Vec::with_capacity(count);
        for (index, column) in board.columns.iter().enumerate().skip(offset).take(count) {
            let i = u16::try_from(index - offset).unwrap_or(u16::MAX);
            let x = area.x + i * width;
            // Last column absorbs the rounding remainder
            let w = if i + 1 == count_u16 {
                area.x + area.width - x
            } else {
                width
            };
            let block = Rect::new(x, area.y, w, area.height);
            let header = Rect::new(x, area.y, w, 1);

            let inner_bottom = area.y + area.height - 1;
            let mut y = area.y + 1;
            let mut cards = Vec::new();
            let mut hidden = 0;
            for card in &column.cards {
                let h = card_height(card);
                if hidden > 0 || y.saturating_add(h) > inner_bottom || w < 3 {
                    hidden += 1;
                    continue;
                }
                cards.push(CardRegion {
                    record_id: card.record_id.clone(),
                    area: Rect::new(x + 1, y, w - 2, h),
                });
                y = y.saturating_add(h).saturating_add(1);
            }

            columns.push(ColumnRegion {
                column: index,
                key: column.key.clone(),
                area: block,
                header,
                cards,
                hidden,
            });
        }

        Self { area, columns }
    }

    /// Gesture targets under `(x, y)`, innermost first.
    ///
    /// Empty when the point is outside the board.
    #[must_use]
    pub fn hit_path(&self, x: u16, y: u16) -> Vec<GestureTarget> {
        let pos = Position::new(x, y);
        if !self.area.contains(pos) {
            return Vec::new();
        }

        let mut path = Vec::with_capacity(2);
        if let Some(column) = self.columns.iter().find(|c| c.area.contains(pos)) {
            if column.header.contains(pos) {
                path.push(GestureTarget::ColumnHeader(column.key.clone()));
            } else if let Some(card) = column.cards.iter().find(|c| c.area.contains(pos)) {
                path.push(GestureTarget::Card(card.record_id.clone()));
            }
        }
        path.push(GestureTarget::Background);
        path
    }

    /// Record whose card is under `(x, y)`, if any.
    #[must_use]
    pub fn card_at(&self, x: u16, y: u16) -> Option<&RecordId> {
        let pos = Position::new(x, y);
        self.columns
            .iter()
            .flat_map(|column| column.cards.iter())
            .find(|card| card.area.contains(pos))
            .map(|card| &card.record_id)
    }
}

/// Draws `board` according to `layout`.
pub fn render_board(f: &mut Frame, board: &Board, layout: &BoardLayout, theme: &Theme) {
    if layout.columns.is_empty() {
        let message = if board.columns.is_empty() {
            "No columns"
        } else {
            "Scrolled past the last column"
        };
        render_placeholder(f, layout.area, message, theme);
        return;
    }

    for region in &layout.columns {
        let Some(column) = board.columns.get(region.column).filter(|c| c.key == region.key) else {
            continue;
        };
        let border = if column.is_phantom() {
            theme.phantom_border
        } else {
            theme.column_border
        };
        let title_style = if column.is_phantom() {
            Style::default().fg(theme.text_muted)
        } else {
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {} ({}) ", column.label, column.cards.len()),
                title_style,
            ))
            .style(Style::default().bg(theme.background));
        if region.hidden > 0 {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" +{} more ", region.hidden),
                    Style::default().fg(theme.text_muted),
                ))
                .alignment(Alignment::Right),
            );
        }
        f.render_widget(block, region.area);

        for (card, card_region) in column.cards.iter().zip(&region.cards) {
            render_card(f, card, card_region.area);
        }
    }
}

fn render_card(f: &mut Frame, card: &Card, area: Rect) {
    let style = Style::default()
        .bg(card.background_rgb.to_ratatui_color())
        .fg(card.foreground_color.color().to_ratatui_color());

    let mut lines: Vec<Line> = card
        .content_lines
        .iter()
        .map(|text| Line::from(text.clone()))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    if let Some(icon) = &card.icon {
        lines[0]
            .spans
            .insert(0, Span::styled(format!("[{icon}] "), style.add_modifier(Modifier::BOLD)));
    }

    f.render_widget(Paragraph::new(lines).style(style), area);
}

/// Draws a centered message in place of the board.
pub fn render_placeholder(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let placeholder = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted).bg(theme.background))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(placeholder, area);
}
