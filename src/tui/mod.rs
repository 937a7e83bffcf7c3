//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the board widgets using Ratatui. The terminal plays the host's
//! display role: it shows the error overlay and tooltip on request and
//! feeds mouse gestures back to the board builder.

pub mod board_view;
pub mod component;
pub mod help_overlay;
pub mod order_editor;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ConfigStore;
use crate::constants::APP_NAME;
use crate::error::BoardError;
use crate::host::{FileDataSource, ModControls};
use crate::models::{ErrorDescriptor, Gesture};
use crate::services::{format_order_labels, BoardBuilder, CycleOutcome};

pub use board_view::{BoardLayout, CardRegion, ColumnRegion};
pub use component::Component;
pub use help_overlay::{HelpOverlay, HelpOverlayEvent};
pub use order_editor::{OrderEditor, OrderEditorEvent};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Host display surfaces driven by the board builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPanel {
    /// Error overlay contents while it is shown
    pub errors: Option<Vec<ErrorDescriptor>>,
    /// Tooltip text while it is shown
    pub tooltip: Option<String>,
    /// Render completion signals received
    pub renders: u64,
}

impl ModControls for HostPanel {
    fn show_error_overlay(&mut self, errors: &[ErrorDescriptor]) {
        self.errors = Some(errors.to_vec());
    }

    fn hide_error_overlay(&mut self) {
        self.errors = None;
    }

    fn show_tooltip(&mut self, text: &str) {
        self.tooltip = Some(text.to_string());
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    fn signal_render_complete(&mut self) {
        self.renders += 1;
    }
}

/// Active popup
#[derive(Debug, Clone)]
pub enum Popup {
    /// Key binding overview
    Help(HelpOverlay),
    /// Persisted column order editor
    OrderEditor(OrderEditor),
}

/// Application state for the board viewer.
#[derive(Debug)]
pub struct AppState {
    /// Board builder owning the rendered board
    pub builder: BoardBuilder,
    /// Data source and marking store
    pub source: FileDataSource,
    /// Config file holding the persisted order
    pub store: ConfigStore,
    /// Error overlay, tooltip and render signals
    pub panel: HostPanel,
    /// Resolved color theme
    pub theme: Theme,
    /// Where the board was last laid out
    pub layout: BoardLayout,
    /// First visible column
    pub column_offset: usize,
    /// Active popup, if any
    pub popup: Option<Popup>,
    /// Last status message
    pub status_message: String,
    /// Whether the status message reports a failure
    pub status_is_error: bool,
    /// Title shown in the title bar
    pub title: String,
    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state around a data source and config store.
    #[must_use]
    pub fn new(source: FileDataSource, store: ConfigStore, title: impl Into<String>) -> Self {
        let config = store.config();
        let theme = Theme::from_mode(config.ui.theme_mode);
        let popup = config
            .ui
            .show_help_on_startup
            .then(|| Popup::Help(HelpOverlay::new()));
        let builder = BoardBuilder::new(config.board.invalid_colors);

        Self {
            builder,
            source,
            store,
            panel: HostPanel::default(),
            theme,
            layout: BoardLayout::default(),
            column_offset: 0,
            popup,
            status_message: "Waiting for data...".to_string(),
            status_is_error: false,
            title: title.into(),
            should_quit: false,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    /// Set a failure status message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Runs a delivery cycle if the source queued one.
    pub fn pump_deliveries(&mut self) {
        let Some(delivery) = self.source.next_delivery() else {
            return;
        };
        match self.builder.on_delivery(&delivery, &mut self.panel) {
            CycleOutcome::Rendered(summary) => {
                let mut message = format!("{} columns, {} cards", summary.columns, summary.cards);
                if summary.skipped > 0 {
                    message.push_str(&format!(", {} skipped (invalid color)", summary.skipped));
                }
                self.set_status(message);
            }
            CycleOutcome::Halted(BoardError::DataError(errors)) => {
                self.set_error(format!("Data reported {} error(s)", errors.len()));
            }
            CycleOutcome::Halted(BoardError::ViewExpired) => {
                self.set_status("View expired, keeping the previous board");
            }
            CycleOutcome::Halted(err) => self.set_error(format!("Render abandoned: {err}")),
        }
    }

    /// Recomputes the board layout for a terminal of size `area`.
    pub fn refresh_layout(&mut self, area: Rect) {
        let main = screen_chunks(area)[1];
        self.layout = match self.builder.board() {
            Some(board) => {
                self.column_offset = self
                    .column_offset
                    .min(board.columns.len().saturating_sub(1));
                BoardLayout::compute(board, main, self.column_offset)
            }
            None => BoardLayout {
                area: main,
                columns: Vec::new(),
            },
        };
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Overlays sit above the board and swallow clicks
                if self.popup.is_some() || self.panel.errors.is_some() {
                    return;
                }
                let additive = mouse.modifiers.contains(KeyModifiers::SHIFT);
                let path = self.layout.hit_path(mouse.column, mouse.row);
                if let Some(outcome) =
                    self.builder
                        .bridge()
                        .dispatch_path(&path, additive, &mut self.source)
                {
                    debug!(level = ?outcome.consumed_by, requests = outcome.requests, "click");
                }
            }
            MouseEventKind::Moved => {
                let hovered = self.layout.card_at(mouse.column, mouse.row).cloned();
                self.builder.on_hover(hovered.as_ref(), &mut self.panel);
            }
            MouseEventKind::ScrollDown => self.scroll_columns(1),
            MouseEventKind::ScrollUp => self.scroll_columns(-1),
            _ => {}
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('?'), _) => self.popup = Some(Popup::Help(HelpOverlay::new())),
            (KeyCode::Char('o'), _) => self.open_order_editor(),
            (KeyCode::Char('p'), _) => self.pin_order(),
            (KeyCode::Char('r'), _) => self.reload(),
            (KeyCode::Esc, _) => {
                self.builder
                    .on_gesture(&Gesture::background(false), &mut self.source);
            }
            (KeyCode::Left | KeyCode::Char('h'), _) => self.scroll_columns(-1),
            (KeyCode::Right | KeyCode::Char('l'), _) => self.scroll_columns(1),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let (closing, event) = match popup {
            Popup::Help(help) => {
                help.handle_input(key);
                (help.should_close(), None)
            }
            Popup::OrderEditor(editor) => {
                let event = editor.handle_input(key);
                (editor.should_close(), event)
            }
        };
        if closing {
            self.popup = None;
        }
        match event {
            Some(OrderEditorEvent::Save(text)) => self.save_order(&text),
            Some(OrderEditorEvent::Cancel) => self.set_status("Order edit cancelled"),
            None => {}
        }
    }

    fn scroll_columns(&mut self, delta: isize) {
        let columns = self.builder.board().map_or(0, |b| b.columns.len());
        self.column_offset = self
            .column_offset
            .saturating_add_signed(delta)
            .min(columns.saturating_sub(1));
    }

    /// Opens the order editor with the stored order, or the displayed one
    /// when nothing is stored yet.
    pub fn open_order_editor(&mut self) {
        let stored = self.store.config().board.column_order.clone();
        let text = if stored.is_empty() {
            self.builder
                .board()
                .map(|board| format_order_labels(&board.labels()))
                .unwrap_or_default()
        } else {
            stored
        };
        self.popup = Some(Popup::OrderEditor(OrderEditor::new(&text)));
    }

    /// Saves user-edited order text and re-renders with it.
    pub fn save_order(&mut self, text: &str) {
        match self.builder.edit_order(text, &mut self.store) {
            Ok(stored) => {
                self.after_order_write();
                self.set_status(format!("Column order saved ({} labels)", stored.lines().count()));
            }
            Err(err) => {
                warn!(%err, "failed to save column order");
                self.set_error(format!("Failed to save column order: {err}"));
            }
        }
    }

    /// Persists the displayed column order.
    pub fn pin_order(&mut self) {
        match self.builder.pin_current_order(&mut self.store) {
            Ok(Some(_)) => {
                self.after_order_write();
                self.set_status("Column order pinned");
            }
            Ok(None) => self.set_status("Nothing to pin yet"),
            Err(err) => {
                warn!(%err, "failed to pin column order");
                self.set_error(format!("Failed to pin column order: {err}"));
            }
        }
    }

    fn after_order_write(&mut self) {
        self.source
            .set_order_text(self.store.config().board.order_text());
    }

    /// Re-reads the data file.
    pub fn reload(&mut self) {
        match self.source.reload() {
            Ok(()) => {
                info!("reload requested");
                self.set_status("Reloaded");
            }
            Err(err) => self.set_error(format!("Reload failed: {err:#}")),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        state.pump_deliveries();

        let size = terminal.size().context("Failed to read terminal size")?;
        state.refresh_layout(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => state.handle_key(key),
                Event::Mouse(mouse) => state.handle_mouse(mouse),
                // Resize and the rest re-render on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Title bar, board, status bar
fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(5),    // Board
            Constraint::Length(5), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let [title_area, board_area, status_area] = screen_chunks(f.area());

    render_title_bar(f, title_area, state);

    match state.builder.board() {
        Some(board) => board_view::render_board(f, board, &state.layout, theme),
        None => board_view::render_placeholder(f, board_area, "Waiting for data...", theme),
    }

    StatusBar::render(f, status_area, state, theme);

    if let Some(text) = &state.panel.tooltip {
        render_tooltip(f, board_area, text, theme);
    }

    // Host error display covers the board; the previous board stays underneath
    if let Some(errors) = &state.panel.errors {
        render_error_overlay(f, errors, theme);
    }

    match &state.popup {
        Some(Popup::Help(help)) => help.render(f, centered_rect(60, 70, f.area()), theme),
        Some(Popup::OrderEditor(editor)) => {
            editor.render(f, centered_rect(50, 60, f.area()), theme);
        }
        None => {}
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = format!(" {} - {}", APP_NAME, state.title);
    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Tooltip panel anchored to the bottom right of the board
fn render_tooltip(f: &mut Frame, board_area: Rect, text: &str, theme: &Theme) {
    let lines: Vec<Line> = text
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text))))
        .collect();
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    let width = (u16::try_from(longest).unwrap_or(u16::MAX).saturating_add(4))
        .min(board_area.width);
    let height = (u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2))
        .min(board_area.height);
    let area = Rect::new(
        board_area.x + board_area.width - width,
        board_area.y + board_area.height - height,
        width,
        height,
    );

    f.render_widget(Clear, area);
    let tooltip = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.surface)),
    );
    f.render_widget(tooltip, area);
}

/// Render error overlay on top of the board
fn render_error_overlay(f: &mut Frame, errors: &[ErrorDescriptor], theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);

    let lines: Vec<Line> = errors
        .iter()
        .map(|error| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(theme.error)),
                Span::styled(error.to_string(), Style::default().fg(theme.text)),
            ])
        })
        .collect();

    let overlay = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " ERROR ",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(theme.error))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(overlay, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GestureTarget;
    use crate::models::{AxisParts, DataDelivery, Record, RecordId};
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    fn delivery() -> DataDelivery {
        DataDelivery {
            records: Some(vec![
                Record::new("1", "#C8C8C8").with_column(["Todo"]).with_card(["Write docs"]),
                Record::new("2", "#C8C8C8").with_column(["Done"]).with_card(["Fix bug"]),
                Record::new("3", "#C8C8C8").with_column(["Todo"]).with_card(["Ship"]),
            ]),
            axis_parts: AxisParts::from_names(&["Status"], &["Task"], &[]),
            ..DataDelivery::default()
        }
    }

    fn state(dir: &TempDir) -> AppState {
        let store = ConfigStore::open(dir.path().join("config.toml")).unwrap();
        let source = FileDataSource::from_delivery(delivery(), store.config().board.order_text(), 40);
        let mut state = AppState::new(source, store, "test");
        state.popup = None;
        state.pump_deliveries();
        state.refresh_layout(Rect::new(0, 0, 80, 30));
        state
    }

    fn click(state: &mut AppState, x: u16, y: u16, modifiers: KeyModifiers) {
        state.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers,
        });
        state.pump_deliveries();
        state.refresh_layout(Rect::new(0, 0, 80, 30));
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initial_delivery_renders_board() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        assert_eq!(state.builder.board().unwrap().labels(), vec!["Todo", "Done"]);
        assert_eq!(state.panel.renders, 1);
        assert_eq!(state.layout.columns.len(), 2);
    }

    #[test]
    fn test_card_click_marks_record() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let area = state.layout.columns[0].cards[0].area;

        click(&mut state, area.x, area.y, KeyModifiers::NONE);
        assert_eq!(state.source.marked().len(), 1);
        assert!(state.source.marked().contains(&RecordId::new("1")));
        assert_eq!(state.panel.renders, 2);

        let area = state.layout.columns[1].cards[0].area;
        click(&mut state, area.x, area.y, KeyModifiers::SHIFT);
        assert_eq!(state.source.marked().len(), 2);
    }

    #[test]
    fn test_header_click_marks_column() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let header = state.layout.columns[0].header;
        assert!(matches!(
            state.layout.hit_path(header.x + 2, header.y).first(),
            Some(GestureTarget::ColumnHeader(_))
        ));

        click(&mut state, header.x + 2, header.y, KeyModifiers::NONE);
        let mut marked: Vec<_> = state.source.marked().iter().map(RecordId::as_str).collect();
        marked.sort_unstable();
        assert_eq!(marked, vec!["1", "3"]);
    }

    #[test]
    fn test_background_click_and_esc_clear() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let area = state.layout.columns[0].cards[0].area;
        click(&mut state, area.x, area.y, KeyModifiers::NONE);

        let bottom = state.layout.columns[0].area;
        click(&mut state, bottom.x + 2, bottom.y + bottom.height - 2, KeyModifiers::NONE);
        assert!(state.source.marked().is_empty());

        click(&mut state, area.x, area.y, KeyModifiers::NONE);
        state.handle_key(key(KeyCode::Esc));
        assert!(state.source.marked().is_empty());
    }

    #[test]
    fn test_clicks_ignored_under_popup() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        state.handle_key(key(KeyCode::Char('?')));
        let area = state.layout.columns[0].cards[0].area;
        click(&mut state, area.x, area.y, KeyModifiers::NONE);
        assert!(state.source.marked().is_empty());
    }

    #[test]
    fn test_hover_shows_and_hides_tooltip() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let area = state.layout.columns[0].cards[0].area;

        state.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: area.x,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            state.panel.tooltip.as_deref(),
            Some("Status: Todo\r\nTask: Write docs\r\n")
        );

        state.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(state.panel.tooltip, None);
    }

    #[test]
    fn test_pin_and_edit_order_write_config() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);

        state.handle_key(key(KeyCode::Char('p')));
        assert_eq!(state.store.config().board.column_order, "Todo\nDone");

        state.handle_key(key(KeyCode::Char('o')));
        assert!(matches!(state.popup, Some(Popup::OrderEditor(_))));
        state.handle_key(key(KeyCode::Enter));
        for c in "Later".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        state.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(state.popup.is_none());
        assert_eq!(state.store.config().board.column_order, "Todo\nDone\nLater");

        state.pump_deliveries();
        let board = state.builder.board().unwrap();
        assert_eq!(board.labels(), vec!["Todo", "Done", "Later"]);
        assert!(board.columns[2].is_phantom());
    }

    #[test]
    fn test_error_delivery_keeps_board_and_blocks_clicks() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(dir.path().join("config.toml")).unwrap();
        let mut bad = delivery();
        bad.errors = vec![ErrorDescriptor::new("Missing column axis")];
        let source = FileDataSource::from_delivery(bad, None, 40);
        let mut state = AppState::new(source, store, "test");
        state.popup = None;
        state.pump_deliveries();

        assert!(state.builder.board().is_none());
        assert_eq!(state.panel.errors.as_ref().map(Vec::len), Some(1));
        assert!(state.status_is_error);

        state.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert!(state.source.marked().is_empty());
    }

    #[test]
    fn test_render_smoke() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        state.panel.tooltip = Some("Status: Todo\r\n".to_string());
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, &state)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Kanboard - test"));
        assert!(text.contains("Todo (2)"));
    }

    #[test]
    fn test_additive_header_click_keeps_existing_marks() {
        let dir = TempDir::new().unwrap();
        let mut state = state(&dir);
        let area = state.layout.columns[0].cards[0].area;
        click(&mut state, area.x, area.y, KeyModifiers::NONE);
        assert_eq!(state.source.marked().len(), 1);

        let header = state.layout.columns[1].header;
        click(&mut state, header.x + 2, header.y, KeyModifiers::SHIFT);
        let mut marked: Vec<_> = state.source.marked().iter().map(RecordId::as_str).collect();
        marked.sort_unstable();
        assert_eq!(marked, vec!["1", "2"]);
    }
}
