//! Board builder: turns each data delivery into a complete board.
//!
//! A cycle runs `AwaitingData -> (Erroring | Rendering) -> Idle`. The new
//! board is computed in full before it replaces the previous one, so an
//! aborted cycle (errors, expired view) leaves the last good board on screen
//! and never signals render completion.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BoardError, BoardResult};
use crate::host::{DataView, MarkingSink, ModControls, PropertyStore};
use crate::models::{AxisParts, Board, Column, Gesture, HierarchyNode, RecordId, RecordIndex};

use super::card::compose_card;
use super::column_order::{
    format_order_labels, merge_column_order, normalize_order_text, parse_order_text,
};
use super::flatten::GroupFlattener;
use super::selection::{GestureOutcome, SelectionBridge, SelectionCycle};

/// Where the builder is in its delivery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Waiting for (or reading) a delivery
    AwaitingData,
    /// The last delivery reported errors; the overlay is up
    Erroring,
    /// Computing and swapping in a new board
    Rendering,
    /// The last cycle finished or was abandoned
    Idle,
}

/// What to do with a record whose color cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidColorPolicy {
    /// Leave that card out and render the rest
    #[default]
    Skip,
    /// Abandon the whole cycle, keeping the previous board
    Abort,
}

/// Counts describing a successful render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    /// Columns on the new board
    pub columns: usize,
    /// Phantom columns among them
    pub phantom_columns: usize,
    /// Cards on the new board
    pub cards: usize,
    /// Cards left out for invalid colors
    pub skipped: usize,
}

/// Result of processing one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new board replaced the previous one
    Rendered(RenderSummary),
    /// The cycle stopped without touching the board
    Halted(BoardError),
}

/// Computes a complete board from a hierarchy root and its records.
///
/// # Errors
///
/// With [`InvalidColorPolicy::Abort`], returns
/// [`BoardError::InvalidColor`] for the first record with a malformed color.
pub fn build_board(
    root: &HierarchyNode,
    index: &RecordIndex,
    persisted: &[String],
    axes: &AxisParts,
    policy: InvalidColorPolicy,
) -> BoardResult<Board> {
    let flattener = GroupFlattener::new(root, index);
    let merged = merge_column_order(persisted, flattener.groups());

    let mut skipped = Vec::new();
    let mut columns = Vec::with_capacity(merged.columns.len());
    for slot in merged.columns {
        let mut cards = Vec::new();
        for record in slot.group.iter().flat_map(|g| g.records.iter()) {
            match compose_card(record, axes) {
                Ok(card) => cards.push(card),
                Err(err) if policy == InvalidColorPolicy::Skip => {
                    warn!(record = %record.id, %err, "skipping card");
                    skipped.push(record.id.clone());
                }
                Err(err) => return Err(err),
            }
        }
        columns.push(Column {
            key: slot.key,
            label: slot.label,
            cards,
        });
    }

    Ok(Board::new(columns, skipped))
}

/// Card under the pointer and the tooltip text the host is showing for it.
#[derive(Debug, Clone)]
struct HoveredCard {
    id: RecordId,
    shown: String,
}

/// Orchestrates delivery cycles and owns the currently rendered board.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    state: BuilderState,
    board: Option<Board>,
    bridge: SelectionBridge,
    error_overlay_active: bool,
    hovered: Option<HoveredCard>,
    invalid_colors: InvalidColorPolicy,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new(InvalidColorPolicy::default())
    }
}

impl BoardBuilder {
    /// Creates a builder with no board yet.
    #[must_use]
    pub fn new(invalid_colors: InvalidColorPolicy) -> Self {
        Self {
            state: BuilderState::AwaitingData,
            board: None,
            bridge: SelectionBridge::new(),
            error_overlay_active: false,
            hovered: None,
            invalid_colors,
        }
    }

    /// Current cycle state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// The board currently on screen, if any cycle has completed.
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Returns true while the host error overlay is shown.
    #[must_use]
    pub const fn error_overlay_active(&self) -> bool {
        self.error_overlay_active
    }

    /// Record currently under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<&RecordId> {
        self.hovered.as_ref().map(|h| &h.id)
    }

    /// Selection bridge wired to the current board.
    #[must_use]
    pub const fn bridge(&self) -> &SelectionBridge {
        &self.bridge
    }

    /// Runs one delivery cycle.
    pub fn on_delivery(
        &mut self,
        view: &dyn DataView,
        controls: &mut dyn ModControls,
    ) -> CycleOutcome {
        self.state = BuilderState::AwaitingData;

        let errors = view.errors();
        if !errors.is_empty() {
            warn!(count = errors.len(), "delivery reported errors");
            self.state = BuilderState::Erroring;
            controls.show_error_overlay(&errors);
            self.error_overlay_active = true;
            return CycleOutcome::Halted(BoardError::DataError(errors));
        }

        if self.error_overlay_active {
            controls.hide_error_overlay();
            self.error_overlay_active = false;
            debug!("error overlay cleared");
        }

        let Some(root) = view.hierarchy_root() else {
            return self.abandon_expired("hierarchy root");
        };
        let Some(records) = view.all_records() else {
            return self.abandon_expired("record set");
        };

        self.state = BuilderState::Rendering;
        let axes = view.axis_parts();
        let persisted = view
            .persisted_order_text()
            .map(|text| parse_order_text(&text))
            .unwrap_or_default();
        let index = RecordIndex::build(records);

        let board = match build_board(&root, &index, &persisted, &axes, self.invalid_colors) {
            Ok(board) => board,
            Err(err) => {
                warn!(%err, "abandoning cycle");
                self.state = BuilderState::Idle;
                return CycleOutcome::Halted(err);
            }
        };

        let summary = RenderSummary {
            columns: board.columns.len(),
            phantom_columns: board.columns.iter().filter(|c| c.is_phantom()).count(),
            cards: board.card_count(),
            skipped: board.skipped.len(),
        };

        self.bridge.install(SelectionCycle::new(index, &board));
        self.board = Some(board);
        self.refresh_tooltip(controls);

        info!(
            columns = summary.columns,
            cards = summary.cards,
            skipped = summary.skipped,
            "board rendered"
        );
        controls.signal_render_complete();
        self.state = BuilderState::Idle;
        CycleOutcome::Rendered(summary)
    }

    /// Re-syncs the host tooltip with the hovered card on the new board.
    fn refresh_tooltip(&mut self, controls: &mut dyn ModControls) {
        let Some(hovered) = self.hovered.as_mut() else {
            return;
        };
        match self.board.as_ref().and_then(|b| b.card(&hovered.id)) {
            Some(card) if card.tooltip != hovered.shown => {
                controls.show_tooltip(&card.tooltip);
                hovered.shown.clone_from(&card.tooltip);
            }
            Some(_) => {}
            None => {
                controls.hide_tooltip();
                self.hovered = None;
            }
        }
    }

    fn abandon_expired(&mut self, missing: &str) -> CycleOutcome {
        debug!(missing, "view expired, keeping previous board");
        self.state = BuilderState::Idle;
        CycleOutcome::Halted(BoardError::ViewExpired)
    }

    /// Routes a gesture to the selection bridge.
    pub fn on_gesture(&self, gesture: &Gesture, sink: &mut dyn MarkingSink) -> GestureOutcome {
        let outcome = self.bridge.dispatch(gesture, sink);
        debug!(
            gesture = ?gesture.target,
            additive = gesture.additive,
            requests = outcome.requests,
            "gesture handled"
        );
        outcome
    }

    /// Updates the tooltip for the record under the pointer (`None` = no card).
    pub fn on_hover(&mut self, id: Option<&RecordId>, controls: &mut dyn ModControls) {
        let card = id.and_then(|id| self.board.as_ref().and_then(|b| b.card(id)));
        match card {
            Some(card) => {
                let unchanged = self
                    .hovered
                    .as_ref()
                    .is_some_and(|h| h.id == card.record_id && h.shown == card.tooltip);
                if unchanged {
                    return;
                }
                controls.show_tooltip(&card.tooltip);
                self.hovered = Some(HoveredCard {
                    id: card.record_id.clone(),
                    shown: card.tooltip.clone(),
                });
            }
            None => {
                if self.hovered.take().is_some() {
                    controls.hide_tooltip();
                }
            }
        }
    }

    /// Writes user-edited order text to the store after normalizing it.
    ///
    /// Returns the stored text.
    pub fn edit_order(&self, text: &str, store: &mut dyn PropertyStore) -> Result<String> {
        let normalized = normalize_order_text(text);
        store.write_order_text(&normalized)?;
        info!(labels = normalized.lines().count(), "column order updated");
        Ok(normalized)
    }

    /// Persists the columns as currently displayed, phantom columns included.
    pub fn pin_current_order(&self, store: &mut dyn PropertyStore) -> Result<Option<String>> {
        let Some(board) = &self.board else {
            return Ok(None);
        };
        let text = format_order_labels(&board.labels());
        self.edit_order(&text, store).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, RecordingHost};
    use crate::models::{DataDelivery, ErrorDescriptor, Record};

    fn delivery() -> DataDelivery {
        DataDelivery {
            errors: Vec::new(),
            hierarchy: Some(HierarchyNode::root(vec![
                HierarchyNode::leaf("t", "Todo", vec!["1".into(), "2".into()]),
                HierarchyNode::leaf("b", "Blocked", vec!["3".into()]),
            ])),
            records: Some(vec![
                Record::new("1", "#FFFFFF").with_column(["Todo"]).with_card(["Write docs"]),
                Record::new("2", "#000000").with_column(["Todo"]).with_card(["Fix bug"]),
                Record::new("3", "#FF0000").with_column(["Blocked"]).with_card(["Deploy"]),
            ]),
            axis_parts: AxisParts::from_names(&["Status"], &["Task"], &[]),
            persisted_order_text: Some("Done\nTodo".to_string()),
        }
    }

    #[test]
    fn test_successful_cycle_signals_last() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();

        let outcome = builder.on_delivery(&delivery(), &mut host);

        let CycleOutcome::Rendered(summary) = outcome else {
            panic!("expected render, got {outcome:?}");
        };
        assert_eq!(summary.columns, 3);
        assert_eq!(summary.phantom_columns, 1);
        assert_eq!(summary.cards, 3);
        assert_eq!(builder.board().unwrap().labels(), vec!["Done", "Todo", "Blocked"]);
        assert_eq!(host.events.last(), Some(&HostEvent::RenderComplete));
        assert_eq!(host.render_complete_count(), 1);
        assert_eq!(builder.state(), BuilderState::Idle);
    }

    #[test]
    fn test_errors_show_overlay_and_keep_board() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);
        let before = builder.board().cloned();

        let mut failing = delivery();
        failing.errors = vec![ErrorDescriptor::new("bad expression")];
        host.events.clear();
        let outcome = builder.on_delivery(&failing, &mut host);

        assert!(matches!(outcome, CycleOutcome::Halted(BoardError::DataError(_))));
        assert_eq!(builder.state(), BuilderState::Erroring);
        assert!(builder.error_overlay_active());
        assert_eq!(builder.board().cloned(), before);
        assert_eq!(
            host.events,
            vec![HostEvent::ErrorOverlayShown(vec![ErrorDescriptor::new("bad expression")])]
        );

        host.events.clear();
        builder.on_delivery(&delivery(), &mut host);
        assert_eq!(host.events.first(), Some(&HostEvent::ErrorOverlayHidden));
        assert_eq!(host.events.last(), Some(&HostEvent::RenderComplete));
        assert!(!builder.error_overlay_active());
    }

    #[test]
    fn test_expired_view_keeps_previous_board() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);
        let before = builder.board().cloned();

        for expire_root in [true, false] {
            let mut expired = delivery();
            if expire_root {
                expired.hierarchy = None;
            } else {
                expired.records = None;
            }
            host.events.clear();

            let outcome = builder.on_delivery(&expired, &mut host);

            assert_eq!(outcome, CycleOutcome::Halted(BoardError::ViewExpired));
            assert_eq!(builder.board().cloned(), before);
            assert_eq!(host.render_complete_count(), 0);
            assert_eq!(builder.state(), BuilderState::Idle);
        }
    }

    #[test]
    fn test_invalid_color_policies() {
        let mut bad = delivery();
        if let Some(records) = bad.records.as_mut() {
            records[1].color = "transparent".to_string();
        }

        let mut host = RecordingHost::default();
        let mut skipping = BoardBuilder::new(InvalidColorPolicy::Skip);
        let outcome = skipping.on_delivery(&bad, &mut host);
        assert!(matches!(outcome, CycleOutcome::Rendered(RenderSummary { cards: 2, skipped: 1, .. })));
        assert_eq!(skipping.board().unwrap().skipped, vec![RecordId::new("2")]);

        let mut host = RecordingHost::default();
        let mut aborting = BoardBuilder::new(InvalidColorPolicy::Abort);
        let outcome = aborting.on_delivery(&bad, &mut host);
        assert!(matches!(outcome, CycleOutcome::Halted(BoardError::InvalidColor { .. })));
        assert!(aborting.board().is_none());
        assert_eq!(host.render_complete_count(), 0);
    }

    #[test]
    fn test_lookup_is_rebuilt_each_cycle() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);

        let mut next = delivery();
        next.records = Some(vec![Record::new("3", "#FF0000")]);
        builder.on_delivery(&next, &mut host);

        host.events.clear();
        builder.on_gesture(&Gesture::card("1", false), &mut host);
        assert!(host.mark_requests().is_empty());

        builder.on_gesture(&Gesture::card("3", false), &mut host);
        assert_eq!(host.mark_requests().len(), 1);
    }

    #[test]
    fn test_hover_shows_and_hides_tooltip() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);
        host.events.clear();

        builder.on_hover(Some(&RecordId::new("1")), &mut host);
        builder.on_hover(Some(&RecordId::new("1")), &mut host);
        builder.on_hover(None, &mut host);

        assert_eq!(
            host.events,
            vec![
                HostEvent::TooltipShown("Status: Todo\r\nTask: Write docs\r\n".to_string()),
                HostEvent::TooltipHidden,
            ]
        );
    }

    #[test]
    fn test_rerender_hides_tooltip_of_vanished_card() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);
        builder.on_hover(Some(&RecordId::new("2")), &mut host);

        let mut next = delivery();
        next.hierarchy = Some(HierarchyNode::root(vec![HierarchyNode::leaf(
            "t",
            "Todo",
            vec!["1".into()],
        )]));
        host.events.clear();
        builder.on_delivery(&next, &mut host);

        assert_eq!(host.events, vec![HostEvent::TooltipHidden, HostEvent::RenderComplete]);
        assert!(builder.hovered().is_none());
    }

    #[test]
    fn test_rerender_refreshes_tooltip_of_changed_card() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        builder.on_delivery(&delivery(), &mut host);
        builder.on_hover(Some(&RecordId::new("1")), &mut host);

        let mut next = delivery();
        if let Some(records) = next.records.as_mut() {
            records[0] = Record::new("1", "#FFFFFF")
                .with_column(["Todo"])
                .with_card(["Rewritten"]);
        }
        host.events.clear();
        builder.on_delivery(&next, &mut host);
        builder.on_hover(Some(&RecordId::new("1")), &mut host);

        assert_eq!(
            host.events,
            vec![
                HostEvent::TooltipShown("Status: Todo\r\nTask: Rewritten\r\n".to_string()),
                HostEvent::RenderComplete,
            ]
        );
        assert_eq!(builder.hovered(), Some(&RecordId::new("1")));

        // Same content again: nothing to update
        host.events.clear();
        builder.on_delivery(&next, &mut host);
        assert_eq!(host.events, vec![HostEvent::RenderComplete]);
    }

    #[test]
    fn test_edit_and_pin_order() {
        let mut builder = BoardBuilder::default();
        let mut host = RecordingHost::default();
        assert_eq!(builder.pin_current_order(&mut host).unwrap(), None);

        let stored = builder.edit_order("  Done \n\n Todo\n", &mut host).unwrap();
        assert_eq!(stored, "Done\nTodo");

        builder.on_delivery(&delivery(), &mut host);
        let pinned = builder.pin_current_order(&mut host).unwrap();
        assert_eq!(pinned.as_deref(), Some("Done\nTodo\nBlocked"));
        assert_eq!(
            host.order_writes(),
            vec!["Done\nTodo".to_string(), "Done\nTodo\nBlocked".to_string()]
        );
    }
}
