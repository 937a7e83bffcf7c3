//! Translates board gestures into marking requests.
//!
//! One [`SelectionBridge`] lives as long as the board. Each successful render
//! installs a fresh [`SelectionCycle`] so that lookups always resolve against
//! the records that are currently on screen.
//!
//! Marking policy:
//! - card click: `Replace` (or `Add` with the modifier) with that record only
//! - column header click: `ClearAll` then `Replace` without the modifier,
//!   a single `Add` with it
//! - background click: `ClearAll` without the modifier, nothing with it

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BoardError, BoardResult};
use crate::host::MarkingSink;
use crate::models::{
    Board, ColumnKey, Gesture, GestureTarget, MarkRequest, RecordId, RecordIndex,
};

/// Lookup tables for one render cycle.
#[derive(Debug, Clone, Default)]
pub struct SelectionCycle {
    index: RecordIndex,
    columns: HashMap<ColumnKey, Vec<RecordId>>,
}

impl SelectionCycle {
    /// Builds the cycle tables from the record index and the rendered board.
    #[must_use]
    pub fn new(index: RecordIndex, board: &Board) -> Self {
        let columns = board
            .columns
            .iter()
            .map(|column| (column.key.clone(), column.record_ids().cloned().collect()))
            .collect();
        Self { index, columns }
    }

    /// Records rendered under a column; empty for unknown or phantom columns.
    #[must_use]
    pub fn column_records(&self, key: &ColumnKey) -> &[RecordId] {
        self.columns.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Which handler consumed a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureLevel {
    /// Card handler
    Card,
    /// Column header handler
    ColumnHeader,
    /// Board background handler
    Background,
}

/// Outcome of dispatching a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureOutcome {
    /// Handler that consumed the gesture; outer handlers did not run
    pub consumed_by: GestureLevel,
    /// Number of marking requests issued
    pub requests: usize,
}

/// Stable selection handler, re-parameterized every render cycle.
#[derive(Debug, Clone, Default)]
pub struct SelectionBridge {
    cycle: SelectionCycle,
}

impl SelectionBridge {
    /// Creates a bridge with empty lookup tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the lookup tables with those of a new render cycle.
    pub fn install(&mut self, cycle: SelectionCycle) {
        self.cycle = cycle;
    }

    /// Marks a single record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnresolvedSelectionTarget`] without issuing a
    /// request if the record is not part of the current render.
    pub fn select_one(
        &self,
        id: &RecordId,
        additive: bool,
        sink: &mut dyn MarkingSink,
    ) -> BoardResult<()> {
        if !self.cycle.index.contains(id) {
            return Err(BoardError::UnresolvedSelectionTarget(id.clone()));
        }
        sink.mark(MarkRequest::for_modifier(additive, vec![id.clone()]));
        Ok(())
    }

    /// Marks every record rendered under a column.
    ///
    /// Returns the number of requests issued. Without the modifier an explicit
    /// `ClearAll` precedes the batch, so an empty column just clears.
    pub fn select_column(
        &self,
        key: &ColumnKey,
        additive: bool,
        sink: &mut dyn MarkingSink,
    ) -> usize {
        let mut issued = 0;
        if !additive {
            sink.mark(MarkRequest::clear_all());
            issued += 1;
        }

        let records = self.cycle.column_records(key);
        if !records.is_empty() {
            sink.mark(MarkRequest::for_modifier(additive, records.to_vec()));
            issued += 1;
        }
        issued
    }

    /// Clears the marking.
    pub fn clear_all(&self, sink: &mut dyn MarkingSink) {
        sink.mark(MarkRequest::clear_all());
    }

    /// Handles a gesture at its target.
    pub fn dispatch(&self, gesture: &Gesture, sink: &mut dyn MarkingSink) -> GestureOutcome {
        match &gesture.target {
            GestureTarget::Card(id) => {
                let requests = match self.select_one(id, gesture.additive, sink) {
                    Ok(()) => 1,
                    Err(err) => {
                        debug!(%err, "ignoring card gesture");
                        0
                    }
                };
                GestureOutcome {
                    consumed_by: GestureLevel::Card,
                    requests,
                }
            }
            GestureTarget::ColumnHeader(key) => GestureOutcome {
                consumed_by: GestureLevel::ColumnHeader,
                requests: self.select_column(key, gesture.additive, sink),
            },
            GestureTarget::Background => {
                let requests = if gesture.additive {
                    0
                } else {
                    self.clear_all(sink);
                    1
                };
                GestureOutcome {
                    consumed_by: GestureLevel::Background,
                    requests,
                }
            }
        }
    }

    /// Handles a gesture that bubbles through `path`, innermost target first.
    ///
    /// Only the innermost target's handler runs; the gesture stops there.
    /// Returns `None` for an empty path.
    pub fn dispatch_path(
        &self,
        path: &[GestureTarget],
        additive: bool,
        sink: &mut dyn MarkingSink,
    ) -> Option<GestureOutcome> {
        let target = path.first()?.clone();
        Some(self.dispatch(&Gesture { target, additive }, sink))
    }
}
