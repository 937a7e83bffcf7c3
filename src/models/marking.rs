//! Marking (selection) requests and user gestures.

use serde::{Deserialize, Serialize};

use super::board::ColumnKey;
use super::record::RecordId;

/// How a marking request combines with the host's current marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkMode {
    /// Marking becomes exactly the given records
    Replace,
    /// Given records are added to the marking
    Add,
    /// Marking is emptied
    ClearAll,
}

/// A marking mutation sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkRequest {
    /// Combination mode
    pub mode: MarkMode,
    /// Affected records (empty for `ClearAll`)
    pub records: Vec<RecordId>,
}

impl MarkRequest {
    /// Replace the marking with `records`.
    #[must_use]
    pub fn replace(records: Vec<RecordId>) -> Self {
        Self {
            mode: MarkMode::Replace,
            records,
        }
    }

    /// Add `records` to the marking.
    #[must_use]
    pub fn add(records: Vec<RecordId>) -> Self {
        Self {
            mode: MarkMode::Add,
            records,
        }
    }

    /// Clear the marking.
    #[must_use]
    pub fn clear_all() -> Self {
        Self {
            mode: MarkMode::ClearAll,
            records: Vec::new(),
        }
    }

    /// `Add` if additive, `Replace` otherwise.
    #[must_use]
    pub fn for_modifier(additive: bool, records: Vec<RecordId>) -> Self {
        if additive {
            Self::add(records)
        } else {
            Self::replace(records)
        }
    }
}

/// The most specific element a gesture landed on.
///
/// `target_id` is a string for every kind: the record id for cards and the
/// tagged column key (`group:<key>`, `phantom:<label>`) for headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target_id", rename_all = "snake_case")]
pub enum GestureTarget {
    /// A card
    Card(RecordId),
    /// A column header
    ColumnHeader(ColumnKey),
    /// Empty board background
    Background,
}

/// A click on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gesture {
    /// Where it landed
    #[serde(flatten)]
    pub target: GestureTarget,
    /// Additive modifier (shift) held
    #[serde(default)]
    pub additive: bool,
}

impl Gesture {
    /// Click on a card.
    pub fn card(id: impl Into<RecordId>, additive: bool) -> Self {
        Self {
            target: GestureTarget::Card(id.into()),
            additive,
        }
    }

    /// Click on a column header.
    #[must_use]
    pub fn column_header(key: ColumnKey, additive: bool) -> Self {
        Self {
            target: GestureTarget::ColumnHeader(key),
            additive,
        }
    }

    /// Click on empty background.
    #[must_use]
    pub fn background(additive: bool) -> Self {
        Self {
            target: GestureTarget::Background,
            additive,
        }
    }
}
