//! Service layer for board reconciliation.
//!
//! This module contains the pieces that turn a delivery into a board and
//! translate gestures back into marking requests. The board builder
//! coordinates the others.

pub mod board;
pub mod card;
pub mod column_order;
pub mod flatten;
pub mod selection;

// Re-export commonly used types and functions
pub use board::{build_board, BoardBuilder, BuilderState, CycleOutcome, InvalidColorPolicy, RenderSummary};
pub use card::{compose_card, compose_tooltip};
pub use column_order::{format_order_labels, merge_column_order, normalize_order_text, parse_order_text};
pub use flatten::{Group, GroupFlattener};
pub use selection::{GestureLevel, GestureOutcome, SelectionBridge, SelectionCycle};
