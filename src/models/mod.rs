//! Data models for records, deliveries, marking and the rendered board.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod board;
pub mod delivery;
pub mod marking;
pub mod record;
pub mod rgb;

// Re-export all model types
pub use board::{Board, Card, Column, ColumnKey, IconRef};
pub use delivery::{AxisPart, AxisParts, DataDelivery, ErrorDescriptor};
pub use marking::{Gesture, GestureTarget, MarkMode, MarkRequest};
pub use record::{HierarchyNode, Record, RecordId, RecordIndex};
pub use rgb::{contrast_text_for_hex, ContrastText, RgbColor};
