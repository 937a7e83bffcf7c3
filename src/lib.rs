//! Kanboard Library
//!
//! Reconciles grouped records into a kanban board: columns ordered by a
//! persisted label list merged with the live groups, cards colored with a
//! readable text color, and clicks translated into marking requests for
//! the host that owns the selection.

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod models;
pub mod services;
pub mod tui;

pub use error::{BoardError, BoardResult};
