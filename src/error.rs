//! Error taxonomy for the board reconciliation engine.
//!
//! Recoverable kinds (`DataError`, `ViewExpired`, `UnresolvedSelectionTarget`)
//! never leave the board builder; they are reported through
//! [`CycleOutcome`](crate::services::board::CycleOutcome) or swallowed as
//! no-ops. `InvalidColor` is the only kind a caller sees directly.

use thiserror::Error;

use crate::models::{ErrorDescriptor, RecordId};

/// Errors produced while reconciling a delivery into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A background color was not a 6-digit hex RGB value.
    #[error("invalid color '{input}': expected 6 hex digits (RRGGBB), optionally prefixed with '#'")]
    InvalidColor {
        /// The rejected input, verbatim
        input: String,
    },

    /// The host reported errors for the current delivery.
    #[error("data view reported {} error(s)", .0.len())]
    DataError(Vec<ErrorDescriptor>),

    /// The hierarchy root or the record set was unavailable mid-cycle.
    #[error("data view expired before the board could be rebuilt")]
    ViewExpired,

    /// A gesture referenced a record that is not part of the current render.
    #[error("record '{0}' is not part of the current render")]
    UnresolvedSelectionTarget(RecordId),
}

/// Result alias for board reconciliation.
pub type BoardResult<T> = std::result::Result<T, BoardError>;
