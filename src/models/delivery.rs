//! Inbound data delivery from the host.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::{HierarchyNode, Record};

/// An error reported by the host for a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorDescriptor(pub String);

impl ErrorDescriptor {
    /// Creates a descriptor from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One configured part (expression) of an axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPart {
    /// Name shown to the user, e.g. "Region"
    pub display_name: String,
}

impl AxisPart {
    /// Creates an axis part.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

/// Axis configuration for the board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisParts {
    /// Parts of the column (grouping) axis
    #[serde(default)]
    pub column: Vec<AxisPart>,
    /// Parts of the card content axis
    #[serde(default)]
    pub card: Vec<AxisPart>,
    /// Parts of the icon axis (empty when not configured)
    #[serde(default)]
    pub icon: Vec<AxisPart>,
}

impl AxisParts {
    /// Builds axis parts from display names.
    #[must_use]
    pub fn from_names(column: &[&str], card: &[&str], icon: &[&str]) -> Self {
        let parts = |names: &[&str]| names.iter().map(|n| AxisPart::new(*n)).collect();
        Self {
            column: parts(column),
            card: parts(card),
            icon: parts(icon),
        }
    }

    /// Returns true if the icon axis has at least one part.
    #[must_use]
    pub fn has_icon(&self) -> bool {
        !self.icon.is_empty()
    }
}

/// A complete data delivery as pushed by the host.
///
/// `hierarchy` and `records` are `None` when the view expired before they
/// could be read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataDelivery {
    /// Errors reported for this delivery
    #[serde(default)]
    pub errors: Vec<ErrorDescriptor>,
    /// Root of the column hierarchy
    #[serde(default)]
    pub hierarchy: Option<HierarchyNode>,
    /// All rows of the view
    #[serde(default)]
    pub records: Option<Vec<Record>>,
    /// Axis configuration
    #[serde(default)]
    pub axis_parts: AxisParts,
    /// Persisted column order text, `None` when persistence is disabled
    #[serde(default)]
    pub persisted_order_text: Option<String>,
}
