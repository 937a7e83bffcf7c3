//! Interfaces to the collaborators that own data, marking and persistence.
//!
//! The board engine never stores marking state or the persisted column order
//! itself; it reads them from a [`DataView`] and sends requests back through
//! the traits below.

pub mod file_source;
pub mod recording;

use anyhow::Result;

use crate::models::{AxisParts, DataDelivery, ErrorDescriptor, HierarchyNode, MarkRequest, Record};

pub use file_source::{derive_hierarchy, load_delivery, FileDataSource};
pub use recording::{HostEvent, RecordingHost};

/// Read access to one data delivery.
///
/// `hierarchy_root` and `all_records` return `None` when the view expired
/// because a newer delivery superseded it mid-read.
pub trait DataView {
    /// Errors reported for this delivery.
    fn errors(&self) -> Vec<ErrorDescriptor>;

    /// Root of the column hierarchy.
    fn hierarchy_root(&self) -> Option<HierarchyNode>;

    /// Every row of the view.
    fn all_records(&self) -> Option<Vec<Record>>;

    /// Axis configuration.
    fn axis_parts(&self) -> AxisParts;

    /// Persisted column order text, `None` when order persistence is off.
    fn persisted_order_text(&self) -> Option<String>;
}

/// Receives marking mutations.
pub trait MarkingSink {
    /// Apply a marking request.
    fn mark(&mut self, request: MarkRequest);
}

/// Host display controls.
pub trait ModControls {
    /// Show the error overlay with the given errors.
    fn show_error_overlay(&mut self, errors: &[ErrorDescriptor]);

    /// Hide the error overlay.
    fn hide_error_overlay(&mut self);

    /// Show a tooltip.
    fn show_tooltip(&mut self, text: &str);

    /// Hide the tooltip.
    fn hide_tooltip(&mut self);

    /// Signal that the board is fully rendered (export/snapshot sync).
    fn signal_render_complete(&mut self);
}

/// Long-lived property store holding the persisted column order.
pub trait PropertyStore {
    /// Overwrite the persisted order text.
    fn write_order_text(&mut self, text: &str) -> Result<()>;
}

impl DataView for DataDelivery {
    fn errors(&self) -> Vec<ErrorDescriptor> {
        self.errors.clone()
    }

    fn hierarchy_root(&self) -> Option<HierarchyNode> {
        self.hierarchy.clone()
    }

    fn all_records(&self) -> Option<Vec<Record>> {
        self.records.clone()
    }

    fn axis_parts(&self) -> AxisParts {
        self.axis_parts.clone()
    }

    fn persisted_order_text(&self) -> Option<String> {
        self.persisted_order_text.clone()
    }
}
