//! Headless host that records every request it receives.
//!
//! Used by the `layout` command to run a cycle without a terminal, and by
//! tests to assert on request ordering.

use anyhow::Result;

use super::{MarkingSink, ModControls, PropertyStore};
use crate::models::{ErrorDescriptor, MarkRequest};

/// A request received by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Marking mutation
    Marked(MarkRequest),
    /// Error overlay shown
    ErrorOverlayShown(Vec<ErrorDescriptor>),
    /// Error overlay hidden
    ErrorOverlayHidden,
    /// Tooltip shown with text
    TooltipShown(String),
    /// Tooltip hidden
    TooltipHidden,
    /// Render completion signal
    RenderComplete,
    /// Persisted order overwritten
    OrderWritten(String),
}

/// Host that appends each request to [`RecordingHost::events`].
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Requests in arrival order
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Marking requests received so far.
    #[must_use]
    pub fn mark_requests(&self) -> Vec<&MarkRequest> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Marked(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Order texts written so far.
    #[must_use]
    pub fn order_writes(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::OrderWritten(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of render completion signals.
    #[must_use]
    pub fn render_complete_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| **event == HostEvent::RenderComplete)
            .count()
    }
}

impl MarkingSink for RecordingHost {
    fn mark(&mut self, request: MarkRequest) {
        self.events.push(HostEvent::Marked(request));
    }
}

impl ModControls for RecordingHost {
    fn show_error_overlay(&mut self, errors: &[ErrorDescriptor]) {
        self.events.push(HostEvent::ErrorOverlayShown(errors.to_vec()));
    }

    fn hide_error_overlay(&mut self) {
        self.events.push(HostEvent::ErrorOverlayHidden);
    }

    fn show_tooltip(&mut self, text: &str) {
        self.events.push(HostEvent::TooltipShown(text.to_string()));
    }

    fn hide_tooltip(&mut self) {
        self.events.push(HostEvent::TooltipHidden);
    }

    fn signal_render_complete(&mut self) {
        self.events.push(HostEvent::RenderComplete);
    }
}

impl PropertyStore for RecordingHost {
    fn write_order_text(&mut self, text: &str) -> Result<()> {
        self.events.push(HostEvent::OrderWritten(text.to_string()));
        Ok(())
    }
}
