//! JSON file data source with an in-memory marking store.
//!
//! Plays the host's role for the terminal UI: it owns the records and the
//! marking, applies marking requests, recolors records so unmarked ones fade
//! while anything is marked, and queues a fresh delivery after every change.
//! Several changes before the next read coalesce into one delivery.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::MarkingSink;
use crate::constants::ALL_GROUP_LABEL;
use crate::models::{DataDelivery, HierarchyNode, MarkMode, MarkRequest, Record, RecordId, RgbColor};

/// Reads a delivery document from disk.
pub fn load_delivery(path: &Path) -> Result<DataDelivery> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))
}

/// Groups records by their first column-axis value, in first-appearance order.
///
/// Records without column values land in a single `(All)` group.
#[must_use]
pub fn derive_hierarchy(records: &[Record]) -> HierarchyNode {
    let mut children: Vec<HierarchyNode> = Vec::new();
    for record in records {
        let label = record
            .column
            .first()
            .map_or(ALL_GROUP_LABEL, String::as_str);
        match children.iter_mut().find(|child| child.label == label) {
            Some(child) => child.rows.push(record.id.clone()),
            None => {
                let key = format!("g{}", children.len());
                children.push(HierarchyNode::leaf(key, label, vec![record.id.clone()]));
            }
        }
    }
    HierarchyNode::root(children)
}

/// Host-side data source backed by a delivery document.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: Option<PathBuf>,
    document: DataDelivery,
    marked: HashSet<RecordId>,
    order_text: Option<String>,
    dim_unmarked: u8,
    pending: bool,
    expire_next: bool,
}

impl FileDataSource {
    /// Loads a delivery document from `path`.
    pub fn load(path: &Path, order_text: Option<String>, dim_unmarked: u8) -> Result<Self> {
        let document = load_delivery(path)?;
        let mut source = Self::from_delivery(document, order_text, dim_unmarked);
        source.path = Some(path.to_path_buf());
        Ok(source)
    }

    /// Wraps an in-memory delivery document.
    #[must_use]
    pub fn from_delivery(document: DataDelivery, order_text: Option<String>, dim_unmarked: u8) -> Self {
        Self {
            path: None,
            document,
            marked: HashSet::new(),
            order_text,
            dim_unmarked,
            pending: true,
            expire_next: false,
        }
    }

    /// Re-reads the backing file, keeping marks on records that still exist.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        self.document = load_delivery(path)?;
        let known: HashSet<&RecordId> = self
            .document
            .records
            .iter()
            .flatten()
            .map(|r| &r.id)
            .collect();
        self.marked.retain(|id| known.contains(id));
        self.pending = true;
        info!(path = %path.display(), "data file reloaded");
        Ok(())
    }

    /// Replaces the persisted order text handed out with each delivery.
    pub fn set_order_text(&mut self, order_text: Option<String>) {
        self.order_text = order_text;
        self.pending = true;
    }

    /// Makes the next delivery arrive with an expired hierarchy.
    pub fn expire_next(&mut self) {
        self.expire_next = true;
        self.pending = true;
    }

    /// Currently marked records.
    #[must_use]
    pub const fn marked(&self) -> &HashSet<RecordId> {
        &self.marked
    }

    /// Returns true if a delivery is waiting to be read.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// Takes the queued delivery, if any.
    pub fn next_delivery(&mut self) -> Option<DataDelivery> {
        if !self.pending {
            return None;
        }
        self.pending = false;

        let mut delivery = self.snapshot();
        if std::mem::take(&mut self.expire_next) {
            delivery.hierarchy = None;
        }
        Some(delivery)
    }

    /// Builds a delivery reflecting the current marking.
    #[must_use]
    pub fn snapshot(&self) -> DataDelivery {
        let records: Vec<Record> = self
            .records()
            .iter()
            .map(|record| self.recolor(record))
            .collect();
        let hierarchy = self
            .document
            .hierarchy
            .clone()
            .unwrap_or_else(|| derive_hierarchy(&records));

        DataDelivery {
            errors: self.document.errors.clone(),
            hierarchy: Some(hierarchy),
            records: Some(records),
            axis_parts: self.document.axis_parts.clone(),
            persisted_order_text: self.order_text.clone(),
        }
    }

    fn records(&self) -> &[Record] {
        self.document.records.as_deref().unwrap_or_default()
    }

    fn recolor(&self, record: &Record) -> Record {
        let mut record = record.clone();
        if self.marked.is_empty() || self.marked.contains(&record.id) {
            return record;
        }
        // Malformed colors pass through untouched for the builder to reject
        if let Ok(color) = RgbColor::from_hex(&record.color) {
            record.color = color.dim(self.dim_unmarked).to_hex();
        }
        record
    }
}

impl MarkingSink for FileDataSource {
    fn mark(&mut self, request: MarkRequest) {
        debug!(mode = ?request.mode, records = request.records.len(), "marking request");
        match request.mode {
            MarkMode::Replace => {
                self.marked = request.records.into_iter().collect();
            }
            MarkMode::Add => self.marked.extend(request.records),
            MarkMode::ClearAll => self.marked.clear(),
        }
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AxisParts;

    fn document() -> DataDelivery {
        DataDelivery {
            records: Some(vec![
                Record::new("1", "#C8C8C8").with_column(["Todo"]),
                Record::new("2", "#C8C8C8").with_column(["Done"]),
                Record::new("3", "#C8C8C8").with_column(["Todo"]),
            ]),
            axis_parts: AxisParts::from_names(&["Status"], &["Task"], &[]),
            ..DataDelivery::default()
        }
    }

    fn color_of(delivery: &DataDelivery, id: &str) -> String {
        delivery
            .records
            .as_ref()
            .unwrap()
            .iter()
            .find(|r| r.id.as_str() == id)
            .unwrap()
            .color
            .clone()
    }

    #[test]
    fn test_derive_hierarchy_groups_by_first_value() {
        let root = derive_hierarchy(document().records.as_ref().unwrap());
        let labels: Vec<_> = root.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Todo", "Done"]);
        assert_eq!(root.children[0].rows, vec![RecordId::new("1"), RecordId::new("3")]);
        assert_ne!(root.children[0].key, root.children[1].key);
    }

    #[test]
    fn test_derive_hierarchy_without_column_axis() {
        let root = derive_hierarchy(&[Record::new("a", "#FFFFFF")]);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].label, ALL_GROUP_LABEL);
    }

    #[test]
    fn test_marking_dims_unmarked_records() {
        let mut source = FileDataSource::from_delivery(document(), None, 50);
        assert!(source.next_delivery().is_some());
        assert!(source.next_delivery().is_none());

        source.mark(MarkRequest::replace(vec![RecordId::new("1")]));
        let delivery = source.next_delivery().unwrap();
        assert_eq!(color_of(&delivery, "1"), "#C8C8C8");
        assert_eq!(color_of(&delivery, "2"), "#646464");

        source.mark(MarkRequest::add(vec![RecordId::new("2")]));
        assert_eq!(source.marked().len(), 2);

        source.mark(MarkRequest::clear_all());
        let delivery = source.next_delivery().unwrap();
        assert_eq!(color_of(&delivery, "2"), "#C8C8C8");
    }

    #[test]
    fn test_changes_coalesce_into_one_delivery() {
        let mut source = FileDataSource::from_delivery(document(), None, 50);
        source.next_delivery();
        source.mark(MarkRequest::clear_all());
        source.mark(MarkRequest::add(vec![RecordId::new("3")]));
        assert!(source.next_delivery().is_some());
        assert!(!source.has_pending());
    }

    #[test]
    fn test_expire_next_drops_hierarchy_once() {
        let mut source = FileDataSource::from_delivery(document(), Some("Done".into()), 50);
        source.next_delivery();
        source.expire_next();
        let expired = source.next_delivery().unwrap();
        assert!(expired.hierarchy.is_none());

        source.set_order_text(None);
        let fresh = source.next_delivery().unwrap();
        assert!(fresh.hierarchy.is_some());
        assert_eq!(fresh.persisted_order_text, None);
    }

    #[test]
    fn test_load_and_reload_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, serde_json::to_string(&document()).unwrap()).unwrap();

        let mut source = FileDataSource::load(&path, None, 40).unwrap();
        source.mark(MarkRequest::replace(vec![RecordId::new("2")]));

        let mut smaller = document();
        smaller.records = Some(vec![Record::new("1", "#FFFFFF")]);
        fs::write(&path, serde_json::to_string(&smaller).unwrap()).unwrap();
        source.reload().unwrap();

        assert!(source.marked().is_empty());
        assert_eq!(source.next_delivery().unwrap().records.unwrap().len(), 1);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(FileDataSource::load(&path, None, 40).is_err());
    }
}
