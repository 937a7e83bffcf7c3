//! Shared test fixtures for board and CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use kanboard::models::{AxisParts, DataDelivery, HierarchyNode, Record, RecordId};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the kanboard binary (set by cargo at compile time)
pub fn kanboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_kanboard")
}

/// Axis configuration used by most fixtures: one column part, one card part.
pub fn status_task_axes() -> AxisParts {
    AxisParts::from_names(&["Status"], &["Task"], &[])
}

/// Builds a record grouped under `status` with a single card line.
pub fn task(id: &str, status: &str, title: &str, color: &str) -> Record {
    Record::new(id, color).with_column([status]).with_card([title])
}

/// Builds a hierarchy root with one leaf per `(key, label, ids)`.
pub fn hierarchy(groups: &[(&str, &str, &[&str])]) -> HierarchyNode {
    HierarchyNode::root(
        groups
            .iter()
            .map(|(key, label, ids)| {
                HierarchyNode::leaf(*key, *label, ids.iter().map(|id| RecordId::new(*id)).collect())
            })
            .collect(),
    )
}

/// Delivery with live groups `Todo` (records 1, 2) and `Blocked` (record 3).
pub fn todo_blocked_delivery(persisted: Option<&str>) -> DataDelivery {
    DataDelivery {
        errors: Vec::new(),
        hierarchy: Some(hierarchy(&[
            ("todo", "Todo", &["1", "2"]),
            ("blocked", "Blocked", &["3"]),
        ])),
        records: Some(vec![
            task("1", "Todo", "Write docs", "#FFFFFF"),
            task("2", "Todo", "Fix bug", "#1E1E1E"),
            task("3", "Blocked", "Deploy", "#FF8800"),
        ]),
        axis_parts: status_task_axes(),
        persisted_order_text: persisted.map(str::to_string),
    }
}

/// Writes `delivery` as JSON into a fresh temp dir.
///
/// Returns the file path and the temp dir guard (must be kept alive).
pub fn write_delivery_file(delivery: &DataDelivery) -> (PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("board.json");
    let json = serde_json::to_string_pretty(delivery).expect("Failed to serialize delivery");
    fs::write(&path, json).expect("Failed to write delivery file");
    (path, dir)
}

/// Config path inside `dir` (not created).
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}
