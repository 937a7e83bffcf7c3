//! Source records and the column hierarchy delivered by the host.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier of a source row.
///
/// Identifiers survive re-deliveries of the same underlying row; record
/// values do not, so cross-render lookups always go through the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Creates a record id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One source row as seen during a single render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Row identifier
    pub id: RecordId,
    /// Formatted values of the column axis, one per column-axis part
    #[serde(default)]
    pub column: Vec<String>,
    /// Formatted values of the card axis, one per card-axis part
    #[serde(default)]
    pub card: Vec<String>,
    /// Formatted icon-selector value, if the icon axis is in use
    #[serde(default)]
    pub icon: Option<String>,
    /// Background color assigned by the host ("#RRGGBB")
    pub color: String,
}

impl Record {
    /// Creates a record with the given id and color and no axis values.
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            column: Vec::new(),
            card: Vec::new(),
            icon: None,
            color: color.into(),
        }
    }

    /// Sets the column-axis values.
    #[must_use]
    pub fn with_column<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the card-axis values.
    #[must_use]
    pub fn with_card<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the icon-selector value.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A node of the column hierarchy.
///
/// The root's immediate children are the top-level groups. Leaf nodes list
/// their member rows; inner nodes inherit the rows of their descendants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Key unique among siblings for one delivery
    pub key: String,
    /// Formatted display value
    #[serde(default)]
    pub label: String,
    /// Member rows (leaf nodes only)
    #[serde(default)]
    pub rows: Vec<RecordId>,
    /// Child nodes, in host order
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Creates a root node holding the given top-level children.
    #[must_use]
    pub fn root(children: Vec<Self>) -> Self {
        Self {
            key: String::new(),
            label: String::new(),
            rows: Vec::new(),
            children,
        }
    }

    /// Creates a leaf node.
    pub fn leaf(key: impl Into<String>, label: impl Into<String>, rows: Vec<RecordId>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            rows,
            children: Vec::new(),
        }
    }

    /// All leaf rows under this node, in hierarchy order.
    #[must_use]
    pub fn leaf_rows(&self) -> Vec<&RecordId> {
        if self.children.is_empty() {
            return self.rows.iter().collect();
        }
        self.children
            .iter()
            .flat_map(HierarchyNode::leaf_rows)
            .collect()
    }
}

/// Identifier to record lookup, rebuilt at the start of every render cycle.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    by_id: HashMap<RecordId, Record>,
}

impl RecordIndex {
    /// Builds the index from the cycle's record set.
    ///
    /// If the host repeats an id, the first occurrence wins.
    #[must_use]
    pub fn build(records: Vec<Record>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            by_id.entry(record.id.clone()).or_insert(record);
        }
        Self { by_id }
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.by_id.get(id)
    }

    /// Returns true if the id belongs to this cycle.
    #[must_use]
    pub fn contains(&self, id: &RecordId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if no records are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
