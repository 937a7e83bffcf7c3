//! Flattens the column hierarchy into top-level groups.

use tracing::debug;

use crate::models::{HierarchyNode, Record, RecordIndex};

/// A top-level group of records for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// Hierarchy key, unique within the delivery
    pub key: &'a str,
    /// Formatted display label
    pub label: &'a str,
    /// Member records in hierarchy order
    pub records: Vec<&'a Record>,
}

/// Walks the root's immediate children, resolving member rows through the
/// cycle's record index.
///
/// The flattener is cheap to hold; every call to [`GroupFlattener::groups`]
/// starts a fresh pass.
#[derive(Debug, Clone, Copy)]
pub struct GroupFlattener<'a> {
    root: &'a HierarchyNode,
    index: &'a RecordIndex,
}

impl<'a> GroupFlattener<'a> {
    /// Creates a flattener over a hierarchy root.
    #[must_use]
    pub const fn new(root: &'a HierarchyNode, index: &'a RecordIndex) -> Self {
        Self { root, index }
    }

    /// Lazily yields one group per top-level child, in hierarchy order.
    ///
    /// Rows the hierarchy names but the record set lacks are left out.
    pub fn groups(&self) -> impl Iterator<Item = Group<'a>> + 'a {
        let (root, index) = (self.root, self.index);
        root.children.iter().map(move |child| {
            let records = child
                .leaf_rows()
                .into_iter()
                .filter_map(|id| {
                    let record = index.get(id);
                    if record.is_none() {
                        debug!(record = %id, group = %child.key, "hierarchy row missing from record set");
                    }
                    record
                })
                .collect();
            Group {
                key: child.key.as_str(),
                label: child.label.as_str(),
                records,
            }
        })
    }
}
