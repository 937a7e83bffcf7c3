//! Column order merging and the persisted order text format.
//!
//! The persisted order is plain text, one column label per line. Lines are
//! trimmed and blank lines ignored; the order of the remaining lines defines
//! the leading run of the board.
//!
//! Merging matches persisted labels against live group labels with exact,
//! case-sensitive comparison. A label to slot map keeps the merge linear in
//! the number of persisted labels plus live groups.

use std::collections::HashMap;

use crate::models::ColumnKey;

use super::flatten::Group;

/// Parses persisted order text into an ordered, de-blanked label list.
#[must_use]
pub fn parse_order_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats labels as persisted order text (trimmed, blank entries dropped).
#[must_use]
pub fn format_order_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|label| label.as_ref().trim())
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalizes user-edited order text into its stored form.
#[must_use]
pub fn normalize_order_text(text: &str) -> String {
    format_order_labels(&parse_order_text(text))
}

/// A column slot produced by the merge, before cards are composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedColumn<'a> {
    /// Column identity
    pub key: ColumnKey,
    /// Header label
    pub label: String,
    /// Live group backing this column; `None` for phantom columns
    pub group: Option<Group<'a>>,
}

impl MergedColumn<'_> {
    /// Returns true if no live group backs this column.
    #[must_use]
    pub fn is_phantom(&self) -> bool {
        self.group.is_none()
    }
}

/// Result of merging the persisted order with the live groups.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergedOrder<'a> {
    /// Columns in display order
    pub columns: Vec<MergedColumn<'a>>,
    /// Labels of live columns appended after the persisted run
    pub unpinned: Vec<String>,
}

impl MergedOrder<'_> {
    /// Column labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Merges persisted labels with live groups into one column sequence.
///
/// - Every distinct persisted label yields exactly one leading column, in
///   persisted order; repeated persisted labels are ignored after the first.
/// - The first live group whose label matches a persisted label fills that
///   slot. Later groups with the same label are appended as their own columns.
/// - Persisted labels without a live group stay as empty phantom columns.
/// - Remaining live groups follow in hierarchy order.
pub fn merge_column_order<'a, I>(persisted: &[String], groups: I) -> MergedOrder<'a>
where
    I: IntoIterator<Item = Group<'a>>,
{
    let mut columns: Vec<MergedColumn<'a>> = Vec::with_capacity(persisted.len());
    let mut slot_by_label: HashMap<&str, usize> = HashMap::with_capacity(persisted.len());

    for label in persisted {
        if slot_by_label.contains_key(label.as_str()) {
            continue;
        }
        slot_by_label.insert(label.as_str(), columns.len());
        columns.push(MergedColumn {
            key: ColumnKey::Phantom(label.clone()),
            label: label.clone(),
            group: None,
        });
    }

    let mut unpinned = Vec::new();
    for group in groups {
        let slot = slot_by_label
            .get(group.label)
            .copied()
            .filter(|&slot| columns[slot].group.is_none());

        match slot {
            Some(slot) => {
                let column = &mut columns[slot];
                column.key = ColumnKey::Group(group.key.to_string());
                column.group = Some(group);
            }
            None => {
                unpinned.push(group.label.to_string());
                columns.push(MergedColumn {
                    key: ColumnKey::Group(group.key.to_string()),
                    label: group.label.to_string(),
                    group: Some(group),
                });
            }
        }
    }

    MergedOrder { columns, unpinned }
}
