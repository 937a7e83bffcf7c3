//! Rendered board structure: columns of cards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::record::RecordId;
use super::rgb::{ContrastText, RgbColor};

/// Identity of a rendered column.
///
/// Live columns are keyed by their group key; phantom columns only exist
/// because of the persisted order and are keyed by that label. Serialized as
/// a tagged string: `group:<key>` or `phantom:<label>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ColumnKey {
    /// Backed by a live group
    Group(String),
    /// Declared by the persisted order, no live group
    Phantom(String),
}

impl ColumnKey {
    /// The raw key or label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Group(key) | Self::Phantom(key) => key,
        }
    }

    /// Returns true for placeholder columns.
    #[must_use]
    pub const fn is_phantom(&self) -> bool {
        matches!(self, Self::Phantom(_))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(key) => write!(f, "group:{key}"),
            Self::Phantom(label) => write!(f, "phantom:{label}"),
        }
    }
}

impl From<ColumnKey> for String {
    fn from(key: ColumnKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ColumnKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Some(key) = value.strip_prefix("group:") {
            Ok(Self::Group(key.to_string()))
        } else if let Some(label) = value.strip_prefix("phantom:") {
            Ok(Self::Phantom(label.to_string()))
        } else {
            Err(format!("column key must start with 'group:' or 'phantom:', got '{value}'"))
        }
    }
}

/// Logical icon asset identifier; the render target resolves it to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display content for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Record this card stands for
    pub record_id: RecordId,
    /// One formatted value per card-axis part
    pub content_lines: Vec<String>,
    /// Icon asset reference, if an icon axis is configured and the value is set
    pub icon: Option<IconRef>,
    /// Background color, verbatim from the record
    pub background_color: String,
    /// Parsed background color
    pub background_rgb: RgbColor,
    /// Text color for the background
    pub foreground_color: ContrastText,
    /// Tooltip text (axis name/value pairs, CRLF terminated)
    pub tooltip: String,
}

impl Card {
    /// Content lines joined with a line break.
    #[must_use]
    pub fn text(&self) -> String {
        self.content_lines.join("\n")
    }
}

/// A rendered column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column identity
    pub key: ColumnKey,
    /// Header label
    pub label: String,
    /// Cards in source order
    pub cards: Vec<Card>,
}

impl Column {
    /// Returns true if the column exists only because of the persisted order.
    #[must_use]
    pub const fn is_phantom(&self) -> bool {
        self.key.is_phantom()
    }

    /// Record ids of all cards in this column, in display order.
    pub fn record_ids(&self) -> impl Iterator<Item = &RecordId> {
        self.cards.iter().map(|card| &card.record_id)
    }
}

/// Serialized form of a [`Board`]; the card index is rebuilt on load.
#[derive(Deserialize)]
struct BoardParts {
    columns: Vec<Column>,
    #[serde(default)]
    skipped: Vec<RecordId>,
}

impl From<BoardParts> for Board {
    fn from(parts: BoardParts) -> Self {
        Self::new(parts.columns, parts.skipped)
    }
}

/// A fully computed board, swapped in as a whole after each successful cycle.
///
/// Built with [`Board::new`], which indexes every card by record id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BoardParts")]
pub struct Board {
    /// Columns in display order
    pub columns: Vec<Column>,
    /// Records left out because their color could not be parsed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<RecordId>,
    /// Record id -> (column, card) position
    #[serde(skip)]
    positions: HashMap<RecordId, (usize, usize)>,
}

impl Board {
    /// Creates a board and indexes its cards.
    ///
    /// A record rendered twice resolves to its first card.
    #[must_use]
    pub fn new(columns: Vec<Column>, skipped: Vec<RecordId>) -> Self {
        let mut positions = HashMap::with_capacity(columns.iter().map(|c| c.cards.len()).sum());
        for (col, column) in columns.iter().enumerate() {
            for (row, card) in column.cards.iter().enumerate() {
                positions.entry(card.record_id.clone()).or_insert((col, row));
            }
        }
        Self {
            columns,
            skipped,
            positions,
        }
    }

    /// Column labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Finds the card rendered for a record.
    #[must_use]
    pub fn card(&self, id: &RecordId) -> Option<&Card> {
        let &(col, row) = self.positions.get(id)?;
        self.columns
            .get(col)
            .and_then(|c| c.cards.get(row))
            .filter(|card| &card.record_id == id)
    }

    /// Total number of cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}
