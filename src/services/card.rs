//! Card composition: content, icon, colors and tooltip for one record.

use crate::error::BoardResult;
use crate::models::{AxisPart, AxisParts, Card, IconRef, Record, RgbColor};

/// Line terminator used between tooltip entries.
pub const TOOLTIP_LINE_END: &str = "\r\n";

/// Builds the card for `record`.
///
/// Content lines are the record's card-axis values in order. The icon
/// reference is set only when an icon axis is configured and the record's
/// icon value is non-blank.
///
/// # Errors
///
/// Returns [`BoardError::InvalidColor`](crate::error::BoardError::InvalidColor)
/// if the record's color is not a 6-digit hex value.
pub fn compose_card(record: &Record, axes: &AxisParts) -> BoardResult<Card> {
    let background_rgb = RgbColor::from_hex(&record.color)?;

    let icon = if axes.has_icon() {
        record
            .icon
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| IconRef(value.to_string()))
    } else {
        None
    };

    Ok(Card {
        record_id: record.id.clone(),
        content_lines: record.card.clone(),
        icon,
        background_color: record.color.clone(),
        background_rgb,
        foreground_color: background_rgb.contrast_text(),
        tooltip: compose_tooltip(record, axes),
    })
}

/// Tooltip text: `"<name>: <value>\r\n"` for every column-axis part, then
/// every card-axis part, in declared order.
#[must_use]
pub fn compose_tooltip(record: &Record, axes: &AxisParts) -> String {
    let mut tooltip = String::new();
    append_pairs(&mut tooltip, &axes.column, &record.column);
    append_pairs(&mut tooltip, &axes.card, &record.card);
    tooltip
}

fn append_pairs(out: &mut String, parts: &[AxisPart], values: &[String]) {
    for (part, value) in parts.iter().zip(values) {
        out.push_str(&part.display_name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(TOOLTIP_LINE_END);
    }
}
