use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use crate::cli::format;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// A money amount as a right-aligned cell; unknown values are a dimmed "N/A".
pub fn money_cell(value: Option<f64>, currency: &str) -> Cell {
    match value.filter(|v| v.is_finite()) {
        Some(value) => Cell::new(format::format_currency(Some(value), currency))
            .set_alignment(CellAlignment::Right),
        None => Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
    }
}

/// 24h change as a color-coded cell: green up, red down, dim for flat or
/// unknown.
pub fn change_cell(change: Option<f64>) -> Cell {
    let cell = Cell::new(format::format_change(change)).set_alignment(CellAlignment::Right);
    match change.filter(|c| c.is_finite()) {
        Some(c) if c > 0.0 => cell.fg(Color::Green),
        Some(c) if c < 0.0 => cell.fg(Color::Red),
        Some(_) => cell.fg(Color::Grey),
        None => cell.fg(Color::DarkGrey),
    }
}

/// Inline (non-table) variant of the change color coding.
pub fn style_change(change: Option<f64>) -> String {
    let text = format::format_change(change);
    match change.filter(|c| c.is_finite()) {
        Some(c) if c > 0.0 => style(text).green().to_string(),
        Some(c) if c < 0.0 => style(text).red().to_string(),
        _ => style(text).dim().to_string(),
    }
}
