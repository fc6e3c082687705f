use crate::bot::Reply;
use crate::core::CurrencyListing;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
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

/// One row per region with its codes and count.
pub fn listing_table(listing: &CurrencyListing) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Count"),
        header_cell("Currencies"),
    ]);
    for group in &listing.groups {
        table.add_row(vec![
            Cell::new(group.region.to_string()).add_attribute(Attribute::Bold),
            Cell::new(group.codes.len()),
            Cell::new(group.codes.join(", ")),
        ]);
    }
    table
}

/// Renders a reply for the terminal; errors are highlighted.
pub fn render_reply(reply: &Reply) -> String {
    let text = reply.to_string();
    if reply.is_error() {
        style_text(&text, StyleType::Error)
    } else {
        text
    }
}
