//! Two-column bordered tables used by the record summary.
//!
//! ```text
//! +------------+----------------------------------------------------+
//! | NAME       | Ada                                                |
//! +------------+----------------------------------------------------+
//! | PHONE(S)   | 1. 5551234                                         |
//! |            | 2. 5555678                                         |
//! +------------+----------------------------------------------------+
//! ```
//!
//! Column widths are fixed; longer values wrap inside their cell.

use comfy_table::presets::ASCII_FULL;
use comfy_table::{ColumnConstraint, ContentArrangement, Table, Width};

pub const KEY_WIDTH: u16 = 10;
pub const VALUE_WIDTH: u16 = 50;

/// Cell padding on each side.
const PADDING: u16 = 1;

/// Total width of a rendered line, borders included.
pub const TABLE_WIDTH: u16 = KEY_WIDTH + VALUE_WIDTH + 4 * PADDING + 3;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_constraints(vec![
            ColumnConstraint::Absolute(Width::Fixed(KEY_WIDTH + 2 * PADDING)),
            ColumnConstraint::Absolute(Width::Fixed(VALUE_WIDTH + 2 * PADDING)),
        ]);
    table
}

pub fn render_table(rows: &[(&str, String)]) -> String {
    let mut table = new_table();
    for (key, value) in rows {
        table.add_row(vec![*key, value.as_str()]);
    }
    table.to_string()
}
