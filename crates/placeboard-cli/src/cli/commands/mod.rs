//! CLI command handlers.

pub mod config;
pub mod resumes;
pub mod salary;
pub mod seasons;
pub mod stats;

use comfy_table::{ContentArrangement, Table};

/// Plain comfy-table with a header row.
pub(crate) fn table(headers: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers);
    for row in rows {
        table.add_row(row);
    }
    table
}
