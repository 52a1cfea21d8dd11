//! GFM pipe-table emission for buffered table rows.

use super::types::TableState;

/// Placeholder header cell for tables without a header row.
///
/// GFM requires a header line; an empty HTML comment renders as nothing.
const EMPTY_HEADER_CELL: &str = "<!-- -->";

/// Renders a finished table as a GFM pipe table.
///
/// Returns `None` for a table without rows. Ragged rows are padded with
/// empty cells to the widest row.
pub fn render_table(mut table: TableState) -> Option<String> {
    if table.rows.is_empty() {
        return None;
    }

    let col_count = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut table.rows {
        row.resize(col_count, String::new());
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    let mut rows = table.rows.into_iter();

    if table.has_header {
        // rows is non-empty, checked above
        let header = rows.next().unwrap_or_default();
        lines.push(format_row(&header));
    } else {
        lines.push(format_row(&vec![EMPTY_HEADER_CELL.to_string(); col_count]));
    }
    lines.push(format_row(&vec!["---".to_string(); col_count]));

    for row in rows {
        lines.push(format_row(&row));
    }

    if let Some(caption) = table.caption {
        lines.push(format!("\n*Table: {}*\n", caption));
    }

    Some(format!("\n{}\n\n", lines.join("\n")))
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
