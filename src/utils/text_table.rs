//! Plain-text table formatting for terminal display.

/// Placeholder shown for a measurement with no present values.
pub const MISSING_CELL: &str = "-";

/// Format a header row plus data rows as an aligned text table.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers, &widths);

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);

    for row in rows {
        push_row(&mut out, row, &widths);
    }

    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

/// Format a measurement value for table cells: whole numbers without a
/// fraction, everything else to two decimal places.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            out.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        out.push_str(&format!("{:<width$}", cell, width = *width));
    }
    // Trailing pad spaces are noise in terminal output
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}
