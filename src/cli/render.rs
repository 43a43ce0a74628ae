//! Headless text rendering of tables

use crate::resource::{Description, RowEvent, Table, XRay, is_all_namespaces};

const CHANGE_MARKER: &str = "→";

/// Render a table as aligned text. Changed cells read `old→new`.
pub fn render_table(kind: &str, table: &Table) -> String {
    let cells: Vec<Vec<String>> = table.rows.values().map(render_row).collect();

    let scope = if is_all_namespaces(&table.namespace) {
        "all"
    } else if table.namespace.is_empty() {
        "cluster"
    } else {
        table.namespace.as_str()
    };
    let mut out = format!("{}({})[{}]\n", kind, scope, table.len());
    out.push_str(&render_grid(&table.header, &cells));
    out
}

/// Render the drill-down view of the object at `path`
pub fn render_xray(kind: &str, path: &str, xray: &XRay) -> String {
    let mut out = format!("{}({})[{}]\n", kind, path, xray.rows.len());
    out.push_str(&render_grid(&xray.header, &xray.rows));
    out
}

/// Render describe output as `Key: value` lines
pub fn render_description(props: &Description) -> String {
    let width = props.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    props
        .iter()
        .map(|(key, value)| {
            format!("{:<width$}  {}\n", format!("{}:", key), value, width = width + 1)
        })
        .collect()
}

fn render_row(row: &RowEvent) -> Vec<String> {
    row.fields
        .iter()
        .zip(&row.deltas)
        .map(|(field, delta)| {
            if delta.is_empty() {
                field.clone()
            } else {
                format!("{}{}{}", delta, CHANGE_MARKER, field)
            }
        })
        .collect()
}

fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(header, &widths);
    for row in rows {
        out.push_str(&render_line(row, &widths));
    }
    out
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}
