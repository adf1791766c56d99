//! Grid rendering.

use crate::config::{FormatOptions, TableStyle};

/// A rectangular grid of rendered cell texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid {
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    pub(crate) fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Widest cell per column, in characters, never below 1.
    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![1usize; self.columns()];
        for row in &self.rows {
            for (c, cell) in row.iter().enumerate() {
                widths[c] = widths[c].max(cell.chars().count());
            }
        }
        widths
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width - len))
}

/// Renders a grid as text lines per the configured style.
pub(crate) fn render_grid(grid: &Grid, options: &FormatOptions) -> Vec<String> {
    let widths = grid.column_widths();
    let mut out = Vec::with_capacity(grid.rows.len() + 1);

    for (r, row) in grid.rows.iter().enumerate() {
        let line = match options.table_style {
            TableStyle::Pipes => {
                let cells: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &w)| pad(cell, w))
                    .collect();
                format!("| {} |", cells.join(" | "))
            }
            TableStyle::Aligned => {
                let cells: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &w)| pad(cell, w))
                    .collect();
                cells.join("  ").trim_end().to_string()
            }
        };
        out.push(line);

        // Header separator after the first row only, pipe style only.
        if r == 0
            && grid.rows.len() >= 2
            && options.header_separator
            && options.table_style == TableStyle::Pipes
        {
            let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            out.push(format!("| {} |", dashes.join(" | ")));
        }
    }
    out
}
