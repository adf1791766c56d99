//! Cell-gap table strategy.
//!
//! Segments each line into cells wherever a horizontal gap meets the cell
//! threshold, then accepts the region as a table when enough rows produce
//! multiple cells and their cells line up on a small set of left-edge
//! anchors.

use smallvec::SmallVec;
use tracing::debug;

use super::anchors::{cluster_anchors, nearest_anchor};
use super::grid::Grid;
use crate::layout::line::{Line, OcrBox};
use crate::layout::render::join_boxes;
use crate::utils::PageStats;

/// Minimum fraction of candidate cells whose left edge must sit on an anchor.
const MIN_ALIGNMENT_RATIO: f64 = 0.8;

/// One or more boxes along a line belonging to one column.
#[derive(Debug, Clone)]
pub(crate) struct TableCell {
    pub text: String,
    pub min_x: f64,
}

/// Splits one line into cells at gaps of `cell_gap` or wider.
pub(crate) fn line_cells(line: &Line, stats: &PageStats, cell_gap: f64) -> Vec<TableCell> {
    let sorted = line.sorted_boxes();
    let mut groups: Vec<SmallVec<[&OcrBox; 4]>> = Vec::new();
    let mut current: SmallVec<[&OcrBox; 4]> = SmallVec::new();
    let mut prev_right: Option<f64> = None;

    for b in sorted {
        if let Some(right) = prev_right {
            if b.x0() - right >= cell_gap {
                groups.push(current);
                current = SmallVec::new();
            }
        }
        prev_right = Some(b.x1());
        current.push(b);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups
        .into_iter()
        .map(|group| TableCell {
            text: join_boxes(&group, line.char_width(), stats),
            min_x: group[0].x0(),
        })
        .collect()
}

/// Strategy A: cell-gap based full-region table detection.
pub(crate) fn detect_by_gaps(lines: &[Line], stats: &PageStats) -> Option<Grid> {
    let total = lines.len();
    let cell_gap = (stats.char_width * 2.25)
        .max(stats.median_height * 0.55)
        .max(12.0);

    let per_line: Vec<Vec<TableCell>> = lines
        .iter()
        .map(|line| line_cells(line, stats, cell_gap))
        .collect();

    let candidates: Vec<usize> = (0..total).filter(|&i| per_line[i].len() >= 2).collect();
    if candidates.len() < 2.max((0.6 * total as f64).round() as usize) {
        debug!(candidates = candidates.len(), total, "too few multi-cell rows");
        return None;
    }

    let tolerance = (stats.char_width * 1.6)
        .max(stats.median_height * 0.5)
        .max(8.0);
    let edges: Vec<(f64, usize)> = candidates
        .iter()
        .flat_map(|&i| per_line[i].iter().map(move |c| (c.min_x, i)))
        .collect();
    let mut anchors = cluster_anchors(&edges, tolerance);
    // An anchor backed by a single row is not column evidence; without this
    // filter every stray cell would sit on its own anchor and the alignment
    // ratio below could never reject anything.
    anchors.retain(|a| a.rows.len() >= 2);
    if anchors.len() < 2 {
        return None;
    }

    let aligned = edges
        .iter()
        .filter(|&&(x, _)| {
            let a = &anchors[nearest_anchor(&anchors, x)];
            (x - a.center).abs() <= tolerance
        })
        .count();
    let ratio = aligned as f64 / edges.len() as f64;
    if ratio < MIN_ALIGNMENT_RATIO {
        debug!(ratio, "alignment ratio below threshold");
        return None;
    }

    // Every row's cells (single-cell rows included) snap to their nearest
    // anchor column; same-column cells merge with a single space.
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(total);
    for cells in &per_line {
        let mut row = vec![String::new(); anchors.len()];
        for cell in cells {
            let col = nearest_anchor(&anchors, cell.min_x);
            if row[col].is_empty() {
                row[col] = cell.text.clone();
            } else {
                row[col].push(' ');
                row[col].push_str(&cell.text);
            }
        }
        rows.push(row);
    }

    Some(Grid { rows })
}
