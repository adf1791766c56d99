//! Table detection and rendering.
//!
//! Two independent column-inference strategies over a line range (cell-gap
//! based, then column-anchor based), a segmenter that finds table-like
//! sub-ranges inside free-form text, and grid rendering. Failing every
//! threshold is never an error; the caller falls back to plain rendering.

mod anchors;
mod cells;
mod grid;
mod segment;

pub(crate) use grid::render_grid;
pub(crate) use segment::{Segment, find_segments};

use tracing::debug;

use grid::Grid;

use super::line::Line;
use crate::utils::PageStats;

/// Attempts full-region table detection: the cell-gap strategy first, the
/// column-anchor strategy as fallback. First success wins.
pub(crate) fn detect_table(lines: &[Line], stats: &PageStats) -> Option<Grid> {
    if let Some(grid) = cells::detect_by_gaps(lines, stats) {
        debug!(rows = grid.rows.len(), columns = grid.columns(), "cell-gap table accepted");
        return Some(grid);
    }
    if let Some(grid) = anchors::detect_by_anchors(lines, stats) {
        debug!(rows = grid.rows.len(), columns = grid.columns(), "column-anchor table accepted");
        return Some(grid);
    }
    None
}
