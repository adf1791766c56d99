//! The full layout reconstruction pipeline.
//!
//! Clusters boxes into lines, derives indentation, tries whole-region table
//! detection, then embedded-table segmentation, and renders everything else
//! through the plain-line path. Pure and deterministic; empty input yields
//! an empty string.

use tracing::debug;

use crate::config::FormatOptions;
use crate::layout::indent::IndentMap;
use crate::layout::line::{Line, OcrBox, cluster_lines};
use crate::layout::render::render_line;
use crate::layout::table::{detect_table, find_segments, render_grid};
use crate::utils::PageStats;

/// Reconstructs readable text from unordered OCR boxes.
pub fn format(boxes: &[OcrBox], options: &FormatOptions) -> String {
    if boxes.is_empty() {
        return String::new();
    }

    let lines = cluster_lines(boxes, options.y_axis);
    let stats = PageStats::from_boxes(
        boxes
            .iter()
            .map(|b| (b.width(), b.height(), b.char_count())),
    );
    let lefts: Vec<f64> = lines.iter().map(|l| l.min_x).collect();
    let base_left = lefts.iter().copied().fold(f64::INFINITY, f64::min);
    let indents = IndentMap::build(&lefts, base_left, stats.char_width);

    if options.tables {
        let segments = find_segments(&lines, &stats);
        let whole_span = segments.len() == 1
            && segments[0].start == 0
            && segments[0].end == lines.len() - 1;

        // Whole-page detection only runs when the tabular evidence is not
        // confined to a proper sub-range; otherwise a clean embedded table
        // would drag the surrounding prose into the grid.
        if segments.is_empty() || whole_span {
            if let Some(grid) = detect_table(&lines, &stats) {
                return render_grid(&grid, options).join("\n");
            }
        }
        if !segments.is_empty() && !whole_span {
            debug!(segments = segments.len(), "rendering embedded tables");
            return render_mixed(&lines, &segments, &stats, &indents, options);
        }
    }

    plain_block(&lines, &stats, &indents).join("\n")
}

fn plain_block(lines: &[Line], stats: &PageStats, indents: &IndentMap) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| {
            let indent = indents.indent_for(line.min_x, stats.char_width);
            render_line(line, stats, &indent)
        })
        .collect()
}

/// Interleaves plain blocks with per-segment grids in top-to-bottom order.
/// A segment whose re-detection fails degrades to plain rendering.
fn render_mixed(
    lines: &[Line],
    segments: &[crate::layout::table::Segment],
    stats: &PageStats,
    indents: &IndentMap,
    options: &FormatOptions,
) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut cursor = 0usize;

    for seg in segments {
        if seg.start > cursor {
            out.extend(plain_block(&lines[cursor..seg.start], stats, indents));
        }
        let slice = &lines[seg.start..=seg.end];
        match detect_table(slice, stats) {
            Some(grid) => out.extend(render_grid(&grid, options)),
            None => out.extend(plain_block(slice, stats, indents)),
        }
        cursor = seg.end + 1;
    }
    if cursor < lines.len() {
        out.extend(plain_block(&lines[cursor..], stats, indents));
    }

    out.join("\n")
}
