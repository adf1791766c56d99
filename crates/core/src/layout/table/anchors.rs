//! Column anchors and the anchor-based table strategy.
//!
//! An anchor is an inferred common left-edge position shared by boxes
//! across multiple lines - the primary evidence of tabular structure.

use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::grid::Grid;
use crate::layout::line::{Line, OcrBox};
use crate::layout::render::join_boxes;
use crate::utils::PageStats;

/// Strategy B never infers more than this many columns.
const MAX_COLUMNS: usize = 6;

/// An inferred left-edge column position.
#[derive(Debug, Clone)]
pub(crate) struct ColumnAnchor {
    /// Running weighted mean of assigned left edges.
    pub center: f64,
    /// Number of assigned values.
    pub count: usize,
    /// Distinct lines contributing to this anchor.
    pub rows: FxHashSet<usize>,
}

impl ColumnAnchor {
    fn new(value: f64, row: usize) -> Self {
        let mut rows = FxHashSet::default();
        rows.insert(row);
        Self {
            center: value,
            count: 1,
            rows,
        }
    }

    /// Folds one more left edge into the running mean.
    fn fold(&mut self, value: f64, row: usize) {
        self.center = (self.center * self.count as f64 + value) / (self.count + 1) as f64;
        self.count += 1;
        self.rows.insert(row);
    }
}

/// Greedy 1-D clustering of (left edge, line index) pairs.
///
/// Values are processed in ascending order; a value farther than the
/// tolerance from the current cluster's running mean opens a new cluster.
/// Resulting anchors are ordered by center and mutually separated by more
/// than the tolerance.
pub(crate) fn cluster_anchors(values: &[(f64, usize)], tolerance: f64) -> Vec<ColumnAnchor> {
    let mut sorted: Vec<(f64, usize)> = values.to_vec();
    sorted.sort_by_key(|&(v, row)| (OrderedFloat(v), row));

    let mut anchors: Vec<ColumnAnchor> = Vec::new();
    for (v, row) in sorted {
        match anchors.last_mut() {
            Some(a) if (v - a.center).abs() <= tolerance => a.fold(v, row),
            _ => anchors.push(ColumnAnchor::new(v, row)),
        }
    }
    anchors
}

/// Index of the anchor whose center is closest to `x` (ties to the left).
pub(crate) fn nearest_anchor(anchors: &[ColumnAnchor], x: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, a) in anchors.iter().enumerate() {
        let d = (x - a.center).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Strategy B: build anchors directly from every line's box left edges and
/// bucket boxes to the nearest surviving anchor.
pub(crate) fn detect_by_anchors(lines: &[Line], stats: &PageStats) -> Option<Grid> {
    let row_count = lines.len();
    let tolerance = (stats.char_width * 1.4)
        .max(stats.median_height * 0.45)
        .max(6.0);

    let values: Vec<(f64, usize)> = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| line.boxes.iter().map(move |b| (b.x0(), i)))
        .collect();
    let mut anchors = cluster_anchors(&values, tolerance);

    let min_support = 2.max((0.4 * row_count as f64).round() as usize);
    anchors.retain(|a| a.rows.len() >= min_support);

    if anchors.len() > MAX_COLUMNS {
        // Keep the best-supported anchors, preferring the leftmost on ties,
        // then restore left-to-right column order.
        anchors.sort_by(|a, b| {
            b.rows
                .len()
                .cmp(&a.rows.len())
                .then_with(|| OrderedFloat(a.center).cmp(&OrderedFloat(b.center)))
        });
        anchors.truncate(MAX_COLUMNS);
        anchors.sort_by_key(|a| OrderedFloat(a.center));
    }
    if anchors.len() < 2 {
        return None;
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(row_count);
    for line in lines {
        let mut buckets: Vec<SmallVec<[&OcrBox; 4]>> = vec![SmallVec::new(); anchors.len()];
        for b in line.sorted_boxes() {
            buckets[nearest_anchor(&anchors, b.x0())].push(b);
        }
        let row: Vec<String> = buckets
            .iter()
            .map(|bucket| join_boxes(bucket, line.char_width(), stats))
            .collect();
        rows.push(row);
    }

    let populated = rows
        .iter()
        .filter(|row| row.iter().filter(|c| !c.is_empty()).count() >= 2)
        .count();
    if populated < 2.max((0.5 * row_count as f64).round() as usize) {
        return None;
    }

    Some(Grid { rows })
}
