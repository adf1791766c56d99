//! Embedded-table segmentation.
//!
//! When the whole region is not uniformly tabular, finds contiguous
//! sub-ranges of lines that look like tables so only those render as grids.
//! Anchor evidence is tried first; a per-line gap heuristic is the fallback.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::anchors::{cluster_anchors, nearest_anchor};
use crate::layout::line::Line;
use crate::utils::{PageStats, median};

/// A contiguous run of table-like lines, inclusive on both ends.
/// Always spans at least two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Strong,
    Weak,
    None,
}

/// Non-signal lines tolerated inside an anchor-based segment.
const ANCHOR_SLACK: usize = 2;

/// Non-qualifying lines tolerated inside a gap-based segment.
const GAP_SLACK: usize = 1;

/// Finds table-like segments, anchor evidence first, gap heuristic second.
pub(crate) fn find_segments(lines: &[Line], stats: &PageStats) -> Vec<Segment> {
    let by_anchors = anchor_segments(lines, stats);
    if !by_anchors.is_empty() {
        debug!(count = by_anchors.len(), "anchor-based segments");
        return by_anchors;
    }
    let by_gaps = gap_segments(lines, stats);
    if !by_gaps.is_empty() {
        debug!(count = by_gaps.len(), "gap-based segments");
    }
    by_gaps
}

fn anchor_segments(lines: &[Line], stats: &PageStats) -> Vec<Segment> {
    let tolerance = (stats.char_width * 1.4)
        .max(stats.median_height * 0.45)
        .max(6.0);

    let values: Vec<(f64, usize)> = lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| line.boxes.iter().map(move |b| (b.x0(), i)))
        .collect();
    let mut anchors = cluster_anchors(&values, tolerance);
    // Anchors backed by a single line are just prose words.
    anchors.retain(|a| a.rows.len() >= 2);
    anchors.sort_by_key(|a| OrderedFloat(a.center));
    if anchors.len() < 2 {
        return Vec::new();
    }

    let signals: Vec<Signal> = lines
        .iter()
        .map(|line| {
            let mut touched: FxHashSet<usize> = FxHashSet::default();
            for b in &line.boxes {
                let idx = nearest_anchor(&anchors, b.x0());
                if (b.x0() - anchors[idx].center).abs() <= tolerance {
                    touched.insert(idx);
                }
            }
            let leftmost = touched.iter().any(|&idx| idx < 3);
            if touched.len() >= 3 || (touched.len() >= 2 && leftmost) {
                Signal::Strong
            } else if touched.len() >= 2 {
                Signal::Weak
            } else {
                Signal::None
            }
        })
        .collect();

    collect_segments(&signals, ANCHOR_SLACK, true)
}

/// Gap heuristic: a line "has columns" when its widest inter-box gap is both
/// absolutely wide and at least twice the line's median gap.
fn line_has_columns(line: &Line, stats: &PageStats) -> bool {
    let sorted = line.sorted_boxes();
    if sorted.len() < 2 {
        return false;
    }
    let gaps: Vec<f64> = sorted
        .iter()
        .tuple_windows()
        .map(|(a, b)| b.x0() - a.x1())
        .collect();
    let max_gap = gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median_gap = median(&gaps).unwrap_or(0.0);
    let threshold = (stats.char_width * 1.2)
        .max(stats.median_height * 0.35)
        .max(6.0);
    max_gap > threshold && max_gap >= 2.0 * median_gap
}

fn gap_segments(lines: &[Line], stats: &PageStats) -> Vec<Segment> {
    let signals: Vec<Signal> = lines
        .iter()
        .map(|line| {
            if line_has_columns(line, stats) {
                Signal::Strong
            } else {
                Signal::None
            }
        })
        .collect();
    collect_segments(&signals, GAP_SLACK, false)
}

/// Walks line signals into segments.
///
/// A strong signal opens a segment, any signal extends it, and up to `slack`
/// consecutive non-signal lines are tolerated before it closes at the last
/// signal line. With `require_strong` a kept segment must contain at least
/// one strong line; every kept segment spans >= 2 lines.
fn collect_segments(signals: &[Signal], slack: usize, require_strong: bool) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<(usize, usize, bool)> = None;
    let mut misses = 0usize;

    let close = |cur: &mut Option<(usize, usize, bool)>, segments: &mut Vec<Segment>| {
        if let Some((start, end, has_strong)) = cur.take() {
            if end - start + 1 >= 2 && (has_strong || !require_strong) {
                segments.push(Segment { start, end });
            }
        }
    };

    for (i, &signal) in signals.iter().enumerate() {
        match signal {
            Signal::Strong => {
                misses = 0;
                match &mut current {
                    Some((_, end, has_strong)) => {
                        *end = i;
                        *has_strong = true;
                    }
                    None => current = Some((i, i, true)),
                }
            }
            Signal::Weak => {
                if let Some((_, end, _)) = &mut current {
                    misses = 0;
                    *end = i;
                }
            }
            Signal::None => {
                if current.is_some() {
                    misses += 1;
                    if misses > slack {
                        close(&mut current, &mut segments);
                        misses = 0;
                    }
                }
            }
        }
    }
    close(&mut current, &mut segments);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_opens_weak_extends() {
        use Signal::{None as N, Strong as S, Weak as W};
        let segs = collect_segments(&[N, S, W, W, N, N, N, S], 2, true);
        assert_eq!(segs, vec![Segment { start: 1, end: 3 }]);
    }

    #[test]
    fn weak_alone_never_opens() {
        use Signal::{None as N, Weak as W};
        assert!(collect_segments(&[N, W, W, W, N], 2, true).is_empty());
    }

    #[test]
    fn slack_bridges_short_interruptions() {
        use Signal::{None as N, Strong as S};
        let segs = collect_segments(&[S, S, N, N, S, N], 2, true);
        assert_eq!(segs, vec![Segment { start: 0, end: 4 }]);
    }

    #[test]
    fn single_line_segments_are_dropped() {
        use Signal::{None as N, Strong as S};
        assert!(collect_segments(&[N, S, N, N, N], 2, true).is_empty());
    }
}
