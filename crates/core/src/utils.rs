//! Geometry and statistics helpers.
//!
//! Provides the `Rect` type shared by every stage plus the small set of
//! robust statistics (medians, character-width estimates) the layout
//! heuristics are built on.

use ordered_float::OrderedFloat;

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is bottom-left
/// and (x1, y1) is top-right. Y increases upward; callers with image
/// coordinates growing downward flip the ordering via `YAxis::Downward`.
pub type Rect = (f64, f64, f64, f64);

/// Fallback character width (in page units) when no estimate is available.
pub const DEFAULT_CHAR_WIDTH: f64 = 7.0;

#[inline]
pub fn rect_width(r: Rect) -> f64 {
    r.2 - r.0
}

#[inline]
pub fn rect_height(r: Rect) -> f64 {
    r.3 - r.1
}

#[inline]
pub fn rect_area(r: Rect) -> f64 {
    rect_width(r) * rect_height(r)
}

#[inline]
pub fn center_y(r: Rect) -> f64 {
    (r.1 + r.3) / 2.0
}

/// Smallest rectangle covering both inputs.
pub fn rect_union(a: Rect, b: Rect) -> Rect {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}

/// Area of the intersection, 0.0 when the rectangles do not overlap.
pub fn intersection_area(a: Rect, b: Rect) -> f64 {
    let w = a.2.min(b.2) - a.0.max(b.0);
    let h = a.3.min(b.3) - a.1.max(b.1);
    if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
}

/// Median of a set of values; even-length inputs average the two central
/// values. Returns None for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Page-level statistics shared by the clustering, spacing and table
/// heuristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStats {
    /// Median box width divided by median character count per box.
    pub char_width: f64,
    /// Median box height.
    pub median_height: f64,
}

impl PageStats {
    /// Estimates statistics from box geometry.
    ///
    /// `boxes` yields (width, height, char count) per detection. Falls back
    /// to `DEFAULT_CHAR_WIDTH` and zero height when empty or degenerate.
    pub fn from_boxes<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, usize)>,
    {
        let mut widths = Vec::new();
        let mut heights = Vec::new();
        let mut counts = Vec::new();
        for (w, h, chars) in boxes {
            widths.push(w);
            heights.push(h);
            counts.push(chars as f64);
        }
        let median_height = median(&heights).unwrap_or(0.0);
        let char_width = match (median(&widths), median(&counts)) {
            (Some(w), Some(c)) if c >= 1.0 && w > 0.0 => w / c,
            _ => DEFAULT_CHAR_WIDTH,
        };
        Self {
            char_width,
            median_height,
        }
    }
}
