//! OCR box and text line types, plus vertical-proximity line clustering.
//!
//! Boxes carry no ordering of their own; `cluster_lines` imposes a total,
//! input-order-independent ordering before grouping so that shuffling the
//! input can never change the result.

use ordered_float::OrderedFloat;

use crate::config::YAxis;
use crate::error::{LayoutError, Result};
use crate::utils::{Rect, center_y, median, rect_height, rect_width};

/// One OCR detection: recognized text plus its bounding rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrBox {
    text: String,
    rect: Rect,
}

impl OcrBox {
    /// Creates a validated box. The text is stored trimmed.
    ///
    /// Fails on whitespace-only text and on rects that are non-finite or
    /// have non-positive width or height.
    pub fn new(text: impl Into<String>, rect: Rect) -> Result<Self> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(LayoutError::EmptyText);
        }
        let finite =
            rect.0.is_finite() && rect.1.is_finite() && rect.2.is_finite() && rect.3.is_finite();
        if !finite || rect_width(rect) <= 0.0 || rect_height(rect) <= 0.0 {
            return Err(LayoutError::DegenerateRect { rect });
        }
        Ok(Self { text, rect })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn x0(&self) -> f64 {
        self.rect.0
    }

    pub fn x1(&self) -> f64 {
        self.rect.2
    }

    pub fn width(&self) -> f64 {
        rect_width(self.rect)
    }

    pub fn height(&self) -> f64 {
        rect_height(self.rect)
    }

    pub fn center_y(&self) -> f64 {
        center_y(self.rect)
    }

    pub(crate) fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Estimated width of one character of this box.
    pub(crate) fn char_width(&self) -> f64 {
        self.width() / self.char_count().max(1) as f64
    }
}

/// A cluster of boxes inferred to share one visual text row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Recency-biased running average of member vertical centers.
    pub center_y: f64,
    /// Minimum left edge over all members.
    pub min_x: f64,
    /// Members in insertion order; rendering re-sorts by left edge.
    pub boxes: Vec<OcrBox>,
}

impl Line {
    fn new(seed: OcrBox) -> Self {
        Self {
            center_y: seed.center_y(),
            min_x: seed.x0(),
            boxes: vec![seed],
        }
    }

    fn push(&mut self, b: OcrBox) {
        self.center_y = smooth_center(self.center_y, b.center_y());
        self.min_x = self.min_x.min(b.x0());
        self.boxes.push(b);
    }

    /// Members ordered left to right (ties broken by right edge, then text).
    pub fn sorted_boxes(&self) -> Vec<&OcrBox> {
        let mut sorted: Vec<&OcrBox> = self.boxes.iter().collect();
        sorted.sort_by(|a, b| {
            OrderedFloat(a.x0())
                .cmp(&OrderedFloat(b.x0()))
                .then_with(|| OrderedFloat(a.x1()).cmp(&OrderedFloat(b.x1())))
                .then_with(|| a.text().cmp(b.text()))
        });
        sorted
    }

    /// Average character width across the line (total width / total chars).
    pub(crate) fn char_width(&self) -> f64 {
        let total_width: f64 = self.boxes.iter().map(OcrBox::width).sum();
        let total_chars: usize = self.boxes.iter().map(OcrBox::char_count).sum();
        total_width / total_chars.max(1) as f64
    }
}

/// The accumulator step for a line's running center.
///
/// Deliberately `(old + new) / 2` rather than a true mean: the most recently
/// added member carries half the weight, which smooths the cluster toward
/// boxes placed later in the top-first scan. Clustering output depends on
/// this exact formula for any line with three or more members.
#[inline]
pub(crate) fn smooth_center(old: f64, new: f64) -> f64 {
    (old + new) / 2.0
}

/// Ordering key that reads "top of the visual field first" under either
/// Y convention.
#[inline]
fn top_first_key(cy: f64, y_axis: YAxis) -> OrderedFloat<f64> {
    match y_axis {
        YAxis::Upward => OrderedFloat(-cy),
        YAxis::Downward => OrderedFloat(cy),
    }
}

/// Groups boxes into horizontal text lines by vertical-center proximity.
///
/// Output lines are ordered top to bottom. No box is ever dropped; an
/// outlier far from every existing line opens a line of its own.
pub fn cluster_lines(boxes: &[OcrBox], y_axis: YAxis) -> Vec<Line> {
    if boxes.is_empty() {
        return Vec::new();
    }

    let heights: Vec<f64> = boxes.iter().map(OcrBox::height).collect();
    let line_threshold = (median(&heights).unwrap_or(0.0) * 0.6).max(4.0);

    // Total pre-sort: top first, then left edge, right edge, text. This is
    // what makes the clustering independent of input order.
    let mut ordered: Vec<&OcrBox> = boxes.iter().collect();
    ordered.sort_by(|a, b| {
        top_first_key(a.center_y(), y_axis)
            .cmp(&top_first_key(b.center_y(), y_axis))
            .then_with(|| OrderedFloat(a.x0()).cmp(&OrderedFloat(b.x0())))
            .then_with(|| OrderedFloat(a.x1()).cmp(&OrderedFloat(b.x1())))
            .then_with(|| a.text().cmp(b.text()))
    });

    let mut lines: Vec<Line> = Vec::new();
    for b in ordered {
        let mut best: Option<(usize, f64)> = None;
        for (i, line) in lines.iter().enumerate() {
            let d = (line.center_y - b.center_y()).abs();
            if d < line_threshold && best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        match best {
            Some((i, _)) => lines[i].push(b.clone()),
            None => lines.push(Line::new(b.clone())),
        }
    }

    lines.sort_by_key(|l| top_first_key(l.center_y, y_axis));
    lines
}
