//! Reconciliation of two OCR box sets.
//!
//! Fuses overlapping detections from two independent passes into one box
//! set. The operation is primary-biased and not commutative; the caller
//! decides which pass is primary.

use tracing::debug;

use crate::layout::line::OcrBox;
use crate::utils::{intersection_area, rect_area, rect_union};

/// Minimum overlap score for two boxes to be considered the same region.
const MATCH_THRESHOLD: f64 = 0.6;

/// Overlap score: intersection over the *smaller* area, deliberately not
/// IoU - a small box fully contained in a larger one scores 1.0.
fn overlap_score(a: &OcrBox, b: &OcrBox) -> f64 {
    let inter = intersection_area(a.rect(), b.rect());
    if inter <= 0.0 {
        return 0.0;
    }
    inter / rect_area(a.rect()).min(rect_area(b.rect()))
}

fn informative_chars(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}

/// Picks the more informative of two texts: more alphanumeric content wins,
/// then the longer trimmed text, then the primary.
fn better_text(primary: &str, secondary: &str) -> bool {
    let (pi, si) = (informative_chars(primary), informative_chars(secondary));
    if si != pi {
        return si > pi;
    }
    secondary.chars().count() > primary.chars().count()
}

/// Merges a secondary detection set into a primary one.
///
/// Each secondary box either fuses into the best-overlapping primary box
/// (union rect, better text) or is appended unchanged, so no detection is
/// ever silently dropped and the result never covers fewer regions than
/// the primary. `merge(a, &[])` returns `a` unchanged.
pub fn merge(primary: &[OcrBox], secondary: &[OcrBox]) -> Vec<OcrBox> {
    let mut out: Vec<OcrBox> = primary.to_vec();
    let mut fused = 0usize;

    for sec in secondary {
        let mut best: Option<(usize, f64)> = None;
        for (i, pri) in out.iter().enumerate() {
            let s = overlap_score(pri, sec);
            if s >= MATCH_THRESHOLD && best.is_none_or(|(_, bs)| s > bs) {
                best = Some((i, s));
            }
        }
        match best {
            Some((i, _)) => {
                let target = &mut out[i];
                target.set_rect(rect_union(target.rect(), sec.rect()));
                if better_text(target.text(), sec.text()) {
                    target.set_text(sec.text().to_string());
                }
                fused += 1;
            }
            None => out.push(sec.clone()),
        }
    }

    if !secondary.is_empty() {
        debug!(
            primary = primary.len(),
            secondary = secondary.len(),
            fused,
            "merged detection sets"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(text: &str, rect: crate::utils::Rect) -> OcrBox {
        OcrBox::new(text, rect).unwrap()
    }

    #[test]
    fn contained_box_scores_full_overlap() {
        let big = bx("big", (0.0, 0.0, 100.0, 100.0));
        let small = bx("small", (10.0, 10.0, 20.0, 20.0));
        assert_eq!(overlap_score(&big, &small), 1.0);
    }

    #[test]
    fn informative_text_beats_length() {
        // "He||o" is longer than "Heo" in symbols but has fewer alphanumerics
        // than "Hello".
        assert!(better_text("He||o", "Hello"));
        assert!(!better_text("Hello", "He||o"));
    }

    #[test]
    fn equal_information_falls_back_to_primary() {
        assert!(!better_text("abc", "xyz"));
    }
}
