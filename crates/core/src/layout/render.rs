//! Plain-line rendering.
//!
//! Joins the boxes of one line into text using a conservative spacing-unit
//! rule (erring toward inserting spaces rather than fusing words), and
//! unpacks lines that carry several enumerated options ("A. ... B. ...")
//! into one output line per option.

use once_cell::sync::Lazy;
use regex::Regex;

use super::line::{Line, OcrBox};
use crate::utils::PageStats;

/// An enumerated-option marker: a letter A-H or a one/two-digit number
/// immediately followed by a period, at line start or after whitespace.
static OPTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)((?:[A-H]|\d{1,2})\.)").unwrap());

/// Trims and collapses internal whitespace runs to single spaces.
pub(crate) fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

/// Joins left-to-right ordered boxes into one string.
///
/// The local spacing unit is the most conservative width estimate among the
/// page, the line and the two adjacent boxes; pixel gaps are measured
/// against it to decide whether a space separates the boxes.
pub(crate) fn join_boxes(sorted: &[&OcrBox], line_char_width: f64, stats: &PageStats) -> String {
    let mut out = String::new();
    let mut prev: Option<&OcrBox> = None;

    for &b in sorted {
        let text = normalize_text(b.text());
        if text.is_empty() {
            continue;
        }

        if let Some(p) = prev {
            // A one-char box's own estimate equals its width, so narrowness
            // must be judged against the surrounding estimates only.
            let context = line_char_width
                .min(stats.char_width)
                .min(p.char_width())
                .max(1.0);
            let unit = context.min(b.char_width()).max(1.0);
            let gap = b.x0() - p.x1();

            let insert = if out.is_empty() || out.ends_with(char::is_whitespace) {
                false
            } else if text.chars().count() == 1 && b.width() < 0.7 * context {
                // Punctuation-sized glyph: require a clear gap.
                gap > 0.6 * unit
            } else {
                let fused_words = last_char(&out).is_some_and(char::is_alphanumeric)
                    && text.chars().next().is_some_and(char::is_alphanumeric);
                gap >= 0.15 * unit || fused_words
            };
            if insert {
                out.push(' ');
            }
        }

        out.push_str(&text);
        prev = Some(b);
    }

    out.trim_end().to_string()
}

/// Splits a rendered line on enumerated-option markers.
///
/// With fewer than two markers the line is returned intact. Otherwise each
/// marker opens a new output line; non-empty text before the first marker
/// becomes a line of its own.
pub(crate) fn split_options(text: &str) -> Vec<String> {
    let starts: Vec<usize> = OPTION_MARKER
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.start()))
        .collect();
    if starts.len() < 2 {
        return vec![text.to_string()];
    }

    let mut parts = Vec::with_capacity(starts.len() + 1);
    let prefix = text[..starts[0]].trim();
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        parts.push(text[start..end].trim().to_string());
    }
    parts
}

/// Renders one line as plain text: joined, option-split, indent-prefixed.
pub fn render_line(line: &Line, stats: &PageStats, indent: &str) -> Vec<String> {
    let joined = join_boxes(&line.sorted_boxes(), line.char_width(), stats);
    split_options(&joined)
        .into_iter()
        .map(|part| format!("{indent}{part}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes_and_stats(specs: &[(&str, f64, f64)]) -> (Vec<OcrBox>, f64, PageStats) {
        let boxes: Vec<OcrBox> = specs
            .iter()
            .map(|&(text, x0, x1)| OcrBox::new(text, (x0, 0.0, x1, 10.0)).unwrap())
            .collect();
        let total_width: f64 = boxes.iter().map(OcrBox::width).sum();
        let total_chars: usize = boxes.iter().map(OcrBox::char_count).sum();
        let line_cw = total_width / total_chars as f64;
        let stats =
            PageStats::from_boxes(boxes.iter().map(|b| (b.width(), b.height(), b.char_count())));
        (boxes, line_cw, stats)
    }

    #[test]
    fn tight_punctuation_glyph_attaches() {
        // The period box nearly touches "hello"; a word-sized gap rule would
        // still separate them, the narrow-glyph rule must not.
        let (boxes, line_cw, stats) =
            boxes_and_stats(&[("hello", 0.0, 35.0), (".", 35.5, 38.5), ("next", 43.0, 71.0)]);
        let refs: Vec<&OcrBox> = boxes.iter().collect();
        assert_eq!(join_boxes(&refs, line_cw, &stats), "hello. next");
    }

    #[test]
    fn separated_narrow_glyph_gets_space() {
        let (boxes, line_cw, stats) =
            boxes_and_stats(&[("hello", 0.0, 35.0), ("-", 40.0, 43.0), ("next", 48.0, 76.0)]);
        let refs: Vec<&OcrBox> = boxes.iter().collect();
        assert_eq!(join_boxes(&refs, line_cw, &stats), "hello - next");
    }

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(normalize_text("  a \t b\n\nc "), "a b c");
    }

    #[test]
    fn split_keeps_single_marker_intact() {
        assert_eq!(split_options("A. Paris only"), vec!["A. Paris only"]);
    }

    #[test]
    fn split_unpacks_multiple_options() {
        assert_eq!(
            split_options("A. Paris B. London C. Rome"),
            vec!["A. Paris", "B. London", "C. Rome"]
        );
    }

    #[test]
    fn split_emits_prefix_as_own_line() {
        assert_eq!(
            split_options("Pick one: 1. yes 2. no"),
            vec!["Pick one:", "1. yes", "2. no"]
        );
    }

    #[test]
    fn split_ignores_markers_inside_words() {
        // "U.S." style periods are not preceded by start/whitespace.
        assert_eq!(split_options("the U.S. and E.U. markets").len(), 1);
        // Three-digit numbers never match the two-digit marker.
        assert_eq!(split_options("v123. end 456. tail").len(), 1);
    }
}
