//! layline - layout reconstruction for OCR bounding boxes.
//!
//! Takes an unordered set of OCR detections (text + axis-aligned bounding
//! box) and rebuilds readable text from geometry alone: reading order, line
//! grouping, indentation and tabular structure. Also reconciles box sets
//! from two independent OCR passes and scores candidate renderings so a
//! caller can pick the better one.
//!
//! The engine is pure and deterministic: identical inputs always produce
//! identical output, regardless of input order.

pub mod config;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod merge;
pub mod score;
pub mod utils;

pub use config::{FormatOptions, TableStyle, YAxis};
pub use error::{LayoutError, Result};
pub use formatter::format;
pub use layout::line::{Line, OcrBox};
pub use merge::merge;
pub use score::{DictionaryValidator, WordValidator, choose_better, score};
pub use utils::Rect;
