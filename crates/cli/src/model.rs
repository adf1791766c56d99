//! JSON wire format shared by the CLI tools.
//!
//! The core stays serde-free; these mirror structs own (de)serialization at
//! the tool boundary.

// Compiled into each bin separately; not every bin uses every helper.
#![allow(dead_code)]

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use layline_core::OcrBox;
use serde::{Deserialize, Serialize};

/// One detection on the wire: `{ "text": ..., "bbox": [x0, y0, x1, y1] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxRecord {
    pub text: String,
    pub bbox: [f64; 4],
}

impl BoxRecord {
    pub fn from_box(b: &OcrBox) -> Self {
        let (x0, y0, x1, y1) = b.rect();
        Self {
            text: b.text().to_string(),
            bbox: [x0, y0, x1, y1],
        }
    }

    pub fn into_box(self) -> Result<OcrBox> {
        let [x0, y0, x1, y1] = self.bbox;
        OcrBox::new(self.text.as_str(), (x0, y0, x1, y1))
            .with_context(|| format!("invalid box {:?}", self.text))
    }
}

/// Reads a JSON array of box records from a file, or from stdin for `-`.
pub fn read_boxes(path: &Path) -> Result<Vec<OcrBox>> {
    let data = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    let records: Vec<BoxRecord> =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    records.into_iter().map(BoxRecord::into_box).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_json() {
        let b = OcrBox::new("hello", (1.0, 2.0, 3.5, 4.0)).unwrap();
        let json = serde_json::to_string(&BoxRecord::from_box(&b)).unwrap();
        assert_eq!(json, r#"{"text":"hello","bbox":[1.0,2.0,3.5,4.0]}"#);

        let back: BoxRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_box().unwrap(), b);
    }

    #[test]
    fn degenerate_record_is_rejected() {
        let record = BoxRecord {
            text: "x".to_string(),
            bbox: [0.0, 0.0, 0.0, 1.0],
        };
        assert!(record.into_box().is_err());
    }
}
