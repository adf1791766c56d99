//! Formatting options.
//!
//! Contains the FormatOptions struct controlling table rendering and the
//! vertical ordering convention. One explicit value passed into `format`;
//! there are no ambient lookups.

/// Rendering style for detected tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Markdown-style `| a | b |` rows with column padding.
    Pipes,
    /// Fixed-width columns separated by a two-space gutter, no delimiters.
    Aligned,
}

/// Direction in which the caller's Y coordinates grow.
///
/// The engine only compares relative positions, so this flips nothing but
/// the top-to-bottom ordering key used during line clustering. Fix it once
/// per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// PDF-style: Y grows upward, the top of the image has the largest Y.
    Upward,
    /// Image-style: Y grows downward, the top of the image has the smallest Y.
    Downward,
}

/// Options for layout reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// If table detection and rendering should run. When false everything
    /// renders through the plain-line path.
    pub tables: bool,

    /// If a `| --- |` separator row should follow the first table row.
    /// Only applies to `TableStyle::Pipes`.
    pub header_separator: bool,

    /// How detected tables are rendered.
    pub table_style: TableStyle,

    /// Vertical ordering convention of the input coordinates.
    pub y_axis: YAxis,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tables: true,
            header_separator: true,
            table_style: TableStyle::Pipes,
            y_axis: YAxis::Upward,
        }
    }
}
