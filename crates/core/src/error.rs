//! Error types for the layline layout engine.

use thiserror::Error;

use crate::utils::Rect;

/// Primary error type for layout operations.
///
/// The engine itself is total for validated input; only box construction
/// (and I/O performed by callers) can fail.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("box text is empty after trimming")]
    EmptyText,

    #[error("degenerate rect {rect:?}: expected finite coordinates and positive area")]
    DegenerateRect { rect: Rect },
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
