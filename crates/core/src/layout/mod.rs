//! Layout analysis: line clustering, indentation, rendering and tables.

pub mod indent;
pub mod line;
pub mod render;
pub mod table;

pub use indent::IndentMap;
pub use line::{Line, OcrBox, cluster_lines};
