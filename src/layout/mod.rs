//! Layout - Box layout over the component tree.
//!
//! Layout runs automatically when a builder pops its root, and again on
//! every [`Tree::relayout`](crate::Tree::relayout) call. It is a pure
//! function of the declared constraints and the text metrics, so repeating
//! it on an unchanged tree yields identical geometry.
//!
//! # Example
//!
//! ```ignore
//! use spark_compose::layout::{CellMeasure, LayoutConfig};
//!
//! tree[label].constraints_mut().width = Some(40.0);
//! let warnings = tree.relayout(&CellMeasure, &LayoutConfig::default());
//! ```

mod box_layout;
mod text_measure;
mod types;

pub use box_layout::compute_layout;
pub use text_measure::*;
pub use types::*;
