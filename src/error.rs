//! Error types for building and laying out component trees.

use thiserror::Error;

use crate::types::{Axis, NodeId};

/// Everything that can go wrong while composing a tree.
///
/// Build errors are fatal to the pass that produced them: the [`Builder`](crate::Builder)
/// keeps the first one and the caller must discard the tree. Layout reports
/// ([`ComposeError::is_warning`]) are never fatal; the offending size is clamped and
/// the report is stored on the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("second root `{type_name}` declared; a builder holds exactly one root")]
    MultipleRoots { type_name: String },

    #[error("`{type_name}` factory called without a builder")]
    MissingBuilder { type_name: String },

    #[error("`{type_name}` {node} requires children but declares no composer")]
    MissingComposer { type_name: String, node: NodeId },

    #[error("`{type_name}` declares both a builder composer and a simple composer")]
    ConflictingComposer { type_name: String },

    #[error("{node} explicit {axis} {value} is outside [{min:?}, {max:?}], clamped to {resolved}")]
    ConfigurationConflict {
        node: NodeId,
        axis: Axis,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        resolved: f64,
    },

    #[error("{node} content {axis} resolved to {value}, clamped to 0")]
    NegativeSize { node: NodeId, axis: Axis, value: f64 },

    #[error("invalid value {value} for option `{option}`")]
    InvalidOption { option: &'static str, value: f64 },

    #[error("no factory registered for type `{0}`")]
    UnknownType(String),

    #[error("build finished without a root node")]
    MissingRoot,
}

impl ComposeError {
    /// True for non-fatal layout reports.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ComposeError::ConfigurationConflict { .. } | ComposeError::NegativeSize { .. }
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ComposeError>;
