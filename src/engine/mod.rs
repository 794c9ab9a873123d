//! Engine - Nodes, the arena tree and the builder that fills it.
//!
//! - [`Node`]: one component with declared constraints and resolved geometry
//! - [`Tree`]: arena of nodes linked by [`NodeId`](crate::types::NodeId)
//! - [`Builder`]: stack machine turning nested factory calls into a tree
//! - [`TypeRegistry`]: explicit type name → factory table
//!
//! # Architecture
//!
//! Nodes are stored in one `Vec` and refer to each other by index:
//!
//! ```text
//! Index 0: VBox   (parent=None, children=[1, 2], padding=10)
//! Index 1: Label  (parent=0,    children=[],     text="Hello")
//! Index 2: Button (parent=0,    children=[],     focusable)
//! ```
//!
//! The builder's stack holds indices, never references, so a composer can
//! push children while its parent is still being composed.

mod builder;
mod node;
mod registry;
mod tree;

pub use builder::{BuildState, Builder};
pub use node::{Composer, Constraints, Node, Paint, TextStyle};
pub use registry::TypeRegistry;
pub use tree::{Ancestors, Tree};
