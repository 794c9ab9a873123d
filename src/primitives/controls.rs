//! Built-in components.
//!
//! | Type     | Layout     | Flags                 |
//! |----------|------------|-----------------------|
//! | `Box`    | stack      |                       |
//! | `HBox`   | horizontal |                       |
//! | `VBox`   | vertical   |                       |
//! | `Label`  | stack      | `TEXT`                |
//! | `Button` | stack      | `TEXT` + `FOCUSABLE`  |
//!
//! Each type has a `*_factory()` constructor for registries and derivation,
//! and a shorthand function taking the builder directly.
//!
//! # Example
//!
//! ```ignore
//! let tree = Builder::new().build(|b| {
//!     hbox(b, &[gutter(4.0), children(|b| {
//!         label(b, &[text("Name")])?;
//!         button(b, &[text("OK"), focused()])?;
//!         Ok(())
//!     })])
//! })?;
//! ```

use crate::engine::{Builder, Node};
use crate::error::Result;
use crate::types::{LayoutType, NodeFlags, NodeId};

use super::factory::ComponentFactory;
use super::options::{focusable, Opt};

// =============================================================================
// Factories
// =============================================================================

/// Container whose children overlap.
pub fn box_factory() -> ComponentFactory {
    ComponentFactory::new("Box", Node::new)
}

pub fn hbox_factory() -> ComponentFactory {
    ComponentFactory::new("HBox", || Node::new().with_layout(LayoutType::Horizontal))
}

pub fn vbox_factory() -> ComponentFactory {
    ComponentFactory::new("VBox", || Node::new().with_layout(LayoutType::Vertical))
}

/// Text leaf sized by text measurement.
pub fn label_factory() -> ComponentFactory {
    ComponentFactory::new("Label", || Node::new().with_flags(NodeFlags::TEXT))
}

/// Focusable label.
pub fn button_factory() -> ComponentFactory {
    label_factory().derive("Button", [focusable(true)])
}

// =============================================================================
// Shorthands
// =============================================================================

pub fn box_primitive(b: &mut Builder, options: &[Opt]) -> Result<NodeId> {
    box_factory().call(b, options)
}

pub fn hbox(b: &mut Builder, options: &[Opt]) -> Result<NodeId> {
    hbox_factory().call(b, options)
}

pub fn vbox(b: &mut Builder, options: &[Opt]) -> Result<NodeId> {
    vbox_factory().call(b, options)
}

pub fn label(b: &mut Builder, options: &[Opt]) -> Result<NodeId> {
    label_factory().call(b, options)
}

pub fn button(b: &mut Builder, options: &[Opt]) -> Result<NodeId> {
    button_factory().call(b, options)
}
