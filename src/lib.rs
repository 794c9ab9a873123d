//! # spark-compose
//!
//! Declarative UI composition for Rust: describe a component tree with nested
//! factory calls and ordered options, get back a tree with resolved geometry
//! and exclusive focus.
//!
//! Focus state is published through [spark-signals](https://github.com/RLabs-Inc/spark-signals)
//! so renderers can react to focus changes.
//!
//! ## Architecture
//!
//! ```text
//! factory calls → Builder stack → Tree → box layout (on root pop) → Surface (external)
//!                                   └──→ focus navigator
//! ```
//!
//! Every composer receives the builder as a parameter, so a child can only
//! ever be pushed onto the builder that is composing its parent.
//!
//! ```ignore
//! use spark_compose::*;
//!
//! let tree = Builder::new().build(|b| {
//!     hbox(b, &[padding(10.0), gutter(4.0), children(|b| {
//!         label(b, &[text("Name"), flex_width(1.0)])?;
//!         button(b, &[text("OK"), key("ok"), focused()])?;
//!         Ok(())
//!     })])
//! })?;
//!
//! let ok = tree.find_by_key("ok").unwrap();
//! assert!(tree[ok].is_focused());
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ids, axes, alignment, geometry, node flags
//! - [`engine`] - Node, arena tree, builder, type registry
//! - [`primitives`] - Options, component factories, built-in components
//! - [`layout`] - Box layout engine and text measurement
//! - [`state`] - Focus navigation
//! - [`surface`] - Drawing backend interface and tree painter

pub mod engine;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod state;
pub mod surface;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{ComposeError, Result};

pub use engine::{
    Ancestors, BuildState, Builder, Composer, Constraints, Node, Paint, TextStyle, Tree,
    TypeRegistry,
};

pub use layout::{
    compute_layout, string_width, CellMeasure, LayoutConfig, TextBounds, TextMeasure,
};

pub use primitives::{
    apply, apply_all, bag, bg_color, blurred, box_primitive, button, children, flex_height,
    flex_width, focusable, focused, font_color, font_face, font_size, gutter, h_align, hbox,
    height, key, label, layout, max_height, max_width, min_height, min_width, on_compose,
    padding, padding_bottom, padding_left, padding_right, padding_top, stroke_color,
    stroke_width, text, v_align, vbox, width, ComponentFactory, Opt,
};

pub use state::{
    blur, clear_focus, focus, focus_first, focus_last, focus_next, focus_previous,
    focusable_nodes, focused_child, has_focus, is_focused, nearest_focusable,
};

pub use surface::{draw, Command, FakeSurface, Surface};
