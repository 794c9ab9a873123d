//! Node - One element of the component tree.
//!
//! A node carries three groups of state:
//!
//! - **Declared**: constraints and style written by options ([`Constraints`],
//!   [`TextStyle`], [`Paint`]). Every value is optional so "unset" and
//!   "explicitly zero" stay distinct.
//! - **Structure**: parent and ordered child links (arena indices), owned by the
//!   [`Tree`](super::Tree) and never re-parented.
//! - **Resolved**: [`Geometry`] written by the layout pass, `None` until then.
//!
//! Capabilities (focusable, text leaf, ...) are flat [`NodeFlags`] bits rather
//! than separate node types.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::types::{Align, Axis, Geometry, LayoutType, NodeFlags, NodeId};

use super::builder::Builder;

// =============================================================================
// Composer
// =============================================================================

/// Callback a node supplies to declare its children.
///
/// The builder is always passed in explicitly; a composer never captures one.
#[derive(Clone)]
pub enum Composer {
    /// Receives the builder and pushes child nodes onto it.
    WithBuilder(Rc<dyn Fn(&mut Builder) -> Result<()>>),
    /// Runs during composition without a builder; cannot declare children.
    Simple(Rc<dyn Fn()>),
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composer::WithBuilder(_) => f.write_str("Composer::WithBuilder(..)"),
            Composer::Simple(_) => f.write_str("Composer::Simple(..)"),
        }
    }
}

// =============================================================================
// Declared state
// =============================================================================

/// Layout constraints declared on a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraints {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    /// Share of the parent's remaining width; zero or unset means no growth.
    pub flex_width: Option<f64>,
    /// Share of the parent's remaining height; zero or unset means no growth.
    pub flex_height: Option<f64>,

    /// Aggregate padding, used for every edge without its own value.
    pub padding: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,

    /// Space between consecutive children along the main axis.
    pub gutter: Option<f64>,

    pub h_align: Align,
    pub v_align: Align,
    pub layout: LayoutType,
}

impl Constraints {
    /// Explicit size along `axis`.
    pub fn size(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// `(min, max)` bounds along `axis`.
    pub fn bounds(&self, axis: Axis) -> (Option<f64>, Option<f64>) {
        match axis {
            Axis::Horizontal => (self.min_width, self.max_width),
            Axis::Vertical => (self.min_height, self.max_height),
        }
    }

    /// Flex weight along `axis`, `None` when it would not grow.
    pub fn flex(&self, axis: Axis) -> Option<f64> {
        let weight = match axis {
            Axis::Horizontal => self.flex_width,
            Axis::Vertical => self.flex_height,
        };
        weight.filter(|w| *w > 0.0)
    }

    /// Alignment used along `axis`.
    pub fn align(&self, axis: Axis) -> Align {
        match axis {
            Axis::Horizontal => self.h_align,
            Axis::Vertical => self.v_align,
        }
    }
}

/// Text content and font attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub content: Option<String>,
    pub font_face: Option<String>,
    pub font_size: Option<f64>,
    /// RGBA hex, e.g. `0x111111ff`.
    pub font_color: Option<u32>,
}

/// Fill and stroke used when the node is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub bg_color: Option<u32>,
    pub stroke_color: Option<u32>,
    pub stroke_width: Option<f64>,
}

// =============================================================================
// Node
// =============================================================================

/// A component in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) type_name: Rc<str>,
    pub(crate) key: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) composer: Option<Composer>,
    pub(crate) constraints: Constraints,
    pub(crate) text: TextStyle,
    pub(crate) paint: Paint,
    pub(crate) geometry: Option<Geometry>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Zero-state node: stack layout, no flags, nothing declared.
    pub fn new() -> Self {
        Self {
            id: NodeId(0),
            type_name: Rc::from("Node"),
            key: None,
            parent: None,
            children: Vec::new(),
            flags: NodeFlags::empty(),
            composer: None,
            constraints: Constraints::default(),
            text: TextStyle::default(),
            paint: Paint::default(),
            geometry: None,
        }
    }

    /// Set the layout strategy (constructor helper).
    pub fn with_layout(mut self, layout: LayoutType) -> Self {
        self.constraints.layout = layout;
        self
    }

    /// Add capability flags (constructor helper).
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    // =========================================================================
    // Identity and structure
    // =========================================================================

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = Some(key.into());
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    // =========================================================================
    // Flags
    // =========================================================================

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: NodeFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn is_focusable(&self) -> bool {
        self.flags.contains(NodeFlags::FOCUSABLE)
    }

    pub fn is_focused(&self) -> bool {
        self.flags.contains(NodeFlags::FOCUSED)
    }

    /// Text leaf: flagged as text and has no children.
    pub fn is_text(&self) -> bool {
        self.flags.contains(NodeFlags::TEXT) && self.children.is_empty()
    }

    // =========================================================================
    // Composer
    // =========================================================================

    pub fn composer(&self) -> Option<&Composer> {
        self.composer.as_ref()
    }

    pub fn set_composer(&mut self, composer: Composer) {
        self.composer = Some(composer);
    }

    // =========================================================================
    // Declared state
    // =========================================================================

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut Constraints {
        &mut self.constraints
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text
    }

    pub fn text_style_mut(&mut self) -> &mut TextStyle {
        &mut self.text
    }

    pub fn text(&self) -> Option<&str> {
        self.text.content.as_deref()
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut Paint {
        &mut self.paint
    }

    pub fn layout_type(&self) -> LayoutType {
        self.constraints.layout
    }

    pub fn h_align(&self) -> Align {
        self.constraints.h_align
    }

    pub fn v_align(&self) -> Align {
        self.constraints.v_align
    }

    // Effective padding: an edge value always wins over the aggregate.

    pub fn padding_left(&self) -> f64 {
        self.constraints.padding_left.or(self.constraints.padding).unwrap_or(0.0)
    }

    pub fn padding_right(&self) -> f64 {
        self.constraints.padding_right.or(self.constraints.padding).unwrap_or(0.0)
    }

    pub fn padding_top(&self) -> f64 {
        self.constraints.padding_top.or(self.constraints.padding).unwrap_or(0.0)
    }

    pub fn padding_bottom(&self) -> f64 {
        self.constraints.padding_bottom.or(self.constraints.padding).unwrap_or(0.0)
    }

    pub fn horizontal_padding(&self) -> f64 {
        self.padding_left() + self.padding_right()
    }

    pub fn vertical_padding(&self) -> f64 {
        self.padding_top() + self.padding_bottom()
    }

    /// Padding before the content along `axis` (left or top).
    pub fn padding_start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.padding_left(),
            Axis::Vertical => self.padding_top(),
        }
    }

    /// Total padding along `axis`.
    pub fn padding_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_padding(),
            Axis::Vertical => self.vertical_padding(),
        }
    }

    pub fn gutter(&self) -> f64 {
        self.constraints.gutter.unwrap_or(0.0)
    }

    // =========================================================================
    // Resolved geometry
    // =========================================================================

    /// Resolved geometry, `None` until the node has been laid out.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    pub fn actual_width(&self) -> Option<f64> {
        self.geometry.map(|g| g.width)
    }

    pub fn actual_height(&self) -> Option<f64> {
        self.geometry.map(|g| g.height)
    }

    /// Resolved width, 0 while unresolved.
    pub fn width(&self) -> f64 {
        self.actual_width().unwrap_or(0.0)
    }

    /// Resolved height, 0 while unresolved.
    pub fn height(&self) -> f64 {
        self.actual_height().unwrap_or(0.0)
    }

    /// X relative to the parent, 0 while unresolved.
    pub fn x(&self) -> f64 {
        self.geometry.map(|g| g.x).unwrap_or(0.0)
    }

    /// Y relative to the parent, 0 while unresolved.
    pub fn y(&self) -> f64 {
        self.geometry.map(|g| g.y).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node = Node::new();
        assert_eq!(node.layout_type(), LayoutType::Stack);
        assert_eq!(node.h_align(), Align::Start);
        assert_eq!(node.constraints().width, None);
        assert_eq!(node.constraints().padding, None);
        assert_eq!(node.actual_width(), None);
        assert_eq!(node.width(), 0.0);
        assert_eq!(node.height(), 0.0);
        assert!(node.flags().is_empty());
    }

    #[test]
    fn test_edge_padding_wins_over_aggregate() {
        let mut node = Node::new();
        node.constraints_mut().padding = Some(10.0);
        node.constraints_mut().padding_left = Some(0.0);

        assert_eq!(node.padding_left(), 0.0);
        assert_eq!(node.padding_right(), 10.0);
        assert_eq!(node.horizontal_padding(), 10.0);
        assert_eq!(node.vertical_padding(), 20.0);
    }

    #[test]
    fn test_flex_zero_does_not_grow() {
        let mut node = Node::new();
        node.constraints_mut().flex_width = Some(0.0);
        node.constraints_mut().flex_height = Some(2.0);

        assert_eq!(node.constraints().flex(Axis::Horizontal), None);
        assert_eq!(node.constraints().flex(Axis::Vertical), Some(2.0));
    }

    #[test]
    fn test_text_leaf_requires_no_children() {
        let mut node = Node::new().with_flags(NodeFlags::TEXT);
        assert!(node.is_text());
        node.children.push(NodeId(4));
        assert!(!node.is_text());
    }
}
