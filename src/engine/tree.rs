//! Tree - Arena of nodes linked by index.
//!
//! Nodes live in a flat `Vec`; parent and child relations are [`NodeId`]
//! links into it. There are no reference cycles and no removal, so an id
//! handed out by a tree stays valid for that tree's lifetime.
//!
//! ```text
//! Index 0: VBox   (parent=None, children=[1, 2])
//! Index 1: Label  (parent=0,    children=[])
//! Index 2: Button (parent=0,    children=[])
//! ```
//!
//! The focused node is tracked in a reactive signal so a renderer can
//! subscribe to focus changes without polling the flags.

use std::fmt;
use std::ops::{Index, IndexMut};

use spark_signals::{signal, Signal};

use crate::error::ComposeError;
use crate::layout::{compute_layout, LayoutConfig, TextMeasure};
use crate::types::{Geometry, NodeId};

use super::node::Node;

/// Component tree produced by a [`Builder`](super::Builder).
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    focused: Signal<Option<NodeId>>,
    warnings: Vec<ComposeError>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("focused", &self.focused.get())
            .field("warnings", &self.warnings)
            .finish()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            focused: signal(None),
            warnings: Vec::new(),
        }
    }

    // =========================================================================
    // Insertion (builder only)
    // =========================================================================

    /// Add `node` under `parent`, or as the root when `parent` is `None`.
    ///
    /// The parent link is written once here and never reassigned.
    pub(crate) fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.id = id;
        node.parent = parent;
        node.children.clear();
        node.geometry = None;
        self.nodes.push(node);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.root = Some(id),
        }
        id
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// All nodes in id (push) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Children of `id` in declaration order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// `id` and everything below it, parents before children, siblings in order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if self.get(id).is_none() {
            return order;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    /// True iff `descendant` is reachable from `ancestor` through one or more
    /// child links. False for the node itself.
    pub fn contains(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.ancestors(descendant).any(|a| a == ancestor)
    }

    /// First node keyed `key` in `from`'s subtree, `from` included.
    pub fn first_by_key(&self, from: NodeId, key: &str) -> Option<NodeId> {
        self.descendants(from)
            .into_iter()
            .find(|&id| self.nodes[id.0].key() == Some(key))
    }

    /// First node keyed `key` anywhere in the tree.
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        self.root.and_then(|root| self.first_by_key(root, key))
    }

    /// Slash-separated path from the root, one segment per node: its key, or
    /// its type name followed by its id.
    pub fn path(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        let mut segments = vec![segment(node)];
        segments.extend(self.ancestors(id).map(|a| segment(&self.nodes[a.0])));

        let mut path = String::new();
        for seg in segments.iter().rev() {
            path.push('/');
            path.push_str(seg);
        }
        path
    }

    /// Position of `id` in root coordinates.
    pub fn absolute_position(&self, id: NodeId) -> (f64, f64) {
        let Some(node) = self.get(id) else {
            return (0.0, 0.0);
        };
        self.ancestors(id)
            .map(|a| &self.nodes[a.0])
            .fold((node.x(), node.y()), |(x, y), n| (x + n.x(), y + n.y()))
    }

    /// Font face declared on `id` or its nearest ancestor that sets one.
    pub fn effective_font_face(&self, id: NodeId) -> Option<&str> {
        self.get(id)
            .into_iter()
            .chain(self.ancestors(id).map(|a| &self.nodes[a.0]))
            .find_map(|n| n.text_style().font_face.as_deref())
    }

    /// Font size declared on `id` or its nearest ancestor that sets one.
    pub fn effective_font_size(&self, id: NodeId) -> Option<f64> {
        self.get(id)
            .into_iter()
            .chain(self.ancestors(id).map(|a| &self.nodes[a.0]))
            .find_map(|n| n.text_style().font_size)
    }

    // =========================================================================
    // Focus signal
    // =========================================================================

    /// Reactive handle on the focused node id.
    pub fn focus_signal(&self) -> Signal<Option<NodeId>> {
        self.focused.clone()
    }

    pub(crate) fn focused_id(&self) -> Option<NodeId> {
        self.focused.get()
    }

    pub(crate) fn set_focused_id(&self, id: Option<NodeId>) {
        self.focused.set(id);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Reports from the most recent layout pass.
    pub fn warnings(&self) -> &[ComposeError] {
        &self.warnings
    }

    /// Recompute geometry for the whole tree.
    ///
    /// Layout is not incremental: call this after changing any constraint.
    /// Running it twice on an unchanged tree yields identical geometry.
    pub fn relayout(&mut self, measurer: &dyn TextMeasure, config: &LayoutConfig) -> &[ComposeError] {
        self.warnings = compute_layout(self, measurer, config);
        &self.warnings
    }

    pub(crate) fn set_geometry(&mut self, id: NodeId, geometry: Geometry) {
        self.nodes[id.0].geometry = Some(geometry);
    }
}

fn segment(node: &Node) -> String {
    match node.key() {
        Some(key) => key.to_string(),
        None => format!("{}{}", node.type_name(), node.id().index()),
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Iterator over strict ancestors, see [`Tree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
