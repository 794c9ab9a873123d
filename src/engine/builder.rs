//! Builder - Stack machine that turns nested factory calls into a tree.
//!
//! The stack holds the current insertion context. Each push links the new
//! node under the stack top (or makes it the root), applies its options,
//! runs its composer with the same builder, then pops:
//!
//! ```text
//! vbox(b, [children(|b| { label(b, ..)?; button(b, ..)?; Ok(()) })])
//!
//! push VBox     stack [0]        root = 0
//!   push Label  stack [0, 1]     0.children = [1]
//!   pop         stack [0]
//!   push Button stack [0, 2]     0.children = [1, 2]
//!   pop         stack [0]
//! pop           stack []         root complete → layout
//! ```
//!
//! The first error of a pass is kept; later ones are dropped. A pass with an
//! error yields a partial tree the caller must discard.

use std::rc::Rc;

use crate::error::{ComposeError, Result};
use crate::layout::{CellMeasure, LayoutConfig, TextMeasure};
use crate::primitives::{apply_all, Opt};
use crate::state;
use crate::types::{NodeFlags, NodeId};

use super::node::{Composer, Node};
use super::tree::Tree;

// =============================================================================
// Build State
// =============================================================================

/// Where a builder is in its single construction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing pushed yet.
    Empty,
    /// Inside at least one push.
    Building,
    /// The root has been pushed, composed and laid out.
    RootComplete,
}

// =============================================================================
// Builder
// =============================================================================

/// Stack-based tree builder. One builder serves one construction pass.
pub struct Builder {
    tree: Tree,
    stack: Vec<NodeId>,
    error: Option<ComposeError>,
    measurer: Rc<dyn TextMeasure>,
    config: LayoutConfig,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("state", &self.state())
            .field("stack", &self.stack)
            .field("error", &self.error)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Builder {
    /// Builder measuring text in terminal cells with the default config.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            stack: Vec::new(),
            error: None,
            measurer: Rc::new(CellMeasure),
            config: LayoutConfig::default(),
        }
    }

    /// Use `measurer` for text leaves during layout.
    pub fn with_measurer(mut self, measurer: Rc<dyn TextMeasure>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn state(&self) -> BuildState {
        if !self.stack.is_empty() {
            BuildState::Building
        } else if self.tree.root().is_some() {
            BuildState::RootComplete
        } else {
            BuildState::Empty
        }
    }

    /// Current insertion context (the node whose children are being declared).
    pub fn peek(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The tree so far. Unsafe to use when [`Builder::error`] is set.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// First error recorded in this pass.
    pub fn error(&self) -> Option<&ComposeError> {
        self.error.as_ref()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Keep `err` unless an earlier error is already recorded.
    pub fn record(&mut self, err: ComposeError) {
        if self.error.is_none() {
            tracing::warn!(error = %err, "build error recorded");
            self.error = Some(err);
        }
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Push `node` with `options`, see [`Builder::push_with_defaults`].
    pub fn push(&mut self, node: Node, options: &[Opt]) -> Result<NodeId> {
        self.push_with_defaults(node, &[], options)
    }

    /// Link `node` into the tree and compose it.
    ///
    /// 1. An empty stack makes the node the root; otherwise the stack top
    ///    becomes its parent. A second root fails with `MultipleRoots` and the
    ///    node is dropped.
    /// 2. `defaults` then `options` are applied, after the parent link exists.
    /// 3. The composer runs with this builder.
    /// 4. The node is popped on every exit path. Popping the root lays the
    ///    tree out, unless the pass already recorded an error.
    pub fn push_with_defaults(
        &mut self,
        node: Node,
        defaults: &[Opt],
        options: &[Opt],
    ) -> Result<NodeId> {
        let parent = self.peek();
        if parent.is_none() && self.tree.root().is_some() {
            let err = ComposeError::MultipleRoots {
                type_name: node.type_name().to_string(),
            };
            self.record(err.clone());
            return Err(err);
        }

        let id = self.tree.insert(node, parent);
        tracing::trace!(
            node = %id,
            type_name = self.tree[id].type_name(),
            depth = self.stack.len(),
            "push"
        );

        self.stack.push(id);
        let result = self.compose(id, defaults, options);
        self.stack.pop();
        tracing::trace!(node = %id, "pop");

        if let Err(err) = &result {
            self.record(err.clone());
        }

        if parent.is_none() && self.error.is_none() {
            let warnings = self.tree.relayout(self.measurer.as_ref(), &self.config).len();
            tracing::debug!(nodes = self.tree.len(), warnings, "root laid out");
        }

        result.map(|()| id)
    }

    fn compose(&mut self, id: NodeId, defaults: &[Opt], options: &[Opt]) -> Result<()> {
        let applied = apply_all(&mut self.tree[id], defaults, options);

        // Focus requested by an option goes through the navigator so any
        // other focused node in the tree is blurred first. The request is
        // taken off the node even when a later option failed.
        let wants_focus = self.tree[id].is_focused();
        self.tree[id].set_flag(NodeFlags::FOCUSED, false);
        applied?;

        if wants_focus && !state::focus(&mut self.tree, id) {
            tracing::debug!(node = %id, "focus requested on non-focusable node");
        }

        match self.tree[id].composer().cloned() {
            Some(Composer::WithBuilder(compose)) => compose(self),
            Some(Composer::Simple(compose)) => {
                compose();
                Ok(())
            }
            None if self.tree[id].flags().contains(NodeFlags::REQUIRES_COMPOSER) => {
                Err(ComposeError::MissingComposer {
                    type_name: self.tree[id].type_name().to_string(),
                    node: id,
                })
            }
            None => Ok(()),
        }
    }

    // =========================================================================
    // Finish
    // =========================================================================

    /// The finished tree, or the first error of the pass.
    pub fn finish(self) -> Result<Tree> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.tree.root().is_none() {
            return Err(ComposeError::MissingRoot);
        }
        Ok(self.tree)
    }

    /// The tree, possibly partial, and the first error of the pass.
    pub fn into_parts(self) -> (Tree, Option<ComposeError>) {
        (self.tree, self.error)
    }

    /// Run `declare` against this builder and finish.
    ///
    /// ```ignore
    /// let tree = Builder::new().build(|b| {
    ///     vbox(b, &[padding(10.0), children(|b| {
    ///         label(b, &[text("Hello")])?;
    ///         Ok(())
    ///     })])
    /// })?;
    /// ```
    pub fn build<F>(mut self, declare: F) -> Result<Tree>
    where
        F: FnOnce(&mut Builder) -> Result<NodeId>,
    {
        if let Err(err) = declare(&mut self) {
            self.record(err);
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{children, focusable, focused, key, on_compose, width};
    use std::cell::Cell;

    fn setup() -> Builder {
        Builder::new()
    }

    #[test]
    fn test_push_root_and_children() {
        let mut b = setup();
        assert_eq!(b.state(), BuildState::Empty);

        let root = b
            .push(
                Node::new(),
                &[children(|b| {
                    assert_eq!(b.state(), BuildState::Building);
                    assert_eq!(b.depth(), 1);
                    b.push(Node::new(), &[key("one")])?;
                    b.push(Node::new(), &[key("two")])?;
                    Ok(())
                })],
            )
            .unwrap();

        assert_eq!(b.state(), BuildState::RootComplete);
        let tree = b.finish().unwrap();
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.child_count(root), 2);
        assert_eq!(tree[tree.child_at(root, 0).unwrap()].key(), Some("one"));
        assert_eq!(tree[tree.child_at(root, 1).unwrap()].key(), Some("two"));
    }

    #[test]
    fn test_options_see_parent_link() {
        let mut b = setup();
        let seen_parent = Rc::new(Cell::new(None));
        let seen = seen_parent.clone();

        b.push(
            Node::new(),
            &[children(move |b| {
                let seen = seen.clone();
                b.push(
                    Node::new(),
                    &[Opt::new(move |node: &mut Node| {
                        seen.set(node.parent());
                        Ok(())
                    })],
                )?;
                Ok(())
            })],
        )
        .unwrap();

        assert_eq!(seen_parent.get(), Some(NodeId(0)));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut b = setup();
        b.push(Node::new(), &[]).unwrap();
        let err = b.push(Node::new(), &[]).unwrap_err();

        assert!(matches!(err, ComposeError::MultipleRoots { .. }));
        assert_eq!(b.tree().len(), 1);
        assert!(matches!(b.error(), Some(ComposeError::MultipleRoots { .. })));
        assert!(b.finish().is_err());
    }

    #[test]
    fn test_first_error_wins() {
        let mut b = setup();
        let _ = b.push(
            Node::new(),
            &[children(|b| {
                let _ = b.push(Node::new(), &[width(-1.0)]);
                let _ = b.push(Node::new().with_flags(NodeFlags::REQUIRES_COMPOSER), &[]);
                Ok(())
            })],
        );

        assert!(matches!(
            b.error(),
            Some(ComposeError::InvalidOption { option: "width", .. })
        ));
        // Option failure still pops, so the sibling landed under the root.
        assert_eq!(b.tree().child_count(NodeId(0)), 2);
        assert_eq!(b.depth(), 0);
    }

    #[test]
    fn test_layout_runs_when_root_pops() {
        let mut b = setup();
        b.push(
            Node::new(),
            &[children(|b| {
                b.push(Node::new(), &[width(30.0)])?;
                // Not laid out yet: the root is still on the stack.
                assert_eq!(b.tree()[NodeId(1)].actual_width(), None);
                Ok(())
            })],
        )
        .unwrap();

        assert_eq!(b.tree()[NodeId(0)].actual_width(), Some(30.0));
        assert_eq!(b.tree()[NodeId(1)].actual_width(), Some(30.0));
    }

    #[test]
    fn test_missing_composer_policy() {
        // A plain container without children is an empty leaf.
        let tree = Builder::new().build(|b| b.push(Node::new(), &[])).unwrap();
        assert_eq!(tree.len(), 1);

        // A node whose factory requires children must declare a composer.
        let err = Builder::new()
            .build(|b| b.push(Node::new().with_flags(NodeFlags::REQUIRES_COMPOSER), &[]))
            .unwrap_err();
        assert!(matches!(err, ComposeError::MissingComposer { .. }));

        // A simple composer satisfies the requirement.
        let ran = Rc::new(Cell::new(false));
        let ran_inner = ran.clone();
        let tree = Builder::new()
            .build(|b| {
                b.push(
                    Node::new().with_flags(NodeFlags::REQUIRES_COMPOSER),
                    &[on_compose(move || ran_inner.set(true))],
                )
            })
            .unwrap();
        assert!(ran.get());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_focus_option_is_exclusive() {
        let tree = Builder::new()
            .build(|b| {
                b.push(
                    Node::new(),
                    &[children(|b| {
                        b.push(Node::new(), &[key("a"), focusable(true), focused()])?;
                        b.push(Node::new(), &[key("b"), focusable(true), focused()])?;
                        Ok(())
                    })],
                )
            })
            .unwrap();

        let a = tree.find_by_key("a").unwrap();
        let b = tree.find_by_key("b").unwrap();
        assert!(!tree[a].is_focused());
        assert!(tree[b].is_focused());
        assert_eq!(crate::state::focused(&tree), Some(b));
    }

    #[test]
    fn test_failed_options_drop_focus_request() {
        let mut b = setup();
        let _ = b.push(
            Node::new(),
            &[children(|b| {
                let failed = b.push(
                    Node::new(),
                    &[key("a"), focusable(true), focused(), width(-1.0)],
                );
                assert!(failed.is_err());
                b.push(Node::new(), &[key("b"), focusable(true), focused()])?;
                Ok(())
            })],
        );
        let (tree, err) = b.into_parts();

        assert!(matches!(err, Some(ComposeError::InvalidOption { option: "width", .. })));
        let a = tree.find_by_key("a").unwrap();
        let b = tree.find_by_key("b").unwrap();
        assert_eq!(tree.iter().filter(|n| n.is_focused()).count(), 1);
        assert!(!tree[a].is_focused());
        assert!(tree[b].is_focused());
        assert_eq!(crate::state::focused(&tree), Some(b));
    }

    #[test]
    fn test_build_without_root() {
        let err = Builder::new().finish().unwrap_err();
        assert_eq!(err, ComposeError::MissingRoot);
    }
}
