//! Focus System - Exclusive focus and keyboard-style navigation.
//!
//! At most one node per tree is focused. The tree keeps the focused id in a
//! signal and mirrors it in the node's `FOCUSED` flag; every change goes
//! through [`focus`] or [`blur`] so the two never disagree.
//!
//! Focusing a node that is not focusable is a no-op returning `false`. Use
//! [`nearest_focusable`] first to redirect to a focusable ancestor.
//!
//! # Example
//!
//! ```ignore
//! use spark_compose::state::focus;
//!
//! let target = focus::nearest_focusable(&tree, clicked).unwrap();
//! focus::focus(&mut tree, target);
//!
//! // Tab / Shift+Tab
//! focus::focus_next(&mut tree);
//! focus::focus_previous(&mut tree);
//! ```

use crate::engine::Tree;
use crate::types::{NodeFlags, NodeId};

// =============================================================================
// FOCUSED NODE
// =============================================================================

/// Currently focused node.
pub fn focused(tree: &Tree) -> Option<NodeId> {
    tree.focused_id()
}

pub fn has_focus(tree: &Tree) -> bool {
    focused(tree).is_some()
}

pub fn is_focused(tree: &Tree, id: NodeId) -> bool {
    focused(tree) == Some(id)
}

/// Focused node inside `id`'s subtree, `id` included.
pub fn focused_child(tree: &Tree, id: NodeId) -> Option<NodeId> {
    focused(tree).filter(|&f| f == id || tree.contains(id, f))
}

fn set_focused(tree: &mut Tree, next: Option<NodeId>) {
    let current = focused(tree);
    if current == next {
        return;
    }
    if let Some(node) = current.and_then(|id| tree.get_mut(id)) {
        node.set_flag(NodeFlags::FOCUSED, false);
    }
    if let Some(node) = next.and_then(|id| tree.get_mut(id)) {
        node.set_flag(NodeFlags::FOCUSED, true);
    }
    tree.set_focused_id(next);
    tracing::debug!(from = ?current, to = ?next, "focus changed");
}

// =============================================================================
// FOCUS / BLUR
// =============================================================================

/// Focus `id`, blurring whatever held focus before.
///
/// Returns `false` and changes nothing when `id` is not focusable.
pub fn focus(tree: &mut Tree, id: NodeId) -> bool {
    match tree.get(id) {
        Some(node) if node.is_focusable() => {
            set_focused(tree, Some(id));
            true
        }
        _ => false,
    }
}

/// Blur `id` if it holds focus. Returns whether it did.
pub fn blur(tree: &mut Tree, id: NodeId) -> bool {
    if !is_focused(tree, id) {
        return false;
    }
    set_focused(tree, None);
    true
}

/// Leave no node focused.
pub fn clear_focus(tree: &mut Tree) {
    set_focused(tree, None);
}

// =============================================================================
// FOCUSABLE QUERIES
// =============================================================================

/// `id` if focusable, else its nearest focusable ancestor, else the root.
///
/// `None` only for an id the tree does not hold.
pub fn nearest_focusable(tree: &Tree, id: NodeId) -> Option<NodeId> {
    tree.get(id)?;
    std::iter::once(id)
        .chain(tree.ancestors(id))
        .find(|&a| tree[a].is_focusable())
        .or(tree.root())
}

/// Focusable nodes in tree order (parents before children).
pub fn focusable_nodes(tree: &Tree) -> Vec<NodeId> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };
    tree.descendants(root)
        .into_iter()
        .filter(|&id| tree[id].is_focusable())
        .collect()
}

// =============================================================================
// FOCUS NAVIGATION
// =============================================================================

/// Next focusable node after `from` in tree order, wrapping around.
fn find_next_focusable(tree: &Tree, from: Option<NodeId>, forward: bool) -> Option<NodeId> {
    let focusables = focusable_nodes(tree);
    if focusables.is_empty() {
        return None;
    }

    let position = from.and_then(|f| focusables.iter().position(|&id| id == f));
    let len = focusables.len();
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(pos), true) => (pos + 1) % len,
        (Some(pos), false) => (pos + len - 1) % len,
    };
    Some(focusables[next])
}

/// Move focus to the next focusable node. Returns whether focus moved.
pub fn focus_next(tree: &mut Tree) -> bool {
    let current = focused(tree);
    match find_next_focusable(tree, current, true) {
        Some(next) if Some(next) != current => focus(tree, next),
        _ => false,
    }
}

/// Move focus to the previous focusable node. Returns whether focus moved.
pub fn focus_previous(tree: &mut Tree) -> bool {
    let current = focused(tree);
    match find_next_focusable(tree, current, false) {
        Some(prev) if Some(prev) != current => focus(tree, prev),
        _ => false,
    }
}

pub fn focus_first(tree: &mut Tree) -> bool {
    match focusable_nodes(tree).first() {
        Some(&first) => focus(tree, first),
        None => false,
    }
}

pub fn focus_last(tree: &mut Tree) -> bool {
    match focusable_nodes(tree).last() {
        Some(&last) => focus(tree, last),
        None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
