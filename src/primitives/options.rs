//! Options - Deferred, ordered node configuration.
//!
//! An [`Opt`] is a function from a mutable node to a possible failure.
//! Options are applied in the order given; the first failure stops the
//! sequence. Later options overwrite earlier ones that write the same field.
//!
//! Padding is the one additive case: a per-edge value is never replaced by
//! the aggregate [`padding`], whichever is applied first, and an explicit
//! zero edge counts as set.
//!
//! # Example
//!
//! ```ignore
//! use spark_compose::primitives::*;
//!
//! let card = bag([padding(8.0), gutter(4.0), bg_color(0x202020ff)]);
//! vbox(b, &[card.clone(), padding_left(0.0), children(|b| {
//!     label(b, &[text("Title"), font_size(24.0)])?;
//!     Ok(())
//! })])?;
//! ```

use std::fmt;
use std::rc::Rc;

use crate::engine::{Builder, Composer, Node};
use crate::error::{ComposeError, Result};
use crate::types::{Align, LayoutType, NodeFlags};

// =============================================================================
// Opt
// =============================================================================

/// One unit of node configuration.
#[derive(Clone)]
pub struct Opt(Rc<dyn Fn(&mut Node) -> Result<()>>);

impl Opt {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Node) -> Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Apply this option to `node`.
    pub fn apply(&self, node: &mut Node) -> Result<()> {
        (self.0)(node)
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opt(..)")
    }
}

/// Apply `options` in order, stopping at the first failure.
pub fn apply(node: &mut Node, options: &[Opt]) -> Result<()> {
    options.iter().try_for_each(|opt| opt.apply(node))
}

/// Apply `defaults` then `options`, so caller options win on overwrite.
pub fn apply_all(node: &mut Node, defaults: &[Opt], options: &[Opt]) -> Result<()> {
    apply(node, defaults)?;
    apply(node, options)
}

/// Fold several options into one reusable option, keeping their order.
pub fn bag(options: impl IntoIterator<Item = Opt>) -> Opt {
    let options: Vec<Opt> = options.into_iter().collect();
    Opt::new(move |node| apply(node, &options))
}

fn non_negative(option: &'static str, value: f64) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ComposeError::InvalidOption { option, value })
    }
}

// =============================================================================
// Constraint options
// =============================================================================

macro_rules! constraint_option {
    ($(#[$meta:meta])* $name:ident => $field:ident) => {
        $(#[$meta])*
        pub fn $name(value: f64) -> Opt {
            Opt::new(move |node| {
                node.constraints_mut().$field = Some(non_negative(stringify!($name), value)?);
                Ok(())
            })
        }
    };
}

constraint_option!(
    /// Explicit width; wins over derived size, clamped to min/max.
    width => width
);
constraint_option!(
    /// Explicit height; wins over derived size, clamped to min/max.
    height => height
);
constraint_option!(min_width => min_width);
constraint_option!(max_width => max_width);
constraint_option!(min_height => min_height);
constraint_option!(max_height => max_height);
constraint_option!(
    /// Share of the parent's free width. Zero means no growth.
    flex_width => flex_width
);
constraint_option!(
    /// Share of the parent's free height. Zero means no growth.
    flex_height => flex_height
);
constraint_option!(
    /// Padding for every edge that has no value of its own.
    padding => padding
);
constraint_option!(padding_left => padding_left);
constraint_option!(padding_right => padding_right);
constraint_option!(padding_top => padding_top);
constraint_option!(padding_bottom => padding_bottom);
constraint_option!(
    /// Space between consecutive children on the main axis.
    gutter => gutter
);

pub fn h_align(align: Align) -> Opt {
    Opt::new(move |node| {
        node.constraints_mut().h_align = align;
        Ok(())
    })
}

pub fn v_align(align: Align) -> Opt {
    Opt::new(move |node| {
        node.constraints_mut().v_align = align;
        Ok(())
    })
}

/// Layout strategy for the node's children.
pub fn layout(layout: LayoutType) -> Opt {
    Opt::new(move |node| {
        node.constraints_mut().layout = layout;
        Ok(())
    })
}

// =============================================================================
// Identity, text and paint
// =============================================================================

pub fn key(key: impl Into<String>) -> Opt {
    let key = key.into();
    Opt::new(move |node| {
        node.set_key(key.clone());
        Ok(())
    })
}

/// Text content. Marks the node as a text leaf for measurement.
pub fn text(content: impl Into<String>) -> Opt {
    let content = content.into();
    Opt::new(move |node| {
        node.text_style_mut().content = Some(content.clone());
        node.set_flag(NodeFlags::TEXT, true);
        Ok(())
    })
}

/// Font face for this node and descendants that set none.
pub fn font_face(face: impl Into<String>) -> Opt {
    let face = face.into();
    Opt::new(move |node| {
        node.text_style_mut().font_face = Some(face.clone());
        Ok(())
    })
}

/// Font size for this node and descendants that set none.
pub fn font_size(size: f64) -> Opt {
    Opt::new(move |node| {
        node.text_style_mut().font_size = Some(non_negative("font_size", size)?);
        Ok(())
    })
}

/// Text color as RGBA hex.
pub fn font_color(rgba: u32) -> Opt {
    Opt::new(move |node| {
        node.text_style_mut().font_color = Some(rgba);
        Ok(())
    })
}

pub fn bg_color(rgba: u32) -> Opt {
    Opt::new(move |node| {
        node.paint_mut().bg_color = Some(rgba);
        Ok(())
    })
}

pub fn stroke_color(rgba: u32) -> Opt {
    Opt::new(move |node| {
        node.paint_mut().stroke_color = Some(rgba);
        Ok(())
    })
}

pub fn stroke_width(value: f64) -> Opt {
    Opt::new(move |node| {
        node.paint_mut().stroke_width = Some(non_negative("stroke_width", value)?);
        Ok(())
    })
}

// =============================================================================
// Focus
// =============================================================================

pub fn focusable(value: bool) -> Opt {
    Opt::new(move |node| {
        node.set_flag(NodeFlags::FOCUSABLE, value);
        Ok(())
    })
}

/// Request focus when the node is built.
///
/// The builder hands the request to the focus navigator, which blurs any
/// other focused node. Ignored for nodes that are not focusable.
pub fn focused() -> Opt {
    Opt::new(|node| {
        node.set_flag(NodeFlags::FOCUSED, true);
        Ok(())
    })
}

/// Drop a focus request made by an earlier option.
pub fn blurred() -> Opt {
    Opt::new(|node| {
        node.set_flag(NodeFlags::FOCUSED, false);
        Ok(())
    })
}

// =============================================================================
// Composers
// =============================================================================

/// Declare children. `compose` receives the builder to push them onto.
///
/// Fails with `ConflictingComposer` on a node that already has an
/// [`on_compose`] callback.
pub fn children<F>(compose: F) -> Opt
where
    F: Fn(&mut Builder) -> Result<()> + 'static,
{
    let compose: Rc<dyn Fn(&mut Builder) -> Result<()>> = Rc::new(compose);
    Opt::new(move |node| {
        if let Some(Composer::Simple(_)) = node.composer() {
            return Err(ComposeError::ConflictingComposer {
                type_name: node.type_name().to_string(),
            });
        }
        node.set_composer(Composer::WithBuilder(compose.clone()));
        Ok(())
    })
}

/// Run `compose` during composition, without access to the builder.
///
/// Fails with `ConflictingComposer` on a node that already declares
/// [`children`].
pub fn on_compose<F>(compose: F) -> Opt
where
    F: Fn() + 'static,
{
    let compose: Rc<dyn Fn()> = Rc::new(compose);
    Opt::new(move |node| {
        if let Some(Composer::WithBuilder(_)) = node.composer() {
            return Err(ComposeError::ConflictingComposer {
                type_name: node.type_name().to_string(),
            });
        }
        node.set_composer(Composer::Simple(compose.clone()));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> Node {
        Node::new()
    }

    #[test]
    fn test_padding_edge_wins_in_either_order() {
        let mut node = setup();
        apply(&mut node, &[padding_left(15.0), padding(10.0)]).unwrap();
        assert_eq!(node.horizontal_padding(), 25.0);

        let mut node = setup();
        apply(&mut node, &[padding(10.0), padding_left(15.0)]).unwrap();
        assert_eq!(node.horizontal_padding(), 25.0);
    }

    #[test]
    fn test_padding_explicit_zero_is_kept() {
        let mut node = setup();
        apply(&mut node, &[padding_left(0.0), padding(10.0)]).unwrap();
        assert_eq!(node.horizontal_padding(), 10.0);
        assert_eq!(node.vertical_padding(), 20.0);
    }

    #[test]
    fn test_specific_paddings_without_aggregate() {
        let mut node = setup();
        apply(
            &mut node,
            &[padding_bottom(1.0), padding_right(2.0), padding_left(3.0), padding_top(4.0)],
        )
        .unwrap();
        assert_eq!(node.constraints().padding, None);
        assert_eq!(node.vertical_padding(), 5.0);
        assert_eq!(node.horizontal_padding(), 5.0);
    }

    #[test]
    fn test_apply_all_caller_wins() {
        let mut node = setup();
        apply_all(&mut node, &[width(10.0), height(5.0)], &[width(20.0)]).unwrap();
        assert_eq!(node.constraints().width, Some(20.0));
        assert_eq!(node.constraints().height, Some(5.0));
    }

    #[test]
    fn test_apply_stops_at_first_failure() {
        let mut node = setup();
        let err = apply(&mut node, &[width(10.0), height(-1.0), width(30.0)]).unwrap_err();

        assert_eq!(err, ComposeError::InvalidOption { option: "height", value: -1.0 });
        assert_eq!(node.constraints().width, Some(10.0));
        assert_eq!(node.constraints().height, None);
    }

    #[test]
    fn test_bag_preserves_order() {
        let mut node = setup();
        let sizes = bag([width(10.0), width(40.0), key("sized")]);
        apply(&mut node, &[sizes]).unwrap();

        assert_eq!(node.constraints().width, Some(40.0));
        assert_eq!(node.key(), Some("sized"));
    }

    #[test]
    fn test_text_marks_leaf() {
        let mut node = setup();
        apply(&mut node, &[text("hello"), font_size(12.0), font_face("Roboto")]).unwrap();

        assert!(node.is_text());
        assert_eq!(node.text(), Some("hello"));
        assert_eq!(node.text_style().font_face.as_deref(), Some("Roboto"));
    }

    #[test]
    fn test_focus_flags() {
        let mut node = setup();
        apply(&mut node, &[focusable(true), focused(), blurred()]).unwrap();
        assert!(node.is_focusable());
        assert!(!node.is_focused());
    }

    #[test]
    fn test_conflicting_composers() {
        let mut node = setup();
        let err = apply(&mut node, &[on_compose(|| {}), children(|_| Ok(()))]).unwrap_err();
        assert!(matches!(err, ComposeError::ConflictingComposer { .. }));

        let mut node = setup();
        let err = apply(&mut node, &[children(|_| Ok(())), on_compose(|| {})]).unwrap_err();
        assert!(matches!(err, ComposeError::ConflictingComposer { .. }));

        // Same kind twice: the later one replaces the earlier.
        let mut node = setup();
        apply(&mut node, &[children(|_| Ok(())), children(|_| Ok(()))]).unwrap();
        assert!(matches!(node.composer(), Some(Composer::WithBuilder(_))));
    }

    proptest! {
        #[test]
        fn prop_padding_order_independent(edge in 0.0f64..500.0, all in 0.0f64..500.0) {
            let mut forward = setup();
            apply(&mut forward, &[padding_left(edge), padding(all)]).unwrap();
            let mut reverse = setup();
            apply(&mut reverse, &[padding(all), padding_left(edge)]).unwrap();

            prop_assert_eq!(forward.horizontal_padding(), reverse.horizontal_padding());
            prop_assert_eq!(forward.horizontal_padding(), edge + all);
        }

        #[test]
        fn prop_negative_sizes_rejected(value in -1000.0f64..-0.001) {
            let mut node = setup();
            prop_assert!(apply(&mut node, &[width(value)]).is_err());
            prop_assert!(apply(&mut node, &[gutter(value)]).is_err());
            prop_assert_eq!(node.constraints().width, None);
        }
    }
}
