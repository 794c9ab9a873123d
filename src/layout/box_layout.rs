//! Box Layout Engine
//!
//! Resolves width, height and position for every node in one pass over the
//! tree.
//!
//! # Algorithm
//!
//! 1. **Measure** (bottom-up, leaf → root): preferred size of each node.
//!    Explicit sizes win, clamped to min/max. Text leaves ask the
//!    [`TextMeasure`] collaborator. Containers sum (box) or max (stack) their
//!    children's preferred sizes, plus gutters and their own padding.
//! 2. **Root**: preferred size, or the viewport extent on an axis where the
//!    root declares a flex weight. The root sits at (0, 0).
//! 3. **Layout** (top-down, root → leaf): each container distributes its
//!    content box. Flex children share the main-axis space left after fixed
//!    siblings and gutters, in proportion to their weights. Alignment places
//!    children along the cross axis, and along the main axis when space is
//!    left over.
//!
//! Positions are relative to the parent's origin. Sizes never go negative:
//! a content box that would is clamped to zero and reported.

use crate::engine::{Node, Tree};
use crate::error::ComposeError;
use crate::types::{Axis, Geometry, NodeId, Size};

use super::text_measure::TextMeasure;
use super::types::LayoutConfig;

const AXES: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out the whole tree. Returns the warnings raised by this pass.
pub fn compute_layout(
    tree: &mut Tree,
    measurer: &dyn TextMeasure,
    config: &LayoutConfig,
) -> Vec<ComposeError> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let order = tree.descendants(root);
    let mut warnings = Vec::new();

    // Pass 1: preferred sizes, children before parents.
    let mut preferred = vec![Size::ZERO; tree.len()];
    for &id in order.iter().rev() {
        let size = measure(tree, id, &preferred, measurer, config, &mut warnings);
        preferred[id.index()] = size;
    }

    // Pass 2: root.
    let root_size = root_size(&tree[root], preferred[root.index()], config);
    tree.set_geometry(
        root,
        Geometry { x: 0.0, y: 0.0, width: root_size.width, height: root_size.height },
    );

    // Pass 3: children, parents before children.
    for &id in &order {
        layout_children(tree, id, &preferred, &mut warnings);
    }

    for warning in &warnings {
        tracing::warn!(%warning, "layout");
    }
    tracing::debug!(
        nodes = order.len(),
        width = root_size.width,
        height = root_size.height,
        "layout pass complete"
    );
    warnings
}

// =============================================================================
// CONSTRAINT HELPERS
// =============================================================================

/// Apply max then min, so a min above max wins instead of panicking.
fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut value = value;
    if let Some(max) = max {
        value = value.min(max);
    }
    if let Some(min) = min {
        value = value.max(min);
    }
    value
}

fn clamp_to_bounds(node: &Node, axis: Axis, value: f64) -> f64 {
    let (min, max) = node.constraints().bounds(axis);
    clamp(value, min, max)
}

/// Flex weight that actually applies: an explicit size turns growth off.
fn grow_weight(node: &Node, axis: Axis) -> Option<f64> {
    let constraints = node.constraints();
    match constraints.size(axis) {
        Some(_) => None,
        None => constraints.flex(axis),
    }
}

// =============================================================================
// MEASURE (bottom-up)
// =============================================================================

fn measure(
    tree: &Tree,
    id: NodeId,
    preferred: &[Size],
    measurer: &dyn TextMeasure,
    config: &LayoutConfig,
    warnings: &mut Vec<ComposeError>,
) -> Size {
    let node = &tree[id];
    let content = if node.is_text() {
        let face = tree.effective_font_face(id).unwrap_or(config.font_face.as_str());
        let size = tree.effective_font_size(id).unwrap_or(config.font_size);
        let bounds = measurer.text_bounds(face, size, node.text().unwrap_or(""));
        Size::new(bounds.width.max(0.0), bounds.height.max(0.0))
    } else {
        content_extent(node, preferred)
    };

    let mut size = Size::ZERO;
    for axis in AXES {
        size.set_along(axis, resolve_axis(node, axis, content.along(axis), warnings));
    }
    size
}

/// Size of the children's footprint, without the node's padding.
fn content_extent(node: &Node, preferred: &[Size]) -> Size {
    let sizes = node.children().iter().map(|c| preferred[c.index()]);

    let Some(main) = node.layout_type().main_axis() else {
        return sizes.fold(Size::ZERO, |acc, s| {
            Size::new(acc.width.max(s.width), acc.height.max(s.height))
        });
    };

    let cross = main.cross();
    let gaps = node.child_count().saturating_sub(1) as f64;
    let (along, across) = sizes.fold((0.0_f64, 0.0_f64), |(along, across), s| {
        (along + s.along(main), across.max(s.along(cross)))
    });

    let mut extent = Size::ZERO;
    extent.set_along(main, along + node.gutter() * gaps);
    extent.set_along(cross, across);
    extent
}

fn resolve_axis(node: &Node, axis: Axis, content: f64, warnings: &mut Vec<ComposeError>) -> f64 {
    let (min, max) = node.constraints().bounds(axis);
    match node.constraints().size(axis) {
        Some(explicit) => {
            let resolved = clamp(explicit, min, max);
            if resolved != explicit {
                warnings.push(ComposeError::ConfigurationConflict {
                    node: node.id(),
                    axis,
                    value: explicit,
                    min,
                    max,
                    resolved,
                });
            }
            resolved
        }
        None => clamp(content + node.padding_along(axis), min, max).max(0.0),
    }
}

fn root_size(root: &Node, preferred: Size, config: &LayoutConfig) -> Size {
    let Some(viewport) = config.viewport else {
        return preferred;
    };
    let mut size = preferred;
    for axis in AXES {
        if grow_weight(root, axis).is_some() {
            size.set_along(axis, clamp_to_bounds(root, axis, viewport.along(axis)));
        }
    }
    size
}

// =============================================================================
// LAYOUT (top-down)
// =============================================================================

fn layout_children(
    tree: &mut Tree,
    id: NodeId,
    preferred: &[Size],
    warnings: &mut Vec<ComposeError>,
) {
    let node = &tree[id];
    let Some(geometry) = node.geometry() else {
        return;
    };

    let mut content = Size::ZERO;
    for axis in AXES {
        let extent = geometry.size().along(axis) - node.padding_along(axis);
        if extent < 0.0 {
            warnings.push(ComposeError::NegativeSize { node: id, axis, value: extent });
        }
        content.set_along(axis, extent.max(0.0));
    }

    if node.children().is_empty() {
        return;
    }

    let children = node.children().to_vec();
    let placements = match node.layout_type().main_axis() {
        Some(main) => flow(tree, node, main, &children, content, preferred),
        None => stack(tree, node, &children, content, preferred),
    };

    for (child, placement) in children.into_iter().zip(placements) {
        tree.set_geometry(child, placement);
    }
}

/// Children overlap; each axis is aligned independently in the content box.
fn stack(
    tree: &Tree,
    parent: &Node,
    children: &[NodeId],
    content: Size,
    preferred: &[Size],
) -> Vec<Geometry> {
    children
        .iter()
        .map(|&child_id| {
            let child = &tree[child_id];
            let mut position = [0.0; 2];
            let mut size = Size::ZERO;
            for (slot, axis) in AXES.into_iter().enumerate() {
                let available = content.along(axis);
                let extent = match grow_weight(child, axis) {
                    Some(_) => clamp_to_bounds(child, axis, available),
                    None => preferred[child_id.index()].along(axis),
                };
                size.set_along(axis, extent);
                position[slot] = parent.padding_start(axis)
                    + parent.constraints().align(axis).offset(available - extent);
            }
            Geometry { x: position[0], y: position[1], width: size.width, height: size.height }
        })
        .collect()
}

/// Children flow along `main`, separated by the parent's gutter.
fn flow(
    tree: &Tree,
    parent: &Node,
    main: Axis,
    children: &[NodeId],
    content: Size,
    preferred: &[Size],
) -> Vec<Geometry> {
    let cross = main.cross();
    let gutter = parent.gutter();
    let gutters = gutter * children.len().saturating_sub(1) as f64;

    let (fixed, weights) = children.iter().fold((0.0, 0.0), |(fixed, weights), &c| {
        match grow_weight(&tree[c], main) {
            Some(weight) => (fixed, weights + weight),
            None => (fixed + preferred[c.index()].along(main), weights),
        }
    });
    let remaining = (content.along(main) - fixed - gutters).max(0.0);

    let extents: Vec<f64> = children
        .iter()
        .map(|&c| match grow_weight(&tree[c], main) {
            Some(weight) => clamp_to_bounds(&tree[c], main, remaining * weight / weights),
            None => preferred[c.index()].along(main),
        })
        .collect();

    let used: f64 = extents.iter().sum::<f64>() + gutters;
    let mut offset = parent.padding_start(main)
        + parent.constraints().align(main).offset(content.along(main) - used);

    children
        .iter()
        .zip(extents)
        .map(|(&c, extent)| {
            let child = &tree[c];
            let available = content.along(cross);
            let cross_extent = match grow_weight(child, cross) {
                Some(_) => clamp_to_bounds(child, cross, available),
                None => preferred[c.index()].along(cross),
            };
            let cross_offset = parent.padding_start(cross)
                + parent.constraints().align(cross).offset(available - cross_extent);

            let placement = Geometry::from_axes(main, (offset, cross_offset), (extent, cross_extent));
            offset += extent + gutter;
            placement
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Builder;
    use crate::layout::CellMeasure;
    use crate::primitives::*;
    use crate::types::Align;
    use proptest::prelude::*;

    fn pair(b: &mut Builder) -> crate::Result<()> {
        box_primitive(b, &[key("a"), width(50.0), height(20.0)])?;
        box_primitive(b, &[key("b"), width(50.0), height(20.0)])?;
        Ok(())
    }

    fn geometry(tree: &Tree, key: &str) -> Geometry {
        tree[tree.find_by_key(key).unwrap()].geometry().unwrap()
    }

    #[test]
    fn test_hbox_padding_and_offsets() {
        let tree = Builder::new()
            .build(|b| hbox(b, &[key("root"), padding(10.0), children(pair)]))
            .unwrap();

        assert_eq!(geometry(&tree, "root"), Geometry { x: 0.0, y: 0.0, width: 120.0, height: 40.0 });
        assert_eq!(geometry(&tree, "a"), Geometry { x: 10.0, y: 10.0, width: 50.0, height: 20.0 });
        assert_eq!(geometry(&tree, "b"), Geometry { x: 60.0, y: 10.0, width: 50.0, height: 20.0 });
        assert!(tree.warnings().is_empty());
    }

    #[test]
    fn test_vbox_gutter() {
        let tree = Builder::new()
            .build(|b| vbox(b, &[key("root"), gutter(5.0), children(pair)]))
            .unwrap();

        assert_eq!(geometry(&tree, "root").size(), Size::new(50.0, 45.0));
        assert_eq!(geometry(&tree, "b").y, 25.0);
    }

    #[test]
    fn test_stack_overlaps() {
        let tree = Builder::new()
            .build(|b| {
                box_primitive(b, &[key("root"), children(|b| {
                    box_primitive(b, &[key("a"), width(30.0), height(10.0)])?;
                    box_primitive(b, &[key("b"), width(10.0), height(40.0)])?;
                    Ok(())
                })])
            })
            .unwrap();

        assert_eq!(geometry(&tree, "root").size(), Size::new(30.0, 40.0));
        assert_eq!(geometry(&tree, "a").x, 0.0);
        assert_eq!(geometry(&tree, "b").x, 0.0);
    }

    #[test]
    fn test_flex_shares_remaining_space() {
        let tree = Builder::new()
            .build(|b| {
                hbox(b, &[key("root"), width(200.0), gutter(10.0), children(|b| {
                    box_primitive(b, &[key("fixed"), width(40.0)])?;
                    box_primitive(b, &[key("one"), flex_width(1.0)])?;
                    box_primitive(b, &[key("three"), flex_width(3.0)])?;
                    Ok(())
                })])
            })
            .unwrap();

        // 200 - 40 fixed - 20 gutter = 140 split 1:3
        assert_eq!(geometry(&tree, "one").width, 35.0);
        assert_eq!(geometry(&tree, "three").width, 105.0);
        assert_eq!(geometry(&tree, "one").x, 50.0);
        assert_eq!(geometry(&tree, "three").x, 95.0);
    }

    #[test]
    fn test_flex_respects_max() {
        let tree = Builder::new()
            .build(|b| {
                hbox(b, &[width(100.0), children(|b| {
                    box_primitive(b, &[key("capped"), flex_width(1.0), max_width(30.0)])?;
                    Ok(())
                })])
            })
            .unwrap();
        assert_eq!(geometry(&tree, "capped").width, 30.0);
    }

    #[test]
    fn test_alignment() {
        let tree = Builder::new()
            .build(|b| {
                hbox(b, &[
                    width(100.0),
                    height(50.0),
                    h_align(Align::Center),
                    v_align(Align::End),
                    children(|b| {
                        box_primitive(b, &[key("child"), width(20.0), height(10.0)])?;
                        Ok(())
                    }),
                ])
            })
            .unwrap();

        let child = geometry(&tree, "child");
        assert_eq!(child.x, 40.0);
        assert_eq!(child.y, 40.0);
    }

    #[test]
    fn test_cross_axis_flex_fills() {
        let tree = Builder::new()
            .build(|b| {
                vbox(b, &[width(80.0), padding(5.0), children(|b| {
                    box_primitive(b, &[key("row"), flex_width(1.0), height(10.0)])?;
                    Ok(())
                })])
            })
            .unwrap();
        assert_eq!(geometry(&tree, "row").width, 70.0);
        assert_eq!(geometry(&tree, "row").x, 5.0);
    }

    #[test]
    fn test_text_leaf_measured() {
        let tree = Builder::new()
            .build(|b| {
                hbox(b, &[padding(1.0), children(|b| {
                    label(b, &[key("label"), text("hello")])?;
                    label(b, &[key("wide"), text("日本"), padding_left(2.0)])?;
                    Ok(())
                })])
            })
            .unwrap();

        assert_eq!(geometry(&tree, "label").size(), Size::new(5.0, 1.0));
        assert_eq!(geometry(&tree, "wide").size(), Size::new(6.0, 1.0));
        assert_eq!(geometry(&tree, "wide").x, 6.0);
    }

    #[test]
    fn test_explicit_outside_bounds_warns() {
        let tree = Builder::new()
            .build(|b| box_primitive(b, &[width(10.0), min_width(20.0), max_width(50.0)]))
            .unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree[root].width(), 20.0);
        assert!(matches!(
            tree.warnings(),
            [ComposeError::ConfigurationConflict { resolved, axis: Axis::Horizontal, .. }] if *resolved == 20.0
        ));
    }

    #[test]
    fn test_padding_wider_than_box_clamps() {
        let tree = Builder::new()
            .build(|b| {
                hbox(b, &[width(10.0), padding(8.0), children(|b| {
                    box_primitive(b, &[key("squeezed"), flex_width(1.0)])?;
                    Ok(())
                })])
            })
            .unwrap();

        assert_eq!(geometry(&tree, "squeezed").width, 0.0);
        assert!(tree.warnings().iter().all(ComposeError::is_warning));
        assert!(tree.warnings().iter().any(|w| matches!(
            w,
            ComposeError::NegativeSize { axis: Axis::Horizontal, value, .. } if *value == -6.0
        )));
    }

    #[test]
    fn test_root_flex_takes_viewport() {
        let config = LayoutConfig { viewport: Some(Size::new(300.0, 200.0)), ..Default::default() };
        let tree = Builder::new()
            .with_config(config)
            .build(|b| vbox(b, &[flex_width(1.0), children(pair)]))
            .unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree[root].width(), 300.0);
        assert_eq!(tree[root].height(), 40.0);
    }

    #[test]
    fn test_relayout_after_mutation() {
        let mut tree = Builder::new()
            .build(|b| hbox(b, &[key("root"), children(pair)]))
            .unwrap();
        let a = tree.find_by_key("a").unwrap();
        tree[a].constraints_mut().width = Some(70.0);

        tree.relayout(&CellMeasure, &LayoutConfig::default());
        assert_eq!(geometry(&tree, "root").width, 120.0);
        assert_eq!(geometry(&tree, "b").x, 70.0);
    }

    proptest! {
        #[test]
        fn prop_layout_idempotent(
            widths in proptest::collection::vec(0.0f64..100.0, 1..6),
            pad in 0.0f64..20.0,
            gap in 0.0f64..10.0,
        ) {
            let sizes = widths.clone();
            let mut tree = Builder::new()
                .build(move |b| {
                    let sizes = sizes.clone();
                    hbox(b, &[padding(pad), gutter(gap), children(move |b| {
                        for (i, w) in sizes.iter().enumerate() {
                            if i % 2 == 0 {
                                box_primitive(b, &[width(*w), height(10.0)])?;
                            } else {
                                box_primitive(b, &[flex_width(*w + 1.0), flex_height(1.0)])?;
                            }
                        }
                        Ok(())
                    })])
                })
                .unwrap();

            let before: Vec<_> = tree.iter().map(Node::geometry).collect();
            tree.relayout(&CellMeasure, &LayoutConfig::default());
            let after: Vec<_> = tree.iter().map(Node::geometry).collect();

            prop_assert_eq!(before, after);
            prop_assert!(tree.iter().all(|n| n.width() >= 0.0 && n.height() >= 0.0));
        }
    }
}
