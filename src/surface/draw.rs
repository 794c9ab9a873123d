//! Tree walker that paints a laid-out tree onto a [`Surface`].
//!
//! Nodes are drawn parents first, so children paint over their container.
//! Per node: background rect, then stroke, then text.

use crate::engine::Tree;
use crate::layout::LayoutConfig;
use crate::types::NodeId;

use super::Surface;

const DEFAULT_TEXT_COLOR: u32 = 0x000000ff;
const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Paint `tree` as one frame. Unresolved nodes are skipped.
///
/// `config` supplies the font used by text nodes that inherit none.
pub fn draw<S: Surface + ?Sized>(tree: &Tree, surface: &mut S, config: &LayoutConfig) {
    surface.begin_frame();
    if let Some(root) = tree.root() {
        for id in tree.descendants(root) {
            draw_node(tree, id, surface, config);
        }
    }
    surface.end_frame();
}

fn draw_node<S: Surface + ?Sized>(tree: &Tree, id: NodeId, surface: &mut S, config: &LayoutConfig) {
    let node = &tree[id];
    let Some(geometry) = node.geometry() else {
        return;
    };
    let (x, y) = tree.absolute_position(id);
    let paint = node.paint();

    if let Some(bg) = paint.bg_color {
        surface.begin_path();
        surface.rect(x, y, geometry.width, geometry.height);
        surface.set_fill_color(bg);
        surface.fill();
    }

    if let Some(stroke) = paint.stroke_color {
        surface.begin_path();
        surface.rect(x, y, geometry.width, geometry.height);
        surface.set_stroke_width(paint.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH));
        surface.set_stroke_color(stroke);
        surface.stroke();
    }

    let Some(text) = node.text().filter(|_| node.is_text()) else {
        return;
    };
    let face = tree.effective_font_face(id).unwrap_or(config.font_face.as_str());
    let size = tree.effective_font_size(id).unwrap_or(config.font_size);
    // Shift from the ink box to the baseline origin.
    let bounds = surface.text_bounds(face, size, text);

    surface.set_font_face(face);
    surface.set_font_size(size);
    surface.set_fill_color(node.text_style().font_color.unwrap_or(DEFAULT_TEXT_COLOR));
    surface.text(x + node.padding_left() - bounds.x, y + node.padding_top() - bounds.y, text);
}
