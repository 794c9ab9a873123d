//! Surface - Drawing backend interface.
//!
//! The core never draws. A renderer hands a [`Surface`] to [`draw`], which
//! walks a laid-out tree and issues primitives at absolute positions. Pixel
//! output, font loading and caching belong to the surface implementation.
//!
//! [`FakeSurface`] records every call as a [`Command`] and measures text with
//! fixed metrics, for tests.

mod draw;
mod fake;

use std::path::Path;

use crate::layout::TextMeasure;

pub use draw::draw;
pub use fake::{Command, FakeSurface};

/// Drawing primitives consumed by a renderer.
///
/// Colors are RGBA hex, e.g. `0xffcc00ff`.
pub trait Surface: TextMeasure {
    fn init(&mut self);
    fn close(&mut self);

    fn begin_frame(&mut self);
    fn end_frame(&mut self);
    fn set_pixel_ratio(&mut self, ratio: f64);

    /// Register a font file under `name`.
    fn add_font(&mut self, name: &str, path: &Path);
    /// Register a font and build its glyph atlas.
    fn create_font(&mut self, name: &str, path: &Path);

    fn set_fill_color(&mut self, rgba: u32);
    fn set_stroke_color(&mut self, rgba: u32);
    fn set_stroke_width(&mut self, width: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    /// Fill the current path.
    fn fill(&mut self);
    /// Stroke the current path.
    fn stroke(&mut self);

    fn set_font_face(&mut self, face: &str);
    fn set_font_size(&mut self, size: f64);
    /// Draw `text` with its baseline origin at (`x`, `y`).
    fn text(&mut self, x: f64, y: f64, text: &str);

    fn set_width(&mut self, width: f64);
    fn set_height(&mut self, height: f64);
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}
