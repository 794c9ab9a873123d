//! Recording surface for tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::layout::{TextBounds, TextMeasure};

use super::Surface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Init,
    BeginFrame,
    EndFrame,
    AddFont { name: String, path: PathBuf },
    CreateFont { name: String, path: PathBuf },
    SetFillColor(u32),
    SetStrokeColor(u32),
    SetStrokeWidth(f64),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    RoundedRect { x: f64, y: f64, width: f64, height: f64, radius: f64 },
    Arc { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    Fill,
    Stroke,
    SetFontFace(String),
    SetFontSize(f64),
    Text { x: f64, y: f64, text: String },
    TextBounds { face: String, size: f64, text: String },
    SetWidth(f64),
    SetHeight(f64),
}

/// Surface that records calls instead of drawing.
///
/// Text metrics are fixed and font-independent: for `size` and a string of
/// `len` bytes, bounds are `x = -0.5`, `y = -size`,
/// `width = floor(size * len * 0.423)`, `height = size`.
#[derive(Debug)]
pub struct FakeSurface {
    commands: RefCell<Vec<Command>>,
    width: f64,
    height: f64,
    pixel_ratio: f64,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        }
    }

    /// Calls recorded so far, oldest first.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    /// Recorded calls, leaving the log empty.
    pub fn take_commands(&self) -> Vec<Command> {
        self.commands.take()
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn record(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }
}

impl TextMeasure for FakeSurface {
    fn text_bounds(&self, face: &str, size: f64, text: &str) -> TextBounds {
        self.record(Command::TextBounds {
            face: face.to_string(),
            size,
            text: text.to_string(),
        });
        TextBounds {
            x: -0.5,
            y: -size,
            width: (size * text.len() as f64 * 0.423).floor(),
            height: size,
        }
    }
}

impl Surface for FakeSurface {
    fn init(&mut self) {
        self.pixel_ratio = 1.0;
        self.record(Command::Init);
    }

    fn close(&mut self) {}

    fn begin_frame(&mut self) {
        self.record(Command::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.record(Command::EndFrame);
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = ratio;
    }

    fn add_font(&mut self, name: &str, path: &Path) {
        self.record(Command::AddFont { name: name.to_string(), path: path.to_path_buf() });
    }

    fn create_font(&mut self, name: &str, path: &Path) {
        self.record(Command::CreateFont { name: name.to_string(), path: path.to_path_buf() });
    }

    fn set_fill_color(&mut self, rgba: u32) {
        self.record(Command::SetFillColor(rgba));
    }

    fn set_stroke_color(&mut self, rgba: u32) {
        self.record(Command::SetStrokeColor(rgba));
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.record(Command::SetStrokeWidth(width));
    }

    fn begin_path(&mut self) {
        self.record(Command::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(Command::MoveTo { x, y });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.record(Command::Rect { x, y, width, height });
    }

    fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.record(Command::RoundedRect { x, y, width, height, radius });
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.record(Command::Arc { xc, yc, radius, angle1, angle2 });
    }

    fn fill(&mut self) {
        self.record(Command::Fill);
    }

    fn stroke(&mut self) {
        self.record(Command::Stroke);
    }

    fn set_font_face(&mut self, face: &str) {
        self.record(Command::SetFontFace(face.to_string()));
    }

    fn set_font_size(&mut self, size: f64) {
        self.record(Command::SetFontSize(size));
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.record(Command::Text { x, y, text: text.to_string() });
    }

    fn set_width(&mut self, width: f64) {
        self.width = width;
        self.record(Command::SetWidth(width));
    }

    fn set_height(&mut self, height: f64) {
        self.height = height;
        self.record(Command::SetHeight(height));
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}
