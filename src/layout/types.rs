//! Layout configuration.

use crate::types::Size;

/// Settings for one layout pass.
///
/// ```ignore
/// let config = LayoutConfig {
///     viewport: Some(Size::new(800.0, 600.0)),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Space available to the root. A root with a flex weight on an axis
    /// takes the viewport's extent on that axis.
    pub viewport: Option<Size>,
    /// Font face for text leaves with no face on themselves or any ancestor.
    pub font_face: String,
    /// Font size for text leaves with no size on themselves or any ancestor.
    pub font_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: None,
            font_face: "sans".to_string(),
            font_size: 12.0,
        }
    }
}
