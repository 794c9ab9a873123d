//! Core types for spark-compose.
//!
//! Small value types shared by the engine, the layout pass and the focus
//! navigator. Nothing in here owns a node.

use std::fmt;

// =============================================================================
// Node identity
// =============================================================================

/// Numeric identity of a node: its index in the owning [`Tree`](crate::Tree) arena.
///
/// Ids are assigned in push order, so the root is always `NodeId(0)` for a
/// tree produced by a [`Builder`](crate::Builder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Layout enums
// =============================================================================

/// Layout strategy a container uses for its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutType {
    /// Children overlap; each is aligned inside the content box.
    #[default]
    Stack,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

impl LayoutType {
    /// Main axis for flowing layouts, `None` for stacked children.
    pub const fn main_axis(self) -> Option<Axis> {
        match self {
            LayoutType::Stack => None,
            LayoutType::Horizontal => Some(Axis::Horizontal),
            LayoutType::Vertical => Some(Axis::Vertical),
        }
    }
}

/// Placement of a child inside the free space along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left / top.
    #[default]
    Start,
    Center,
    /// Right / bottom.
    End,
}

impl Align {
    /// Offset of a child inside `free` units of space.
    ///
    /// Negative free space (an overflowing child) always pins to the start.
    pub fn offset(self, free: f64) -> f64 {
        if free <= 0.0 {
            return 0.0;
        }
        match self {
            Align::Start => 0.0,
            Align::Center => free / 2.0,
            Align::End => free,
        }
    }
}

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("width"),
            Axis::Vertical => f.write_str("height"),
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Set the extent along `axis`.
    #[inline]
    pub fn set_along(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
    }
}

/// Resolved position and size of a node.
///
/// `x`/`y` are relative to the parent's origin; the root sits at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Size part of the geometry.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Build a geometry from main/cross axis coordinates.
    pub fn from_axes(main: Axis, position: (f64, f64), size: (f64, f64)) -> Self {
        let (along, across) = position;
        let (extent, cross_extent) = size;
        match main {
            Axis::Horizontal => Self { x: along, y: across, width: extent, height: cross_extent },
            Axis::Vertical => Self { x: across, y: along, width: cross_extent, height: extent },
        }
    }
}

// =============================================================================
// Node flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Capability and state bits carried by every node.
    ///
    /// Combine with bitwise OR: `NodeFlags::FOCUSABLE | NodeFlags::TEXT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Node can take focus.
        const FOCUSABLE = 1 << 0;
        /// Node currently holds focus (at most one per tree).
        const FOCUSED = 1 << 1;
        /// Node is a text leaf; its intrinsic size comes from text measurement.
        const TEXT = 1 << 2;
        /// Factory contract: the node must declare a composer.
        const REQUIRES_COMPOSER = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Align::Start, 40.0 => 0.0 ; "start pins left")]
    #[test_case(Align::Center, 40.0 => 20.0 ; "center splits free space")]
    #[test_case(Align::End, 40.0 => 40.0 ; "end takes all free space")]
    #[test_case(Align::End, -5.0 => 0.0 ; "overflow pins to start")]
    fn test_align_offset(align: Align, free: f64) -> f64 {
        align.offset(free)
    }

    #[test]
    fn test_layout_main_axis() {
        assert_eq!(LayoutType::Stack.main_axis(), None);
        assert_eq!(LayoutType::Horizontal.main_axis(), Some(Axis::Horizontal));
        assert_eq!(LayoutType::Vertical.main_axis(), Some(Axis::Vertical));
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }

    #[test]
    fn test_flags_default_empty() {
        let flags = NodeFlags::default();
        assert!(flags.is_empty());
        let flags = NodeFlags::FOCUSABLE | NodeFlags::TEXT;
        assert!(flags.contains(NodeFlags::FOCUSABLE));
        assert!(!flags.contains(NodeFlags::FOCUSED));
    }
}
