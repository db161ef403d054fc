//! Structures used to map areas on the screen

use serde::{Deserialize, Serialize};
use std::{fmt, ops::Sub};
use x11rb::protocol::xproto::ConfigureWindowAux;

// =============================== Point ==============================
// ====================================================================

/// Top-left corner of a [`Rectangle`] in virtual-screen coordinates
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub(crate) struct Point {
    /// X-coordinate
    pub(crate) x: i32,
    /// Y-coordinate
    pub(crate) y: i32,
}

impl Point {
    /// Create a new [`Point`]
    pub(crate) const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x: {}, y: {}", self.x, self.y)
    }
}

// ============================= Dimension ===========================
// ====================================================================

/// A `width` and a `height`. The area of a [`Rectangle`]
#[derive(
    Debug, Default, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub(crate) struct Dimension {
    /// The width of the [`Rectangle`]
    pub(crate) width:  u32,
    /// The height of the [`Rectangle`]
    pub(crate) height: u32,
}

impl Dimension {
    /// Create a new [`Dimension`]
    pub(crate) const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return the `width` and `height` as a tuple
    pub(crate) const fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "width: {}, height: {}", self.width, self.height)
    }
}

// ============================== Padding =============================
// ====================================================================

/// Space kept free at the borders of a monitor before zones are cut
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Padding {
    /// Padding on the top
    pub(crate) top:    u32,
    /// Padding on the right
    pub(crate) right:  u32,
    /// Padding on the bottom
    pub(crate) bottom: u32,
    /// Padding on the left
    pub(crate) left:   u32,
}

impl Padding {
    /// Create a new [`Padding`]
    pub(crate) const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
}

// ============================= Rectangle ============================
// ====================================================================

/// Equivalent to `xcb_rectangle_t`
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub(crate) struct Rectangle {
    /// Represents the top-left corner of the rectangle
    pub(crate) point:     Point,
    /// The width and height of the rectangle
    pub(crate) dimension: Dimension,
}

impl Rectangle {
    /// Create a new [`Rectangle`]
    pub(crate) const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            point:     Point::new(x, y),
            dimension: Dimension::new(width, height),
        }
    }

    /// Y-coordinate of the top edge
    pub(crate) const fn top(&self) -> i32 {
        self.point.y
    }

    /// X-coordinate of the left edge
    pub(crate) const fn left(&self) -> i32 {
        self.point.x
    }

    /// Y-coordinate one past the bottom edge
    pub(crate) const fn bottom(&self) -> i32 {
        self.point.y + self.dimension.height as i32
    }

    /// X-coordinate one past the right edge
    pub(crate) const fn right(&self) -> i32 {
        self.point.x + self.dimension.width as i32
    }

    /// Create a [`ConfigureWindowAux`] from a [`Rectangle`]
    pub(crate) fn to_aux(self) -> ConfigureWindowAux {
        ConfigureWindowAux::new()
            .x(self.point.x)
            .y(self.point.y)
            .width(self.dimension.width)
            .height(self.dimension.height)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}), ({})", self.point, self.dimension)
    }
}

impl Sub<Padding> for Rectangle {
    type Output = Self;

    fn sub(self, padding: Padding) -> Self::Output {
        Self::Output {
            point:     Point {
                x: self.point.x + padding.left as i32,
                y: self.point.y + padding.top as i32,
            },
            dimension: Dimension {
                width:  self
                    .dimension
                    .width
                    .saturating_sub(padding.left + padding.right),
                height: self
                    .dimension
                    .height
                    .saturating_sub(padding.top + padding.bottom),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Padding, Rectangle};

    #[test]
    fn edges() {
        let rect = Rectangle::new(-1920, 40, 1920, 1080);

        assert_eq!(rect.top(), 40);
        assert_eq!(rect.left(), -1920);
        assert_eq!(rect.bottom(), 1120);
        assert_eq!(rect.right(), 0);
    }

    #[test]
    fn shrink_by_padding() {
        let rect = Rectangle::new(0, 0, 1920, 1080) - Padding::new(10, 20, 30, 40);

        assert_eq!(rect, Rectangle::new(40, 10, 1860, 1040));
    }

    #[test]
    fn shrink_never_underflows() {
        let rect = Rectangle::new(0, 0, 30, 30) - Padding::new(100, 100, 100, 100);

        assert_eq!(rect.dimension.as_tuple(), (0, 0));
    }
}
