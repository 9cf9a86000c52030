//! Rectangles on the layout plane.
use crate::direction::Orientation;
use crate::Vec2;

use std::ops::Add;

/// An axis-aligned rectangle: a position and a size.
///
/// This is the geometry a component commits to during `compute_layout`.
/// The origin is relative to the parent's origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,

    /// Width and height.
    pub size: Vec2,
}

impl<T> Add<T> for Rect
where
    T: Into<Vec2>,
{
    type Output = Rect;

    fn add(mut self, rhs: T) -> Self {
        self.offset(rhs);
        self
    }
}

impl Rect {
    /// Creates a new `Rect` with the given position and size.
    pub fn from_size<U, V>(origin: U, size: V) -> Self
    where
        U: Into<Vec2>,
        V: Into<Vec2>,
    {
        Rect {
            origin: origin.into(),
            size: size.into(),
        }
    }

    /// Creates a new `Rect` at `(0, 0)` with the given size.
    pub fn from_zero<V: Into<Vec2>>(size: V) -> Self {
        Self::from_size((0.0, 0.0), size)
    }

    /// Adds the given offset to this rectangle.
    pub fn offset<V>(&mut self, offset: V)
    where
        V: Into<Vec2>,
    {
        self.origin = self.origin + offset;
    }

    /// Returns the width of the rectangle.
    pub fn width(self) -> f64 {
        self.size.x
    }

    /// Returns the height of the rectangle.
    pub fn height(self) -> f64 {
        self.size.y
    }

    /// Returns the X value of the left edge.
    pub fn left(self) -> f64 {
        self.origin.x
    }

    /// Returns the X value of the right edge.
    pub fn right(self) -> f64 {
        self.origin.x + self.size.x
    }

    /// Returns the Y value of the top edge.
    pub fn top(self) -> f64 {
        self.origin.y
    }

    /// Returns the Y value of the bottom edge.
    pub fn bottom(self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Returns the bottom-right corner.
    pub fn bottom_right(self) -> Vec2 {
        self.origin + self.size
    }

    /// Returns the start and end coordinate of one side of this rectangle.
    pub fn side(self, orientation: Orientation) -> (f64, f64) {
        match orientation {
            Orientation::Vertical => (self.top(), self.bottom()),
            Orientation::Horizontal => (self.left(), self.right()),
        }
    }

    /// Checks if a point is in `self`.
    ///
    /// The left and top edges are inclusive, the right and bottom ones are
    /// not.
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
