//! Core geometry types: Point, Offset, Region, Extent, Orientation.
//!
//! These are the cell-coordinate types used for hit testing, coordinate
//! translation between nested containers, and clipping during merges.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A cell position, relative to whichever widget is interpreting it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Offset) -> Point {
        Point { x: self.x + rhs.dx, y: self.y + rhs.dy }
    }
}

impl Sub<Offset> for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Offset) -> Point {
        Point { x: self.x - rhs.dx, y: self.y - rhs.dy }
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A displacement between a container's coordinate space and a child's.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { dx: self.dx + rhs.dx, dy: self.dy + rhs.dy }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { dx: -self.dx, dy: -self.dy }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle of cells defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A region of the given size anchored at the origin.
    #[inline]
    pub const fn sized(width: i32, height: i32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// The right edge (exclusive).
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point lies inside this region.
    #[inline]
    pub const fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The overlap of two regions, or [`Region::EMPTY`] when they are disjoint.
    #[inline]
    pub fn intersection(self, other: Region) -> Region {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }

    /// Move the region by an offset.
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.dx, y: self.y + offset.dy, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// A width and height in cells, with no position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

impl Extent {
    /// Zero by zero.
    pub const ZERO: Extent = Extent { width: 0, height: 0 };

    /// Create a new extent.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// The main axis of a container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    #[inline]
    pub const fn cross(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Build an offset that moves `main` cells along this axis.
    #[inline]
    pub const fn offset(self, main: i32) -> Offset {
        match self {
            Orientation::Horizontal => Offset { dx: main, dy: 0 },
            Orientation::Vertical => Offset { dx: 0, dy: main },
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_offset_arithmetic() {
        let p = Point::new(10, 7);
        let o = Offset::new(3, 2);
        assert_eq!(p - o, Point::new(7, 5));
        assert_eq!(p - o + o, p);
        assert_eq!(-o, Offset::new(-3, -2));
        assert_eq!(o + o, Offset::new(6, 4));
    }

    #[test]
    fn region_contains_point() {
        let r = Region::new(5, 5, 10, 10);
        assert!(r.contains(Point::new(5, 5)));
        assert!(r.contains(Point::new(14, 14)));
        assert!(!r.contains(Point::new(15, 5)));
        assert!(!r.contains(Point::new(4, 5)));
    }

    #[test]
    fn region_intersection_basic() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Region::new(5, 5, 5, 5));
    }

    #[test]
    fn region_intersection_disjoint() {
        let a = Region::new(0, 0, 5, 5);
        let b = Region::new(5, 0, 5, 5);
        assert_eq!(a.intersection(b), Region::EMPTY);
        assert!(a.intersection(b).is_empty());
    }

    #[test]
    fn region_translate() {
        let r = Region::sized(4, 2).translate(Offset::new(1, -1));
        assert_eq!(r, Region::new(1, -1, 4, 2));
    }

    #[test]
    fn orientation_cross_and_offset() {
        assert_eq!(Orientation::Horizontal.cross(), Orientation::Vertical);
        assert_eq!(Orientation::Vertical.offset(4), Offset::new(0, 4));
        assert_eq!(Orientation::Horizontal.offset(4), Offset::new(4, 0));
    }
}
