//! LayoutRect: a width and a height [`Size`] with change detection.

use crate::error::Result;
use crate::geometry::{Orientation, Point, Region};

use super::size::Size;

/// The two-axis extent of a widget.
///
/// Setters return `true` exactly when an actual value changed; callers treat
/// that as the "size changed" notification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutRect {
    width: Size,
    height: Size,
}

impl LayoutRect {
    /// Create a rect from two sizes.
    pub const fn new(width: Size, height: Size) -> Self {
        Self { width, height }
    }

    /// A rect with two fixed sizes.
    pub const fn fixed(width: i32, height: i32) -> Self {
        Self { width: Size::fixed(width), height: Size::fixed(height) }
    }

    /// The width size.
    #[inline]
    pub const fn width_size(&self) -> &Size {
        &self.width
    }

    /// The height size.
    #[inline]
    pub const fn height_size(&self) -> &Size {
        &self.height
    }

    /// Actual width.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width.actual()
    }

    /// Actual height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height.actual()
    }

    /// The size along `orientation`'s main axis.
    pub const fn main(&self, orientation: Orientation) -> &Size {
        match orientation {
            Orientation::Horizontal => &self.width,
            Orientation::Vertical => &self.height,
        }
    }

    /// The size along the axis perpendicular to `orientation`.
    pub const fn cross(&self, orientation: Orientation) -> &Size {
        self.main(orientation.cross())
    }

    /// Mutable main-axis size. Changes made through this reference are not
    /// reported; prefer the `set_*` methods when the change matters.
    pub fn main_mut(&mut self, orientation: Orientation) -> &mut Size {
        match orientation {
            Orientation::Horizontal => &mut self.width,
            Orientation::Vertical => &mut self.height,
        }
    }

    /// Mutable cross-axis size.
    pub fn cross_mut(&mut self, orientation: Orientation) -> &mut Size {
        self.main_mut(orientation.cross())
    }

    /// Replace the width size wholesale. Returns whether the actual width changed.
    pub fn replace_width(&mut self, width: Size) -> bool {
        let changed = self.width.actual() != width.actual();
        self.width = width;
        changed
    }

    /// Replace the height size wholesale. Returns whether the actual height changed.
    pub fn replace_height(&mut self, height: Size) -> bool {
        let changed = self.height.actual() != height.actual();
        self.height = height;
        changed
    }

    /// Set the actual width.
    pub fn set_width(&mut self, width: i32) -> Result<bool> {
        self.width.set_actual(width)
    }

    /// Set the actual height.
    pub fn set_height(&mut self, height: i32) -> Result<bool> {
        self.height.set_actual(height)
    }

    /// Set both actual values. Neither is changed if either is rejected.
    pub fn set_actual(&mut self, width: i32, height: i32) -> Result<bool> {
        let mut w = self.width;
        let mut h = self.height;
        let changed = w.set_actual(width)? | h.set_actual(height)?;
        self.width = w;
        self.height = h;
        Ok(changed)
    }

    /// The rect placed with its top-left corner at `origin`.
    pub const fn region_at(&self, origin: Point) -> Region {
        Region::new(origin.x, origin.y, self.width(), self.height())
    }
}
