//! Size model: fixed and flexible extents along one axis.

use crate::error::{Result, UiError};

/// How a [`Size`] participates in allocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeKind {
    /// Never resized by the allocator.
    Fixed,
    /// Grows or shrinks in proportion to `preferred`, never below `min`.
    Flex { preferred: i32, min: i32 },
}

/// An extent along one axis.
///
/// `actual` is what the widget is currently laid out at. For flexible sizes
/// the actual value is kept at or above `min` at all times.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    actual: i32,
    kind: SizeKind,
}

impl Size {
    /// A fixed size.
    pub const fn fixed(actual: i32) -> Self {
        Self { actual, kind: SizeKind::Fixed }
    }

    /// A flexible size starting at its preferred value.
    pub fn flex(preferred: i32, min: i32) -> Result<Self> {
        if preferred < min {
            return Err(UiError::BelowMinimum { value: preferred, min });
        }
        Ok(Self { actual: preferred, kind: SizeKind::Flex { preferred, min } })
    }

    /// The current laid-out value.
    #[inline]
    pub const fn actual(&self) -> i32 {
        self.actual
    }

    /// The allocation kind.
    #[inline]
    pub const fn kind(&self) -> SizeKind {
        self.kind
    }

    /// Whether the allocator may resize this size.
    #[inline]
    pub const fn is_flexible(&self) -> bool {
        matches!(self.kind, SizeKind::Flex { .. })
    }

    /// The smallest legal actual value. Fixed sizes report their actual value,
    /// since that is what they always occupy.
    #[inline]
    pub const fn min(&self) -> i32 {
        match self.kind {
            SizeKind::Fixed => self.actual,
            SizeKind::Flex { min, .. } => min,
        }
    }

    /// The weight used for proportional distribution.
    #[inline]
    pub const fn preferred(&self) -> i32 {
        match self.kind {
            SizeKind::Fixed => self.actual,
            SizeKind::Flex { preferred, .. } => preferred,
        }
    }

    /// Set the actual value. Returns whether it changed.
    ///
    /// Fixed sizes accept any non-negative value; flexible sizes reject values
    /// below their minimum.
    pub fn set_actual(&mut self, value: i32) -> Result<bool> {
        let floor = match self.kind {
            SizeKind::Fixed => 0,
            SizeKind::Flex { min, .. } => min,
        };
        if value < floor {
            return Err(UiError::BelowMinimum { value, min: floor });
        }
        let changed = self.actual != value;
        self.actual = value;
        Ok(changed)
    }

    /// Reset a flexible size to its preferred value. No-op for fixed sizes.
    pub fn reset_to_preferred(&mut self) {
        if let SizeKind::Flex { preferred, .. } = self.kind {
            self.actual = preferred;
        }
    }

    /// A size offset by `delta`, keeping the same kind.
    ///
    /// Preferred and min move together so the result allocates the same way
    /// among siblings; min never drops below zero.
    pub fn with_relative_size(&self, delta: i32) -> Size {
        match self.kind {
            SizeKind::Fixed => Size::fixed((self.actual + delta).max(0)),
            SizeKind::Flex { preferred, min } => {
                let min = (min + delta).max(0);
                let preferred = (preferred + delta).max(min);
                Size {
                    actual: (self.actual + delta).max(min),
                    kind: SizeKind::Flex { preferred, min },
                }
            }
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::fixed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flex_starts_at_preferred() {
        let s = Size::flex(10, 2).unwrap();
        assert_eq!(s.actual(), 10);
        assert_eq!(s.preferred(), 10);
        assert_eq!(s.min(), 2);
        assert!(s.is_flexible());
    }

    #[test]
    fn flex_rejects_preferred_below_min() {
        assert!(matches!(Size::flex(1, 3), Err(UiError::BelowMinimum { value: 1, min: 3 })));
    }

    #[test]
    fn set_actual_reports_change() {
        let mut s = Size::flex(5, 1).unwrap();
        assert!(s.set_actual(4).unwrap());
        assert!(!s.set_actual(4).unwrap());
    }

    #[test]
    fn set_actual_below_min_fails_without_mutation() {
        let mut s = Size::flex(5, 3).unwrap();
        let err = s.set_actual(2).unwrap_err();
        assert!(matches!(err, UiError::BelowMinimum { value: 2, min: 3 }));
        assert_eq!(s.actual(), 5);
    }

    #[test]
    fn fixed_rejects_negative() {
        let mut s = Size::fixed(3);
        assert!(s.set_actual(-1).is_err());
        assert!(s.set_actual(0).unwrap());
        assert!(!s.is_flexible());
    }

    #[test]
    fn relative_size_shifts_flex_bounds() {
        let s = Size::flex(10, 4).unwrap().with_relative_size(-2);
        assert_eq!(s.kind(), SizeKind::Flex { preferred: 8, min: 2 });
        assert_eq!(s.actual(), 8);
    }

    #[test]
    fn relative_size_clamps_min_at_zero() {
        let s = Size::flex(3, 1).unwrap().with_relative_size(-2);
        assert_eq!(s.min(), 0);
        assert_eq!(s.actual(), 1);
    }

    #[test]
    fn relative_size_fixed() {
        assert_eq!(Size::fixed(5).with_relative_size(-2), Size::fixed(3));
        assert_eq!(Size::fixed(1).with_relative_size(-2), Size::fixed(0));
    }

    #[test]
    fn reset_to_preferred() {
        let mut s = Size::flex(6, 1).unwrap();
        s.set_actual(2).unwrap();
        s.reset_to_preferred();
        assert_eq!(s.actual(), 6);
    }
}
