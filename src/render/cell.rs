//! Cell and Color: the smallest addressable unit of a [`Visual`](super::Visual).
//!
//! Every channel of a cell (glyph, foreground, background) can be unset.
//! Unset channels are transparent when one cell is overlaid on another, which
//! is what lets a child widget leave its parent's background showing through.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A terminal color, or [`Color::None`] for "unset".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Transparent: inherit whatever lies underneath.
    #[default]
    None,
    /// The terminal's own default color.
    Reset,
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    /// An entry in the 256-color palette.
    Indexed(u8),
    /// A 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Whether this channel is unset.
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Color::None)
    }

    /// `self` unless it is unset, in which case `below`.
    #[inline]
    pub const fn or(self, below: Color) -> Color {
        match self {
            Color::None => below,
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// ColorPair
// ---------------------------------------------------------------------------

/// A foreground/background pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fore: Color,
    pub back: Color,
}

impl ColorPair {
    /// Both channels unset.
    pub const NONE: ColorPair = ColorPair { fore: Color::None, back: Color::None };

    /// Create a pair.
    #[inline]
    pub const fn new(fore: Color, back: Color) -> Self {
        Self { fore, back }
    }

    /// Lay `top` over `self`, keeping `self` wherever `top` is unset.
    #[inline]
    pub const fn overlay(self, top: ColorPair) -> ColorPair {
        ColorPair { fore: top.fore.or(self.fore), back: top.back.or(self.back) }
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One character position with its colors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    glyph: Option<char>,
    pub fore: Color,
    pub back: Color,
}

impl Cell {
    /// A fully unset cell.
    pub const EMPTY: Cell = Cell { glyph: None, fore: Color::None, back: Color::None };

    /// Create a cell. Whitespace glyphs are stored as a plain space.
    pub fn new(glyph: Option<char>, fore: Color, back: Color) -> Self {
        Self { glyph: glyph.map(normalize), fore, back }
    }

    /// A cell showing `glyph` with the given colors.
    pub fn styled(glyph: char, colors: ColorPair) -> Self {
        Self::new(Some(glyph), colors.fore, colors.back)
    }

    /// A space with the given colors.
    pub fn blank(colors: ColorPair) -> Self {
        Self::new(Some(' '), colors.fore, colors.back)
    }

    /// The glyph, if set.
    #[inline]
    pub const fn glyph(&self) -> Option<char> {
        self.glyph
    }

    /// Replace the glyph, normalizing whitespace.
    pub fn set_glyph(&mut self, glyph: Option<char>) {
        self.glyph = glyph.map(normalize);
    }

    /// The colors as a pair.
    #[inline]
    pub const fn colors(&self) -> ColorPair {
        ColorPair { fore: self.fore, back: self.back }
    }

    /// Whether no channel is unset.
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        self.glyph.is_some() && !self.fore.is_none() && !self.back.is_none()
    }
}

/// Lay `top` over `base`: each channel of `top` wins unless it is unset.
#[inline]
pub fn overlay(base: Cell, top: Cell) -> Cell {
    Cell {
        glyph: top.glyph.or(base.glyph),
        fore: top.fore.or(base.fore),
        back: top.back.or(base.back),
    }
}

fn normalize(glyph: char) -> char {
    if glyph.is_whitespace() {
        ' '
    } else {
        glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(glyph: char, fore: Color, back: Color) -> Cell {
        Cell::new(Some(glyph), fore, back)
    }

    #[test]
    fn whitespace_normalizes_to_space() {
        assert_eq!(Cell::new(Some('\t'), Color::None, Color::None).glyph(), Some(' '));
        assert_eq!(Cell::new(Some('\u{a0}'), Color::None, Color::None).glyph(), Some(' '));
        let mut cell = Cell::EMPTY;
        cell.set_glyph(Some('\n'));
        assert_eq!(cell.glyph(), Some(' '));
    }

    #[test]
    fn overlay_idempotent_for_resolved_cells() {
        let samples = [
            resolved('a', Color::Red, Color::Black),
            resolved(' ', Color::Rgb(1, 2, 3), Color::Indexed(7)),
            resolved('#', Color::Reset, Color::Reset),
        ];
        for cell in samples {
            assert_eq!(overlay(cell, cell), cell);
        }
    }

    #[test]
    fn overlay_prefers_set_channels_of_top() {
        let base = resolved('a', Color::Red, Color::Black);
        let top = Cell::new(Some('b'), Color::None, Color::Blue);
        let out = overlay(base, top);
        assert_eq!(out.glyph(), Some('b'));
        assert_eq!(out.fore, Color::Red);
        assert_eq!(out.back, Color::Blue);
    }

    #[test]
    fn overlay_keeps_base_glyph_when_top_unset() {
        let base = resolved('a', Color::Red, Color::Black);
        let top = Cell::new(None, Color::Green, Color::None);
        let out = overlay(base, top);
        assert_eq!(out.glyph(), Some('a'));
        assert_eq!(out.fore, Color::Green);
        assert_eq!(out.back, Color::Black);
    }

    #[test]
    fn overlay_on_opaque_base_is_resolved() {
        let base = resolved(' ', Color::White, Color::Black);
        assert!(overlay(base, Cell::EMPTY).is_resolved());
        assert!(overlay(base, Cell::new(Some('x'), Color::None, Color::Red)).is_resolved());
    }

    #[test]
    fn color_pair_overlay() {
        let base = ColorPair::new(Color::White, Color::Black);
        let top = ColorPair::new(Color::None, Color::Blue);
        assert_eq!(base.overlay(top), ColorPair::new(Color::White, Color::Blue));
    }
}
