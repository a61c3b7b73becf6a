//! Visual: a widget's fully rendered appearance as a 2-D grid of cells.
//!
//! A widget reconstructs its own `Visual` whenever it redraws; containers
//! compose children by [`Visual::merge`]-ing their visuals in a fixed order,
//! so later merges win where children overlap.

use crate::error::{Result, UiError};
use crate::geometry::Region;

use super::cell::{overlay, Cell, Color, ColorPair};
use super::sink::CellUpdate;

/// A rectangular, row-major grid of [`Cell`]s. Never smaller than 1x1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visual {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Visual {
    /// A visual filled with unset cells.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, Cell::EMPTY)
    }

    /// A visual with every cell set to `cell`.
    pub fn filled(width: i32, height: i32, cell: Cell) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(UiError::InvalidVisualSize { width, height });
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(UiError::VisualTooLarge { width, height })?;
        Ok(Self { width, height, cells: vec![cell; len] })
    }

    /// A single unset cell.
    pub fn unit() -> Self {
        Self { width: 1, height: 1, cells: vec![Cell::EMPTY] }
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The whole visual as a region at the origin.
    #[inline]
    pub const fn bounds(&self) -> Region {
        Region::sized(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// The cell at (x, y), or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Replace the cell at (x, y). Returns `false` outside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// One row of cells.
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Apply `f` to every cell of `region` that lies inside the grid.
    fn for_region(&mut self, region: Region, mut f: impl FnMut(&mut Cell)) {
        let clip = region.intersection(self.bounds());
        for y in clip.y..clip.bottom() {
            let start = (y * self.width + clip.x) as usize;
            for cell in &mut self.cells[start..start + clip.width as usize] {
                f(cell);
            }
        }
    }

    /// Set the glyph of every cell in `region`.
    pub fn fill_char(&mut self, region: Region, glyph: char) {
        self.for_region(region, |cell| cell.set_glyph(Some(glyph)));
    }

    /// Set the foreground of every cell in `region`.
    pub fn fill_fore(&mut self, region: Region, color: Color) {
        self.for_region(region, |cell| cell.fore = color);
    }

    /// Set the background of every cell in `region`.
    pub fn fill_back(&mut self, region: Region, color: Color) {
        self.for_region(region, |cell| cell.back = color);
    }

    /// Replace every cell in `region`.
    pub fn fill_cell(&mut self, region: Region, cell: Cell) {
        self.for_region(region, |c| *c = cell);
    }

    /// Replace every cell of the visual.
    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` starting at (x, y), one glyph per cell, clipped at the edges.
    ///
    /// Returns the number of cells written.
    pub fn write_str(&mut self, x: i32, y: i32, text: &str, colors: ColorPair) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            if self.set(x + i as i32, y, Cell::styled(ch, colors)) {
                written += 1;
            }
        }
        written
    }

    /// Overlay a sub-rectangle of `source` onto this visual.
    ///
    /// The `width` x `height` block starting at (`src_x`, `src_y`) in `source`
    /// lands at (`dest_x`, `dest_y`). Whatever falls outside either buffer is
    /// silently dropped. Unset channels of the source leave the destination
    /// untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn merge(
        &mut self,
        source: &Visual,
        dest_x: i32,
        dest_y: i32,
        src_x: i32,
        src_y: i32,
        width: i32,
        height: i32,
    ) {
        // Clip the copy block against the source, then against the destination.
        let block = Region::new(src_x, src_y, width, height).intersection(source.bounds());
        if block.is_empty() {
            return;
        }
        let shift_x = dest_x - src_x;
        let shift_y = dest_y - src_y;
        let dest = Region::new(block.x + shift_x, block.y + shift_y, block.width, block.height)
            .intersection(self.bounds());

        for y in dest.y..dest.bottom() {
            for x in dest.x..dest.right() {
                let Some(top) = source.get(x - shift_x, y - shift_y) else {
                    continue;
                };
                let top = *top;
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = overlay(self.cells[i], top);
                }
            }
        }
    }

    /// Overlay all of `source` with its top-left corner at (`dest_x`, `dest_y`).
    pub fn merge_all(&mut self, source: &Visual, dest_x: i32, dest_y: i32) {
        self.merge(source, dest_x, dest_y, 0, 0, source.width, source.height);
    }

    /// The cells that differ from `previous`.
    ///
    /// When the dimensions differ every cell is reported. Cells beyond the
    /// terminal coordinate range (`u16`) are skipped.
    pub fn diff(&self, previous: Option<&Visual>) -> Vec<CellUpdate> {
        let same_shape = previous.is_some_and(|p| p.width == self.width && p.height == self.height);
        let mut updates = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let i = (y * self.width + x) as usize;
                let cell = self.cells[i];
                let changed = match previous {
                    Some(prev) if same_shape => prev.cells[i] != cell,
                    _ => true,
                };
                if !changed {
                    continue;
                }
                if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
                    updates.push(CellUpdate { x, y, cell });
                }
            }
        }
        updates
    }
}

// ===========================================================================
// Tests
// ===========================================================================
