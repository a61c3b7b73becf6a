//! The boundary between the widget tree and a rendering backend.

use crate::error::Result;

use super::cell::Cell;
use super::visual::Visual;

/// A single cell that changed between two frames.
///
/// Used by incremental backends to emit only what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

/// Receives the fully composed root [`Visual`] every time a render reaches
/// the top of the tree.
pub trait RenderSink {
    /// Present a new frame.
    fn set_visual(&mut self, visual: &Visual) -> Result<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn set_visual(&mut self, visual: &Visual) -> Result<()> {
        (**self).set_visual(visual)
    }
}

/// A sink that drops every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn set_visual(&mut self, _visual: &Visual) -> Result<()> {
        Ok(())
    }
}
