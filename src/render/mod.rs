//! Rendering: cells, visuals, and the backend boundary.

pub mod cell;
pub mod driver;
pub mod sink;
pub mod visual;

pub use cell::{overlay, Cell, Color, ColorPair};
pub use driver::Driver;
pub use sink::{CellUpdate, NullSink, RenderSink};
pub use visual::Visual;
