//! Layout: size model, two-axis rects and the flexible-size allocator.

pub mod allocator;
pub mod rect;
pub mod size;

pub use allocator::{allocate, DEFAULT_MAX_PASSES};
pub use rect::LayoutRect;
pub use size::{Size, SizeKind};
