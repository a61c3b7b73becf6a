//! Text engine: color-run spans, greedy word wrap and wrapped text areas.

pub mod area;
pub mod span;
pub mod wrap;

pub use area::TextArea;
pub use span::TextSpan;
pub use wrap::{wrap, wrap_str, DisplayLine};
