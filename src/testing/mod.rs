//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive an [`Interface`](crate::interface::Interface)
//! without a real terminal. Use [`visual_to_string`] and related helpers to
//! capture composed output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{visual_region_to_string, visual_to_string, visual_to_trimmed_string, RecordingSink};
