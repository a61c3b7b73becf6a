//! Snapshot rendering helpers.
//!
//! Functions for converting composed [`Visual`]s into plain-text strings
//! suitable for snapshot testing and assertions, plus a [`RecordingSink`] that
//! keeps every frame the interface presents.

use crate::error::Result;
use crate::geometry::Region;
use crate::render::sink::RenderSink;
use crate::render::visual::Visual;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a visual to a plain text string.
///
/// Each row becomes one line, lines are separated by `'\n'` and the final line
/// has no trailing newline. Rows keep their full width; cells without a glyph
/// print as a space.
///
/// # Examples
///
/// ```ignore
/// use cellframe::testing::visual_to_string;
///
/// let id = tree.insert(Label::new(&theme, "hi"), LayoutRect::fixed(3, 1))?;
/// assert_eq!(visual_to_string(tree.visual(id).unwrap()), "hi ");
/// ```
pub fn visual_to_string(visual: &Visual) -> String {
    visual_region_to_string(visual, visual.bounds())
}

/// Convert the part of `visual` inside `region` to a plain text string.
///
/// The region is clipped to the visual first. Same layout as
/// [`visual_to_string`].
pub fn visual_region_to_string(visual: &Visual, region: Region) -> String {
    let clip = region.intersection(visual.bounds());
    if clip.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(clip.height as usize);
    for y in clip.y..clip.bottom() {
        let row: String = (clip.x..clip.right())
            .map(|x| visual.get(x, y).and_then(|c| c.glyph()).unwrap_or(' '))
            .collect();
        lines.push(row);
    }
    lines.join("\n")
}

/// Like [`visual_to_string`], with trailing spaces trimmed from every row.
pub fn visual_to_trimmed_string(visual: &Visual) -> String {
    visual_to_string(visual).lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// A [`RenderSink`] that keeps a copy of every frame it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<Visual>,
}

impl RecordingSink {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame received, oldest first.
    pub fn frames(&self) -> &[Visual] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<&Visual> {
        self.frames.last()
    }

    /// Number of frames received.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Forget all recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderSink for RecordingSink {
    fn set_visual(&mut self, visual: &Visual) -> Result<()> {
        self.frames.push(visual.clone());
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell::{Cell, ColorPair};
    use pretty_assertions::assert_eq;

    fn sample() -> Visual {
        let mut v = Visual::new(4, 2).unwrap();
        v.write_str(0, 0, "ab", ColorPair::NONE);
        v.write_str(1, 1, "xyz", ColorPair::NONE);
        v
    }

    // ── visual_to_string ─────────────────────────────────────────────

    #[test]
    fn unset_glyphs_print_as_spaces() {
        assert_eq!(visual_to_string(&sample()), "ab  \n xyz");
    }

    #[test]
    fn trimmed_variant() {
        assert_eq!(visual_to_trimmed_string(&sample()), "ab\n xyz");
    }

    #[test]
    fn region_is_clipped() {
        let v = sample();
        assert_eq!(visual_region_to_string(&v, Region::new(1, 0, 2, 2)), "b \nxy");
        assert_eq!(visual_region_to_string(&v, Region::new(3, 1, 5, 5)), "z");
        assert_eq!(visual_region_to_string(&v, Region::new(9, 9, 1, 1)), "");
    }

    // ── RecordingSink ────────────────────────────────────────────────

    #[test]
    fn records_frames_in_order() {
        let mut sink = RecordingSink::new();
        assert!(sink.last_frame().is_none());
        sink.set_visual(&sample()).unwrap();
        sink.set_visual(&Visual::filled(1, 1, Cell::styled('#', ColorPair::NONE)).unwrap()).unwrap();
        assert_eq!(sink.frame_count(), 2);
        assert_eq!(visual_to_string(sink.last_frame().unwrap()), "#");
        sink.clear();
        assert_eq!(sink.frame_count(), 0);
    }
}
