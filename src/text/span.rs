//! TextSpan: text with color runs.
//!
//! Colors are stored as a sorted map from character index to the color pair in
//! effect from that index onward, until the next key. Index 0 always has an
//! entry, so every character has a resolvable color.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::render::cell::ColorPair;

/// Text plus its color runs. Indices are in characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    chars: Vec<char>,
    colors: BTreeMap<usize, ColorPair>,
}

impl TextSpan {
    /// A span with a single root color.
    pub fn new(text: &str, colors: ColorPair) -> Self {
        let mut map = BTreeMap::new();
        map.insert(0, colors);
        Self { chars: text.chars().collect(), colors: map }
    }

    /// An empty span.
    pub fn empty(colors: ColorPair) -> Self {
        Self::new("", colors)
    }

    /// Number of characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the span has no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The text as a `String`.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// The text of a character range (clamped).
    pub fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.chars[range].iter().collect()
    }

    /// The color pair in effect at `index`.
    pub fn color_at(&self, index: usize) -> ColorPair {
        self.colors
            .range(..=index)
            .next_back()
            .map(|(_, c)| *c)
            .unwrap_or_default()
    }

    /// The root color (at index 0).
    pub fn root_color(&self) -> ColorPair {
        self.color_at(0)
    }

    /// Make `colors` take effect from `index` onward (clamped to the length).
    pub fn set_color(&mut self, index: usize, colors: ColorPair) {
        let index = index.min(self.len());
        self.colors.insert(index, colors);
        self.compact();
    }

    /// Color `range` with `colors`, restoring the previous color after it.
    pub fn set_color_range(&mut self, range: Range<usize>, colors: ColorPair) {
        let range = self.clamp_range(range);
        if range.is_empty() {
            return;
        }
        let after = self.color_at(range.end);
        let inner: Vec<usize> = self.colors.range(range.start + 1..range.end).map(|(k, _)| *k).collect();
        for key in inner {
            self.colors.remove(&key);
        }
        self.colors.insert(range.start, colors);
        if range.end < self.len() {
            self.colors.insert(range.end, after);
        }
        self.compact();
    }

    /// Append text in the color currently in effect at the end.
    pub fn push_str(&mut self, text: &str) {
        self.chars.extend(text.chars());
    }

    /// Append text in its own color.
    pub fn push_colored(&mut self, text: &str, colors: ColorPair) {
        if text.is_empty() {
            return;
        }
        let start = self.len();
        self.chars.extend(text.chars());
        self.colors.insert(start, colors);
        self.compact();
    }

    /// Append another span, keeping its runs.
    pub fn append(&mut self, other: &TextSpan) {
        let start = self.len();
        self.chars.extend_from_slice(&other.chars);
        for (&index, &colors) in &other.colors {
            if index < other.len() || other.is_empty() {
                self.colors.insert(start + index, colors);
            }
        }
        self.compact();
    }

    /// Insert text at `index` (clamped). The new text takes the color of the
    /// character before it, so an insert at a run boundary extends the
    /// earlier run. At index 0 it joins the first run. Later runs shift
    /// right.
    pub fn insert_str(&mut self, index: usize, text: &str) {
        let index = index.min(self.len());
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        if count == 0 {
            return;
        }
        self.chars.splice(index..index, inserted);
        let shifted: Vec<(usize, ColorPair)> = self
            .colors
            .iter()
            .map(|(&k, &c)| if k > index || (k == index && k != 0) { (k + count, c) } else { (k, c) })
            .collect();
        self.colors = shifted.into_iter().collect();
        self.compact();
    }

    /// Remove a character range (clamped). The color in effect right after
    /// the removed range carries over to the character that takes its place.
    pub fn remove(&mut self, range: Range<usize>) {
        let range = self.clamp_range(range);
        let count = range.len();
        if count == 0 {
            return;
        }
        let resume = self.color_at(range.end);
        self.chars.drain(range.clone());
        let mut next = BTreeMap::new();
        for (&k, &c) in &self.colors {
            if k < range.start {
                next.insert(k, c);
            } else if k >= range.end {
                next.insert(k - count, c);
            }
        }
        next.entry(range.start).or_insert(resume);
        next.entry(0).or_insert(resume);
        self.colors = next;
        self.compact();
    }

    /// Replace the whole text, keeping only the root color.
    pub fn set_text(&mut self, text: &str) {
        let root = self.root_color();
        *self = TextSpan::new(text, root);
    }

    /// A copy of `range` (clamped) with the color at its start and every
    /// change strictly inside it.
    pub fn sub_span(&self, range: Range<usize>) -> TextSpan {
        let range = self.clamp_range(range);
        let mut colors = BTreeMap::new();
        colors.insert(0, self.color_at(range.start));
        for (&k, &c) in self.colors.range(range.start + 1..range.end.max(range.start + 1)) {
            colors.insert(k - range.start, c);
        }
        TextSpan { chars: self.chars[range].to_vec(), colors }
    }

    /// Maximal runs of uniformly colored characters, in order.
    pub fn runs(&self) -> impl Iterator<Item = (Range<usize>, ColorPair)> + '_ {
        let len = self.len();
        let keys: Vec<(usize, ColorPair)> =
            self.colors.iter().filter(|(k, _)| **k < len).map(|(k, c)| (*k, *c)).collect();
        (0..keys.len()).map(move |i| {
            let end = keys.get(i + 1).map_or(len, |(k, _)| *k);
            (keys[i].0..end, keys[i].1)
        })
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        start..end
    }

    /// Drop keys past the end (except 0) and keys that repeat the previous color.
    fn compact(&mut self) {
        let len = self.len();
        let mut previous: Option<ColorPair> = None;
        let mut next = BTreeMap::new();
        for (&k, &c) in &self.colors {
            if k != 0 && (k > len || previous == Some(c)) {
                continue;
            }
            next.insert(k, c);
            previous = Some(c);
        }
        if !next.contains_key(&0) {
            next.insert(0, self.colors.values().next().copied().unwrap_or_default());
        }
        self.colors = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cell::Color;
    use pretty_assertions::assert_eq;

    fn pair(fore: Color) -> ColorPair {
        ColorPair::new(fore, Color::None)
    }

    fn runs(span: &TextSpan) -> Vec<(Range<usize>, Color)> {
        span.runs().map(|(r, c)| (r, c.fore)).collect()
    }

    #[test]
    fn root_color_always_present() {
        let span = TextSpan::new("abc", pair(Color::Red));
        assert_eq!(span.color_at(0), pair(Color::Red));
        assert_eq!(span.color_at(99), pair(Color::Red));
        let empty = TextSpan::empty(pair(Color::Blue));
        assert_eq!(empty.root_color(), pair(Color::Blue));
    }

    #[test]
    fn set_color_range_restores_following_color() {
        let mut span = TextSpan::new("hello world", pair(Color::White));
        span.set_color_range(0..5, pair(Color::Red));
        assert_eq!(runs(&span), vec![(0..5, Color::Red), (5..11, Color::White)]);
    }

    #[test]
    fn push_colored_adds_run() {
        let mut span = TextSpan::new("ab", pair(Color::White));
        span.push_colored("cd", pair(Color::Green));
        span.push_str("e");
        assert_eq!(span.text(), "abcde");
        assert_eq!(runs(&span), vec![(0..2, Color::White), (2..5, Color::Green)]);
    }

    #[test]
    fn insert_takes_color_at_index_and_shifts_runs() {
        let mut span = TextSpan::new("abcd", pair(Color::White));
        span.set_color(2, pair(Color::Red));
        span.insert_str(1, "XY");
        assert_eq!(span.text(), "aXYbcd");
        assert_eq!(runs(&span), vec![(0..4, Color::White), (4..6, Color::Red)]);
    }

    #[test]
    fn insert_at_run_boundary_extends_earlier_run() {
        let mut span = TextSpan::new("abcd", pair(Color::White));
        span.set_color(2, pair(Color::Red));
        span.insert_str(2, "_");
        assert_eq!(runs(&span), vec![(0..3, Color::White), (3..5, Color::Red)]);
    }

    #[test]
    fn remove_shifts_runs() {
        let mut span = TextSpan::new("abcdef", pair(Color::White));
        span.set_color_range(2..4, pair(Color::Red));
        span.remove(1..3);
        assert_eq!(span.text(), "adef");
        assert_eq!(runs(&span), vec![(0..1, Color::White), (1..2, Color::Red), (2..4, Color::White)]);
    }

    #[test]
    fn remove_from_start_keeps_index_zero() {
        let mut span = TextSpan::new("abcd", pair(Color::White));
        span.set_color(1, pair(Color::Red));
        span.remove(0..2);
        assert_eq!(span.text(), "cd");
        assert_eq!(span.color_at(0), pair(Color::Red));
    }

    #[test]
    fn sub_span_preserves_start_color_and_inner_changes() {
        let mut span = TextSpan::new("0123456789", pair(Color::White));
        span.set_color(3, pair(Color::Red));
        span.set_color(6, pair(Color::Blue));
        span.set_color(9, pair(Color::Green));
        let sub = span.sub_span(4..9);
        assert_eq!(sub.text(), "45678");
        assert_eq!(runs(&sub), vec![(0..2, Color::Red), (2..5, Color::Blue)]);
    }

    #[test]
    fn sub_span_clamps() {
        let span = TextSpan::new("abc", pair(Color::White));
        assert_eq!(span.sub_span(2..10).text(), "c");
        assert_eq!(span.sub_span(5..10).text(), "");
    }

    #[test]
    fn append_keeps_other_runs() {
        let mut a = TextSpan::new("ab", pair(Color::White));
        let mut b = TextSpan::new("cd", pair(Color::Red));
        b.set_color(1, pair(Color::Blue));
        a.append(&b);
        assert_eq!(runs(&a), vec![(0..2, Color::White), (2..3, Color::Red), (3..4, Color::Blue)]);
    }

    #[test]
    fn set_text_keeps_root_color() {
        let mut span = TextSpan::new("abc", pair(Color::Yellow));
        span.set_color(1, pair(Color::Red));
        span.set_text("xyz");
        assert_eq!(runs(&span), vec![(0..3, Color::Yellow)]);
    }
}
