//! Greedy word wrap.
//!
//! Text is split into paragraphs at `'\n'` (hard breaks) and each paragraph is
//! broken greedily at whitespace (soft breaks). A word that is wider than the
//! line is never split; it gets a line of its own and overflows.

use std::ops::Range;

/// One display line of wrapped text, as character indices into the source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DisplayLine {
    /// Index of the first character on the line.
    pub start: usize,
    /// Number of visible characters (trailing whitespace excluded).
    pub len: usize,
    /// Index where the next line starts. Includes absorbed whitespace and the
    /// newline for hard breaks.
    pub end: usize,
    /// Whether the line was terminated by a `'\n'`.
    pub hard_break: bool,
}

impl DisplayLine {
    /// The visible character range.
    #[inline]
    pub fn visible(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Wrap `chars` at `width` columns. Always yields at least one line.
pub fn wrap(chars: &[char], width: i32) -> Vec<DisplayLine> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut start = 0;
    loop {
        let para_end = chars[start..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |p| start + p);
        wrap_paragraph(chars, start, para_end, width, &mut lines);
        if para_end == chars.len() {
            break;
        }
        if let Some(last) = lines.last_mut() {
            last.hard_break = true;
            last.end = para_end + 1;
        }
        start = para_end + 1;
    }
    lines
}

/// Convenience: wrap and return the visible text of each line.
pub fn wrap_str(text: &str, width: i32) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    wrap(&chars, width)
        .iter()
        .map(|line| chars[line.visible()].iter().collect())
        .collect()
}

fn wrap_paragraph(chars: &[char], start: usize, end: usize, width: usize, lines: &mut Vec<DisplayLine>) {
    let mut line_start = start;
    loop {
        if end - line_start <= width {
            lines.push(line(chars, line_start, end, end));
            return;
        }

        // Leading whitespace only survives at the start of a paragraph; a break
        // inside it would produce an empty line.
        let word_start = skip_spaces(chars, line_start, end);
        let limit = line_start + width;
        let soft = if word_start < limit {
            (word_start + 1..=limit).rev().find(|&i| is_space(chars[i]))
        } else {
            None
        };
        let brk = match soft {
            Some(b) => b,
            None => (limit.max(word_start)..end).find(|&i| is_space(chars[i])).unwrap_or(end),
        };

        let next = skip_spaces(chars, brk, end);
        lines.push(line(chars, line_start, brk, next));
        if next == end {
            return;
        }
        line_start = next;
    }
}

fn line(chars: &[char], start: usize, visible_end: usize, end: usize) -> DisplayLine {
    let mut stop = visible_end;
    while stop > start && is_space(chars[stop - 1]) {
        stop -= 1;
    }
    DisplayLine { start, len: stop - start, end, hard_break: false }
}

fn skip_spaces(chars: &[char], mut i: usize, end: usize) -> usize {
    while i < end && is_space(chars[i]) {
        i += 1;
    }
    i
}

#[inline]
fn is_space(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}
