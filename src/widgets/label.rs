//! Label widget: wrapped, colored, read-only text.
//!
//! The text is wrapped at the label's width. With auto-height enabled the
//! label fixes its own height to the number of display lines whenever that
//! number changes, and the parent re-runs layout.

use std::any::Any;
use std::str::FromStr;

use crate::config::Theme;
use crate::error::{Result, UiError};
use crate::layout::Size;
use crate::render::cell::{Cell, ColorPair};
use crate::text::{TextArea, TextSpan};
use crate::widget::{Context, Widget};

// ---------------------------------------------------------------------------
// Justify
// ---------------------------------------------------------------------------

/// Horizontal placement of each display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    /// Column at which a line of `len` cells starts in a row of `width`.
    pub fn start(self, len: i32, width: i32) -> i32 {
        let slack = (width - len).max(0);
        match self {
            Justify::Left => 0,
            Justify::Center => slack / 2,
            Justify::Right => slack,
        }
    }
}

impl FromStr for Justify {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Justify::Left),
            "center" | "centre" => Ok(Justify::Center),
            "right" => Ok(Justify::Right),
            _ => Err(UiError::UnknownJustification(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Read-only wrapped text.
///
/// # Examples
///
/// ```ignore
/// let label = Label::new(&theme, "Hello").with_justify(Justify::Center);
/// let id = tree.insert(label, LayoutRect::fixed(20, 1))?;
/// tree.with_widget_mut::<Label, _>(id, |l, cx| l.set_text(cx, "Bye"))?;
/// ```
pub struct Label {
    area: TextArea,
    background: ColorPair,
    justify: Justify,
    auto_height: bool,
}

impl Label {
    /// A label in the theme's base colors.
    pub fn new(theme: &Theme, text: &str) -> Self {
        Self::colored(text, theme.base)
    }

    /// A label whose text and background use `colors`.
    pub fn colored(text: &str, colors: ColorPair) -> Self {
        Self {
            area: TextArea::new(TextSpan::new(text, colors), 1),
            background: colors,
            justify: Justify::Left,
            auto_height: false,
        }
    }

    /// A label showing a prepared span.
    pub fn from_span(span: TextSpan) -> Self {
        let background = span.root_color();
        Self { area: TextArea::new(span, 1), background, justify: Justify::Left, auto_height: false }
    }

    /// Set the justification (builder).
    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Enable auto-height (builder).
    pub fn with_auto_height(mut self, enabled: bool) -> Self {
        self.auto_height = enabled;
        self
    }

    /// The full text.
    pub fn text(&self) -> String {
        self.area.text()
    }

    /// The wrapped text.
    pub fn area(&self) -> &TextArea {
        &self.area
    }

    /// Current justification.
    pub fn justify(&self) -> Justify {
        self.justify
    }

    /// Replace the text, keeping the root color.
    pub fn set_text(&mut self, cx: &mut Context<'_>, text: &str) -> Result<()> {
        let changed = self.area.set_text(text);
        self.fit_height(cx, changed)
    }

    /// Replace the text with a prepared span.
    pub fn set_span(&mut self, cx: &mut Context<'_>, span: TextSpan) -> Result<()> {
        let changed = self.area.set_span(span);
        self.fit_height(cx, changed)
    }

    /// Append text in the root color.
    pub fn write(&mut self, cx: &mut Context<'_>, text: &str) -> Result<()> {
        let changed = self.area.push_str(text);
        self.fit_height(cx, changed)
    }

    /// Append text in the given colors.
    pub fn write_colored(&mut self, cx: &mut Context<'_>, text: &str, colors: ColorPair) -> Result<()> {
        let changed = self.area.push_colored(text, colors);
        self.fit_height(cx, changed)
    }

    /// Change justification.
    pub fn set_justify(&mut self, justify: Justify) {
        self.justify = justify;
    }

    fn fit_height(&mut self, cx: &mut Context<'_>, changed: Option<usize>) -> Result<()> {
        if !self.auto_height {
            return Ok(());
        }
        let lines = changed.unwrap_or_else(|| self.area.height()) as i32;
        if lines == cx.height() && !cx.bounds().height_size().is_flexible() {
            return Ok(());
        }
        let mut bounds = cx.bounds();
        bounds.replace_height(Size::fixed(lines));
        cx.request_bounds(bounds)?;
        Ok(())
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn on_resize(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let changed = self.area.set_width(cx.width());
        self.fit_height(cx, changed)
    }

    fn refresh_visual(&mut self, cx: &mut Context<'_>) -> Result<()> {
        let width = cx.width();
        let (area, justify, background) = (&self.area, self.justify, self.background);
        let Some(visual) = cx.visual_mut() else {
            return Ok(());
        };
        visual.clear(Cell::blank(background));
        for (row, line) in area.lines().iter().enumerate() {
            let y = row as i32;
            if y >= visual.height() {
                break;
            }
            let x0 = justify.start(line.len as i32, width);
            let chars = area.span().chars();
            for (range, colors) in area.span().sub_span(line.visible()).runs() {
                let text: String = chars[line.start + range.start..line.start + range.end].iter().collect();
                visual.write_str(x0 + range.start as i32, y, &text, colors);
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;
    use crate::layout::LayoutRect;
    use crate::render::cell::Color;
    use crate::testing::visual_to_string;
    use crate::widget::WidgetTree;
    use crate::widgets::Stack;
    use pretty_assertions::assert_eq;

    fn show(tree: &WidgetTree, id: crate::widget::WidgetId) -> String {
        visual_to_string(tree.visual(id).unwrap())
    }

    // ── Justify ──────────────────────────────────────────────────────

    #[test]
    fn justify_parses_known_names() {
        assert_eq!("left".parse::<Justify>().unwrap(), Justify::Left);
        assert_eq!(" Center ".parse::<Justify>().unwrap(), Justify::Center);
        assert_eq!("RIGHT".parse::<Justify>().unwrap(), Justify::Right);
        assert!(matches!("middle".parse::<Justify>(), Err(UiError::UnknownJustification(s)) if s == "middle"));
    }

    #[test]
    fn justify_start_columns() {
        assert_eq!(Justify::Left.start(3, 10), 0);
        assert_eq!(Justify::Center.start(3, 10), 3);
        assert_eq!(Justify::Right.start(3, 10), 7);
        assert_eq!(Justify::Right.start(12, 10), 0);
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[test]
    fn wraps_at_width() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let id = tree.insert(Label::new(&theme, "hello world foo"), LayoutRect::fixed(6, 3)).unwrap();
        assert_eq!(show(&tree, id), "hello \nworld \nfoo   ");
    }

    #[test]
    fn justified_rows() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let center = tree
            .insert(Label::new(&theme, "ab").with_justify(Justify::Center), LayoutRect::fixed(6, 1))
            .unwrap();
        let right = tree.insert(Label::new(&theme, "ab").with_justify(Justify::Right), LayoutRect::fixed(6, 1)).unwrap();
        assert_eq!(show(&tree, center), "  ab  ");
        assert_eq!(show(&tree, right), "    ab");
    }

    #[test]
    fn colored_runs_land_on_cells() {
        let base = ColorPair::new(Color::White, Color::Black);
        let red = ColorPair::new(Color::Red, Color::Black);
        let mut span = TextSpan::new("ab", base);
        span.push_colored("cd", red);
        let mut tree = WidgetTree::new();
        let id = tree.insert(Label::from_span(span), LayoutRect::fixed(4, 1)).unwrap();
        let visual = tree.visual(id).unwrap();
        assert_eq!(visual.get(1, 0).unwrap().colors(), base);
        assert_eq!(visual.get(2, 0).unwrap().colors(), red);
    }

    // ── Commands ─────────────────────────────────────────────────────

    #[test]
    fn set_text_and_write() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let id = tree.insert(Label::new(&theme, "one"), LayoutRect::fixed(8, 1)).unwrap();
        tree.with_widget_mut::<Label, _>(id, |l, cx| l.set_text(cx, "two")).unwrap();
        tree.with_widget_mut::<Label, _>(id, |l, cx| l.write(cx, "!")).unwrap();
        assert_eq!(tree.widget::<Label>(id).unwrap().text(), "two!");
        assert_eq!(show(&tree, id), "two!    ");
    }

    #[test]
    fn auto_height_follows_line_count() {
        let theme = Theme::default();
        let mut tree = WidgetTree::new();
        let column = tree.insert(Stack::new(Orientation::Vertical), LayoutRect::fixed(5, 6)).unwrap();
        let label = tree
            .insert_child(column, Label::new(&theme, "aaa").with_auto_height(true), LayoutRect::fixed(5, 1))
            .unwrap();
        assert_eq!(tree.bounds(label).unwrap().height(), 1);

        tree.with_widget_mut::<Label, _>(label, |l, cx| l.write(cx, " bbb ccc")).unwrap();
        assert_eq!(tree.bounds(label).unwrap().height(), 3);
        assert_eq!(visual_to_string(tree.visual(column).unwrap()).lines().take(3).collect::<Vec<_>>(), ["aaa  ", "bbb  ", "ccc  "]);
    }
}
