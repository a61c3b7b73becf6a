//! Interface configuration and the color theme.
//!
//! There is no process-wide default theme: an [`InterfaceConfig`] carries a
//! [`Theme`] value, and widgets are handed a `&Theme` when they are built.

use crate::layout::DEFAULT_MAX_PASSES;
use crate::render::cell::{Color, ColorPair};

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Colors used by the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Default text and background.
    pub base: ColorPair,
    /// Buttons at rest.
    pub button: ColorPair,
    /// Anything under the pointer.
    pub hover: ColorPair,
    /// Focused editable widgets.
    pub focus: ColorPair,
    /// The text cursor cell.
    pub cursor: ColorPair,
    /// Frame borders and titles.
    pub border: ColorPair,
    /// Scrollbar track.
    pub scrollbar_track: ColorPair,
    /// Scrollbar thumb.
    pub scrollbar_thumb: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: ColorPair::new(Color::White, Color::Black),
            button: ColorPair::new(Color::Black, Color::Grey),
            hover: ColorPair::new(Color::Black, Color::Cyan),
            focus: ColorPair::new(Color::White, Color::DarkBlue),
            cursor: ColorPair::new(Color::Black, Color::White),
            border: ColorPair::new(Color::Grey, Color::None),
            scrollbar_track: ColorPair::new(Color::DarkGrey, Color::DarkGrey),
            scrollbar_thumb: ColorPair::new(Color::Grey, Color::Grey),
        }
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base colors (builder).
    pub fn with_base(mut self, base: ColorPair) -> Self {
        self.base = base;
        self
    }

    /// Set the hover colors (builder).
    pub fn with_hover(mut self, hover: ColorPair) -> Self {
        self.hover = hover;
        self
    }

    /// Set the focus colors (builder).
    pub fn with_focus(mut self, focus: ColorPair) -> Self {
        self.focus = focus;
        self
    }
}

// ---------------------------------------------------------------------------
// InterfaceConfig
// ---------------------------------------------------------------------------

/// Configuration for an [`Interface`](crate::interface::Interface).
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    /// Theme threaded into the widget tree.
    pub theme: Theme,
    /// Whether Tab / Shift+Tab move focus through the focus chain.
    pub tab_navigation: bool,
    /// Upper bound on proportional allocator passes.
    pub max_layout_passes: usize,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self { theme: Theme::default(), tab_navigation: true, max_layout_passes: DEFAULT_MAX_PASSES }
    }
}

impl InterfaceConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the theme (builder).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable Tab focus traversal (builder).
    pub fn with_tab_navigation(mut self, enabled: bool) -> Self {
        self.tab_navigation = enabled;
        self
    }

    /// Set the allocator pass bound (builder). Zero is raised to one.
    pub fn with_max_layout_passes(mut self, passes: usize) -> Self {
        self.max_layout_passes = passes.max(1);
        self
    }
}
