//! Percent bar widget for terminal rows.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::color::{Rgb, contrasting_color};
use crate::percent_bar::fill_width;
use crate::theme::Palette;

/// A horizontal bar showing an item's share of its parent.
///
/// Terminal cells have no room for a border, so the whole area is fill:
/// the filled width is [`fill_width`] with a zero pen width.
pub struct SizeBar {
    /// Percentage to display (0 - 100).
    percent: f64,
    /// Style for filled portion.
    filled_style: Style,
    /// Style for empty portion.
    empty_style: Style,
    /// Character for filled portion.
    filled_char: char,
    /// Character for empty portion.
    empty_char: char,
}

impl SizeBar {
    /// Create a new size bar.
    pub fn new(percent: f64) -> Self {
        Self {
            percent,
            filled_style: Style::default(),
            empty_style: Style::default(),
            filled_char: '█',
            empty_char: '░',
        }
    }

    /// Color the bar from a palette for a row at `depth`.
    ///
    /// The empty portion uses the bar background, nudged away from the
    /// surface color if the two coincide.
    pub fn palette(self, palette: &Palette, depth: usize) -> Self {
        let surface = palette.surface;
        self.colors(palette.fill_color(depth), palette.bar_background, surface)
    }

    /// Set explicit fill, bar background and surface colors.
    pub fn colors(mut self, fill: Rgb, bar_background: Rgb, surface: Rgb) -> Self {
        self.filled_style = Style::new()
            .fg(contrasting_color(fill, surface).into())
            .bg(surface.into());
        self.empty_style = Style::new()
            .fg(contrasting_color(bar_background, surface).into())
            .bg(surface.into());
        self
    }

    /// Set the style for the filled portion.
    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }

    /// Set the style for the empty portion.
    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }

    /// Set custom characters.
    pub fn chars(mut self, filled: char, empty: char) -> Self {
        self.filled_char = filled;
        self.empty_char = empty;
        self
    }
}

impl Widget for SizeBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = fill_width(self.percent, i32::from(area.width), 0);

        for x in 0..area.width {
            let (symbol, style) = if i32::from(x) < filled_width {
                (self.filled_char, self.filled_style)
            } else {
                (self.empty_char, self.empty_style)
            };

            buf[(area.x + x, area.y)].set_char(symbol).set_style(style);
        }
    }
}
