//! Percent bar geometry.
//!
//! Turns a percentage into an ordered list of paint commands for a table
//! cell: erase, bar background, filled portion, then a four-tone border that
//! gives the bar a sunken 3D look. The caller owns the drawing surface and
//! replays the commands in order.

use crate::color::{Rgb, contrasting_color};

/// Border pen width in pixels.
pub const PEN_WIDTH: i32 = 2;

/// Vertical gap between the cell edge and the bar.
pub const EXTRA_MARGIN: i32 = 3;

/// Width of the filled portion of a bar.
///
/// `floor((total_width - 2 * pen_width) * percent / 100)`, with `percent`
/// clamped into `[0, 100]`. Zero when the space inside the border is not
/// positive.
pub fn fill_width(percent: f64, total_width: i32, pen_width: i32) -> i32 {
    let inner = i64::from(total_width) - 2 * i64::from(pen_width);
    if inner <= 0 {
        return 0;
    }
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    // Float to int casts saturate at i32::MAX.
    (inner as f64 * percent / 100.0).floor() as i32
}

/// Share of `size` in `parent_size`, in percent. Zero for an empty parent.
pub fn percent_of_parent(size: u64, parent_size: u64) -> f64 {
    if parent_size == 0 {
        return 0.0;
    }
    (size as f64 * 100.0 / parent_size as f64).min(100.0)
}

/// A rectangle in surface coordinates. May be partly negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One drawing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintCommand {
    /// Clear the rectangle to the surface background.
    Erase(CellRect),
    /// Fill a rectangle.
    Fill { rect: CellRect, color: Rgb },
    /// Draw a one pixel line between two points, both inclusive.
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgb,
    },
}

/// A percent bar for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentBar {
    percent: f64,
    indent: i32,
    fill_color: Rgb,
    bar_background: Rgb,
}

impl PercentBar {
    /// Create a bar for `percent` with the default palette colors.
    pub fn new(percent: f64) -> Self {
        Self {
            percent,
            indent: 0,
            fill_color: crate::theme::FILL_COLORS[0],
            bar_background: crate::theme::BAR_BACKGROUND,
        }
    }

    /// Horizontal indent from the left edge of the cell.
    pub fn indent(mut self, indent: i32) -> Self {
        self.indent = indent;
        self
    }

    /// Color of the filled portion.
    pub fn fill_color(mut self, color: Rgb) -> Self {
        self.fill_color = color;
        self
    }

    /// Color of the unfilled portion.
    pub fn bar_background(mut self, color: Rgb) -> Self {
        self.bar_background = color;
        self
    }

    /// Paint commands for `cell`, drawn over a surface of color `surface`.
    pub fn paint(&self, cell: CellRect, surface: Rgb) -> Vec<PaintCommand> {
        let mut commands = vec![PaintCommand::Erase(cell)];

        let x = cell.x + self.indent;
        let y = cell.y + EXTRA_MARGIN;
        let w = cell.width - self.indent;
        let h = cell.height - 2 * EXTRA_MARGIN;
        if w <= 0 {
            return commands;
        }

        let p = PEN_WIDTH;
        let inner_height = h - 2 * p;
        if w - 2 * p > 0 {
            commands.push(PaintCommand::Fill {
                rect: CellRect::new(x + p, y + p, w - 2 * p, inner_height),
                color: self.bar_background,
            });

            let filled = fill_width(self.percent, w, p);
            if filled > 0 {
                commands.push(PaintCommand::Fill {
                    rect: CellRect::new(x + p, y + p, filled, inner_height),
                    color: self.fill_color,
                });
            }
        }

        let line = |from, to, color| PaintCommand::Line { from, to, color };
        let shades = [
            contrasting_color(Rgb::BLACK, surface),
            contrasting_color(self.bar_background.darker(), surface),
            contrasting_color(self.bar_background.lighter(), surface),
            contrasting_color(Rgb::WHITE, surface),
        ];

        commands.extend([
            // outer top/left
            line((x, y), (x + w, y), shades[0]),
            line((x, y), (x, y + h), shades[0]),
            // inner top/left
            line((x + 1, y + 1), (x + w - 1, y + 1), shades[1]),
            line((x + 1, y + 1), (x + 1, y + h - 1), shades[1]),
            // outer bottom/right
            line((x + 1, y + h), (x + w, y + h), shades[2]),
            line((x + w, y), (x + w, y + h), shades[2]),
            // inner bottom/right
            line((x + 2, y + h - 1), (x + w - 1, y + h - 1), shades[3]),
            line((x + w - 1, y + 1), (x + w - 1, y + h - 1), shades[3]),
        ]);
        commands
    }
}
