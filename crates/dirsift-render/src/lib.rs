//! Rendering math for dirsift result rows.
//!
//! - [`fill_width`] and [`PercentBar`] compute the geometry of a proportional
//!   fill bar and emit paint commands for a pixel surface the caller owns.
//! - [`contrasting_color`] keeps border strokes visible whatever the
//!   surface color is.
//! - [`ui::SizeBar`] draws the same proportion into a terminal buffer.

pub mod color;
pub mod percent_bar;
pub mod theme;
pub mod ui;

pub use color::{Rgb, contrasting_color};
pub use percent_bar::{CellRect, PaintCommand, PercentBar, fill_width, percent_of_parent};
pub use theme::{Palette, ThemeVariant};
