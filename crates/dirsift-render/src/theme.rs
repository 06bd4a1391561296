//! Bar colors for dark and light surfaces.

use crate::color::Rgb;

/// Fill colors, one per tree depth, cycling.
pub const FILL_COLORS: [Rgb; 12] = [
    Rgb::new(0, 0, 255),
    Rgb::new(128, 0, 128),
    Rgb::new(231, 147, 43),
    Rgb::new(4, 113, 0),
    Rgb::new(176, 0, 0),
    Rgb::new(204, 187, 0),
    Rgb::new(162, 98, 30),
    Rgb::new(0, 148, 146),
    Rgb::new(217, 94, 0),
    Rgb::new(0, 194, 65),
    Rgb::new(194, 108, 187),
    Rgb::new(0, 179, 255),
];

/// Default color of the unfilled part of a bar.
pub const BAR_BACKGROUND: Rgb = Rgb::gray(128);

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Colors used to draw percent bars.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Current theme variant.
    pub variant: ThemeVariant,
    /// Color of the surface bars are drawn on.
    pub surface: Rgb,
    /// Unfilled part of a bar.
    pub bar_background: Rgb,
    /// Filled part of a bar, indexed by depth.
    pub fill_colors: Vec<Rgb>,
}

impl Palette {
    /// Dark surface (slate).
    pub fn dark() -> Self {
        Self {
            variant: ThemeVariant::Dark,
            surface: Rgb::new(15, 23, 42),
            bar_background: BAR_BACKGROUND,
            fill_colors: FILL_COLORS.to_vec(),
        }
    }

    /// Light surface.
    pub fn light() -> Self {
        Self {
            variant: ThemeVariant::Light,
            surface: Rgb::WHITE,
            bar_background: BAR_BACKGROUND,
            fill_colors: FILL_COLORS.to_vec(),
        }
    }

    /// Palette for a variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Fill color for a bar at tree `depth`.
    pub fn fill_color(&self, depth: usize) -> Rgb {
        if self.fill_colors.is_empty() {
            return FILL_COLORS[0];
        }
        self.fill_colors[depth % self.fill_colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
