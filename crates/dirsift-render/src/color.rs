//! RGB colors with value-based lightening and darkening.

use ratatui::style::Color;

/// Default factor for [`Rgb::lighter`], in percent.
pub const LIGHTER_FACTOR: u32 = 150;

/// Default factor for [`Rgb::darker`], in percent.
pub const DARKER_FACTOR: u32 = 200;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray with all channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    fn max_channel(self) -> u64 {
        u64::from(self.r.max(self.g).max(self.b))
    }

    fn min_channel(self) -> u64 {
        u64::from(self.r.min(self.g).min(self.b))
    }

    // Channel math runs in u64 so any u32 factor times 255 fits.
    fn map(self, f: impl Fn(u64) -> u64) -> Self {
        let channel = |c: u8| f(u64::from(c)).min(255) as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Lighter color, scaling the HSV value by 150%.
    pub fn lighter(self) -> Self {
        self.lighter_by(LIGHTER_FACTOR)
    }

    /// Darker color, dividing the HSV value by 2.
    pub fn darker(self) -> Self {
        self.darker_by(DARKER_FACTOR)
    }

    /// Scale the HSV value by `factor` percent, keeping the hue.
    ///
    /// When the scaled value overflows full brightness, the excess is taken
    /// out of the saturation instead. Black has no hue to scale and steps up
    /// to a dark gray. Factors below 100 darken.
    pub fn lighter_by(self, factor: u32) -> Self {
        let factor = factor.max(1);
        if factor < 100 {
            return self.darker_by(10_000 / factor);
        }
        let factor = u64::from(factor);

        let max = self.max_channel();
        if max == 0 {
            return Self::gray((255 * (factor - 100) / factor) as u8);
        }

        let value = max * factor / 100;
        if value <= 255 {
            return self.map(|c| c * factor / 100);
        }

        let saturation = (max - self.min_channel()) * 255 / max;
        if saturation == 0 {
            return Self::WHITE;
        }
        let desaturated = saturation.saturating_sub(value - 255);
        self.map(|c| {
            let full = c * 255 / max;
            255 - (255 - full) * desaturated / saturation
        })
    }

    /// Divide the HSV value by `factor` percent, keeping the hue.
    ///
    /// Factors below 100 lighten.
    pub fn darker_by(self, factor: u32) -> Self {
        let factor = factor.max(1);
        if factor < 100 {
            return self.lighter_by(10_000 / factor);
        }
        let factor = u64::from(factor);
        self.map(|c| c * 100 / factor)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// A color guaranteed to be visible on `background`.
///
/// Returns `desired` unless it equals `background`; then a lighter
/// background if lightening changes it, otherwise a darker one.
pub fn contrasting_color(desired: Rgb, background: Rgb) -> Rgb {
    if desired != background {
        return desired;
    }

    let lighter = background.lighter();
    if lighter != background {
        lighter
    } else {
        background.darker()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighter_scales_value() {
        assert_eq!(Rgb::new(100, 50, 0).lighter(), Rgb::new(150, 75, 0));
        assert_eq!(Rgb::gray(128).lighter(), Rgb::gray(192));
    }

    #[test]
    fn test_lighter_overflow_desaturates() {
        assert_eq!(Rgb::WHITE.lighter(), Rgb::WHITE);
        // full red: value overflows by 127, saturation 255 -> 128
        let light_red = Rgb::new(255, 0, 0).lighter();
        assert_eq!(light_red.r, 255);
        assert!(light_red.g > 0 && light_red.g == light_red.b);
    }

    #[test]
    fn test_black_lightens_to_gray() {
        assert_eq!(Rgb::BLACK.lighter(), Rgb::gray(85));
        assert_eq!(Rgb::BLACK.darker(), Rgb::BLACK);
    }

    #[test]
    fn test_darker() {
        assert_eq!(Rgb::WHITE.darker(), Rgb::gray(127));
        assert_eq!(Rgb::new(200, 100, 50).darker(), Rgb::new(100, 50, 25));
        assert_eq!(Rgb::gray(100).darker_by(50), Rgb::gray(200));
    }

    #[test]
    fn test_extreme_factors() {
        assert_eq!(Rgb::new(200, 100, 50).lighter_by(u32::MAX), Rgb::WHITE);
        assert_eq!(Rgb::BLACK.lighter_by(u32::MAX), Rgb::gray(254));
        assert_eq!(Rgb::gray(200).darker_by(u32::MAX), Rgb::BLACK);
        assert_eq!(Rgb::gray(200).lighter_by(0), Rgb::gray(2));
        assert_eq!(Rgb::gray(2).darker_by(0), Rgb::gray(200));
    }

    #[test]
    fn test_contrasting_color_keeps_distinct_desired() {
        assert_eq!(contrasting_color(Rgb::BLACK, Rgb::WHITE), Rgb::BLACK);
        assert_eq!(contrasting_color(Rgb::gray(10), Rgb::gray(11)), Rgb::gray(10));
    }

    #[test]
    fn test_contrasting_color_on_equal_background() {
        assert_eq!(contrasting_color(Rgb::WHITE, Rgb::WHITE), Rgb::gray(127));
        assert_eq!(contrasting_color(Rgb::BLACK, Rgb::BLACK), Rgb::gray(85));
        assert_eq!(contrasting_color(Rgb::gray(128), Rgb::gray(128)), Rgb::gray(192));
    }

    #[test]
    fn test_into_ratatui_color() {
        let color: Color = Rgb::new(1, 2, 3).into();
        assert_eq!(color, Color::Rgb(1, 2, 3));
    }
}
