//! Color helpers for drawing on terminals without an alpha channel.

use ratatui::style::Color;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::hex(0xffffff);
    pub const BLACK: Rgb = Rgb::hex(0x000000);

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Linear interpolation from `a` (t = 0) to `b` (t = 1).
    pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 {
            (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
        }
    }

    /// Composite `self` at `alpha` over an opaque `backdrop`.
    pub fn over(self, backdrop: Rgb, alpha: f32) -> Rgb {
        Rgb::lerp(backdrop, self, alpha)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(Rgb::hex(0x38bdf8), Rgb { r: 0x38, g: 0xbd, b: 0xf8 });
    }

    #[test]
    fn over_blends_toward_backdrop() {
        assert_eq!(Rgb::WHITE.over(Rgb::BLACK, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.over(Rgb::BLACK, 0.5), Rgb::hex(0x808080));
    }
}
