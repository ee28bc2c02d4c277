//! Theme-dependent look of the field.

use motes_core::Theme;

use crate::color::Rgb;

const SKY_400: Rgb = Rgb::hex(0x38bdf8);

/// How a single dot is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotStyle {
    /// Core color.
    pub fill: Rgb,
    /// Halo color.
    pub glow: Rgb,
    /// Halo reach in canvas units.
    pub glow_blur: f32,
    /// Opacity of the core, 0.0 - 1.0.
    pub opacity: f32,
}

impl DotStyle {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fill: Rgb::WHITE,
                glow: Rgb::WHITE,
                glow_blur: 8.0,
                opacity: 0.7,
            },
            Theme::Light => Self {
                fill: SKY_400,
                glow: SKY_400,
                glow_blur: 6.0,
                opacity: 0.5,
            },
        }
    }
}

/// Three-stop vertical gradient painted behind the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub top: Rgb,
    pub middle: Rgb,
    pub bottom: Rgb,
}

impl Backdrop {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            // gray-900 -> gray-950 -> black
            Theme::Dark => Self {
                top: Rgb::hex(0x111827),
                middle: Rgb::hex(0x030712),
                bottom: Rgb::BLACK,
            },
            // sky-100 -> yellow-50 -> white
            Theme::Light => Self {
                top: Rgb::hex(0xe0f2fe),
                middle: Rgb::hex(0xfefce8),
                bottom: Rgb::WHITE,
            },
        }
    }

    /// Backdrop color of `row` out of `rows`.
    pub fn at(&self, row: u16, rows: u16) -> Rgb {
        if rows <= 1 {
            return self.middle;
        }
        let t = f32::from(row) / f32::from(rows - 1);
        if t < 0.5 {
            Rgb::lerp(self.top, self.middle, t * 2.0)
        } else {
            Rgb::lerp(self.middle, self.bottom, (t - 0.5) * 2.0)
        }
    }
}
