//! Core types shared by the motes crates.

use std::fmt;
use std::str::FromStr;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Color theme of the hero screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Toggle between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme `{other}` (expected `dark` or `light`)")),
        }
    }
}

/// Size of the animated surface in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative, infinite or not a number.
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    /// Replace a degenerate size with `fallback`.
    pub fn or(self, fallback: CanvasSize) -> CanvasSize {
        if self.is_degenerate() { fallback } else { self }
    }

    pub fn center(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// How many canvas units one terminal cell covers.
///
/// The field works in virtual pixels so that its tuning constants keep their
/// meaning regardless of the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellMetrics {
    /// Canvas size covered by an area of terminal cells.
    pub fn canvas_size(self, area: Rect) -> CanvasSize {
        CanvasSize::new(
            f32::from(area.width) * self.width,
            f32::from(area.height) * self.height,
        )
    }

    /// Canvas position of the center of the cell at `(col, row)`, relative to `area`.
    ///
    /// Returns `None` when the cell lies outside `area`.
    pub fn cell_center(self, area: Rect, col: u16, row: u16) -> Option<(f32, f32)> {
        if col < area.x || row < area.y || col >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = (f32::from(col - area.x) + 0.5) * self.width;
        let y = (f32::from(row - area.y) + 0.5) * self.height;
        Some((x, y))
    }

    /// Cell offset (relative to the area origin) containing canvas point `(x, y)`.
    pub fn to_cell(self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / self.width).floor();
        let row = (y / self.height).floor();
        if col > f32::from(u16::MAX) || row > f32::from(u16::MAX) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Canvas rectangle `(left, top, right, bottom)` covered by `rect`, relative to `origin`.
    pub fn canvas_rect(self, origin: Rect, rect: Rect) -> (f32, f32, f32, f32) {
        let left = (f32::from(rect.x) - f32::from(origin.x)) * self.width;
        let top = (f32::from(rect.y) - f32::from(origin.y)) * self.height;
        (
            left,
            top,
            left + f32::from(rect.width) * self.width,
            top + f32::from(rect.height) * self.height,
        )
    }
}

/// Tuning values for the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldTuning {
    /// Number of particles per canvas epoch.
    pub count: usize,
    /// Radius of a rendered dot.
    pub dot_radius: f32,
    /// Pointer distance below which a particle leans toward the pointer.
    pub attraction_radius: f32,
    /// Per-axis cap on how far the target may sit from home.
    pub max_move: f32,
    /// Fraction of the remaining distance covered each frame.
    pub move_strength: f32,
    /// Multiplier on `move_strength` while relaxing toward home.
    pub relax_factor: f32,
    /// Inset applied to the headline box when building the exclusion zone.
    pub exclusion_padding: f32,
    /// Canvas width used when the real width is zero or unknown.
    pub default_width: f32,
    /// Canvas height used when the real height is zero or unknown.
    pub default_height: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            count: 60,
            dot_radius: 2.5,
            attraction_radius: 120.0,
            max_move: 15.0,
            move_strength: 0.12,
            relax_factor: 0.5,
            exclusion_padding: 24.0,
            default_width: 800.0,
            default_height: 400.0,
        }
    }
}

impl FieldTuning {
    pub fn default_size(&self) -> CanvasSize {
        CanvasSize::new(self.default_width, self.default_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_and_parses() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn degenerate_size_falls_back() {
        let fallback = CanvasSize::new(800.0, 400.0);
        assert_eq!(CanvasSize::new(0.0, 300.0).or(fallback), fallback);
        assert_eq!(CanvasSize::new(f32::NAN, 300.0).or(fallback), fallback);
        assert_eq!(CanvasSize::new(f32::INFINITY, 300.0).or(fallback), fallback);
        assert_eq!(CanvasSize::new(640.0, f32::INFINITY).or(fallback), fallback);
        let real = CanvasSize::new(640.0, 320.0);
        assert_eq!(real.or(fallback), real);
    }

    #[test]
    fn cell_center_is_relative_to_area() {
        let metrics = CellMetrics::default();
        let area = Rect::new(2, 1, 10, 5);
        assert_eq!(metrics.cell_center(area, 2, 1), Some((4.0, 8.0)));
        assert_eq!(metrics.cell_center(area, 4, 3), Some((20.0, 40.0)));
        assert_eq!(metrics.cell_center(area, 1, 1), None);
        assert_eq!(metrics.cell_center(area, 12, 1), None);
    }

    #[test]
    fn canvas_point_maps_back_to_cell() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.to_cell(20.0, 40.0), Some((2, 2)));
        assert_eq!(metrics.to_cell(-0.5, 4.0), None);
    }

    #[test]
    fn canvas_rect_scales_cells() {
        let metrics = CellMetrics::default();
        let origin = Rect::new(0, 0, 100, 40);
        let rect = Rect::new(10, 5, 20, 4);
        assert_eq!(metrics.canvas_rect(origin, rect), (80.0, 80.0, 240.0, 144.0));
    }
}
