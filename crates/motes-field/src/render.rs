//! Drawing the field into a ratatui buffer.

use motes_core::{CellMetrics, Theme};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::color::Rgb;
use crate::field::ParticleField;
use crate::style::{Backdrop, DotStyle};

/// Glyph for dots smaller than a cell.
const SMALL_DOT: &str = "•";
/// Glyph for dots at least as wide as a cell.
const LARGE_DOT: &str = "●";
/// Glyph for the glow around a dot.
const HALO: &str = "·";
/// Halo strength relative to the dot's opacity.
const HALO_STRENGTH: f32 = 0.4;

/// Widget that paints the backdrop and every visible particle.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    field: &'a ParticleField,
    theme: Theme,
    metrics: CellMetrics,
    /// Cells where no halo may be drawn.
    keep_clear: Option<Rect>,
}

impl<'a> FieldView<'a> {
    pub fn new(field: &'a ParticleField, theme: Theme, metrics: CellMetrics) -> Self {
        Self {
            field,
            theme,
            metrics,
            keep_clear: None,
        }
    }

    /// Keep halos out of `rect`, typically the text drawn on top of the field.
    pub fn keep_clear(mut self, rect: Rect) -> Self {
        self.keep_clear = Some(rect);
        self
    }

    /// Absolute cells of the particles that should be drawn.
    fn dot_cells(&self, area: Rect) -> Vec<(u16, u16)> {
        self.field
            .particles()
            .iter()
            .filter(|p| !p.is_suppressed())
            .filter_map(|p| self.metrics.to_cell(p.pos().x, p.pos().y))
            .filter(|&(col, row)| col < area.width && row < area.height)
            .map(|(col, row)| (area.x + col, area.y + row))
            .collect()
    }

    fn glyph(&self) -> &'static str {
        if self.field.tuning().dot_radius * 2.0 >= self.metrics.width {
            LARGE_DOT
        } else {
            SMALL_DOT
        }
    }
}

impl Widget for FieldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            tracing::trace!("empty render area, skipping frame");
            return;
        }

        let backdrop = Backdrop::for_theme(self.theme);
        let shade = |y: u16| backdrop.at(y - area.y, area.height);
        for y in area.top()..area.bottom() {
            let bg = shade(y);
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(bg.into());
                }
            }
        }

        let style = DotStyle::for_theme(self.theme);
        let cells = self.dot_cells(area);

        let reach = (style.glow_blur / self.metrics.width).ceil().max(0.0) as i32;
        let halo_alpha = style.opacity * HALO_STRENGTH;
        for &(x, y) in &cells {
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    if (dx == 0 && dy == 0) || dx.abs() + dy.abs() > reach {
                        continue;
                    }
                    let (Ok(hx), Ok(hy)) = (
                        u16::try_from(i32::from(x) + dx),
                        u16::try_from(i32::from(y) + dy),
                    ) else {
                        continue;
                    };
                    if !area.contains((hx, hy).into())
                        || self.keep_clear.is_some_and(|r| r.contains((hx, hy).into()))
                    {
                        continue;
                    }
                    let color = style.glow.over(shade(hy), halo_alpha);
                    if let Some(cell) = buf.cell_mut((hx, hy))
                        && cell.symbol() == " "
                    {
                        cell.set_symbol(HALO).set_fg(color.into());
                    }
                }
            }
        }

        let glyph = self.glyph();
        for &(x, y) in &cells {
            let color: Rgb = style.fill.over(shade(y), style.opacity);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(glyph).set_fg(color.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use motes_core::CanvasSize;
    use ratatui::style::Color;

    use super::*;
    use crate::geometry::{Vec2, Zone};
    use crate::particle::Particle;

    fn dots(buf: &Buffer) -> Vec<(u16, u16)> {
        let area = buf.area;
        let mut found = Vec::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if buf[(x, y)].symbol() == SMALL_DOT {
                    found.push((x, y));
                }
            }
        }
        found
    }

    #[test]
    fn dot_lands_in_its_cell_with_halo() {
        let area = Rect::new(0, 0, 20, 10);
        let field = ParticleField::with_particles(
            CanvasSize::new(160.0, 160.0),
            vec![Particle::new(Vec2::new(44.0, 72.0))],
        );
        let mut buf = Buffer::empty(area);
        FieldView::new(&field, Theme::Dark, CellMetrics::default()).render(area, &mut buf);

        assert_eq!(dots(&buf), vec![(5, 4)]);
        assert_eq!(buf[(4, 4)].symbol(), HALO);
        assert_eq!(buf[(6, 4)].symbol(), HALO);
        assert_eq!(buf[(5, 3)].symbol(), HALO);
        assert_eq!(buf[(5, 5)].symbol(), HALO);
        assert_eq!(buf[(6, 5)].symbol(), " ");
    }

    #[test]
    fn halos_stay_out_of_the_clear_rect() {
        let area = Rect::new(0, 0, 20, 10);
        let field = ParticleField::with_particles(
            CanvasSize::new(160.0, 160.0),
            vec![Particle::new(Vec2::new(44.0, 72.0))],
        );
        let clear = Rect::new(6, 2, 6, 4);
        let mut buf = Buffer::empty(area);
        FieldView::new(&field, Theme::Dark, CellMetrics::default())
            .keep_clear(clear)
            .render(area, &mut buf);

        assert_eq!(dots(&buf), vec![(5, 4)]);
        assert_eq!(buf[(4, 4)].symbol(), HALO);
        assert_eq!(buf[(5, 3)].symbol(), HALO);
        assert_eq!(buf[(6, 4)].symbol(), " ");
    }

    #[test]
    fn suppressed_particles_are_hidden() {
        let area = Rect::new(0, 0, 40, 10);
        let mut field = ParticleField::with_particles(
            CanvasSize::new(320.0, 160.0),
            vec![
                Particle::new(Vec2::new(100.0, 80.0)),
                Particle::new(Vec2::new(20.0, 20.0)),
            ],
        );
        field.set_pointer(600.0, 600.0);
        let zone = Zone::new(60.0, 40.0, 200.0, 120.0);
        field.step(Some(&zone));

        let mut buf = Buffer::empty(area);
        FieldView::new(&field, Theme::Dark, CellMetrics::default()).render(area, &mut buf);
        assert_eq!(dots(&buf), vec![(2, 1)]);
    }

    #[test]
    fn light_theme_uses_sky_dots() {
        let area = Rect::new(0, 0, 10, 3);
        let field = ParticleField::with_particles(
            CanvasSize::new(80.0, 48.0),
            vec![Particle::new(Vec2::new(4.0, 24.0))],
        );
        let mut buf = Buffer::empty(area);
        FieldView::new(&field, Theme::Light, CellMetrics::default()).render(area, &mut buf);

        let backdrop = Backdrop::for_theme(Theme::Light).at(1, 3);
        let expected: Color = Rgb::hex(0x38bdf8).over(backdrop, 0.5).into();
        assert_eq!(buf[(0, 1)].symbol(), SMALL_DOT);
        assert_eq!(buf[(0, 1)].fg, expected);
        assert_eq!(buf[(0, 1)].bg, Color::from(backdrop));
    }

    #[test]
    fn offscreen_particles_are_clipped() {
        let area = Rect::new(0, 0, 4, 2);
        let field = ParticleField::with_particles(
            CanvasSize::new(800.0, 400.0),
            vec![Particle::new(Vec2::new(700.0, 300.0))],
        );
        let mut buf = Buffer::empty(area);
        FieldView::new(&field, Theme::Dark, CellMetrics::default()).render(area, &mut buf);
        assert!(dots(&buf).is_empty());
    }

    #[test]
    fn empty_area_renders_nothing() {
        let field = ParticleField::with_seed(
            CanvasSize::new(800.0, 400.0),
            motes_core::FieldTuning::default(),
            1,
        );
        let mut buf = Buffer::empty(Rect::new(0, 0, 0, 0));
        FieldView::new(&field, Theme::Dark, CellMetrics::default())
            .render(Rect::new(0, 0, 0, 0), &mut buf);
        assert!(buf.content.is_empty());
    }
}
