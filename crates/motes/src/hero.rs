//! The hero view: a typed-out headline floating over the particle field.

use std::time::{Duration, Instant};

use motes_config::{Config, HeroContent};
use motes_core::{CellMetrics, Theme};
use motes_field::{FieldView, FrameHandle, FrameLoop, ParticleField, Rgb};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Delay between typed characters.
const TYPING_INTERVAL: Duration = Duration::from_millis(100);

/// Blink period of the typing cursor.
const CURSOR_BLINK: Duration = Duration::from_millis(500);

/// Empty columns kept around the headline text inside its block.
const BLOCK_MARGIN_X: u16 = 4;
/// Empty rows kept above and below the headline text inside its block.
const BLOCK_MARGIN_Y: u16 = 2;

/// Reveals a string one character at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    interval: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        Self {
            text: text.into(),
            interval,
        }
    }

    /// The prefix visible after `elapsed`, and whether typing has finished.
    pub fn revealed(&self, elapsed: Duration) -> (&str, bool) {
        let total = self.text.chars().count();
        let typed = if self.interval.is_zero() {
            total
        } else {
            usize::try_from(elapsed.as_millis() / self.interval.as_millis())
                .unwrap_or(usize::MAX)
                .min(total)
        };
        let end = self
            .text
            .char_indices()
            .nth(typed)
            .map_or(self.text.len(), |(idx, _)| idx);
        (&self.text[..end], typed == total)
    }
}

/// Text colors of the headline for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    name: Color,
    title: Color,
    tagline: Color,
    accent: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                name: Color::White,
                title: Color::White,
                tagline: Rgb::hex(0xd1d5db).into(),
                accent: Rgb::hex(0x38bdf8).into(),
            },
            Theme::Light => Self {
                name: Rgb::hex(0x0c4a6e).into(),
                title: Rgb::hex(0x075985).into(),
                tagline: Rgb::hex(0x374151).into(),
                accent: Rgb::hex(0x0ea5e9).into(),
            },
        }
    }
}

/// A mounted hero view. Owns the particle field and the frame loop handle.
#[derive(Debug)]
pub struct HeroView {
    field: ParticleField,
    content: HeroContent,
    typewriter: Typewriter,
    metrics: CellMetrics,
    handle: FrameHandle,
    /// Area the view was last drawn into.
    area: Rect,
    mounted_at: Instant,
}

impl HeroView {
    /// Create the field for `area` and start the frame loop.
    pub fn mount(config: &Config, area: Rect, frames: &mut FrameLoop, now: Instant) -> Self {
        let size = config.cell.canvas_size(area);
        let field = match config.seed {
            Some(seed) => ParticleField::with_seed(size, config.field, seed),
            None => ParticleField::new(size, config.field),
        };
        tracing::info!(
            cols = area.width,
            rows = area.height,
            particles = field.particles().len(),
            "hero view mounted"
        );
        Self {
            field,
            content: config.hero.clone(),
            typewriter: Typewriter::new(config.hero.name.clone(), TYPING_INTERVAL),
            metrics: config.cell,
            handle: frames.start(),
            area,
            mounted_at: now,
        }
    }

    /// Stop the frame loop and drop the field.
    pub fn unmount(self) {
        self.handle.stop();
        tracing::info!("hero view unmounted");
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Forward a mouse position (absolute terminal cell). Ignored outside the view.
    pub fn pointer_moved(&mut self, col: u16, row: u16) {
        if let Some((x, y)) = self.metrics.cell_center(self.area, col, row) {
            self.field.set_pointer(x, y);
        }
    }

    /// Apply a settled resize of the view's area.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.field.resize(self.metrics.canvas_size(area));
    }

    /// Scatter a fresh set of particles over the current area.
    pub fn reseed(&mut self) {
        self.field.reseed(self.metrics.canvas_size(self.area));
    }

    /// Headline lines for the current moment. Lines that are not revealed yet
    /// are blank so the block keeps its size while typing.
    fn headline(&self, theme: Theme, now: Instant) -> Vec<Line<'static>> {
        let palette = Palette::for_theme(theme);
        let elapsed = now.saturating_duration_since(self.mounted_at);
        let (typed, complete) = self.typewriter.revealed(elapsed);

        let mut name = vec![Span::styled(
            typed.to_string(),
            Style::new().fg(palette.name).add_modifier(Modifier::BOLD),
        )];
        let cursor_on = (elapsed.as_millis() / CURSOR_BLINK.as_millis()) % 2 == 0;
        if !complete && cursor_on {
            name.push(Span::styled("▌", Style::new().fg(palette.accent)));
        }

        let mut lines = vec![Line::from(name), Line::default()];
        if complete {
            lines.push(Line::styled(
                self.content.title.clone(),
                Style::new().fg(palette.title).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                self.content.tagline.clone(),
                Style::new().fg(palette.tagline),
            ));
            if !self.content.links.is_empty() {
                lines.push(Line::default());
            }
            for link in &self.content.links {
                lines.push(Line::from(vec![
                    Span::styled(
                        link.label.clone(),
                        Style::new().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(link.url.clone(), Style::new().fg(palette.tagline)),
                ]));
            }
        } else {
            lines.resize(self.headline_height(), Line::default());
        }
        lines
    }

    fn headline_height(&self) -> usize {
        let links = self.content.links.len();
        4 + if links > 0 { links + 1 } else { 0 }
    }

    fn headline_width(&self) -> usize {
        let mut width = [
            self.content.name.chars().count() + 1,
            self.content.title.chars().count(),
            self.content.tagline.chars().count(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        for link in &self.content.links {
            width = width.max(link.label.chars().count() + 2 + link.url.chars().count());
        }
        width
    }

    /// Centered block holding the headline, the "safe zone" of the field.
    pub fn headline_block(&self, area: Rect) -> Rect {
        let height = u16::try_from(self.headline_height())
            .unwrap_or(u16::MAX)
            .saturating_add(BLOCK_MARGIN_Y * 2);
        let width = u16::try_from(self.headline_width())
            .unwrap_or(u16::MAX)
            .saturating_add(BLOCK_MARGIN_X * 2);
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, block, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(row);
        block
    }

    /// Step the field once and draw the view into `area`.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, theme: Theme, now: Instant) {
        self.area = area;
        if area.is_empty() {
            return;
        }

        // Recomputed every frame: the block moves whenever the layout does.
        let block = self.headline_block(area);
        let bounds = (!block.is_empty()).then(|| self.metrics.canvas_rect(area, block));
        let zone = self.field.exclusion_zone(bounds);
        self.field.step(zone.as_ref());

        let text = block.inner(ratatui::layout::Margin::new(BLOCK_MARGIN_X, BLOCK_MARGIN_Y));
        frame.render_widget(
            FieldView::new(&self.field, theme, self.metrics).keep_clear(text),
            area,
        );

        let headline = Paragraph::new(self.headline(theme, now)).alignment(Alignment::Center);
        frame.render_widget(headline, text);
    }
}
