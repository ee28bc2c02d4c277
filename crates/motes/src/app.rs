//! Application state and the frame-driven event loop.

use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use motes_config::Config;
use motes_core::Theme;
use motes_field::{Debounce, FrameLoop, RESIZE_DEBOUNCE};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};

use crate::hero::HeroView;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Loaded configuration.
    config: Config,
    /// Current color theme.
    theme: Theme,
    /// Paces frames and owns the loop handle.
    frames: FrameLoop,
    /// The mounted hero view, if any.
    hero: Option<HeroView>,
    /// Pending terminal size, applied once resizing settles.
    resize: Debounce<Rect>,
}

/// Split the screen into the hero area and the footer line.
fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area)
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            theme: config.theme,
            frames: FrameLoop::new(config.fps),
            hero: None,
            resize: Debounce::new(RESIZE_DEBOUNCE),
            config,
        }
    }

    /// Mount the hero view over the given screen area.
    pub fn mount(&mut self, screen: Rect, now: Instant) {
        if let Some(previous) = self.hero.take() {
            previous.unmount();
        }
        let [hero_area, _] = split(screen);
        self.hero = Some(HeroView::mount(
            &self.config,
            hero_area,
            &mut self.frames,
            now,
        ));
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.mount(Rect::new(0, 0, size.width, size.height), Instant::now());

        while self.frames.is_active() {
            let now = Instant::now();
            self.apply_settled_resize(now);
            self.frames.begin_frame(now);
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Draw one frame. Every call is exactly one simulation step.
    fn render(&mut self, frame: &mut Frame, now: Instant) {
        let [hero_area, footer] = split(frame.area());

        let Some(hero) = self.hero.as_mut() else {
            // Torn down mid-flight: nothing to draw, and no further frames.
            self.frames.stop();
            return;
        };
        hero.draw(frame, hero_area, self.theme, now);

        let help = Line::from(vec![
            "q".bold().cyan(),
            " quit  ".dark_gray(),
            "t".bold().cyan(),
            " toggle theme  ".dark_gray(),
            "r".bold().cyan(),
            " reseed".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, footer);
    }

    /// Reads the crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        loop {
            let now = Instant::now();
            let mut wait = self.frames.remaining(now);
            if let Some(resize) = self.resize.remaining(now) {
                wait = wait.min(resize);
            }
            if wait.is_zero() || !event::poll(wait)? {
                return Ok(());
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => {
                    self.resize
                        .push(Rect::new(0, 0, cols, rows), Instant::now());
                }
                _ => {}
            }
            if !self.frames.is_active() {
                return Ok(());
            }
        }
    }

    /// Apply a resize once no newer one arrived within the debounce window.
    fn apply_settled_resize(&mut self, now: Instant) {
        let Some(screen) = self.resize.poll(now) else {
            return;
        };
        let [hero_area, _] = split(screen);
        if let Some(hero) = self.hero.as_mut() {
            tracing::debug!(cols = hero_area.width, rows = hero_area.height, "resize settled");
            hero.resize(hero_area);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('r')) => self.reseed(),
            _ => {}
        }
    }

    /// Forward pointer motion to the hero view.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind
            && let Some(hero) = self.hero.as_mut()
        {
            hero.pointer_moved(mouse.column, mouse.row);
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        tracing::info!(theme = %self.theme, "theme changed");
    }

    fn reseed(&mut self) {
        if let Some(hero) = self.hero.as_mut() {
            hero.reseed();
            tracing::debug!(particles = hero.field().particles().len(), "field reseeded");
        }
    }

    /// Unmount the hero view, which stops the frame loop.
    fn quit(&mut self) {
        if let Some(hero) = self.hero.take() {
            hero.unmount();
        }
        self.frames.stop();
    }
}
