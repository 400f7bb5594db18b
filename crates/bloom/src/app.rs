use std::path::PathBuf;

use bloom_config::Config;
use bloom_core::{Clock, Countdown};
use bloom_motion::{
    AmbientLayer, Appearance, DigitTransition, Ease, Entrance, FrameClock, LeafEvent, PX_PER_ROW,
    Repeat, ScrollReveal, Tween, Viewport, staggered,
};
use chrono::{DateTime, Datelike, Local, Utc};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{DefaultTerminal, Frame, buffer::Buffer, layout::Rect};

use crate::page::{PageLayout, Scroll, Section};
use crate::sections::{
    self, CARDS_ROW, DIVIDER_ROW, HEADING_ROW, HeroView, ShowcaseView, SplashView,
};

/// `cubic-bezier(0.16, 1, 0.3, 1)`, used by the splash entrances.
const SPLASH_EASE: Ease = Ease::CubicBezier(0.16, 1.0, 0.3, 1.0);
const HERO_EASE: Ease = Ease::CubicBezier(0.25, 0.46, 0.45, 0.94);
/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

fn splash_entrances() -> [Entrance; 4] {
    [
        Entrance::new(200, 800, -20.0, SPLASH_EASE),
        Entrance::new(400, 900, 30.0, SPLASH_EASE),
        Entrance::new(600, 800, 20.0, SPLASH_EASE),
        Entrance::new(800, 800, 25.0, SPLASH_EASE),
    ]
}

fn badge_pulse() -> Tween {
    Tween::new(1.0, 0.5, 1_000, Ease::CubicBezier(0.4, 0.0, 0.6, 1.0))
        .repeat(Repeat::Infinite)
        .yoyo(true)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App<C: Clock, F: FrameClock> {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Where accent changes are persisted, if anywhere.
    config_path: Option<PathBuf>,
    badge: String,
    /// Wall clock driving the countdown.
    clock: C,
    /// Monotonic clock driving every animation.
    frames: F,
    countdown: Countdown,
    /// Days, hours, minutes and seconds.
    digits: [DigitTransition; 4],
    leaves: AmbientLayer,
    splash: [Entrance; 4],
    hero: Vec<Entrance>,
    heading: ScrollReveal,
    divider: ScrollReveal,
    cards: ScrollReveal,
    footer: ScrollReveal,
    layout: PageLayout,
    scroll: Scroll,
    /// Animation time at which the page appeared.
    mounted_ms: u64,
}

impl<C: Clock, F: FrameClock> App<C, F> {
    /// Construct a new instance of [`App`] counting down to `target`.
    pub fn new(config: Config, target: DateTime<Utc>, clock: C, frames: F) -> Self {
        let mut countdown = Countdown::new(target);
        let mut launched = false;
        countdown.subscribe(move |remaining| {
            if remaining.is_zero() && !launched {
                launched = true;
                tracing::info!("launch time reached");
            }
        });

        let mut leaves = AmbientLayer::new();
        leaves.observe(|event| {
            let LeafEvent::FallCompleted { id, fall } = event;
            tracing::trace!(id, fall, "leaf fall completed");
        });

        Self {
            running: false,
            badge: config.badge_text(),
            config,
            config_path: None,
            clock,
            frames,
            countdown,
            digits: Default::default(),
            leaves,
            splash: splash_entrances(),
            hero: staggered(3, 300, 200, 800, 40.0, HERO_EASE),
            heading: ScrollReveal::new(0.8, 1, 1_000, 0, 60.0, Ease::Power3Out),
            divider: ScrollReveal::new(0.85, 1, 1_200, 0, 0.0, Ease::Power2Out),
            cards: ScrollReveal::new(0.85, 4, 800, 150, 80.0, Ease::Power3Out),
            footer: ScrollReveal::new(1.0, 1, 800, 0, 20.0, Ease::Power1Out).once(),
            layout: PageLayout::new(Rect::default()),
            scroll: Scroll::default(),
            mounted_ms: 0,
        }
    }

    /// Persist accent changes to `path`.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.start(Rect::new(0, 0, size.width, size.height));
        self.running = true;
        let result = self.event_loop(&mut terminal);
        self.stop();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            self.update();
            terminal.draw(|frame| self.render(frame))?;
            self.settle();
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Elapsed animation time, scaled by the configured speed.
    fn anim_ms(&self) -> u64 {
        self.config.speed.scale_ms(self.frames.elapsed_ms())
    }

    fn since_mount(&self) -> u64 {
        self.anim_ms().saturating_sub(self.mounted_ms)
    }

    fn splash_viewport(&self) -> Viewport {
        Viewport::new(self.layout.section(Section::Splash))
    }

    /// Start the countdown and the leaf layer for a viewport of `area`.
    fn start(&mut self, area: Rect) {
        self.layout = PageLayout::new(area);
        self.scroll.clamp(&self.layout);
        self.mounted_ms = self.anim_ms();
        self.countdown.start(self.clock.now());
        self.sync_digits();
        if self.config.show_leaves {
            let (now, viewport) = (self.anim_ms(), self.splash_viewport());
            self.leaves.start(now, viewport);
        }
        tracing::info!(
            width = area.width,
            height = area.height,
            deadline = %self.countdown.target(),
            "splash started"
        );
    }

    fn stop(&mut self) {
        self.countdown.stop();
        self.leaves.stop();
        tracing::info!("splash stopped");
    }

    fn resize(&mut self, area: Rect) {
        let layout = PageLayout::new(area);
        if layout == self.layout {
            return;
        }
        tracing::debug!(width = area.width, height = area.height, "viewport resized");
        self.layout = layout;
        self.scroll.clamp(&self.layout);
        if self.leaves.is_running() {
            let (now, viewport) = (self.anim_ms(), self.splash_viewport());
            self.leaves.resize(now, viewport);
        }
    }

    /// The first frame is on screen; let the countdown show live values.
    fn settle(&mut self) {
        if self.countdown.is_settled() {
            return;
        }
        self.countdown.settle();
        self.sync_digits();
        tracing::debug!(remaining = %self.countdown.current(), "countdown settled");
    }

    fn sync_digits(&mut self) {
        let now = self.frames.elapsed_ms();
        let texts = self.countdown.display().padded();
        for (digit, text) in self.digits.iter_mut().zip(texts.iter()) {
            digit.update(text, now);
        }
    }

    /// Advance the countdown, the leaves and the scroll triggers.
    fn update(&mut self) {
        self.countdown.tick(self.clock.now());
        self.sync_digits();

        let now = self.anim_ms();
        self.leaves.frame(now);
        let view_px = f32::from(self.layout.view_rows()) * PX_PER_ROW;
        let scroll = self.scroll.offset();
        let top_px = |row: u16| (f32::from(row) - f32::from(scroll)) * PX_PER_ROW;

        let showcase = self.layout.section(Section::Showcase).y;
        let footer = self.layout.section(Section::Footer).y;
        self.heading.update(now, top_px(showcase + HEADING_ROW), view_px);
        self.divider.update(now, top_px(showcase + DIVIDER_ROW), view_px);
        self.cards.update(now, top_px(showcase + CARDS_ROW), view_px);
        self.footer.update(now, top_px(footer), view_px);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.resize(area);

        let visible = self.layout.visible(self.scroll.offset());
        let mut page = Buffer::empty(self.layout.page());
        for section in Section::ALL {
            let rect = self.layout.section(section);
            if rect.intersects(visible) {
                self.render_section(section, rect, &mut page);
            }
        }
        blit(&page, visible, frame.buffer_mut(), area);
    }

    fn render_section(&mut self, section: Section, rect: Rect, buf: &mut Buffer) {
        let now = self.anim_ms();
        let since = self.since_mount();
        let accent = self.config.accent.color();

        match section {
            Section::Splash => {
                sections::vignette(buf, rect);
                self.leaves.render(buf);
                let frame_ms = self.frames.elapsed_ms();
                let view = SplashView {
                    title: &self.config.title,
                    tagline: &self.config.tagline,
                    badge: &self.badge,
                    accent,
                    entrances: self.splash.map(|entrance| entrance.at(since)),
                    units: std::array::from_fn(|i| self.digits[i].frame(frame_ms)),
                    pulse: badge_pulse().value_at(since),
                };
                sections::splash(buf, rect, &view);
            }
            Section::Hero => {
                let items = std::array::from_fn(|i| {
                    self.hero
                        .get(i)
                        .map_or(Appearance::SETTLED, |entrance| entrance.at(since))
                });
                sections::hero(buf, rect, &HeroView {
                    accent,
                    elapsed_ms: since,
                    items,
                });
            }
            Section::Showcase => {
                sections::showcase(buf, rect, &ShowcaseView {
                    accent,
                    heading: self.heading.item(0, now),
                    divider: self.divider.item(0, now).opacity,
                    cards: std::array::from_fn(|i| self.cards.item(i, now)),
                });
            }
            Section::Sphere => sections::sphere(buf, rect, since, accent),
            Section::Footer => {
                let year = self.clock.now().with_timezone(&Local).year();
                sections::footer(buf, rect, self.footer.item(0, now), year);
            }
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame timeout so animations keep moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.config.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.resize(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let page = i32::from(self.layout.view_rows().saturating_sub(1).max(1));
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.scroll.by(1, &self.layout),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.scroll.by(-1, &self.layout),
            (_, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll.by(page, &self.layout),
            (_, KeyCode::PageUp) => self.scroll.by(-page, &self.layout),
            (_, KeyCode::Char('g') | KeyCode::Home) => self.scroll.to_top(),
            (_, KeyCode::Char('G') | KeyCode::End) => self.scroll.to_bottom(&self.layout),
            (_, KeyCode::Char('c')) => self.cycle_accent(),
            (_, KeyCode::Char('l')) => self.toggle_leaves(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll.by(WHEEL_ROWS, &self.layout),
            MouseEventKind::ScrollUp => self.scroll.by(-WHEEL_ROWS, &self.layout),
            _ => {}
        }
    }

    /// Cycle through accent themes, saving the choice when possible.
    fn cycle_accent(&mut self) {
        self.config.accent = self.config.accent.next();
        tracing::info!(accent = self.config.accent.name(), "accent changed");
        if let Some(path) = &self.config_path
            && let Err(err) = self.config.save_to(path)
        {
            tracing::warn!(error = %err, "failed to persist accent");
        }
    }

    /// Show or hide the leaves for this session only.
    fn toggle_leaves(&mut self) {
        if self.leaves.is_running() {
            self.leaves.stop();
        } else {
            let (now, viewport) = (self.anim_ms(), self.splash_viewport());
            self.leaves.start(now, viewport);
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Copy the visible slice of the page onto the terminal.
fn blit(page: &Buffer, visible: Rect, out: &mut Buffer, area: Rect) {
    for row in 0..visible.height.min(area.height) {
        for col in 0..visible.width.min(area.width) {
            let src = page.cell((visible.x + col, visible.y + row));
            let dst = out.cell_mut((area.x + col, area.y + row));
            if let (Some(src), Some(dst)) = (src, dst) {
                *dst = src.clone();
            }
        }
    }
}
