mod cli;
mod hero;
mod logging;

use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphrain_config::Config;
use glyphrain_core::{AnimationSpeed, Theme, Viewport};
use glyphrain_effect::{CellSurface, Mounted, RainEffect, RainSettings};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::Block,
};

use crate::{cli::Args, hero::Hero, logging::LoggingConfig};

/// Upper bound on how long to wait for input when no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

type Rain<'a> = Mounted<'a, CellSurface, StdRng>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let _log_guard = logging::init_logging(&LoggingConfig::from_env())?;

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .wrap_err("failed to load configuration")?;
    args.apply(&mut config);
    config.validate()?;

    let settings = rain_settings(&config)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    tracing::info!(seed = ?args.seed, theme = config.theme.name(), "starting glyphrain");
    let effect = RainEffect::new(settings, config.speed, rng);

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal, effect);
    ratatui::restore();
    result
}

/// Build the effect settings from the loaded config.
fn rain_settings(config: &Config) -> color_eyre::Result<RainSettings> {
    Ok(RainSettings {
        cell_size: config.rain.cell_size,
        glyphs: config.rain.glyph_chars(),
        reset_chance: config.rain.reset_chance as f64,
        fade_alpha: config.rain.fade_alpha,
        layer_opacity: config.rain.layer_opacity,
        palette: config.rain.palette()?,
    })
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current light/dark theme, handed to the rain every frame.
    theme: Theme,
    /// Current redraw cadence.
    speed: AnimationSpeed,
    /// Whether the rain is paused.
    paused: bool,
    /// Whether the hero text is visible.
    show_hero: bool,
    config: Config,
    year: i32,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            theme: config.theme,
            speed: config.speed,
            paused: false,
            show_hero: config.hero.show,
            year: Local::now().year(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(
        mut self,
        mut terminal: DefaultTerminal,
        mut effect: RainEffect<StdRng>,
    ) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = Viewport::new(size.width, size.height);
        let surface = CellSurface::acquire(viewport, self.theme.background());
        let mut rain = effect.mount(surface, Instant::now());

        self.running = true;
        while self.running {
            rain.tick(Instant::now(), self.theme);
            let surface = rain.surface();
            terminal.draw(|frame| self.render(frame, surface))?;
            self.handle_crossterm_events(&mut rain)?;
        }

        rain.unmount();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, surface: Option<&CellSurface>) {
        let area = frame.area();

        match surface {
            Some(surface) => frame.render_widget(surface, area),
            None => frame.render_widget(
                Block::new()
                    .style(Style::new().bg(Color::from(self.theme.background()))),
                area,
            ),
        }

        let [main, footer, help] = Layout::vertical([
            Constraint::Fill(1),   // Hero
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Help text
        ])
        .areas(area);

        if self.show_hero {
            frame.render_widget(Hero::new(&self.config.hero, self.theme), main);
        }

        let muted = self.theme.muted();
        let background = self.theme.background();
        let footer_line = Line::from(format!(
            "© {} {} All rights reserved.",
            self.year, self.config.hero.owner
        ))
        .fg(muted)
        .bg(background)
        .centered();
        frame.render_widget(footer_line, footer);

        let accent = self.theme.accent();
        let help_line = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".fg(muted),
            "t".bold().fg(accent),
            format!(" {} mode  ", self.theme.toggle().name()).fg(muted),
            "p".bold().fg(accent),
            (if self.paused { " resume  " } else { " pause  " }).fg(muted),
            "s".bold().fg(accent),
            format!(" speed ({})  ", self.speed.name()).fg(muted),
            "h".bold().fg(accent),
            " hero".fg(muted),
        ])
        .bg(background)
        .centered();
        frame.render_widget(help_line, help);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time left until the next rain frame.
    fn handle_crossterm_events(&mut self, rain: &mut Rain<'_>) -> color_eyre::Result<()> {
        let timeout = rain
            .until_next(Instant::now())
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, rain),
                Event::Resize(width, height) => rain.on_resize(Viewport::new(width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, rain: &mut Rain<'_>) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(rain),
            (_, KeyCode::Char('p')) => self.toggle_pause(rain),
            (_, KeyCode::Char('s')) => self.cycle_speed(rain),
            (_, KeyCode::Char('h')) => self.show_hero = !self.show_hero,
            _ => {}
        }
    }

    /// Switch between light and dark mode.
    ///
    /// A paused rain never fades toward the new background, so its
    /// backdrop is switched directly.
    fn toggle_theme(&mut self, rain: &mut Rain<'_>) {
        self.theme = self.theme.toggle();
        if self.paused {
            if let Some(surface) = rain.surface_mut() {
                surface.set_backdrop(self.theme.background());
            }
        }
        tracing::debug!(theme = self.theme.name(), "theme toggled");
    }

    /// Stop or restart the rain's frame timer.
    fn toggle_pause(&mut self, rain: &mut Rain<'_>) {
        self.paused = !self.paused;
        if self.paused {
            rain.pause();
        } else {
            rain.resume(Instant::now());
        }
    }

    /// Cycle through the speed presets.
    fn cycle_speed(&mut self, rain: &mut Rain<'_>) {
        self.speed = self.speed.next();
        rain.set_speed(self.speed);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use glyphrain_core::Rgb;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn mounted_effect(effect: &mut RainEffect<StdRng>, width: u16, height: u16) -> Rain<'_> {
        let surface = CellSurface::acquire(Viewport::new(width, height), Rgb::BLACK);
        effect.mount(surface, Instant::now())
    }

    fn effect() -> RainEffect<StdRng> {
        let settings = rain_settings(&Config::default()).unwrap();
        RainEffect::new(settings, AnimationSpeed::Normal, StdRng::seed_from_u64(1))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys() {
        let mut effect = effect();
        let mut rain = mounted_effect(&mut effect, 20, 10);
        let mut app = App::new(Config::default());
        app.running = true;

        app.on_key_event(press(KeyCode::Char('t')), &mut rain);
        assert_eq!(app.theme, Theme::Light);

        app.on_key_event(press(KeyCode::Char('p')), &mut rain);
        assert!(app.paused);
        assert!(!rain.is_running());
        app.on_key_event(press(KeyCode::Char('p')), &mut rain);
        assert!(rain.is_running());

        app.on_key_event(press(KeyCode::Char('s')), &mut rain);
        assert_eq!(app.speed, AnimationSpeed::Fast);

        app.on_key_event(press(KeyCode::Char('h')), &mut rain);
        assert!(!app.show_hero);

        app.on_key_event(press(KeyCode::Char('q')), &mut rain);
        assert!(!app.running);
    }

    #[test]
    fn test_theme_toggle_while_paused_switches_backdrop() {
        let mut effect = effect();
        let mut rain = mounted_effect(&mut effect, 20, 10);
        let mut app = App::new(Config::default());

        app.on_key_event(press(KeyCode::Char('p')), &mut rain);
        app.on_key_event(press(KeyCode::Char('t')), &mut rain);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(
            rain.surface().map(CellSurface::backdrop),
            Some(Rgb::WHITE)
        );
    }

    #[test]
    fn test_theme_toggle_while_running_leaves_fade_to_frames() {
        let mut effect = effect();
        let mut rain = mounted_effect(&mut effect, 20, 10);
        let mut app = App::new(Config::default());

        app.on_key_event(press(KeyCode::Char('t')), &mut rain);
        assert_eq!(
            rain.surface().map(CellSurface::backdrop),
            Some(Rgb::BLACK)
        );
        rain.frame(app.theme);
        assert!(rain.surface().is_some_and(|s| s.backdrop() != Rgb::BLACK));
    }

    #[test]
    fn test_rain_settings_carry_layer_opacity() {
        let mut config = Config::default();
        config.rain.layer_opacity = 0.8;
        let settings = rain_settings(&config).unwrap();
        assert_eq!(settings.layer_opacity, 0.8);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut effect = effect();
        let mut rain = mounted_effect(&mut effect, 20, 10);
        let mut app = App::new(Config::default());
        app.running = true;

        app.on_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut rain,
        );
        assert!(!app.running);
    }

    #[test]
    fn test_render_frame() {
        let mut effect = effect();
        let mut rain = mounted_effect(&mut effect, 80, 24);
        rain.frame(Theme::Dark);

        let app = App::new(Config::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| app.render(frame, rain.surface()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let footer: String = (0..80u16).map(|x| buffer[(x, 22)].symbol()).collect();
        assert!(footer.contains("All rights reserved."));
        let help: String = (0..80u16).map(|x| buffer[(x, 23)].symbol()).collect();
        assert!(help.contains("quit"));
    }
}
