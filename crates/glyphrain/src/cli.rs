//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use glyphrain_config::Config;
use glyphrain_core::{AnimationSpeed, Theme};

/// A terminal hero banner with falling glyph rain.
#[derive(Debug, Parser)]
#[command(name = "glyphrain", version, about)]
pub struct Args {
    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Theme at startup (light or dark).
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<Theme>,

    /// Animation speed (slow, normal or fast).
    #[arg(long, value_parser = parse_speed)]
    pub speed: Option<AnimationSpeed>,

    /// Seed for the glyph and color picks, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Column width and row height of the glyph grid, in cells.
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_size: Option<u16>,

    /// Start with the hero text hidden.
    #[arg(long)]
    pub no_hero: bool,
}

impl Args {
    /// Apply command line overrides on top of the file config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(cell_size) = self.cell_size {
            config.rain.cell_size = cell_size;
        }
        if self.no_hero {
            config.hero.show = false;
        }
    }
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    match value.to_ascii_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        other => Err(format!("unknown theme `{other}`, expected light or dark")),
    }
}

fn parse_speed(value: &str) -> Result<AnimationSpeed, String> {
    match value.to_ascii_lowercase().as_str() {
        "slow" => Ok(AnimationSpeed::Slow),
        "normal" => Ok(AnimationSpeed::Normal),
        "fast" => Ok(AnimationSpeed::Fast),
        other => Err(format!(
            "unknown speed `{other}`, expected slow, normal or fast"
        )),
    }
}
