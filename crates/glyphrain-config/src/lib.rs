//! Configuration file handling for glyphrain.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/glyphrain/config.toml` on Linux). Every field is optional; a
//! missing file yields the defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphrain_core::{AnimationSpeed, Palette, Rgb, Theme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default glyph alphabet: filled and hollow squares, triangles and circles.
pub const DEFAULT_GLYPHS: &str = "■□▲△●○";

/// Default probability that a drop past the bottom edge restarts at the top.
pub const DEFAULT_RESET_CHANCE: f32 = 0.025;

/// Default opacity of the per-frame fade overlay.
pub const DEFAULT_FADE_ALPHA: f32 = 0.05;

/// Default opacity of the whole rain layer over the backdrop.
pub const DEFAULT_LAYER_OPACITY: f32 = 0.3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme at startup.
    pub theme: Theme,
    /// Redraw cadence preset.
    pub speed: AnimationSpeed,
    /// Rain effect parameters.
    pub rain: RainConfig,
    /// Hero banner text.
    pub hero: HeroConfig,
}

/// Parameters for the falling glyph effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Column width and row height of the glyph grid, in terminal cells.
    pub cell_size: u16,
    /// Candidate glyphs, one picked at random per column per frame.
    pub glyphs: String,
    /// Chance per frame that an off-screen drop restarts at the top.
    pub reset_chance: f32,
    /// Opacity of the fade overlay painted every frame.
    pub fade_alpha: f32,
    /// Opacity the rain is shown at over the backdrop.
    pub layer_opacity: f32,
    /// Hex colors used in light mode. Empty means the built-in palette.
    pub light_palette: Vec<String>,
    /// Hex colors used in dark mode. Empty means the built-in palette.
    pub dark_palette: Vec<String>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            cell_size: 1,
            glyphs: DEFAULT_GLYPHS.to_string(),
            reset_chance: DEFAULT_RESET_CHANCE,
            fade_alpha: DEFAULT_FADE_ALPHA,
            layer_opacity: DEFAULT_LAYER_OPACITY,
            light_palette: Vec::new(),
            dark_palette: Vec::new(),
        }
    }
}

impl RainConfig {
    /// Glyph alphabet as characters, skipping whitespace.
    pub fn glyph_chars(&self) -> Vec<char> {
        self.glyphs.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Resolve the configured palettes.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let light = parse_colors("rain.light_palette", &self.light_palette)?;
        let dark = parse_colors("rain.dark_palette", &self.dark_palette)?;
        Ok(Palette::new(light, dark))
    }
}

fn parse_colors(field: &'static str, hexes: &[String]) -> Result<Vec<Rgb>, ConfigError> {
    hexes
        .iter()
        .map(|hex| {
            Rgb::from_hex(hex).ok_or_else(|| ConfigError::Invalid {
                field,
                reason: format!("`{hex}` is not a #RRGGBB color"),
            })
        })
        .collect()
}

/// Text shown in the hero banner over the rain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Whether the banner is visible at startup.
    pub show: bool,
    /// Name shown in the footer.
    pub owner: String,
    /// Small label above the headline.
    pub badge: String,
    pub headline: String,
    /// Highlighted continuation of the headline.
    pub highlight: String,
    pub tagline: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            show: true,
            owner: "Jarardh Jacob C.".to_string(),
            badge: "Full Stack Developer".to_string(),
            headline: "Building digital".to_string(),
            highlight: "experiences that matter".to_string(),
            tagline: "I craft accessible, pixel-perfect, and performant web applications. \
                      Passionate about turning complex problems into simple, beautiful solutions."
                .to_string(),
        }
    }
}

impl Config {
    /// Location of the config file for the current user.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glyphrain").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        if rain.cell_size == 0 {
            return Err(ConfigError::Invalid {
                field: "rain.cell_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if rain.glyph_chars().is_empty() {
            return Err(ConfigError::Invalid {
                field: "rain.glyphs",
                reason: "must contain at least one glyph".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&rain.reset_chance) {
            return Err(ConfigError::Invalid {
                field: "rain.reset_chance",
                reason: format!("{} is outside 0.0..=1.0", rain.reset_chance),
            });
        }
        if !(0.0..=1.0).contains(&rain.fade_alpha) {
            return Err(ConfigError::Invalid {
                field: "rain.fade_alpha",
                reason: format!("{} is outside 0.0..=1.0", rain.fade_alpha),
            });
        }
        if !(0.0..=1.0).contains(&rain.layer_opacity) {
            return Err(ConfigError::Invalid {
                field: "rain.layer_opacity",
                reason: format!("{} is outside 0.0..=1.0", rain.layer_opacity),
            });
        }
        rain.palette()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.rain.glyph_chars().len(), 6);
        assert_eq!(config.rain.reset_chance, DEFAULT_RESET_CHANCE);
        assert_eq!(config.rain.layer_opacity, DEFAULT_LAYER_OPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_tagline_has_both_sentences() {
        let tagline = HeroConfig::default().tagline;
        assert!(tagline.starts_with("I craft accessible, pixel-perfect"));
        assert!(tagline.ends_with(
            "applications. Passionate about turning complex problems into simple, beautiful solutions."
        ));
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml_str(
            r##"
            theme = "light"
            speed = "fast"

            [rain]
            cell_size = 2
            dark_palette = ["#00FF00"]
            "##,
        )
        .unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.speed, AnimationSpeed::Fast);
        assert_eq!(config.rain.cell_size, 2);
        assert_eq!(config.rain.glyphs, DEFAULT_GLYPHS);
        assert!(config.hero.show);

        let palette = config.rain.palette().unwrap();
        assert_eq!(palette.for_theme(Theme::Dark), &[Rgb::new(0, 255, 0)]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_toml_str("[rain]\ncell_size = 0"),
            Err(ConfigError::Invalid { field: "rain.cell_size", .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[rain]\nreset_chance = 1.5"),
            Err(ConfigError::Invalid { field: "rain.reset_chance", .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[rain]\nlayer_opacity = -0.1"),
            Err(ConfigError::Invalid { field: "rain.layer_opacity", .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[rain]\nglyphs = \"  \""),
            Err(ConfigError::Invalid { field: "rain.glyphs", .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[rain]\nlight_palette = [\"blue\"]"),
            Err(ConfigError::Invalid { field: "rain.light_palette", .. })
        ));
        assert!(matches!(
            Config::from_toml_str("theme = \"sepia\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("glyphrain-missing-config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }
}
