//! Core types shared by the glyphrain crates.

mod color;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use color::{DARK_PALETTE, LIGHT_PALETTE, Palette, Rgb};

/// Light or dark page theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Switch to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Page background for this theme.
    pub fn background(self) -> Rgb {
        match self {
            Theme::Light => Rgb::WHITE,
            Theme::Dark => Rgb::BLACK,
        }
    }

    /// Primary text color for this theme.
    pub fn foreground(self) -> Rgb {
        match self {
            // gray-900 / gray-100
            Theme::Light => Rgb::new(0x11, 0x18, 0x27),
            Theme::Dark => Rgb::new(0xF3, 0xF4, 0xF6),
        }
    }

    /// Accent color used for highlights.
    pub fn accent(self) -> Rgb {
        match self {
            // indigo-600 / indigo-400
            Theme::Light => Rgb::new(0x4F, 0x46, 0xE5),
            Theme::Dark => Rgb::new(0x81, 0x8C, 0xF8),
        }
    }

    /// Muted text color for secondary lines.
    pub fn muted(self) -> Rgb {
        match self {
            Theme::Light => Rgb::new(0x37, 0x41, 0x51),
            Theme::Dark => Rgb::new(0x9C, 0xA3, 0xAF),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Animation speed preset, mapped to a redraw cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Interval between two frames.
    ///
    /// `Normal` is roughly 30 frames per second.
    pub fn frame_interval(self) -> Duration {
        match self {
            AnimationSpeed::Slow => Duration::from_millis(66),
            AnimationSpeed::Normal => Duration::from_millis(33),
            AnimationSpeed::Fast => Duration::from_millis(16),
        }
    }

    /// Cycle to the next speed preset.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Size of the drawable area, in surface pixels (one terminal cell each).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when nothing can be drawn.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of whole columns of `cell_size` that fit across the viewport.
    pub fn columns(&self, cell_size: u16) -> usize {
        if cell_size == 0 {
            return 0;
        }
        (self.width / cell_size) as usize
    }
}
