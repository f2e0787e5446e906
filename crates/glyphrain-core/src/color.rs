//! Color values and the rain palettes.

use ratatui::style::Color;

use crate::Theme;

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Composite `over` on top of `self` with the given opacity.
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |base: u8, top: u8| {
            let v = base as f32 + (top as f32 - base as f32) * alpha;
            v.round() as u8
        };
        Rgb::new(mix(self.r, over.r), mix(self.g, over.g), mix(self.b, over.b))
    }

    /// Largest per-channel distance to another color.
    pub fn distance(self, other: Rgb) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Bright sky blues and white, readable on black.
pub const DARK_PALETTE: [Rgb; 4] = [
    Rgb::new(0x0E, 0xA5, 0xE9),
    Rgb::new(0x38, 0xBD, 0xF8),
    Rgb::new(0xBA, 0xE6, 0xFD),
    Rgb::new(0xFF, 0xFF, 0xFF),
];

/// Deep navy and rich blues, readable on white.
pub const LIGHT_PALETTE: [Rgb; 4] = [
    Rgb::new(0x0C, 0x4A, 0x6E),
    Rgb::new(0x03, 0x69, 0xA1),
    Rgb::new(0x02, 0x84, 0xC7),
    Rgb::new(0x25, 0x63, 0xEB),
];

/// Glyph colors for each theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    light: Vec<Rgb>,
    dark: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            light: LIGHT_PALETTE.to_vec(),
            dark: DARK_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    /// Build a palette, falling back to the defaults for an empty set.
    pub fn new(light: Vec<Rgb>, dark: Vec<Rgb>) -> Self {
        Self {
            light: if light.is_empty() {
                LIGHT_PALETTE.to_vec()
            } else {
                light
            },
            dark: if dark.is_empty() {
                DARK_PALETTE.to_vec()
            } else {
                dark
            },
        }
    }

    /// Colors to draw with under `theme`. Never empty.
    pub fn for_theme(&self, theme: Theme) -> &[Rgb] {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}
