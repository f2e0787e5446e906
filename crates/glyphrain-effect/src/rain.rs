//! Falling glyph simulation (stateful).

use glyphrain_core::{Palette, Theme, Viewport};
use rand::Rng;

use crate::{
    chars::SHAPE_GLYPHS,
    surface::{DEFAULT_LAYER_OPACITY, Surface},
};

/// Drop position every column starts from.
pub const INITIAL_DROP: u32 = 1;

/// Parameters shared by every frame of the rain.
#[derive(Debug, Clone)]
pub struct RainSettings {
    /// Column width and row height, in surface pixels.
    pub cell_size: u16,
    /// Candidate glyphs.
    pub glyphs: Vec<char>,
    /// Chance per frame that a drop below the bottom edge restarts.
    pub reset_chance: f64,
    /// Opacity of the trail-fading overlay.
    pub fade_alpha: f32,
    /// Opacity the whole rain layer is shown at over the backdrop.
    pub layer_opacity: f32,
    pub palette: Palette,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_size: 1,
            glyphs: SHAPE_GLYPHS.to_vec(),
            reset_chance: 0.025,
            fade_alpha: 0.05,
            layer_opacity: DEFAULT_LAYER_OPACITY,
            palette: Palette::default(),
        }
    }
}

/// Drop positions for each column of the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainState {
    /// Vertical position of each column's drop, in cells.
    drops: Vec<u32>,
    viewport: Viewport,
    cell_size: u16,
}

impl RainState {
    /// Create one drop per column, all at [`INITIAL_DROP`].
    pub fn new(viewport: Viewport, cell_size: u16) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            drops: vec![INITIAL_DROP; viewport.columns(cell_size)],
            viewport,
            cell_size,
        }
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    /// Reflow the columns for a new viewport.
    ///
    /// Columns that still fit keep their drops, new columns start at
    /// [`INITIAL_DROP`] and columns past the new width are dropped.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.drops.resize(viewport.columns(self.cell_size), INITIAL_DROP);
    }

    /// Advance the rain by one frame, drawing onto `surface`.
    pub fn step<S, R>(
        &mut self,
        surface: &mut S,
        theme: Theme,
        settings: &RainSettings,
        rng: &mut R,
    ) where
        S: Surface + ?Sized,
        R: Rng,
    {
        surface.fill(theme.background(), settings.fade_alpha);

        let glyphs = if settings.glyphs.is_empty() {
            SHAPE_GLYPHS
        } else {
            settings.glyphs.as_slice()
        };
        let colors = settings.palette.for_theme(theme);
        let reset_chance = settings.reset_chance.clamp(0.0, 1.0);
        let cell = self.cell_size as u32;
        let bottom = self.viewport.height as u32;

        for (i, drop) in self.drops.iter_mut().enumerate() {
            let glyph = glyphs[rng.random_range(0..glyphs.len())];
            let color = colors[rng.random_range(0..colors.len())];
            let y = drop.saturating_mul(cell);
            surface.draw_glyph(i as u32 * cell, y, glyph, color);

            // Restart somewhere after crossing the bottom edge
            if y > bottom && rng.random_bool(reset_chance) {
                *drop = 0;
            }
            *drop = drop.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use glyphrain_core::{DARK_PALETTE, LIGHT_PALETTE, Rgb};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        Fill(Rgb),
        Glyph { x: u32, y: u32, glyph: char, color: Rgb },
    }

    /// Surface that records every call.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        viewport: Viewport,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new(width: u16, height: u16) -> Self {
            Self {
                viewport: Viewport::new(width, height),
                ops: Vec::new(),
            }
        }

        fn glyphs(&self) -> Vec<(u32, u32, char, Rgb)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::Glyph { x, y, glyph, color } => Some((x, y, glyph, color)),
                    Op::Fill(_) => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewport = viewport;
        }

        fn fill(&mut self, color: Rgb, _alpha: f32) {
            self.ops.push(Op::Fill(color));
        }

        fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, color: Rgb) {
            self.ops.push(Op::Glyph { x, y, glyph, color });
        }
    }

    fn no_resets() -> RainSettings {
        RainSettings {
            reset_chance: 0.0,
            ..RainSettings::default()
        }
    }

    #[test]
    fn test_init_columns() {
        let rain = RainState::new(Viewport::new(80, 24), 3);
        assert_eq!(rain.columns(), 26);
        assert!(rain.drops().iter().all(|&d| d == INITIAL_DROP));

        // A zero cell size is treated as one
        assert_eq!(RainState::new(Viewport::new(10, 5), 0).columns(), 10);
    }

    #[test]
    fn test_one_glyph_per_column() {
        let mut rain = RainState::new(Viewport::new(12, 8), 2);
        let mut surface = RecordingSurface::new(12, 8);
        let mut rng = StdRng::seed_from_u64(7);

        rain.step(&mut surface, Theme::Dark, &RainSettings::default(), &mut rng);

        assert_eq!(surface.ops[0], Op::Fill(Rgb::BLACK));
        let glyphs = surface.glyphs();
        assert_eq!(glyphs.len(), 6);
        for (i, (x, y, glyph, _)) in glyphs.into_iter().enumerate() {
            assert_eq!(x, i as u32 * 2);
            assert_eq!(y, INITIAL_DROP * 2);
            assert!(SHAPE_GLYPHS.contains(&glyph));
        }
    }

    #[test]
    fn test_drops_advance_one_cell_per_frame() {
        let mut rain = RainState::new(Viewport::new(10, 6), 1);
        let mut surface = RecordingSurface::new(10, 6);
        let mut rng = StdRng::seed_from_u64(42);
        let settings = no_resets();

        for frame in 0..20u32 {
            let before = rain.drops().to_vec();
            rain.step(&mut surface, Theme::Dark, &settings, &mut rng);
            for (old, new) in before.iter().zip(rain.drops()) {
                assert_eq!(*new, old + 1, "frame {frame}");
            }
        }
        assert!(rain.drops().iter().all(|&d| d == INITIAL_DROP + 20));
    }

    #[test]
    fn test_drops_reset_only_past_bottom() {
        let mut rain = RainState::new(Viewport::new(8, 5), 1);
        let mut surface = RecordingSurface::new(8, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let settings = RainSettings {
            reset_chance: 1.0,
            ..RainSettings::default()
        };

        // Drops at 1..=5 have not crossed the bottom edge yet
        for _ in 0..5 {
            rain.step(&mut surface, Theme::Dark, &settings, &mut rng);
        }
        assert!(rain.drops().iter().all(|&d| d == 6));

        // At 6 the glyph lands below the edge and the column restarts
        rain.step(&mut surface, Theme::Dark, &settings, &mut rng);
        assert!(rain.drops().iter().all(|&d| d == 1));
    }

    #[test]
    fn test_stochastic_resets_keep_drops_in_range() {
        let mut rain = RainState::new(Viewport::new(40, 10), 1);
        let mut surface = RecordingSurface::new(40, 10);
        let mut rng = StdRng::seed_from_u64(99);
        let settings = RainSettings::default();

        let mut saw_reset = false;
        for _ in 0..400 {
            let before = rain.drops().to_vec();
            rain.step(&mut surface, Theme::Light, &settings, &mut rng);
            for (old, new) in before.iter().zip(rain.drops()) {
                assert!(*new == old + 1 || *new == 1);
                saw_reset |= *new == 1 && *old > 1;
            }
        }
        assert!(saw_reset);
    }

    #[test]
    fn test_theme_switch_changes_palette_only() {
        let mut rain = RainState::new(Viewport::new(16, 10), 1);
        let mut surface = RecordingSurface::new(16, 10);
        let mut rng = StdRng::seed_from_u64(3);
        let settings = no_resets();

        rain.step(&mut surface, Theme::Dark, &settings, &mut rng);
        assert!(
            surface
                .glyphs()
                .iter()
                .all(|(_, _, _, color)| DARK_PALETTE.contains(color))
        );
        let drops = rain.drops().to_vec();

        surface.ops.clear();
        rain.step(&mut surface, Theme::Light, &settings, &mut rng);
        assert_eq!(surface.ops[0], Op::Fill(Rgb::WHITE));
        assert!(
            surface
                .glyphs()
                .iter()
                .all(|(_, _, _, color)| LIGHT_PALETTE.contains(color))
        );
        for (old, new) in drops.iter().zip(rain.drops()) {
            assert_eq!(*new, old + 1);
        }
    }

    #[test]
    fn test_resize_reflows_columns() {
        let mut rain = RainState::new(Viewport::new(10, 10), 2);
        let mut surface = RecordingSurface::new(10, 10);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..3 {
            rain.step(&mut surface, Theme::Dark, &no_resets(), &mut rng);
        }
        assert_eq!(rain.drops(), &[4; 5]);

        rain.resize(Viewport::new(15, 10));
        assert_eq!(rain.columns(), 7);
        assert_eq!(rain.drops(), &[4, 4, 4, 4, 4, INITIAL_DROP, INITIAL_DROP]);

        rain.resize(Viewport::new(5, 10));
        assert_eq!(rain.columns(), 2);
        assert_eq!(rain.drops(), &[4, 4]);

        rain.resize(Viewport::new(1, 10));
        assert_eq!(rain.columns(), 0);
    }
}
