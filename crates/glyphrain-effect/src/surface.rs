//! Drawing surfaces for the rain.

use glyphrain_core::{Rgb, Viewport};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Glyphs this close to the fade color are considered gone.
const VANISH_DISTANCE: u8 = 12;

/// Opacity of the rain layer unless told otherwise.
pub const DEFAULT_LAYER_OPACITY: f32 = 0.3;

/// Something the rain can paint on.
pub trait Surface {
    /// Current size in surface pixels.
    fn viewport(&self) -> Viewport;

    /// Resize the surface. Existing content is discarded.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Paint `color` over the whole surface with the given opacity.
    fn fill(&mut self, color: Rgb, alpha: f32);

    /// Draw a glyph with its top-left corner at `(x, y)`.
    ///
    /// Positions outside the surface are clipped.
    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, color: Rgb);

    /// Set how opaque the finished layer is when shown. Ignored by default.
    fn set_layer_opacity(&mut self, _opacity: f32) {}
}

/// A glyph left on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
}

/// In-memory surface where one terminal cell is one pixel.
///
/// Overlays are composited per cell, so glyphs fade out over successive
/// frames instead of disappearing at once.
#[derive(Debug, Clone)]
pub struct CellSurface {
    viewport: Viewport,
    cells: Vec<Option<Cell>>,
    backdrop: Rgb,
    opacity: f32,
}

impl CellSurface {
    /// Create a surface sized to `viewport`.
    ///
    /// Returns `None` when the viewport has no area to draw on.
    pub fn acquire(viewport: Viewport, backdrop: Rgb) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }
        Some(Self {
            viewport,
            cells: vec![None; Self::area(viewport)],
            backdrop,
            opacity: DEFAULT_LAYER_OPACITY,
        })
    }

    /// Builder-style variant of [`Surface::set_layer_opacity`].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_layer_opacity(opacity);
        self
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Replace the backdrop at once, without fading.
    pub fn set_backdrop(&mut self, backdrop: Rgb) {
        self.backdrop = backdrop;
    }

    /// Foreground a glyph is shown with once the layer opacity is applied.
    pub fn shown_color(&self, fg: Rgb) -> Rgb {
        self.backdrop.blend(fg, self.opacity)
    }

    fn area(viewport: Viewport) -> usize {
        viewport.width as usize * viewport.height as usize
    }

    /// Color behind the glyphs.
    pub fn backdrop(&self) -> Rgb {
        self.backdrop
    }

    /// The glyph at `(x, y)`, if any is still visible.
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    /// Number of cells currently showing a glyph.
    pub fn visible_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.viewport.width as usize + x as usize
    }
}

/// Move `from` toward `to`, always making progress so fades terminate.
fn fade_toward(from: Rgb, to: Rgb, alpha: f32) -> Rgb {
    if alpha <= 0.0 {
        return from;
    }
    let next = from.blend(to, alpha);
    if next == from { to } else { next }
}

impl Surface for CellSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cells.clear();
        self.cells.resize(Self::area(viewport), None);
    }

    fn fill(&mut self, color: Rgb, alpha: f32) {
        self.backdrop = fade_toward(self.backdrop, color, alpha);
        for slot in &mut self.cells {
            if let Some(cell) = slot {
                cell.fg = fade_toward(cell.fg, color, alpha);
                if cell.fg.distance(color) <= VANISH_DISTANCE {
                    *slot = None;
                }
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, glyph: char, fg: Rgb) {
        if x >= self.viewport.width as u32 || y >= self.viewport.height as u32 {
            return;
        }
        let idx = self.index(x as u16, y as u16);
        self.cells[idx] = Some(Cell { glyph, fg });
    }

    fn set_layer_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

impl Widget for &CellSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Color::from(self.backdrop);
        let width = area.width.min(self.viewport.width);
        let height = area.height.min(self.viewport.height);

        for y in 0..height {
            for x in 0..width {
                let Some(target) = buf.cell_mut((area.x + x, area.y + y)) else {
                    continue;
                };
                target.set_bg(bg);
                match self.cells[self.index(x, y)] {
                    Some(cell) => {
                        target
                            .set_char(cell.glyph)
                            .set_fg(self.shown_color(cell.fg).into());
                    }
                    None => {
                        target.set_char(' ');
                    }
                }
            }
        }
    }
}
