//! Falling glyph background effect.
//!
//! The effect keeps one falling drop per column of a drawing surface. Every
//! frame it paints a translucent overlay in the theme's background color,
//! which leaves fading trails, then draws one random glyph per column at the
//! drop's position in a random palette color. Frames are driven by a
//! [`Ticker`] owned by the [`Mounted`] guard returned from
//! [`RainEffect::mount`]; dropping the guard stops the effect.

mod chars;
mod effect;
mod rain;
mod surface;
mod ticker;

pub use chars::SHAPE_GLYPHS;
pub use effect::{Mounted, RainEffect};
pub use rain::{INITIAL_DROP, RainSettings, RainState};
pub use surface::{Cell, CellSurface, DEFAULT_LAYER_OPACITY, Surface};
pub use ticker::Ticker;
