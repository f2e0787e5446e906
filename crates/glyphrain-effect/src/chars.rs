//! Glyph alphabet for the rain.

/// Filled and hollow squares, triangles and circles.
pub const SHAPE_GLYPHS: &[char] = &['■', '□', '▲', '△', '●', '○'];
