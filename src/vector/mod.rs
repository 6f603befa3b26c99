/// Vector Module
///
/// Turns ROM stroke codes into absolute beam positions and derives the
/// numeric triplet form consumed by the rasterizer.

pub mod decoder;
pub mod stroke;
pub mod triplet;

pub use decoder::{decode, decode_glyph, decode_raw};
pub use stroke::{AxisStroke, StrokeCode};
pub use triplet::{bounds, dwell_points, path_length, to_triplets, Bounds, GlyphMetrics, Triplet};

/// Beam position after one stroke, in glyph units with the origin bottom-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VectorPoint {
    pub x: i32,
    pub y: i32,
    pub beam_on: bool,
}

impl VectorPoint {
    #[inline]
    pub const fn new(x: i32, y: i32, beam_on: bool) -> Self {
        Self { x, y, beam_on }
    }
}
