/// Raster Module
///
/// Pixel output for decoded glyphs: the two-layer buffer, the Bresenham
/// rasterizer with its three scaling modes, and the whole-ROM atlas.

pub mod atlas;
pub mod buffer;
pub mod rasterizer;

pub use atlas::{render_atlas, RomAtlas, ATLAS_COLUMNS};
pub use buffer::{Palette, RasterBuffer};
pub use rasterizer::{
    rasterize, render_strokes, RasterMode, RasterModeKind, RasterOptions, GLYPH_GRID, MAX_CANVAS_SIZE,
    MAX_CDC_SCALE,
};
