//! Vector character ROM toolkit.
//!
//! Decodes 5-bit stroke codes from a vector-display character generator into
//! beam positions, and rasterizes the traced glyphs at true size, CDC-style
//! scaled size or supersampled resolution.

pub mod js_api;
pub mod raster;
pub mod rom;
pub mod utils;
pub mod vector;

use utils::{init_console_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

pub use raster::{rasterize, render_atlas, render_strokes, RasterBuffer, RasterMode, RasterOptions};
pub use rom::{parse_rom_listing, GlyphTable, RomError};
pub use vector::{decode, decode_glyph, decode_raw, StrokeCode, Triplet, VectorPoint};

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_console_logging(log::Level::Debug);
}
