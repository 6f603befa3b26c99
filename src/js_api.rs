use js_sys::{Array, Int32Array, Map, Object, Uint8ClampedArray};
use log::{debug, warn};
use num_traits::FromPrimitive;
use wasm_bindgen::{prelude::*, Clamped};
use web_sys::ImageData;

use crate::{
    raster::{self, Palette, RasterBuffer, RasterMode, RasterModeKind, RasterOptions},
    rom::{parse_rom_listing, GlyphTable, BLANK_KEY},
    vector::{decode, to_triplets, Bounds, GlyphMetrics, Triplet},
};

pub trait ToJsValue {
    fn to_js_value(&self) -> Result<JsValue, JsValue>;
}

pub trait JsUtils {
    fn str_set(&self, key: &str, value: &JsValue);
    fn to_js_object(&self) -> Result<Object, JsValue>;
}

impl JsUtils for Map {
    fn str_set(&self, key: &str, value: &JsValue) {
        self.set(&JsValue::from_str(key), value);
    }

    fn to_js_object(&self) -> Result<Object, JsValue> {
        Object::from_entries(self)
    }
}

impl ToJsValue for Vec<usize> {
    fn to_js_value(&self) -> Result<JsValue, JsValue> {
        let array = Array::new();
        for item in self {
            array.push(&JsValue::from_f64(*item as f64));
        }
        Ok(array.into())
    }
}

impl ToJsValue for Bounds {
    fn to_js_value(&self) -> Result<JsValue, JsValue> {
        let map = Map::new();
        map.str_set("minX", &JsValue::from(self.min_x));
        map.str_set("maxX", &JsValue::from(self.max_x));
        map.str_set("minY", &JsValue::from(self.min_y));
        map.str_set("maxY", &JsValue::from(self.max_y));
        map.str_set("width", &JsValue::from(self.width()));
        map.str_set("height", &JsValue::from(self.height()));
        Ok(map.to_js_object()?.into())
    }
}

impl ToJsValue for GlyphMetrics {
    fn to_js_value(&self) -> Result<JsValue, JsValue> {
        let map = Map::new();
        map.str_set("bounds", &self.bounds.to_js_value()?);
        map.str_set("dwellPoints", &self.dwell_points.to_js_value()?);
        map.str_set("pathLength", &JsValue::from_f64(self.path_length));
        map.str_set("litStrokes", &JsValue::from_f64(self.lit_strokes as f64));
        map.str_set("totalStrokes", &JsValue::from_f64(self.total_strokes as f64));
        Ok(map.to_js_object()?.into())
    }
}

fn flatten_triplets(triplets: &[Triplet]) -> Vec<i32> {
    triplets
        .iter()
        .flat_map(|t| [t.x, t.y, t.intensity as i32])
        .collect()
}

fn raster_mode(mode: u32, size: u32) -> Option<RasterMode> {
    let mode = RasterModeKind::from_u32(mode)?.with_size(size);
    match mode {
        RasterMode::CdcScaled { scale: 0 } | RasterMode::Supersampled { resolution: 0 } => None,
        mode if !mode.fits_canvas() => None,
        mode => Some(mode),
    }
}

fn raster_options(grid: bool) -> RasterOptions {
    RasterOptions {
        grid,
        ..RasterOptions::default()
    }
}

/// A parsed character ROM held on the JS side.
#[wasm_bindgen]
pub struct RomHandle {
    table: GlyphTable,
}

#[wasm_bindgen]
impl RomHandle {
    pub fn load(text: &str) -> Result<RomHandle, JsValue> {
        let table = parse_rom_listing(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        debug!("Loaded ROM with {} glyphs", table.len());
        Ok(RomHandle { table })
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.table.len()
    }

    pub fn keys(&self) -> Array {
        self.table.keys().map(JsValue::from_str).collect()
    }

    /// Decoded glyph as `[x0, y0, i0, x1, y1, i1, ...]`.
    pub fn decode(&self, key: &str) -> Option<Int32Array> {
        let strokes = self.table.get(key)?;
        let flat = flatten_triplets(&to_triplets(&decode(strokes)));
        Some(Int32Array::from(&flat[..]))
    }

    pub fn render(&self, key: &str, mode: u32, size: u32, grid: bool) -> Option<RenderedGlyph> {
        let buffer = self.render_buffer(key, mode, size, grid)?;
        Some(RenderedGlyph::new(&buffer))
    }

    pub fn render_png(&self, key: &str, mode: u32, size: u32, grid: bool) -> Result<Vec<u8>, JsValue> {
        let buffer = self
            .render_buffer(key, mode, size, grid)
            .ok_or_else(|| JsValue::from_str(&format!("Cannot render glyph {:?} in mode {}", key, mode)))?;
        buffer
            .encode_png(&Palette::default())
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn render_atlas(&self, mode: u32, size: u32, grid: bool) -> Result<RenderedGlyph, JsValue> {
        let resolved = raster_mode(mode, size)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid raster mode {} (size {})", mode, size)))?;
        let atlas = raster::render_atlas(&self.table, resolved, &raster_options(grid));
        Ok(RenderedGlyph::new(&atlas.buffer))
    }

    /// Plain object with bounds and stroke statistics, or `null` for an
    /// unknown key.
    pub fn metrics(&self, key: &str) -> Result<JsValue, JsValue> {
        match self.table.get(key) {
            Some(strokes) => GlyphMetrics::from_triplets(&to_triplets(&decode(strokes))).to_js_value(),
            None => Ok(JsValue::NULL),
        }
    }
}

impl RomHandle {
    fn render_buffer(&self, key: &str, mode: u32, size: u32, grid: bool) -> Option<RasterBuffer> {
        let Some(resolved) = raster_mode(mode, size) else {
            warn!("Unsupported raster mode {} (size {})", mode, size);
            return None;
        };
        let strokes = self.table.get_or(key, BLANK_KEY)?;
        Some(raster::render_strokes(strokes, resolved, &raster_options(grid)))
    }
}

/// RGBA pixels of one render, composited with the default palette.
#[wasm_bindgen]
pub struct RenderedGlyph {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RenderedGlyph {
    fn new(buffer: &RasterBuffer) -> Self {
        RenderedGlyph {
            width: buffer.width() as u32,
            height: buffer.height() as u32,
            rgba: buffer.to_rgba(&Palette::default()),
        }
    }
}

#[wasm_bindgen]
impl RenderedGlyph {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> Uint8ClampedArray {
        Uint8ClampedArray::from(&self.rgba[..])
    }

    pub fn to_image_data(&self) -> Result<ImageData, JsValue> {
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&self.rgba[..]), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{MAX_CANVAS_SIZE, MAX_CDC_SCALE};

    const LISTING: &str = "space: 0, 0, 0\nL: 0b01001, 0b10000, 0b00110\n";

    #[test]
    fn test_raster_mode_selector() {
        assert_eq!(raster_mode(0, 0), Some(RasterMode::TrueSize));
        assert_eq!(raster_mode(1, 4), Some(RasterMode::CdcScaled { scale: 4 }));
        assert_eq!(raster_mode(2, 70), Some(RasterMode::Supersampled { resolution: 70 }));
        assert_eq!(raster_mode(1, 0), None);
        assert_eq!(raster_mode(3, 8), None);
    }

    #[test]
    fn test_raster_mode_rejects_oversized_canvas() {
        assert_eq!(raster_mode(1, MAX_CDC_SCALE), Some(RasterMode::CdcScaled { scale: MAX_CDC_SCALE }));
        assert_eq!(raster_mode(1, MAX_CDC_SCALE + 1), None);
        assert_eq!(raster_mode(1, u32::MAX), None);
        assert_eq!(raster_mode(2, MAX_CANVAS_SIZE as u32 + 1), None);
        let rom = RomHandle {
            table: parse_rom_listing(LISTING).unwrap(),
        };
        assert!(rom.render_buffer("L", 1, 9363, false).is_none());
    }

    #[test]
    fn test_flatten_triplets() {
        let triplets = vec![Triplet::new(2, 2, 0), Triplet::new(4, 4, 1)];
        assert_eq!(flatten_triplets(&triplets), vec![2, 2, 0, 4, 4, 1]);
    }

    #[test]
    fn test_render_falls_back_to_blank() {
        let rom = RomHandle {
            table: parse_rom_listing(LISTING).unwrap(),
        };
        let known = rom.render_buffer("L", 0, 0, false).unwrap();
        assert!(known.lit_count() > 0);
        let unknown = rom.render_buffer("Q", 0, 0, false).unwrap();
        assert_eq!(unknown.lit_count(), 0);
        assert!(rom.render_buffer("L", 9, 0, false).is_none());
    }

    #[test]
    fn test_rendered_glyph_size() {
        let buffer = RasterBuffer::new(14, 14);
        let glyph = RenderedGlyph::new(&buffer);
        assert_eq!(glyph.width, 14);
        assert_eq!(glyph.rgba.len(), 14 * 14 * 4);
    }
}
