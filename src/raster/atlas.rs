/// ROM Atlas - every glyph of a table in one grid bitmap
///
/// Cells are the mode's canvas size, laid out left to right, top to bottom in
/// table order, ATLAS_COLUMNS per row.

use log::debug;

use super::buffer::RasterBuffer;
use super::rasterizer::{render_strokes, RasterMode, RasterOptions};
use crate::rom::GlyphTable;
use crate::vector::StrokeCode;

pub const ATLAS_COLUMNS: usize = 16;

pub struct RomAtlas {
    /// Whole grid, both layers.
    pub buffer: RasterBuffer,
    pub cell_width: usize,
    pub cell_height: usize,
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// Glyph key of each cell, in cell order.
    pub keys: Vec<String>,
}

impl RomAtlas {
    pub fn cell_origin(&self, index: usize) -> (usize, usize) {
        let col = index % self.grid_columns;
        let row = index / self.grid_columns;
        (col * self.cell_width, row * self.cell_height)
    }

    pub fn cell_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Copy of one cell, or `None` past the last glyph.
    pub fn cell(&self, index: usize) -> Option<RasterBuffer> {
        if index >= self.keys.len() {
            return None;
        }
        let (x, y) = self.cell_origin(index);
        Some(self.buffer.crop(x, y, self.cell_width, self.cell_height))
    }
}

#[cfg(feature = "parallel")]
fn render_cells(glyphs: &[(&str, &[StrokeCode])], mode: RasterMode, options: &RasterOptions) -> Vec<RasterBuffer> {
    use rayon::prelude::*;
    glyphs
        .par_iter()
        .map(|(_, strokes)| render_strokes(strokes, mode, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn render_cells(glyphs: &[(&str, &[StrokeCode])], mode: RasterMode, options: &RasterOptions) -> Vec<RasterBuffer> {
    glyphs
        .iter()
        .map(|(_, strokes)| render_strokes(strokes, mode, options))
        .collect()
}

pub fn render_atlas(table: &GlyphTable, mode: RasterMode, options: &RasterOptions) -> RomAtlas {
    let cell = mode.canvas_size();
    let glyphs: Vec<(&str, &[StrokeCode])> = table.iter().collect();
    let grid_columns = ATLAS_COLUMNS;
    let grid_rows = (glyphs.len() + grid_columns - 1) / grid_columns;

    debug!(
        "Rasterizing ROM atlas: {} glyphs, {}x{} cells, {}x{} grid, mode={:?}",
        glyphs.len(), cell, cell, grid_columns, grid_rows, mode
    );

    let cells = render_cells(&glyphs, mode, options);

    let mut atlas = RomAtlas {
        buffer: RasterBuffer::new(cell * grid_columns, cell * grid_rows),
        cell_width: cell,
        cell_height: cell,
        grid_columns,
        grid_rows,
        keys: glyphs.iter().map(|(key, _)| key.to_string()).collect(),
    };

    for (index, rendered) in cells.iter().enumerate() {
        let (x, y) = atlas.cell_origin(index);
        atlas.buffer.blit(rendered, x, y);
    }

    atlas
}
