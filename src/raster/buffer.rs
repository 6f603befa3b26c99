use std::io::Cursor;

use bitvec::prelude::*;
use image::{GrayImage, ImageBuffer, ImageFormat, Luma, Rgba, RgbaImage};
use itertools::Itertools;
use log::warn;

/// RGBA colors used when compositing a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: [u8; 4],
    pub beam: [u8; 4],
    pub grid: [u8; 4],
}

impl Default for Palette {
    /// Black ink on transparent white, light gray grid.
    fn default() -> Self {
        Self {
            background: [255, 255, 255, 0],
            beam: [0, 0, 0, 255],
            grid: [200, 200, 200, 255],
        }
    }
}

/// Pixel grid with two independent layers: beam pixels and overlay (grid)
/// pixels. Drawing on one layer never touches the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    beam: BitVec,
    overlay: BitVec,
}

impl RasterBuffer {
    /// Cleared buffer. A size whose pixel count overflows `usize` gives an
    /// empty 0x0 buffer.
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height) = match width.checked_mul(height) {
            Some(_) => (width, height),
            None => {
                warn!("Raster buffer {}x{} is too large, using 0x0", width, height);
                (0, 0)
            }
        };
        Self {
            width,
            height,
            beam: BitVec::repeat(false, width * height),
            overlay: BitVec::repeat(false, width * height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Light one beam pixel. Coordinates off the canvas are dropped.
    #[inline]
    pub fn light(&mut self, x: i64, y: i64) {
        if let Some(idx) = self.index(x, y) {
            self.beam.set(idx, true);
        }
    }

    #[inline]
    pub fn mark_grid(&mut self, x: i64, y: i64) {
        if let Some(idx) = self.index(x, y) {
            self.overlay.set(idx, true);
        }
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        match self.index(x as i64, y as i64) {
            Some(idx) => self.beam[idx],
            None => false,
        }
    }

    pub fn is_grid(&self, x: usize, y: usize) -> bool {
        match self.index(x as i64, y as i64) {
            Some(idx) => self.overlay[idx],
            None => false,
        }
    }

    pub fn lit_count(&self) -> usize {
        self.beam.count_ones()
    }

    pub fn grid_count(&self) -> usize {
        self.overlay.count_ones()
    }

    /// Beam pixels as `(x, y)`, row-major.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.beam.iter_ones().map(move |idx| (idx % width, idx / width))
    }

    pub fn clear(&mut self) {
        self.beam.fill(false);
        self.overlay.fill(false);
    }

    /// Copy both layers of `src` into this buffer with its top-left at `(ox, oy)`.
    pub fn blit(&mut self, src: &RasterBuffer, ox: usize, oy: usize) {
        for y in 0..src.height {
            for x in 0..src.width {
                if let Some(dst) = self.index((ox + x) as i64, (oy + y) as i64) {
                    let s = y * src.width + x;
                    self.beam.set(dst, src.beam[s]);
                    self.overlay.set(dst, src.overlay[s]);
                }
            }
        }
    }

    /// Extract a `width` x `height` region; parts outside this buffer stay clear.
    pub fn crop(&self, x0: usize, y0: usize, width: usize, height: usize) -> RasterBuffer {
        let mut out = RasterBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let d = y * width + x;
                if let Some(s) = self.index((x0 + x) as i64, (y0 + y) as i64) {
                    out.beam.set(d, self.beam[s]);
                    out.overlay.set(d, self.overlay[s]);
                }
            }
        }
        out
    }

    fn composite(&self, idx: usize, palette: &Palette) -> [u8; 4] {
        if self.beam[idx] {
            palette.beam
        } else if self.overlay[idx] {
            palette.grid
        } else {
            palette.background
        }
    }

    /// Row-major RGBA8, beam over grid over background.
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width * self.height * 4);
        for idx in 0..self.width * self.height {
            rgba.extend_from_slice(&self.composite(idx, palette));
        }
        rgba
    }

    pub fn to_rgba_image(&self, palette: &Palette) -> RgbaImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgba(self.composite(y as usize * self.width + x as usize, palette))
        })
    }

    /// Coverage mask: 255 beam, 128 grid, 0 empty.
    pub fn to_gray_image(&self) -> GrayImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let idx = y as usize * self.width + x as usize;
            let level = if self.beam[idx] {
                255
            } else if self.overlay[idx] {
                128
            } else {
                0
            };
            Luma([level])
        })
    }

    pub fn encode_png(&self, palette: &Palette) -> Result<Vec<u8>, String> {
        let mut bytes = Vec::new();
        self.to_rgba_image(palette)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| format!("PNG encode failed: {}", e))?;
        Ok(bytes)
    }

    /// One text row per pixel row: `#` beam, `+` grid, `.` empty.
    pub fn to_ascii(&self) -> String {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let idx = y * self.width + x;
                        if self.beam[idx] {
                            '#'
                        } else if self.overlay[idx] {
                            '+'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}
