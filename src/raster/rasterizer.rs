/// Glyph Rasterizer - beam trace to pixel buffer
/// Implements: Bresenham segment walk, per-mode coordinate mapping, grid overlay
///
/// All three modes share one routine. A mode decides two things: the integer
/// space the Bresenham walk runs in, and what one visited step paints.

use num_derive::FromPrimitive;

use super::buffer::RasterBuffer;
use crate::vector::stroke::StrokeCode;
use crate::vector::{decode, Triplet};

/// Logical glyph window is GLYPH_GRID x GLYPH_GRID units, origin bottom-left.
pub const GLYPH_GRID: i32 = 7;

/// Cells narrower than this get no grid overlay.
const MIN_GRID_CELL: f64 = 2.0;

/// Largest canvas edge, in device pixels. Larger scales and resolutions are
/// clamped to it.
pub const MAX_CANVAS_SIZE: usize = 4096;

/// Largest CDC scale whose canvas fits in MAX_CANVAS_SIZE.
pub const MAX_CDC_SCALE: u32 = (MAX_CANVAS_SIZE / GLYPH_GRID as usize) as u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RasterMode {
    /// 7x7 canvas, one pixel per unit.
    TrueSize,
    /// (7·scale)² canvas. Coordinates spread apart, beam stays 1px wide.
    CdcScaled { scale: u32 },
    /// resolution² canvas. Each unit is a filled square of resolution/7 px.
    Supersampled { resolution: u32 },
}

/// Numeric mode selector, as passed across the JS boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum RasterModeKind {
    TrueSize = 0,
    CdcScaled = 1,
    Supersampled = 2,
}

impl RasterModeKind {
    /// `size` is the scale for CDC-scaled and the resolution for supersampled;
    /// true-size ignores it.
    pub fn with_size(self, size: u32) -> RasterMode {
        match self {
            RasterModeKind::TrueSize => RasterMode::TrueSize,
            RasterModeKind::CdcScaled => RasterMode::CdcScaled { scale: size },
            RasterModeKind::Supersampled => RasterMode::Supersampled { resolution: size },
        }
    }
}

impl RasterMode {
    /// Same mode with its scale or resolution capped to the canvas limit.
    pub fn clamped(self) -> RasterMode {
        match self {
            RasterMode::TrueSize => RasterMode::TrueSize,
            RasterMode::CdcScaled { scale } => RasterMode::CdcScaled {
                scale: scale.min(MAX_CDC_SCALE),
            },
            RasterMode::Supersampled { resolution } => RasterMode::Supersampled {
                resolution: resolution.min(MAX_CANVAS_SIZE as u32),
            },
        }
    }

    /// True when the mode is within the canvas limit as given.
    pub fn fits_canvas(&self) -> bool {
        self.clamped() == *self
    }

    pub fn canvas_size(&self) -> usize {
        match self.clamped() {
            RasterMode::TrueSize => GLYPH_GRID as usize,
            RasterMode::CdcScaled { scale } => GLYPH_GRID as usize * scale as usize,
            RasterMode::Supersampled { resolution } => resolution as usize,
        }
    }

    /// Device pixels per glyph unit.
    pub fn cell_size(&self) -> f64 {
        match self.clamped() {
            RasterMode::TrueSize => 1.0,
            RasterMode::CdcScaled { scale } => scale as f64,
            RasterMode::Supersampled { resolution } => resolution as f64 / GLYPH_GRID as f64,
        }
    }

    /// Multiplier applied to coordinates before the line walk.
    fn walk_scale(&self) -> i64 {
        match self.clamped() {
            RasterMode::CdcScaled { scale } => scale as i64,
            RasterMode::TrueSize | RasterMode::Supersampled { .. } => 1,
        }
    }

    /// Glyph units to walk space, flipping Y so row 0 is the top.
    fn to_walk_space(&self, t: &Triplet) -> (i64, i64) {
        let s = self.walk_scale();
        let top = GLYPH_GRID as i64 * s - 1;
        (t.x as i64 * s, top - t.y as i64 * s)
    }

    /// Paint one visited walk position.
    fn stamp(&self, buffer: &mut RasterBuffer, wx: i64, wy: i64) {
        match *self {
            RasterMode::TrueSize | RasterMode::CdcScaled { .. } => buffer.light(wx, wy),
            RasterMode::Supersampled { .. } => {
                let size = self.cell_size();
                let (x0, x1) = unit_span(wx, size);
                let (y0, y1) = unit_span(wy, size);
                for py in y0..y1 {
                    for px in x0..x1 {
                        buffer.light(px, py);
                    }
                }
            }
        }
    }
}

/// Device pixel span `[start, end)` covered by glyph unit `unit`; never empty.
fn unit_span(unit: i64, size: f64) -> (i64, i64) {
    let start = (unit as f64 * size).round() as i64;
    let end = ((unit + 1) as f64 * size).round() as i64;
    (start, end.max(start + 1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Draw logical cell boundaries on the overlay layer.
    pub grid: bool,
    /// The beam rests at (0, 0) before the first stroke, so a lit first stroke
    /// draws from there. When false, drawing starts at the first point.
    pub start_from_origin: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            grid: false,
            start_from_origin: true,
        }
    }
}

/// Walk a line with Bresenham's algorithm, stamping every visited position.
fn draw_segment(buffer: &mut RasterBuffer, mode: &RasterMode, from: &Triplet, to: &Triplet) {
    let (x1, y1) = mode.to_walk_space(from);
    let (x2, y2) = mode.to_walk_space(to);

    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx: i64 = if x1 < x2 { 1 } else { -1 };
    let sy: i64 = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cx = x1;
    let mut cy = y1;

    loop {
        mode.stamp(buffer, cx, cy);

        if cx == x2 && cy == y2 { break; }
        let e2 = 2 * err;
        if e2 >= dy {
            if cx == x2 { break; }
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            if cy == y2 { break; }
            err += dx;
            cy += sy;
        }
    }
}

fn grid_lines(mode: &RasterMode) -> Vec<usize> {
    let size = mode.canvas_size();
    let cell = mode.cell_size();
    if size == 0 || cell < MIN_GRID_CELL {
        return Vec::new();
    }
    let mut lines: Vec<usize> = (0..GLYPH_GRID)
        .map(|k| (k as f64 * cell).round() as usize)
        .filter(|&line| line < size)
        .collect();
    lines.push(size - 1);
    lines.dedup();
    lines
}

fn draw_grid(buffer: &mut RasterBuffer, mode: &RasterMode) {
    let lines = grid_lines(mode);
    let size = mode.canvas_size() as i64;
    for &line in &lines {
        for i in 0..size {
            buffer.mark_grid(line as i64, i);
            buffer.mark_grid(i, line as i64);
        }
    }
}

/// Rasterize a beam trace.
///
/// Scales and resolutions beyond MAX_CANVAS_SIZE are clamped to it.
///
/// Only segments whose destination is lit leave pixels; blanked moves only
/// reposition the beam. Coordinates outside the 7-unit window are neither
/// clamped nor rejected, whatever lands off the canvas is dropped.
pub fn rasterize<P>(points: &[P], mode: RasterMode, options: &RasterOptions) -> RasterBuffer
where
    P: Copy + Into<Triplet>,
{
    let size = mode.canvas_size();
    let mut buffer = RasterBuffer::new(size, size);

    if options.grid {
        draw_grid(&mut buffer, &mode);
    }

    let mut prev = if options.start_from_origin {
        Some(Triplet::new(0, 0, 0))
    } else {
        None
    };

    for &point in points {
        let cur: Triplet = point.into();
        if cur.is_lit() {
            let from = prev.unwrap_or(cur);
            draw_segment(&mut buffer, &mode, &from, &cur);
        }
        prev = Some(cur);
    }

    buffer
}

/// Decode and rasterize one glyph.
pub fn render_strokes(strokes: &[StrokeCode], mode: RasterMode, options: &RasterOptions) -> RasterBuffer {
    rasterize(&decode(strokes), mode, options)
}
