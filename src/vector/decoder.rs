/// Stroke Decoder - stroke codes to absolute beam positions
///
/// Walks a glyph's stroke codes with a per-axis direction register. Movement
/// magnitude comes from the code, direction is carried between strokes and
/// only reversed by a toggle stroke.

use super::stroke::{AxisStroke, StrokeCode};
use super::VectorPoint;
use crate::rom::GlyphTable;

#[derive(Debug, Clone, Copy)]
struct DirectionState {
    h_dir: i32,
    v_dir: i32,
}

impl DirectionState {
    fn new() -> Self {
        Self { h_dir: 1, v_dir: 1 }
    }
}

#[derive(Debug)]
struct BeamDecoder {
    x: i32,
    y: i32,
    beam_on: bool,
    dirs: DirectionState,
}

impl BeamDecoder {
    fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            beam_on: false,
            dirs: DirectionState::new(),
        }
    }

    fn apply_axis(pos: &mut i32, dir: &mut i32, stroke: AxisStroke) {
        match stroke {
            AxisStroke::NoOp => {}
            AxisStroke::Move(units) => *pos += units * *dir,
            AxisStroke::ToggleDirection => *dir = -*dir,
        }
    }

    fn step(&mut self, code: StrokeCode) -> VectorPoint {
        Self::apply_axis(&mut self.y, &mut self.dirs.v_dir, code.vertical());
        Self::apply_axis(&mut self.x, &mut self.dirs.h_dir, code.horizontal());
        if code.unblank() {
            self.beam_on = !self.beam_on;
        }
        VectorPoint::new(self.x, self.y, self.beam_on)
    }
}

/// Decode one glyph. Emits one point per stroke code, each holding the beam
/// position and state after that stroke was applied.
pub fn decode(glyph: &[StrokeCode]) -> Vec<VectorPoint> {
    let mut decoder = BeamDecoder::new();
    glyph.iter().map(|&code| decoder.step(code)).collect()
}

/// Decode raw ROM words; anything above the low five bits is ignored.
pub fn decode_raw(words: &[u8]) -> Vec<VectorPoint> {
    let mut decoder = BeamDecoder::new();
    words.iter().map(|&raw| decoder.step(StrokeCode::new(raw))).collect()
}

/// Look up `key` and decode it. Absent keys yield `None`; picking a
/// substitute glyph is left to the caller.
pub fn decode_glyph(table: &GlyphTable, key: &str) -> Option<Vec<VectorPoint>> {
    table.get(key).map(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32, beam_on: bool) -> VectorPoint {
        VectorPoint::new(x, y, beam_on)
    }

    #[test]
    fn test_empty_glyph() {
        assert!(decode(&[]).is_empty());
        assert!(decode_raw(&[]).is_empty());
    }

    #[test]
    fn test_double_diagonal() {
        let points = decode_raw(&[0b01010, 0b01010]);
        assert_eq!(points, vec![pt(2, 2, false), pt(4, 4, false)]);
    }

    #[test]
    fn test_toggle_reverses_next_move() {
        let points = decode_raw(&[0b11000, 0b10000]);
        assert_eq!(points, vec![pt(0, 0, false), pt(0, -1, false)]);
    }

    #[test]
    fn test_toggle_is_not_a_three_unit_move() {
        let points = decode_raw(&[0b11110]);
        assert_eq!(points, vec![pt(0, 0, false)]);
        let points = decode_raw(&[0b11110, 0b01010]);
        assert_eq!(points[1], pt(-2, -2, false));
    }

    #[test]
    fn test_toggle_twice_restores_direction() {
        let points = decode_raw(&[0b00110, 0b00110, 0b00100]);
        assert_eq!(points[2], pt(1, 0, false));
    }

    #[test]
    fn test_beam_toggle_pairs() {
        let points = decode_raw(&[0b00001, 0b00001]);
        assert_eq!(points, vec![pt(0, 0, true), pt(0, 0, false)]);
    }

    #[test]
    fn test_point_reflects_state_after_stroke() {
        let points = decode_raw(&[0b10101]);
        assert_eq!(points, vec![pt(1, 1, true)]);
    }

    #[test]
    fn test_high_bits_are_masked() {
        assert_eq!(decode_raw(&[0b1110_1010]), decode_raw(&[0b0000_1010]));
        assert_eq!(decode_raw(&[0xFF]), vec![pt(0, 0, true)]);
    }

    #[test]
    fn test_length_preserved() {
        let words: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_raw(&words).len(), words.len());
    }

    #[test]
    fn test_decode_is_stateless_between_calls() {
        let glyph: Vec<StrokeCode> = [0b11000, 0b10001, 0b00110, 0b00101]
            .iter()
            .map(|&w| StrokeCode::new(w))
            .collect();
        let first = decode(&glyph);
        let second = decode(&glyph);
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&pt(-1, -1, false)));
    }

    #[test]
    fn test_decode_glyph_lookup() {
        let table = GlyphTable::from_entries(vec![("L".to_string(), vec![0b01001, 0b00001])]);
        let points = decode_glyph(&table, "L").unwrap();
        assert_eq!(points, vec![pt(0, 2, true), pt(0, 2, false)]);
        assert!(decode_glyph(&table, "M").is_none());
    }
}
