/// Triplets - numeric beam form and path metrics

use itertools::Itertools;

use super::VectorPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Triplet {
    pub x: i32,
    pub y: i32,
    /// 1 while the beam is unblanked, 0 otherwise.
    pub intensity: u8,
}

impl Triplet {
    #[inline]
    pub const fn new(x: i32, y: i32, intensity: u8) -> Self {
        Self { x, y, intensity }
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.intensity > 0
    }

    #[inline]
    fn same_position(&self, other: &Triplet) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<VectorPoint> for Triplet {
    fn from(point: VectorPoint) -> Self {
        Triplet::new(point.x, point.y, point.beam_on as u8)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

pub fn to_triplets(points: &[VectorPoint]) -> Vec<Triplet> {
    points.iter().map(|&p| Triplet::from(p)).collect()
}

/// Extent of every visited position, lit or not. Empty input gives all zeros.
pub fn bounds(triplets: &[Triplet]) -> Bounds {
    let first = match triplets.first() {
        Some(t) => t,
        None => return Bounds::default(),
    };
    let init = Bounds {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    triplets.iter().fold(init, |b, t| Bounds {
        min_x: b.min_x.min(t.x),
        max_x: b.max_x.max(t.x),
        min_y: b.min_y.min(t.y),
        max_y: b.max_y.max(t.y),
    })
}

/// Indices where the beam stays parked and lit: same position as the previous
/// stroke, with both strokes unblanked. Index 0 never qualifies.
pub fn dwell_points(triplets: &[Triplet]) -> Vec<usize> {
    triplets
        .iter()
        .tuple_windows()
        .enumerate()
        .filter(|(_, (prev, cur))| cur.same_position(prev) && prev.is_lit() && cur.is_lit())
        .map(|(i, _)| i + 1)
        .collect()
}

/// Length of the visible trace. The beam starts at the origin, and a segment
/// counts only when the stroke it ends on is lit.
pub fn path_length(triplets: &[Triplet]) -> f64 {
    let origin = Triplet::new(0, 0, 0);
    std::iter::once(&origin)
        .chain(triplets.iter())
        .tuple_windows()
        .filter(|(_, to)| to.is_lit())
        .map(|(from, to)| {
            let dx = (to.x - from.x) as f64;
            let dy = (to.y - from.y) as f64;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Summary of one decoded glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    pub bounds: Bounds,
    pub dwell_points: Vec<usize>,
    pub path_length: f64,
    pub lit_strokes: usize,
    pub total_strokes: usize,
}

impl GlyphMetrics {
    pub fn from_triplets(triplets: &[Triplet]) -> Self {
        Self {
            bounds: bounds(triplets),
            dwell_points: dwell_points(triplets),
            path_length: path_length(triplets),
            lit_strokes: triplets.iter().filter(|t| t.is_lit()).count(),
            total_strokes: triplets.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::decode_raw;

    #[test]
    fn test_intensity_follows_beam() {
        let points = decode_raw(&[0b00001, 0b01010, 0b00001, 0b10100, 0b00011]);
        let triplets = to_triplets(&points);
        assert_eq!(triplets.len(), points.len());
        for (p, t) in points.iter().zip(triplets.iter()) {
            assert_eq!((p.x, p.y), (t.x, t.y));
            assert_eq!(t.intensity == 1, p.beam_on);
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(&[]), Bounds::default());
        let triplets = [
            Triplet::new(1, 2, 0),
            Triplet::new(-1, 5, 1),
            Triplet::new(4, 0, 1),
        ];
        let b = bounds(&triplets);
        assert_eq!(b, Bounds { min_x: -1, max_x: 4, min_y: 0, max_y: 5 });
        assert_eq!(b.width(), 5);
        assert_eq!(b.height(), 5);
    }

    #[test]
    fn test_dwell_points() {
        let triplets = [
            Triplet::new(3, 3, 1),
            Triplet::new(3, 3, 1),
            Triplet::new(4, 3, 1),
        ];
        assert_eq!(dwell_points(&triplets), vec![1]);
    }

    #[test]
    fn test_dwell_requires_both_lit() {
        let triplets = [
            Triplet::new(3, 3, 0),
            Triplet::new(3, 3, 1),
            Triplet::new(3, 3, 0),
        ];
        assert!(dwell_points(&triplets).is_empty());
        assert!(dwell_points(&[]).is_empty());
    }

    #[test]
    fn test_path_length_counts_lit_segments_from_origin() {
        let triplets = [
            Triplet::new(3, 4, 1),
            Triplet::new(3, 6, 0),
            Triplet::new(4, 6, 1),
        ];
        assert!((path_length(&triplets) - 6.0).abs() < 1e-9);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn test_metrics_summary() {
        let triplets = [
            Triplet::new(0, 1, 1),
            Triplet::new(0, 1, 1),
            Triplet::new(2, 1, 0),
        ];
        let metrics = GlyphMetrics::from_triplets(&triplets);
        assert_eq!(metrics.dwell_points, vec![1]);
        assert_eq!(metrics.lit_strokes, 2);
        assert_eq!(metrics.total_strokes, 3);
        assert!((metrics.path_length - 1.0).abs() < 1e-9);
    }
}
