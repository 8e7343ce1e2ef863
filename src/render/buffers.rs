//! World-space geometry buffers and instanced-line tables.

use std::f64::consts::TAU;

use crate::geom::Segment;

/// Two triangles covering a unit segment along +x, half a unit thick on
/// either side. Scale x by the segment length and y by the stroke width.
pub const LINE_SEGMENT_INSTANCE: [f32; 12] = [
    0.0, -0.5, 1.0, -0.5, 1.0, 0.5, //
    0.0, -0.5, 1.0, 0.5, 0.0, 0.5,
];

/// Triangle fan of a unit-diameter circle centred on the origin, as flat
/// `[x, y]` pairs with three vertices per triangle.
///
/// Drawn at every segment endpoint, scaled by the stroke width, it rounds the
/// joins between instanced segments. Fewer than three divisions yield no
/// triangles.
pub fn round_join_geometry(divisions: usize) -> Vec<f32> {
    if divisions < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(divisions * 6);
    for i in 0..divisions {
        let theta0 = TAU * i as f64 / divisions as f64;
        let theta1 = TAU * (i + 1) as f64 / divisions as f64;
        out.extend_from_slice(&[
            0.0,
            0.0,
            (0.5 * theta0.cos()) as f32,
            (0.5 * theta0.sin()) as f32,
            (0.5 * theta1.cos()) as f32,
            (0.5 * theta1.sin()) as f32,
        ]);
    }
    out
}

/// A drawable layer of the plot, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Minor grid lines.
    MinorGrid,
    /// Major grid lines.
    MajorGrid,
    /// The function curve.
    Curve,
    /// Coordinate axes.
    Axes,
}

impl Layer {
    /// Every layer, back to front.
    pub const ALL: [Self; 4] = [Self::MinorGrid, Self::MajorGrid, Self::Curve, Self::Axes];
}

/// Segment lists for every layer, regenerated wholesale on each change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotGeometry {
    /// Sampled function curve.
    pub curve: Vec<Segment>,
    /// Major grid lines.
    pub major_grid: Vec<Segment>,
    /// Minor grid lines.
    pub minor_grid: Vec<Segment>,
    /// Axes crossing the visible area.
    pub axes: Vec<Segment>,
}

impl PlotGeometry {
    /// Segments of one layer.
    pub fn layer(&self, layer: Layer) -> &[Segment] {
        match layer {
            Layer::MinorGrid => &self.minor_grid,
            Layer::MajorGrid => &self.major_grid,
            Layer::Curve => &self.curve,
            Layer::Axes => &self.axes,
        }
    }

    /// One layer flattened to `[x0, y0, x1, y1, ...]` for upload.
    pub fn flat(&self, layer: Layer) -> Vec<f32> {
        let segments = self.layer(layer);
        let mut out = Vec::with_capacity(segments.len() * 4);
        for segment in segments {
            out.extend_from_slice(&segment.to_f32_array());
        }
        out
    }

    /// Total number of segments across all layers.
    pub fn segment_count(&self) -> usize {
        Layer::ALL.iter().map(|layer| self.layer(*layer).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_spans_unit_length() {
        let xs: Vec<f32> = LINE_SEGMENT_INSTANCE.iter().step_by(2).copied().collect();
        let ys: Vec<f32> = LINE_SEGMENT_INSTANCE.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(xs.iter().copied().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 1.0);
        assert!(ys.iter().all(|y| y.abs() == 0.5));
    }

    #[test]
    fn round_join_closes_the_circle() {
        let fan = round_join_geometry(8);
        assert_eq!(fan.len(), 48);
        for triangle in fan.chunks(6) {
            assert_eq!(&triangle[..2], &[0.0, 0.0]);
            for vertex in triangle[2..].chunks(2) {
                let r = (vertex[0] * vertex[0] + vertex[1] * vertex[1]).sqrt();
                assert!((r - 0.5).abs() < 1e-6);
            }
        }
        // Last edge ends where the first begins.
        let first = &fan[2..4];
        let last = &fan[fan.len() - 2..];
        assert!((first[0] - last[0]).abs() < 1e-6);
        assert!((first[1] - last[1]).abs() < 1e-6);
        assert!(round_join_geometry(2).is_empty());
    }

    #[test]
    fn flat_layout_is_xy_pairs() {
        let geometry = PlotGeometry {
            curve: vec![
                Segment::from_coords(0.0, 1.0, 2.0, 3.0),
                Segment::from_coords(2.0, 3.0, 4.0, 5.0),
            ],
            axes: vec![Segment::from_coords(-1.0, 0.0, 1.0, 0.0)],
            ..Default::default()
        };
        assert_eq!(
            geometry.flat(Layer::Curve),
            vec![0.0, 1.0, 2.0, 3.0, 2.0, 3.0, 4.0, 5.0]
        );
        assert!(geometry.flat(Layer::MinorGrid).is_empty());
        assert_eq!(geometry.segment_count(), 3);
    }
}
