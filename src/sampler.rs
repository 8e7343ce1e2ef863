//! Function catalogue and curve sampling.

use std::fmt;

use crate::error::PlotError;
use crate::geom::{Point, Segment};

/// Upper bound on the number of points sampled for one curve.
pub const MAX_SAMPLES: u64 = 1 << 20;

/// Built-in functions that can be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlotFunction {
    /// `cos(x)`.
    Cos,
    /// `sin(x)`.
    Sin,
    /// `x`.
    Identity,
    /// `x²`.
    #[default]
    Square,
    /// `x³`.
    Cube,
    /// `ln(1 + x)`.
    Log1p,
}

impl PlotFunction {
    /// Every catalogue entry, in selection order.
    pub const ALL: [Self; 6] = [
        Self::Cos,
        Self::Sin,
        Self::Identity,
        Self::Square,
        Self::Cube,
        Self::Log1p,
    ];

    /// Look up a function by its catalogue index.
    pub fn from_index(index: usize) -> Result<Self, PlotError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PlotError::UnknownFunction(index))
    }

    /// Position of this function in [`PlotFunction::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Cos => 0,
            Self::Sin => 1,
            Self::Identity => 2,
            Self::Square => 3,
            Self::Cube => 4,
            Self::Log1p => 5,
        }
    }

    /// Evaluate the function.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Cos => x.cos(),
            Self::Sin => x.sin(),
            Self::Identity => x,
            Self::Square => x * x,
            Self::Cube => x * x * x,
            Self::Log1p => x.ln_1p(),
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cos => "cos(x)",
            Self::Sin => "sin(x)",
            Self::Identity => "x",
            Self::Square => "x²",
            Self::Cube => "x³",
            Self::Log1p => "ln(1 + x)",
        }
    }
}

impl fmt::Display for PlotFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sample `f` over `[min_x, max_x]` and join consecutive samples into segments.
///
/// Samples sit on the lattice `i / resolution` for every integer `i` between
/// `floor(min_x * resolution)` and `ceil(max_x * resolution)`, so panning never
/// shifts where the curve is evaluated. `n` samples produce `n - 1` segments.
///
/// An inverted range yields no segments. Segments touching a non-finite
/// sample are dropped, leaving a gap in the curve.
pub fn sample<F>(f: F, min_x: f64, max_x: f64, resolution: f64) -> Result<Vec<Segment>, PlotError>
where
    F: Fn(f64) -> f64,
{
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(PlotError::InvalidResolution(resolution));
    }
    if min_x > max_x {
        return Ok(Vec::new());
    }

    let start = (min_x * resolution).floor();
    let end = (max_x * resolution).ceil();
    if !start.is_finite() || !end.is_finite() {
        return Err(PlotError::InvalidResolution(resolution));
    }
    let count = end - start + 1.0;
    if count > MAX_SAMPLES as f64 {
        return Err(PlotError::TooManySamples {
            count: count as u64,
            limit: MAX_SAMPLES,
        });
    }

    let start = start as i64;
    let end = end as i64;
    let mut segments = Vec::with_capacity(count as usize);
    let mut previous: Option<Point> = None;
    for index in start..=end {
        let x = index as f64 / resolution;
        let point = Point::new(x, f(x));
        if let Some(prev) = previous {
            let segment = Segment::new(prev, point);
            if segment.is_finite() {
                segments.push(segment);
            }
        }
        previous = Some(point);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_interval_at_resolution_100_gives_100_segments() {
        let segments = sample(|x| x, 0.0, 1.0, 100.0).unwrap();
        assert_eq!(segments.len(), 100);
        assert_eq!(segments[0].start, Point::new(0.0, 0.0));
        assert_eq!(segments[99].end, Point::new(1.0, 1.0));
    }

    #[test]
    fn segments_chain_end_to_start() {
        let segments = sample(PlotFunction::Square.into_fn(), -1.3, 2.7, 10.0).unwrap();
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(segments[0].start.x <= -1.3);
        assert!(segments.last().unwrap().end.x >= 2.7);
    }

    #[test]
    fn inverted_range_is_empty() {
        let segments = sample(f64::sin, 2.0, -2.0, 100.0).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn rejects_bad_resolution() {
        assert_eq!(
            sample(f64::sin, 0.0, 1.0, 0.0),
            Err(PlotError::InvalidResolution(0.0))
        );
        assert!(sample(f64::sin, 0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn sample_budget_is_enforced() {
        let err = sample(f64::sin, 0.0, 1e9, 1e3).unwrap_err();
        assert!(matches!(err, PlotError::TooManySamples { .. }));
    }

    #[test]
    fn non_finite_samples_leave_a_gap() {
        let segments = sample(PlotFunction::Log1p.into_fn(), -3.0, 1.0, 1.0).unwrap();
        // Samples at -3, -2, -1 are NaN or -inf; only 0 -> 1 survives.
        assert_eq!(segments.len(), 1);
        assert!(segments.iter().all(Segment::is_finite));
    }

    #[test]
    fn catalogue_index_roundtrip() {
        for (index, function) in PlotFunction::ALL.iter().enumerate() {
            assert_eq!(function.index(), index);
            assert_eq!(PlotFunction::from_index(index).unwrap(), *function);
        }
        assert_eq!(
            PlotFunction::from_index(6),
            Err(PlotError::UnknownFunction(6))
        );
        assert_eq!(PlotFunction::default(), PlotFunction::Square);
    }

    impl PlotFunction {
        fn into_fn(self) -> impl Fn(f64) -> f64 {
            move |x| self.eval(x)
        }
    }
}
