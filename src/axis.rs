//! Grid spacing selection and tick label formatting.

use crate::error::PlotError;
use crate::view::Viewport;

/// Number of minor intervals between two major grid lines.
pub const MINOR_PER_MAJOR: i64 = 5;

/// [`MINOR_PER_MAJOR`] as a float divisor.
pub const MINOR_DIVISIONS: f64 = MINOR_PER_MAJOR as f64;

/// Tolerance, relative to the major spacing, below which a position is
/// considered to sit on a major line.
pub const COINCIDENCE_TOLERANCE: f64 = 1e-6;

/// Rounding slack, in ulps of the coordinate, allowed by [`GridSpacing::is_on_major`].
const COINCIDENCE_ULPS: f64 = 64.0;

/// Multiplier split between the `1`, `2`, and `5` rungs of the ladder.
const THRESHOLD: f64 = 0.5;

/// Choose a "nice" grid spacing (`1`, `2`, or `5` times a power of ten) for a
/// visible range.
///
/// The result never exceeds `range` and is at least `range / 12.5` (the low
/// end is reached just below the `2.5` rung). A non-finite or non-positive
/// range is rejected instead of producing `NaN`.
pub fn nice_grid_size(range: f64) -> Result<f64, PlotError> {
    if !range.is_finite() || range <= 0.0 {
        return Err(PlotError::InvalidRange(range));
    }
    let magnitude = 10_f64.powf(range.log10().floor());
    let multiple = range / magnitude;
    let size = if multiple < 5.0 * THRESHOLD {
        magnitude / 5.0
    } else if multiple < 10.0 * THRESHOLD {
        magnitude / 2.0
    } else {
        magnitude
    };
    Ok(size)
}

/// Major and minor grid spacing in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpacing {
    /// Distance between major grid lines.
    pub major: f64,
    /// Distance between minor grid lines.
    pub minor: f64,
}

impl GridSpacing {
    /// Derive the minor spacing from a major spacing.
    pub fn from_major(major: f64) -> Result<Self, PlotError> {
        if !major.is_finite() || major <= 0.0 {
            return Err(PlotError::InvalidRange(major));
        }
        Ok(Self {
            major,
            minor: major / MINOR_DIVISIONS,
        })
    }

    /// Spacing for a visible rectangle.
    ///
    /// Both axes share one spacing computed from the larger span, which keeps
    /// grid cells square even when the axes are scaled differently.
    pub fn for_viewport(viewport: &Viewport) -> Result<Self, PlotError> {
        Self::from_major(nice_grid_size(viewport.max_span())?)
    }

    /// Check whether a position coincides with a major grid line.
    ///
    /// The tolerance grows with the coordinate's magnitude, so positions far
    /// from the origin still match despite rounding in `k * spacing`.
    pub fn is_on_major(&self, position: f64) -> bool {
        let epsilon = (self.major * COINCIDENCE_TOLERANCE)
            .max(position.abs() * f64::EPSILON * COINCIDENCE_ULPS);
        let remainder = position.rem_euclid(self.major);
        remainder < epsilon || self.major - remainder < epsilon
    }

    /// Whether the minor line with lattice index `index` (at
    /// `index * minor`) lies on a major line.
    pub fn is_major_index(index: i64) -> bool {
        index.rem_euclid(MINOR_PER_MAJOR) == 0
    }
}

/// Measures rendered text for label placement.
pub trait TextMeasurer {
    /// Return `(width, height)` in pixels for `text` at font size `size`.
    fn measure(&self, text: &str, size: f64) -> (f64, f64);
}

/// Format a tick value for display.
///
/// Values are rounded to six decimal places so accumulated floating-point
/// noise never reaches the label, and negative numbers use a typographic
/// minus sign.
pub fn format_tick(value: f64) -> String {
    let rounded = round_tick(value);
    let text = format!("{rounded}");
    match text.strip_prefix('-') {
        Some(magnitude) => format!("\u{2212}{magnitude}"),
        None => text,
    }
}

/// Round a tick value to six decimal places, normalizing `-0` to `0`.
pub fn round_tick(value: f64) -> f64 {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    #[test]
    fn range_ten_gives_major_two() {
        let viewport = Viewport::new(Range::new(-5.0, 5.0), Range::new(-5.0, 5.0));
        let spacing = GridSpacing::for_viewport(&viewport).unwrap();
        assert_eq!(spacing.major, 2.0);
        assert!((spacing.minor - 0.4).abs() < 1e-12);
    }

    #[test]
    fn ladder_rungs() {
        assert_eq!(nice_grid_size(30.0).unwrap(), 5.0);
        assert_eq!(nice_grid_size(70.0).unwrap(), 10.0);
        assert!((nice_grid_size(0.3).unwrap() - 0.05).abs() < 1e-15);
    }

    #[test]
    fn nice_grid_size_is_monotone_and_bounded() {
        let mut previous = 0.0;
        let mut exponent = -6.0_f64;
        while exponent <= 18.0 {
            let range = 10_f64.powf(exponent);
            let size = nice_grid_size(range).unwrap();
            assert!(size >= previous, "not monotone at {range}: {size} < {previous}");
            assert!(size <= range * (1.0 + 1e-12), "{size} > {range}");
            assert!(size >= range / 12.5 * (1.0 - 1e-12), "{size} < {range}/12.5");
            previous = size;
            exponent += 0.001;
        }
    }

    #[test]
    fn spacing_stays_within_a_decade_outside_the_two_rung_gap() {
        for range in [1.0, 1.9, 2.5, 4.9, 5.0, 9.9, 19.0, 250.0] {
            let size = nice_grid_size(range).unwrap();
            assert!(size >= range / 10.0 - 1e-12, "{size} < {range}/10");
        }
        // Between 2 and 2.5 times a power of ten the ladder still picks the 1/5 rung.
        assert_eq!(nice_grid_size(24.0).unwrap(), 2.0);
    }

    #[test]
    fn non_positive_range_is_rejected() {
        assert_eq!(nice_grid_size(0.0), Err(PlotError::InvalidRange(0.0)));
        assert!(nice_grid_size(-1.0).is_err());
        assert!(nice_grid_size(f64::NAN).is_err());
        assert!(nice_grid_size(f64::INFINITY).is_err());
    }

    #[test]
    fn major_coincidence_tolerates_rounding() {
        let spacing = GridSpacing::from_major(2.0).unwrap();
        assert!(spacing.is_on_major(4.0));
        assert!(spacing.is_on_major(-4.0));
        assert!(spacing.is_on_major(5.0 * 0.4));
        assert!(spacing.is_on_major(3.999_999_999_9));
        assert!(!spacing.is_on_major(0.4));
        assert!(!spacing.is_on_major(-1.6));
    }

    #[test]
    fn major_coincidence_scales_with_magnitude() {
        let spacing = GridSpacing::from_major(1e-6).unwrap();
        let on_major = 1_000_000_000_005_i64 as f64 * spacing.major;
        assert!(spacing.is_on_major(on_major));
        assert!(spacing.is_on_major(-on_major));
        let on_minor = 5_000_000_000_026_i64 as f64 * spacing.minor;
        assert!(!spacing.is_on_major(on_minor));
    }

    #[test]
    fn every_fifth_minor_index_is_major() {
        assert!(GridSpacing::is_major_index(0));
        assert!(GridSpacing::is_major_index(-10));
        assert!(GridSpacing::is_major_index(5_000_000_000_000));
        assert!(!GridSpacing::is_major_index(-1));
        assert!(!GridSpacing::is_major_index(7));
    }

    #[test]
    fn tick_labels_use_typographic_minus() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-0.4), "\u{2212}0.4");
        assert_eq!(format_tick(0.30000000000000004), "0.3");
        assert_eq!(format_tick(-1e-9), "0");
    }
}
