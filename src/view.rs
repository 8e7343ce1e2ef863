//! World-space ranges and viewports.

use crate::error::PlotError;
use crate::geom::Point;

/// Numeric range with inclusive bounds.
///
/// Bounds are stored as given; a range whose `min` exceeds its `max` is
/// representable (it appears transiently while panning) but not [valid].
///
/// [valid]: Range::is_valid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range from bounds, without reordering them.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the range (bounds inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Shift both bounds by `offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Linear interpolation of both bounds towards `other`.
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        Self::new(
            self.min + (other.min - self.min) * t,
            self.max + (other.max - self.max) * t,
        )
    }
}

/// Visible world rectangle on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub const fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Minimum corner (`world_min`).
    pub fn min(&self) -> Point {
        Point::new(self.x.min, self.y.min)
    }

    /// Maximum corner (`world_max`).
    pub fn max(&self) -> Point {
        Point::new(self.x.max, self.y.max)
    }

    /// World-space size on both axes.
    pub fn size(&self) -> Point {
        Point::new(self.x.span(), self.y.span())
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }

    /// Check whether both axes are valid.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Return `self` if valid, otherwise the matching error.
    pub fn validated(self) -> Result<Self, PlotError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(PlotError::InvalidViewport {
                x_min: self.x.min,
                x_max: self.x.max,
                y_min: self.y.min,
                y_max: self.y.max,
            })
        }
    }

    /// Shift the rectangle by a world-space offset.
    pub fn translated(&self, offset: Point) -> Self {
        Self::new(self.x.shifted(offset.x), self.y.shifted(offset.y))
    }

    /// The larger of the two spans; grid spacing is derived from it.
    pub fn max_span(&self) -> f64 {
        self.x.span().abs().max(self.y.span().abs())
    }

    /// Linear interpolation of both axes towards `other`.
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        Self::new(self.x.lerp(other.x, t), self.y.lerp(other.y, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_kept_but_invalid() {
        let range = Range::new(2.0, 1.0);
        assert_eq!(range.min, 2.0);
        assert!(!range.is_valid());
    }

    #[test]
    fn validated_reports_bounds() {
        let viewport = Viewport::new(Range::new(0.0, 0.0), Range::new(-1.0, 1.0));
        let err = viewport.validated().unwrap_err();
        assert!(matches!(err, PlotError::InvalidViewport { x_min, x_max, .. } if x_min == 0.0 && x_max == 0.0));
    }

    #[test]
    fn max_span_takes_larger_axis() {
        let viewport = Viewport::new(Range::new(-8.0, 8.0), Range::new(-5.0, 5.0));
        assert_eq!(viewport.max_span(), 16.0);
        assert_eq!(viewport.center(), Point::ZERO);
    }
}
