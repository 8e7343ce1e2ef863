//! Geometric primitives used by the plotting pipeline.
//!
//! [`Point`] is a world-space (mathematical) coordinate. [`ScreenPoint`] is a
//! device-pixel coordinate with the origin at the top-left corner and Y growing
//! downward. [`ClipPoint`] lives in the normalized `[-1, 1]²` square consumed by
//! the projection.

use std::ops::{Add, Div, Mul, Sub};

/// A point (or displacement) in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X value in world coordinates.
    pub x: f64,
    /// Y value in world coordinates.
    pub y: f64,
}

impl Point {
    /// The world origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new world point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// A point (or displacement) in screen space, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f64,
    /// Y value in pixels, growing downward.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for ScreenPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point in normalized clip space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipPoint {
    /// X value in `[-1, 1]` for visible points.
    pub x: f64,
    /// Y value in `[-1, 1]` for visible points, growing upward.
    pub y: f64,
}

impl ClipPoint {
    /// Create a new clip-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

/// Size of the drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasSize {
    /// Create a new canvas size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check whether both dimensions are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Screen rectangle covering the whole canvas.
    pub fn rect(&self) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(self.width, self.height),
        )
    }
}

/// A world-space line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start.
    pub start: Point,
    /// Segment end.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a segment from raw endpoint coordinates.
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Endpoints as `[x0, y0, x1, y1]` in the precision GPU buffers use.
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.start.x as f32,
            self.start.y as f32,
            self.end.x as f32,
            self.end.y as f32,
        ]
    }

    /// Check whether both endpoints are finite.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}
