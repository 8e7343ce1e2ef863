//! Grid and axis line geometry.

use std::ops::RangeInclusive;

use crate::axis::GridSpacing;
use crate::error::PlotError;
use crate::geom::Segment;
use crate::view::{Range, Viewport};

/// Upper bound on the number of grid lines along one axis.
pub const MAX_GRID_LINES: u64 = 10_000;

/// Grid line segments for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    /// Major grid lines.
    pub major: Vec<Segment>,
    /// Minor grid lines, excluding those that coincide with major lines.
    pub minor: Vec<Segment>,
}

/// World positions of major ticks along each axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticks {
    /// Tick positions on the X axis.
    pub x: Vec<f64>,
    /// Tick positions on the Y axis.
    pub y: Vec<f64>,
}

/// Builds axis-aligned grid and axis segments for a visible rectangle.
///
/// One builder serves every layer; the major, minor, and axis call sites only
/// differ by the spacing and filter they pass.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometryBuilder {
    viewport: Viewport,
}

impl GridGeometryBuilder {
    /// Create a builder for the given visible rectangle.
    pub fn new(viewport: Viewport) -> Result<Self, PlotError> {
        Ok(Self {
            viewport: viewport.validated()?,
        })
    }

    /// Build the major and minor grid for a spacing.
    ///
    /// Minor lines on a major line are told apart by lattice index, since
    /// every fifth minor index is a major one.
    pub fn build(&self, spacing: GridSpacing) -> Result<GridGeometry, PlotError> {
        let major = self.lines(spacing.major, |_| false)?;
        let minor = self.lines(spacing.minor, GridSpacing::is_major_index)?;
        Ok(GridGeometry { major, minor })
    }

    /// Full-length grid lines at every multiple of `spacing` inside the
    /// viewport, verticals first. Multiples whose index `k` (position
    /// `k * spacing`) makes `skip` return `true` are left out.
    pub fn lines(
        &self,
        spacing: f64,
        skip: impl Fn(i64) -> bool,
    ) -> Result<Vec<Segment>, PlotError> {
        let x = self.viewport.x;
        let y = self.viewport.y;
        let xs = lattice(x, spacing)?;
        let ys = lattice(y, spacing)?;

        let mut out = Vec::with_capacity(xs.clone().count() + ys.clone().count());
        out.extend(
            xs.filter(|k| !skip(*k))
                .map(|k| k as f64 * spacing)
                .map(|pos| Segment::from_coords(pos, y.min, pos, y.max)),
        );
        out.extend(
            ys.filter(|k| !skip(*k))
                .map(|k| k as f64 * spacing)
                .map(|pos| Segment::from_coords(x.min, pos, x.max, pos)),
        );
        Ok(out)
    }

    /// The `y = 0` and `x = 0` axes, each present only when it crosses the
    /// viewport.
    pub fn axes(&self) -> Vec<Segment> {
        let x = self.viewport.x;
        let y = self.viewport.y;
        let mut out = Vec::with_capacity(2);
        if y.contains(0.0) {
            out.push(Segment::from_coords(x.min, 0.0, x.max, 0.0));
        }
        if x.contains(0.0) {
            out.push(Segment::from_coords(0.0, y.min, 0.0, y.max));
        }
        out
    }

    /// Positions of the major grid lines along each axis.
    pub fn major_ticks(&self, spacing: GridSpacing) -> Result<Ticks, PlotError> {
        Ok(Ticks {
            x: grid_positions(self.viewport.x, spacing.major)?,
            y: grid_positions(self.viewport.y, spacing.major)?,
        })
    }
}

/// Multiples of `spacing` within `range`.
fn grid_positions(range: Range, spacing: f64) -> Result<Vec<f64>, PlotError> {
    Ok(lattice(range, spacing)?
        .map(|k| k as f64 * spacing)
        .collect())
}

/// Indices `k` with `k * spacing` inside `range`. Positions are derived from
/// the index so they do not drift.
fn lattice(range: Range, spacing: f64) -> Result<RangeInclusive<i64>, PlotError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(PlotError::InvalidRange(spacing));
    }
    let first = (range.min / spacing).ceil();
    let last = (range.max / spacing).floor();
    let count = last - first + 1.0;
    if count > MAX_GRID_LINES as f64 {
        return Err(PlotError::GridTooDense {
            spacing,
            count: count as u64,
            limit: MAX_GRID_LINES,
        });
    }
    // Empty when no multiple falls inside the range.
    Ok((first as i64)..=(last as i64))
}
