//! Mutable viewport state shared by the controllers.

use crate::error::PlotError;
use crate::geom::Point;
use crate::view::Viewport;

/// Stroke widths for each drawn layer.
///
/// Inside [`ViewportState`] the widths are world units and shrink as the view
/// zooms in, so strokes keep a constant thickness on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidths {
    /// Function curve.
    pub curve: f64,
    /// Major grid lines.
    pub major_grid: f64,
    /// Minor grid lines.
    pub minor_grid: f64,
    /// Coordinate axes.
    pub axis: f64,
}

impl LineWidths {
    /// Create a set of widths.
    pub const fn new(curve: f64, major_grid: f64, minor_grid: f64, axis: f64) -> Self {
        Self {
            curve,
            major_grid,
            minor_grid,
            axis,
        }
    }

    /// Multiply every width by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            curve: self.curve * factor,
            major_grid: self.major_grid * factor,
            minor_grid: self.minor_grid * factor,
            axis: self.axis * factor,
        }
    }

    fn is_valid(&self) -> bool {
        [self.curve, self.major_grid, self.minor_grid, self.axis]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for LineWidths {
    /// Pixel widths used before conversion to world units.
    fn default() -> Self {
        Self::new(3.0, 1.0, 1.0, 2.0)
    }
}

/// The source of truth for what is visible.
///
/// `world` holds the nominal bounds that zooming rescales, while
/// `translation` accumulates panning. The rectangle actually shown is
/// `world - translation` (see [`ViewportState::visible`]).
///
/// Outside the crate the state is read-only; the pan and zoom controllers and
/// the home animation are its only writers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    world: Viewport,
    translation: Point,
    resolution: f64,
    line_widths: LineWidths,
}

impl ViewportState {
    /// Create a state, validating every invariant.
    pub fn new(
        world: Viewport,
        translation: Point,
        resolution: f64,
        line_widths: LineWidths,
    ) -> Result<Self, PlotError> {
        let state = Self {
            world,
            translation,
            resolution,
            line_widths,
        };
        state.validate()?;
        Ok(state)
    }

    /// Nominal world bounds.
    pub fn world(&self) -> Viewport {
        self.world
    }

    /// Accumulated pan offset.
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Curve samples per world unit.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Current world-space stroke widths.
    pub fn line_widths(&self) -> LineWidths {
        self.line_widths
    }

    /// The world rectangle currently on screen.
    pub fn visible(&self) -> Viewport {
        self.world.translated(Point::ZERO - self.translation)
    }

    /// Check every invariant.
    pub fn validate(&self) -> Result<(), PlotError> {
        self.world.validated()?;
        if !self.translation.is_finite() {
            return Err(PlotError::InvalidViewport {
                x_min: self.world.x.min - self.translation.x,
                x_max: self.world.x.max - self.translation.x,
                y_min: self.world.y.min - self.translation.y,
                y_max: self.world.y.max - self.translation.y,
            });
        }
        self.visible().validated()?;
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PlotError::InvalidResolution(self.resolution));
        }
        if !self.line_widths.is_valid() {
            return Err(PlotError::InvalidConfig(
                "line widths must be finite and non-negative",
            ));
        }
        Ok(())
    }

    pub(crate) fn translate_by(&mut self, delta: Point) {
        self.translation = self.translation + delta;
    }

    pub(crate) fn set_world(&mut self, world: Viewport) {
        self.world = world;
    }

    pub(crate) fn set_translation(&mut self, translation: Point) {
        self.translation = translation;
    }

    pub(crate) fn set_resolution(&mut self, resolution: f64) {
        self.resolution = resolution;
    }

    pub(crate) fn set_line_widths(&mut self, line_widths: LineWidths) {
        self.line_widths = line_widths;
    }
}
