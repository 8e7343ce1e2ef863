//! Plot engine entry points and builders.
//!
//! [`Plot`] owns the viewport state, the controllers, and the generated
//! geometry. Every operation finishes its state update and geometry
//! regeneration before returning; a failed regeneration restores the previous
//! state so the last good geometry stays in place.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use glam::DMat4;

use crate::animation::{AnimationStep, HomeAnimation, ViewSnapshot};
use crate::axis::{GridSpacing, TextMeasurer, format_tick, round_tick};
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::geom::{CanvasSize, Point, ScreenPoint, Segment};
use crate::grid::{GridGeometryBuilder, Ticks};
use crate::interaction::{PanController, SpacingUpdate, ZoomController, ZoomOutcome};
use crate::log;
use crate::render::PlotGeometry;
use crate::sampler::{PlotFunction, sample};
use crate::state::{LineWidths, ViewportState};
use crate::style::Theme;
use crate::transform::CoordinateSpace;
use crate::view::{Range, Viewport};

/// A user-supplied function to plot.
pub type CustomFunction = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// The function currently plotted.
#[derive(Clone)]
pub enum FunctionSource {
    /// An entry of the built-in catalogue.
    Catalogue(PlotFunction),
    /// An arbitrary function.
    Custom(CustomFunction),
}

impl FunctionSource {
    fn sample(&self, range: Range, resolution: f64) -> Result<Vec<Segment>, PlotError> {
        match self {
            Self::Catalogue(function) => {
                let function = *function;
                sample(move |x| function.eval(x), range.min, range.max, resolution)
            }
            Self::Custom(function) => sample(|x| function(x), range.min, range.max, resolution),
        }
    }
}

impl Default for FunctionSource {
    fn default() -> Self {
        Self::Catalogue(PlotFunction::default())
    }
}

impl fmt::Debug for FunctionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalogue(function) => f.debug_tuple("Catalogue").field(function).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Which axis a tick label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAxis {
    /// Label of a vertical grid line, drawn below the X axis.
    X,
    /// Label of a horizontal grid line, drawn left of the Y axis.
    Y,
}

/// A positioned tick label.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    /// Axis the tick belongs to.
    pub axis: LabelAxis,
    /// World value of the tick.
    pub value: f64,
    /// Display text.
    pub text: String,
    /// Top-left corner of the text in screen pixels.
    pub position: ScreenPoint,
    /// Measured text size in pixels.
    pub size: (f64, f64),
}

/// Interactive function plot engine.
#[derive(Debug, Clone)]
pub struct Plot {
    config: PlotConfig,
    theme: Theme,
    canvas: CanvasSize,
    state: ViewportState,
    home: ViewSnapshot,
    function: FunctionSource,
    pan: PanController,
    zoom: ZoomController,
    animation: HomeAnimation,
    spacing: GridSpacing,
    geometry: PlotGeometry,
    ticks: Ticks,
}

impl Plot {
    /// Create a plot with default configuration for a canvas.
    ///
    /// See [`PlotBuilder::build`] for how `canvas` shapes the initial view.
    pub fn new(canvas: CanvasSize) -> Result<Self, PlotError> {
        Self::builder().build(canvas)
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Access the configuration.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Canvas size in device pixels.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Current viewport state.
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The world rectangle currently on screen.
    pub fn visible(&self) -> Viewport {
        self.state.visible()
    }

    /// Snapshot that [`go_home`](Self::go_home) animates back to.
    pub fn home(&self) -> ViewSnapshot {
        self.home
    }

    /// Coordinate space of the visible rectangle.
    pub fn coordinate_space(&self) -> Result<CoordinateSpace, PlotError> {
        CoordinateSpace::new(self.state.visible(), self.canvas)
    }

    /// Catalogue entry being plotted, or `None` for a custom function.
    pub fn function(&self) -> Option<PlotFunction> {
        match &self.function {
            FunctionSource::Catalogue(function) => Some(*function),
            FunctionSource::Custom(_) => None,
        }
    }

    /// Current grid spacing.
    pub fn spacing(&self) -> GridSpacing {
        self.spacing
    }

    /// Geometry for the current state.
    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    /// World positions of the major ticks.
    pub fn ticks(&self) -> &Ticks {
        &self.ticks
    }

    /// World-space stroke widths.
    pub fn line_widths(&self) -> LineWidths {
        self.state.line_widths()
    }

    /// View-projection matrix of the visible rectangle.
    pub fn view_projection_matrix(&self) -> Result<DMat4, PlotError> {
        Ok(self.coordinate_space()?.view_projection())
    }

    /// Column-major view-projection for uniform upload.
    pub fn view_projection(&self) -> Result<[f32; 16], PlotError> {
        Ok(self.coordinate_space()?.view_projection_f32())
    }

    /// Check whether the ease-to-home animation is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    /// Check whether a pan drag is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan.is_panning()
    }

    /// Begin a pan drag. Cancels the home animation.
    pub fn pointer_down(&mut self, pos: ScreenPoint) {
        self.cancel_animation();
        self.pan.pointer_down(pos);
    }

    /// Continue a pan drag. Returns whether the view changed.
    pub fn pointer_move(&mut self, pos: ScreenPoint) -> Result<bool, PlotError> {
        let previous = self.state.clone();
        let pan = self.pan;
        if !self.pan.pointer_move(pos, &mut self.state, self.canvas)? {
            return Ok(false);
        }
        // A rejected move keeps its anchor so the next move retries the full delta.
        if let Err(err) = self.commit(previous, SpacingUpdate::Recompute) {
            self.pan = pan;
            return Err(err);
        }
        Ok(true)
    }

    /// End a pan drag.
    pub fn pointer_up(&mut self) {
        self.pan.pointer_up();
    }

    /// Abort a pan drag because the pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        self.pan.pointer_leave();
    }

    /// Handle a wheel event at `pos`.
    ///
    /// Negative `delta_y` zooms in, positive zooms out, and zero is ignored
    /// (`Ok(None)`).
    pub fn wheel(
        &mut self,
        delta_y: f64,
        pos: ScreenPoint,
    ) -> Result<Option<ZoomOutcome>, PlotError> {
        if delta_y == 0.0 || delta_y.is_nan() {
            return Ok(None);
        }
        self.zoom(delta_y < 0.0, pos, SpacingUpdate::Recompute)
            .map(Some)
    }

    /// Zoom one step around `pivot`. Cancels the home animation.
    pub fn zoom(
        &mut self,
        zooming_in: bool,
        pivot: ScreenPoint,
        spacing: SpacingUpdate,
    ) -> Result<ZoomOutcome, PlotError> {
        self.cancel_animation();
        let previous = self.state.clone();
        let outcome = self
            .zoom
            .zoom(&mut self.state, self.canvas, zooming_in, pivot)?;
        if let ZoomOutcome::Applied { .. } = outcome {
            self.commit(previous, spacing)?;
        }
        Ok(outcome)
    }

    /// Plot a catalogue function.
    pub fn select_function(&mut self, function: PlotFunction) -> Result<(), PlotError> {
        self.set_function(FunctionSource::Catalogue(function))
    }

    /// Plot the catalogue function at `index`.
    pub fn select_function_index(&mut self, index: usize) -> Result<(), PlotError> {
        self.select_function(PlotFunction::from_index(index)?)
    }

    /// Plot an arbitrary function.
    pub fn set_custom_function<F>(&mut self, function: F) -> Result<(), PlotError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.set_function(FunctionSource::Custom(Arc::new(function)))
    }

    fn set_function(&mut self, function: FunctionSource) -> Result<(), PlotError> {
        let curve = function.sample(self.state.visible().x, self.state.resolution())?;
        log::debug!(?function, segments = curve.len(), "function selected");
        self.function = function;
        self.geometry.curve = curve;
        Ok(())
    }

    /// Adopt a new canvas size.
    ///
    /// The world bounds are kept; stroke widths are recomputed so they stay
    /// constant in pixels.
    pub fn resize(&mut self, canvas: CanvasSize) -> Result<(), PlotError> {
        if !canvas.is_valid() {
            log::warn!(
                width = canvas.width,
                height = canvas.height,
                "ignoring invalid canvas size"
            );
            return Err(PlotError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        if canvas == self.canvas {
            return Ok(());
        }
        let widths = world_line_widths(self.config.pixel_line_widths, self.state.world(), canvas)?;
        let previous_canvas = self.canvas;
        let previous = self.state.clone();
        self.canvas = canvas;
        self.state.set_line_widths(widths);
        if let Err(err) = self.commit(previous, SpacingUpdate::Recompute) {
            self.canvas = previous_canvas;
            return Err(err);
        }
        Ok(())
    }

    /// Start easing back to the home view.
    pub fn go_home(&mut self, now: Instant) {
        self.pan.pointer_up();
        self.animation
            .start(self.snapshot(), now, self.config.home_duration);
        log::debug!("home animation started");
    }

    /// Advance the home animation to `now`. Returns whether the view changed.
    pub fn tick(&mut self, now: Instant) -> Result<bool, PlotError> {
        let snapshot = match self.animation.step(now, &self.home) {
            AnimationStep::Idle => return Ok(false),
            AnimationStep::Running(snapshot) => snapshot,
            AnimationStep::Finished(snapshot) => {
                log::debug!("home animation finished");
                snapshot
            }
        };
        let previous = self.state.clone();
        if let Err(err) = self
            .apply_snapshot(&snapshot)
            .and_then(|()| self.commit(previous, SpacingUpdate::Recompute))
        {
            self.animation.cancel();
            return Err(err);
        }
        Ok(true)
    }

    /// Labels for the major ticks along both axes.
    ///
    /// X labels are centred below the X axis and Y labels right-aligned left of
    /// the Y axis, each offset by half the font size. The origin is skipped.
    pub fn tick_labels(&self, measurer: &dyn TextMeasurer, font_size: f64) -> Vec<TickLabel> {
        let Ok(space) = self.coordinate_space() else {
            return Vec::new();
        };
        let offset = font_size / 2.0;
        let mut labels = Vec::with_capacity(self.ticks.x.len() + self.ticks.y.len());

        for &value in &self.ticks.x {
            if round_tick(value) == 0.0 {
                continue;
            }
            let text = format_tick(value);
            let (width, height) = measurer.measure(&text, font_size);
            let anchor = space.world_to_screen(Point::new(value, 0.0));
            labels.push(TickLabel {
                axis: LabelAxis::X,
                value,
                text,
                position: ScreenPoint::new(anchor.x - width / 2.0, anchor.y + offset),
                size: (width, height),
            });
        }
        for &value in &self.ticks.y {
            if round_tick(value) == 0.0 {
                continue;
            }
            let text = format_tick(value);
            let (width, height) = measurer.measure(&text, font_size);
            let anchor = space.world_to_screen(Point::new(0.0, value));
            labels.push(TickLabel {
                axis: LabelAxis::Y,
                value,
                text,
                position: ScreenPoint::new(anchor.x - width - offset, anchor.y - height / 2.0),
                size: (width, height),
            });
        }
        labels
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            world: self.state.world(),
            translation: self.state.translation(),
            resolution: self.state.resolution(),
        }
    }

    fn apply_snapshot(&mut self, snapshot: &ViewSnapshot) -> Result<(), PlotError> {
        let widths = world_line_widths(self.config.pixel_line_widths, snapshot.world, self.canvas)?;
        self.state.set_world(snapshot.world);
        self.state.set_translation(snapshot.translation);
        self.state.set_resolution(snapshot.resolution);
        self.state.set_line_widths(widths);
        Ok(())
    }

    fn cancel_animation(&mut self) {
        if self.animation.is_active() {
            self.animation.cancel();
            log::debug!("home animation cancelled");
        }
    }

    /// Regenerate geometry for the mutated state, or roll back to `previous`.
    fn commit(&mut self, previous: ViewportState, spacing: SpacingUpdate) -> Result<(), PlotError> {
        match self.regenerate(spacing) {
            Ok(()) => Ok(()),
            Err(err) => {
                log::warn!(%err, "regeneration failed, keeping previous geometry");
                self.state = previous;
                Err(err)
            }
        }
    }

    /// Rebuild spacing, grid, axes, ticks, and curve from the current state.
    fn regenerate(&mut self, update: SpacingUpdate) -> Result<(), PlotError> {
        self.state.validate()?;
        let visible = self.state.visible();
        let builder = GridGeometryBuilder::new(visible)?;

        let (spacing, grid) = match update {
            SpacingUpdate::Recompute => {
                let spacing = GridSpacing::for_viewport(&visible)?;
                (spacing, builder.build(spacing)?)
            }
            SpacingUpdate::Locked => match builder.build(self.spacing) {
                Ok(grid) => (self.spacing, grid),
                Err(PlotError::GridTooDense { .. }) => {
                    let spacing = GridSpacing::for_viewport(&visible)?;
                    (spacing, builder.build(spacing)?)
                }
                Err(err) => return Err(err),
            },
        };
        let ticks = builder.major_ticks(spacing)?;
        let curve = self.function.sample(visible.x, self.state.resolution())?;

        if spacing != self.spacing {
            log::debug!(major = spacing.major, minor = spacing.minor, "grid spacing changed");
        }
        self.spacing = spacing;
        self.geometry = PlotGeometry {
            curve,
            major_grid: grid.major,
            minor_grid: grid.minor,
            axes: builder.axes(),
        };
        self.ticks = ticks;
        Ok(())
    }
}

/// Convert pixel stroke widths into world units for `world` on `canvas`.
fn world_line_widths(
    pixels: LineWidths,
    world: Viewport,
    canvas: CanvasSize,
) -> Result<LineWidths, PlotError> {
    let space = CoordinateSpace::new(world, canvas)?;
    Ok(pixels.scaled(space.pixels_to_world(1.0)))
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PlotBuilder {
    config: PlotConfig,
    theme: Theme,
    function: FunctionSource,
}

impl PlotBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Plot a catalogue function.
    pub fn function(mut self, function: PlotFunction) -> Self {
        self.function = FunctionSource::Catalogue(function);
        self
    }

    /// Plot an arbitrary function.
    pub fn custom_function<F>(mut self, function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.function = FunctionSource::Custom(Arc::new(function));
        self
    }

    /// Build the plot for a canvas.
    ///
    /// The initial view is centred on the origin, `2 * initial_half_height`
    /// tall and as wide as the canvas aspect ratio requires. Pass the size the
    /// canvas will actually have: a later [`Plot::resize`] keeps these bounds,
    /// so a different aspect ratio stretches the grid cells.
    pub fn build(self, canvas: CanvasSize) -> Result<Plot, PlotError> {
        self.config.validate()?;
        if !canvas.is_valid() {
            return Err(PlotError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        let half_height = self.config.initial_half_height;
        let half_width = half_height * canvas.aspect_ratio();
        let world = Viewport::new(
            Range::new(-half_width, half_width),
            Range::new(-half_height, half_height),
        );
        let state = ViewportState::new(
            world,
            Point::ZERO,
            self.config.initial_resolution,
            world_line_widths(self.config.pixel_line_widths, world, canvas)?,
        )?;
        let home = ViewSnapshot {
            world,
            translation: Point::ZERO,
            resolution: self.config.initial_resolution,
        };
        let zoom = ZoomController::new(&self.config)?;
        let spacing = GridSpacing::for_viewport(&world)?;

        let mut plot = Plot {
            config: self.config,
            theme: self.theme,
            canvas,
            state,
            home,
            function: self.function,
            pan: PanController::new(),
            zoom,
            animation: HomeAnimation::default(),
            spacing,
            geometry: PlotGeometry::default(),
            ticks: Ticks::default(),
        };
        plot.regenerate(SpacingUpdate::Recompute)?;
        Ok(plot)
    }
}
