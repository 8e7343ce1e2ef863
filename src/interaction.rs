//! Pan and zoom controllers.
//!
//! Both controllers mutate a [`ViewportState`] in place and leave geometry
//! regeneration to the caller (normally [`Plot`](crate::plot::Plot)).

use crate::axis::nice_grid_size;
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::geom::{CanvasSize, Point, ScreenPoint};
use crate::log;
use crate::state::ViewportState;
use crate::transform::CoordinateSpace;
use crate::view::{Range, Viewport};

/// Pan gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    /// No pointer is held down.
    #[default]
    Idle,
    /// A drag is in progress.
    Panning {
        /// Last pointer position, in screen pixels.
        anchor: ScreenPoint,
    },
}

/// Turns pointer drags into translation updates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanController {
    state: PanState,
}

impl PanController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> PanState {
        self.state
    }

    /// Check whether a drag is in progress.
    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    /// Start a drag at `pos`.
    pub fn pointer_down(&mut self, pos: ScreenPoint) {
        self.state = PanState::Panning { anchor: pos };
    }

    /// Continue a drag.
    ///
    /// Moves the translation by the pointer displacement since the last event,
    /// converted into world units. Returns `Ok(false)` without touching the
    /// state when no drag is in progress.
    pub fn pointer_move(
        &mut self,
        pos: ScreenPoint,
        viewport: &mut ViewportState,
        canvas: CanvasSize,
    ) -> Result<bool, PlotError> {
        let PanState::Panning { anchor } = self.state else {
            return Ok(false);
        };
        let space = CoordinateSpace::new(viewport.world(), canvas)?;
        let delta = space.screen_delta_to_world_delta(pos - anchor);
        if !delta.is_finite() {
            return Ok(false);
        }
        viewport.translate_by(delta);
        self.state = PanState::Panning { anchor: pos };
        log::debug!(dx = delta.x, dy = delta.y, "pan");
        Ok(true)
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.state = PanState::Idle;
    }

    /// Abort the drag because the pointer left the surface.
    pub fn pointer_leave(&mut self) {
        self.state = PanState::Idle;
    }
}

/// How grid spacing reacts to a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingUpdate {
    /// Recompute the spacing from the new bounds.
    #[default]
    Recompute,
    /// Keep the current spacing, e.g. for the duration of a continuous gesture.
    Locked,
}

/// Result of a zoom request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// The bounds were rescaled by `factor`.
    Applied {
        /// Factor applied to the resolution; bounds shrank by its inverse.
        factor: f64,
    },
    /// The step was rejected because the grid spacing would leave the
    /// representable range. The state is unchanged.
    Clamped,
}

/// Turns wheel input into anchor-preserving zoom steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    factor: f64,
    min_spacing: f64,
    max_spacing: f64,
}

impl ZoomController {
    /// Create a controller from the engine configuration.
    pub fn new(config: &PlotConfig) -> Result<Self, PlotError> {
        config.validate()?;
        Ok(Self {
            factor: config.zoom_factor,
            min_spacing: config.min_grid_spacing,
            max_spacing: config.max_grid_spacing,
        })
    }

    /// Zoom one step in or out around the screen point `pivot`.
    ///
    /// The world point under `pivot` stays under `pivot`. Resolution grows by
    /// the step factor and line widths shrink by it, so sampling density and
    /// stroke thickness stay constant on screen.
    pub fn zoom(
        &self,
        viewport: &mut ViewportState,
        canvas: CanvasSize,
        zooming_in: bool,
        pivot: ScreenPoint,
    ) -> Result<ZoomOutcome, PlotError> {
        let factor = if zooming_in {
            self.factor
        } else {
            1.0 / self.factor
        };
        let space = CoordinateSpace::new(viewport.world(), canvas)?;
        let pivot_world = space.screen_to_world(pivot);
        let next = zoom_viewport(viewport.world(), pivot_world, factor);

        let spacing = match next.validated().and_then(|next| nice_grid_size(next.max_span())) {
            Ok(spacing) => spacing,
            Err(err) => {
                log::warn!(%err, "zoom produced an unusable viewport");
                return Ok(ZoomOutcome::Clamped);
            }
        };
        if (zooming_in && spacing < self.min_spacing) || (!zooming_in && spacing > self.max_spacing)
        {
            log::debug!(spacing, zooming_in, "zoom clamped");
            return Ok(ZoomOutcome::Clamped);
        }

        viewport.set_world(next);
        viewport.set_resolution(viewport.resolution() * factor);
        viewport.set_line_widths(viewport.line_widths().scaled(1.0 / factor));
        log::debug!(factor, spacing, "zoom applied");
        Ok(ZoomOutcome::Applied { factor })
    }
}

/// Rescale a viewport by `1 / factor` around a world-space pivot.
pub fn zoom_viewport(viewport: Viewport, pivot: Point, factor: f64) -> Viewport {
    let min = viewport.min();
    let max = viewport.max();
    let new_min = pivot - (pivot - min) / factor;
    let new_max = pivot + (max - pivot) / factor;
    Viewport::new(
        Range::new(new_min.x, new_max.x),
        Range::new(new_min.y, new_max.y),
    )
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::state::LineWidths;

    const CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);

    fn state() -> ViewportState {
        ViewportState::new(
            Viewport::new(Range::new(-5.0, 5.0), Range::new(-5.0, 5.0)),
            Point::ZERO,
            100.0,
            LineWidths::new(0.03, 0.01, 0.01, 0.02),
        )
        .unwrap()
    }

    fn controller() -> ZoomController {
        ZoomController::new(&PlotConfig::default()).unwrap()
    }

    fn rel_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn pan_by_100_pixels_moves_translation_by_world_width_share() {
        let mut viewport = state();
        let mut pan = PanController::new();
        pan.pointer_down(ScreenPoint::new(200.0, 300.0));
        let moved = pan
            .pointer_move(ScreenPoint::new(300.0, 300.0), &mut viewport, CANVAS)
            .unwrap();
        assert!(moved);
        assert!((viewport.translation().x - 1.25).abs() < 1e-12);
        assert_eq!(viewport.translation().y, 0.0);
        assert_eq!(
            pan.state(),
            PanState::Panning {
                anchor: ScreenPoint::new(300.0, 300.0)
            }
        );
    }

    #[test]
    fn dragging_down_moves_translation_down() {
        let mut viewport = state();
        let mut pan = PanController::new();
        pan.pointer_down(ScreenPoint::new(0.0, 0.0));
        pan.pointer_move(ScreenPoint::new(0.0, 60.0), &mut viewport, CANVAS)
            .unwrap();
        assert!((viewport.translation().y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn idle_pointer_move_is_a_no_op() {
        let mut viewport = state();
        let before = viewport.clone();
        let mut pan = PanController::new();
        let moved = pan
            .pointer_move(ScreenPoint::new(50.0, 50.0), &mut viewport, CANVAS)
            .unwrap();
        assert!(!moved);
        assert_eq!(viewport, before);
    }

    #[test]
    fn pointer_up_and_leave_end_the_drag() {
        let mut pan = PanController::new();
        pan.pointer_down(ScreenPoint::new(1.0, 1.0));
        pan.pointer_up();
        assert_eq!(pan.state(), PanState::Idle);
        pan.pointer_down(ScreenPoint::new(1.0, 1.0));
        pan.pointer_leave();
        assert!(!pan.is_panning());
    }

    #[test]
    fn zoom_keeps_world_point_under_pivot() {
        let mut viewport = state();
        let zoom = controller();
        let pivot = ScreenPoint::new(123.0, 456.0);
        let before = CoordinateSpace::new(viewport.world(), CANVAS)
            .unwrap()
            .screen_to_world(pivot);
        let outcome = zoom.zoom(&mut viewport, CANVAS, true, pivot).unwrap();
        assert_eq!(outcome, ZoomOutcome::Applied { factor: 1.05 });
        let after = CoordinateSpace::new(viewport.world(), CANVAS)
            .unwrap()
            .screen_to_world(pivot);
        assert!(rel_eq(before.x, after.x));
        assert!(rel_eq(before.y, after.y));
        assert!(viewport.world().x.span() < 10.0);
    }

    #[test]
    fn zoom_in_then_out_restores_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let zoom = controller();
        for _ in 0..200 {
            let mut viewport = state();
            let original = viewport.world();
            let pivot = ScreenPoint::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            zoom.zoom(&mut viewport, CANVAS, true, pivot).unwrap();
            zoom.zoom(&mut viewport, CANVAS, false, pivot).unwrap();
            let restored = viewport.world();
            assert!(rel_eq(restored.x.min, original.x.min));
            assert!(rel_eq(restored.x.max, original.x.max));
            assert!(rel_eq(restored.y.min, original.y.min));
            assert!(rel_eq(restored.y.max, original.y.max));
            assert!(rel_eq(viewport.resolution(), 100.0));
        }
    }

    #[test]
    fn zoom_co_scales_resolution_and_widths() {
        let mut viewport = state();
        let zoom = controller();
        zoom.zoom(&mut viewport, CANVAS, true, ScreenPoint::new(400.0, 300.0))
            .unwrap();
        assert!(rel_eq(viewport.resolution(), 105.0));
        assert!(rel_eq(viewport.line_widths().curve, 0.03 / 1.05));
        assert!(rel_eq(viewport.line_widths().axis, 0.02 / 1.05));
    }

    #[test]
    fn zoom_in_is_clamped_at_minimum_spacing() {
        let mut viewport = ViewportState::new(
            Viewport::new(Range::new(0.0, 4e-6), Range::new(0.0, 4e-6)),
            Point::ZERO,
            1.0,
            LineWidths::default(),
        )
        .unwrap();
        let before = viewport.clone();
        let outcome = controller()
            .zoom(&mut viewport, CANVAS, true, ScreenPoint::new(400.0, 300.0))
            .unwrap();
        assert_eq!(outcome, ZoomOutcome::Clamped);
        assert_eq!(viewport, before);
    }

    #[test]
    fn zoom_out_is_clamped_at_maximum_spacing() {
        let mut viewport = ViewportState::new(
            Viewport::new(Range::new(0.0, 4e19), Range::new(0.0, 4e19)),
            Point::ZERO,
            1.0,
            LineWidths::default(),
        )
        .unwrap();
        let before = viewport.clone();
        let outcome = controller()
            .zoom(&mut viewport, CANVAS, false, ScreenPoint::new(400.0, 300.0))
            .unwrap();
        assert_eq!(outcome, ZoomOutcome::Clamped);
        assert_eq!(viewport, before);
    }
}
