//! Coordinate conversions between screen, clip, and world space.

use glam::{DMat4, DVec3, DVec4};

use crate::error::PlotError;
use crate::geom::{CanvasSize, ClipPoint, Point, ScreenPoint};
use crate::view::Viewport;

/// Near plane of the orthographic projection.
const NEAR: f64 = 0.0;
/// Far plane of the orthographic projection.
const FAR: f64 = 2.0;
/// Camera position of the fixed look-at view.
const EYE: DVec3 = DVec3::new(0.0, 0.0, 1.0);

/// Stateless mapping between screen pixels, clip space, and world space.
///
/// A `CoordinateSpace` is a snapshot of one viewport and canvas size; build a
/// new one whenever either changes. Screen Y grows downward while clip and
/// world Y grow upward, so every screen/clip conversion flips Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpace {
    viewport: Viewport,
    canvas: CanvasSize,
}

impl CoordinateSpace {
    /// Create a coordinate space for the given visible rectangle and canvas.
    pub fn new(viewport: Viewport, canvas: CanvasSize) -> Result<Self, PlotError> {
        let viewport = viewport.validated()?;
        if !canvas.is_valid() {
            return Err(PlotError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        Ok(Self { viewport, canvas })
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the canvas size.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Map a screen point into clip space.
    pub fn screen_to_clip(&self, p: ScreenPoint) -> ClipPoint {
        ClipPoint::new(
            (p.x / self.canvas.width) * 2.0 - 1.0,
            -((p.y / self.canvas.height) * 2.0 - 1.0),
        )
    }

    /// Map a clip-space point into screen space.
    pub fn clip_to_screen(&self, c: ClipPoint) -> ScreenPoint {
        ScreenPoint::new(
            (c.x + 1.0) * 0.5 * self.canvas.width,
            (1.0 - c.y) * 0.5 * self.canvas.height,
        )
    }

    /// Map a clip-space point into world space.
    pub fn clip_to_world(&self, c: ClipPoint) -> Point {
        let min = self.viewport.min();
        let size = self.viewport.size();
        Point::new(
            min.x + (c.x + 1.0) * 0.5 * size.x,
            min.y + (c.y + 1.0) * 0.5 * size.y,
        )
    }

    /// Map a world point into clip space.
    pub fn world_to_clip(&self, p: Point) -> ClipPoint {
        let min = self.viewport.min();
        let size = self.viewport.size();
        ClipPoint::new(
            (p.x - min.x) * 2.0 / size.x - 1.0,
            (p.y - min.y) * 2.0 / size.y - 1.0,
        )
    }

    /// Map a screen point into world space.
    pub fn screen_to_world(&self, p: ScreenPoint) -> Point {
        self.clip_to_world(self.screen_to_clip(p))
    }

    /// Map a world point into screen space.
    pub fn world_to_screen(&self, p: Point) -> ScreenPoint {
        self.clip_to_screen(self.world_to_clip(p))
    }

    /// Convert a screen-space displacement into a world-space displacement.
    ///
    /// Unlike [`screen_to_world`](Self::screen_to_world) no clip offset is
    /// applied: a displacement has no origin.
    pub fn screen_delta_to_world_delta(&self, d: ScreenPoint) -> Point {
        let per_pixel = self.world_per_pixel();
        Point::new(d.x * per_pixel.x, -d.y * per_pixel.y)
    }

    /// World units covered by one pixel along each axis.
    pub fn world_per_pixel(&self) -> Point {
        let size = self.viewport.size();
        Point::new(size.x / self.canvas.width, size.y / self.canvas.height)
    }

    /// Convert a horizontal pixel length into world units.
    pub fn pixels_to_world(&self, pixels: f64) -> f64 {
        pixels * self.world_per_pixel().x
    }

    /// Orthographic projection of the viewport composed with the fixed
    /// look-at view (camera at `z = 1` looking at the origin, +Y up).
    pub fn view_projection(&self) -> DMat4 {
        let min = self.viewport.min();
        let max = self.viewport.max();
        let projection = DMat4::orthographic_rh_gl(min.x, max.x, min.y, max.y, NEAR, FAR);
        let view = DMat4::look_at_rh(EYE, DVec3::ZERO, DVec3::Y);
        projection * view
    }

    /// Column-major single-precision view-projection for uniform upload.
    pub fn view_projection_f32(&self) -> [f32; 16] {
        self.view_projection().as_mat4().to_cols_array()
    }

    /// Apply the view-projection to a world point on the `z = 0` plane.
    pub fn project(&self, p: Point) -> ClipPoint {
        let clip = self.view_projection() * DVec4::new(p.x, p.y, 0.0, 1.0);
        ClipPoint::new(clip.x / clip.w, clip.y / clip.w)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::view::Range;

    fn space(x: (f64, f64), y: (f64, f64), w: f64, h: f64) -> CoordinateSpace {
        CoordinateSpace::new(
            Viewport::new(Range::new(x.0, x.1), Range::new(y.0, y.1)),
            CanvasSize::new(w, h),
        )
        .expect("valid space")
    }

    #[test]
    fn corners_map_to_world_bounds() {
        let space = space((-5.0, 5.0), (-5.0, 5.0), 800.0, 600.0);
        let top_left = space.screen_to_world(ScreenPoint::new(0.0, 0.0));
        assert_eq!(top_left, Point::new(-5.0, 5.0));
        let bottom_right = space.screen_to_world(ScreenPoint::new(800.0, 600.0));
        assert_eq!(bottom_right, Point::new(5.0, -5.0));
        let center = space.screen_to_clip(ScreenPoint::new(400.0, 300.0));
        assert_eq!(center, ClipPoint::new(0.0, 0.0));
    }

    #[test]
    fn random_screen_points_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..1000 {
            let x_min = rng.gen_range(-100.0..100.0);
            let y_min = rng.gen_range(-100.0..100.0);
            let x_span = 10f64.powf(rng.gen_range(-2.0..4.0));
            let y_span = 10f64.powf(rng.gen_range(-2.0..4.0));
            let w = rng.gen_range(1.0..4000.0);
            let h = rng.gen_range(1.0..4000.0);
            let space = space((x_min, x_min + x_span), (y_min, y_min + y_span), w, h);

            let p = ScreenPoint::new(rng.gen_range(0.0..w), rng.gen_range(0.0..h));
            let back = space.world_to_screen(space.screen_to_world(p));
            assert!((back.x - p.x).abs() < 1e-6, "x {} -> {}", p.x, back.x);
            assert!((back.y - p.y).abs() < 1e-6, "y {} -> {}", p.y, back.y);
        }
    }

    #[test]
    fn screen_delta_ignores_clip_offset_and_flips_y() {
        let space = space((-5.0, 5.0), (-5.0, 5.0), 800.0, 600.0);
        let delta = space.screen_delta_to_world_delta(ScreenPoint::new(100.0, 60.0));
        assert!((delta.x - 1.25).abs() < 1e-12);
        assert!((delta.y + 1.0).abs() < 1e-12);
    }

    #[test]
    fn view_projection_agrees_with_world_to_clip() {
        let space = space((-3.0, 7.0), (2.0, 4.0), 640.0, 480.0);
        for p in [
            Point::new(-3.0, 2.0),
            Point::new(7.0, 4.0),
            Point::new(1.5, 3.25),
        ] {
            let expected = space.world_to_clip(p);
            let projected = space.project(p);
            assert!((expected.x - projected.x).abs() < 1e-12);
            assert!((expected.y - projected.y).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        assert!(matches!(
            CoordinateSpace::new(viewport, CanvasSize::new(0.0, 10.0)),
            Err(PlotError::InvalidCanvas { .. })
        ));
        let flat = Viewport::new(Range::new(1.0, 1.0), Range::new(0.0, 1.0));
        assert!(matches!(
            CoordinateSpace::new(flat, CanvasSize::new(10.0, 10.0)),
            Err(PlotError::InvalidViewport { .. })
        ));
    }
}
