//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic. [`buffers`] holds the world-space output
//! of the engine; the rest describes a frame in screen space so a backend
//! (such as the GPUI backend) only has to stroke paths and draw text.

pub mod buffers;

pub use buffers::{LINE_SEGMENT_INSTANCE, Layer, PlotGeometry, round_join_geometry};

use crate::geom::{ScreenPoint, ScreenRect, Segment};
use crate::transform::CoordinateSpace;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque grey with equal channels.
    pub const fn grey(level: f32) -> Self {
        Self::new(level, level, level, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw text with its top-left corner at `position`.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Project world segments to screen space and clip them to `clip`.
pub fn build_line_segments(
    segments: &[Segment],
    space: &CoordinateSpace,
    clip: ScreenRect,
    out: &mut Vec<LineSegment>,
) {
    out.clear();
    for segment in segments {
        let start = space.world_to_screen(segment.start);
        let end = space.world_to_screen(segment.end);
        if let Some((clipped_start, clipped_end)) = clip_segment(start, end, clip) {
            out.push(LineSegment::new(clipped_start, clipped_end));
        }
    }
}

/// Cohen–Sutherland clipping of a screen segment against `rect`.
fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite()) {
        return None;
    }

    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x, y) = if (out_code & TOP) != 0 {
            (
                start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y),
                rect.min.y,
            )
        } else if (out_code & BOTTOM) != 0 {
            (
                start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y),
                rect.max.y,
            )
        } else if (out_code & RIGHT) != 0 {
            (
                rect.max.x,
                start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x),
            )
        } else {
            (
                rect.min.x,
                start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x),
            )
        };

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect);
        } else {
            end = new_point;
            out_end = region_code(end, rect);
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn region_code(point: ScreenPoint, rect: ScreenRect) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= LEFT;
    } else if point.x > rect.max.x {
        code |= RIGHT;
    }
    if point.y < rect.min.y {
        code |= TOP;
    } else if point.y > rect.max.y {
        code |= BOTTOM;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::CanvasSize;
    use crate::view::{Range, Viewport};

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0))
    }

    #[test]
    fn clip_segment_inside() {
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect()).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let clipped = clip_segment(
            ScreenPoint::new(-5.0, 5.0),
            ScreenPoint::new(5.0, 5.0),
            rect(),
        )
        .expect("segment should clip");
        assert_eq!(clipped.0, ScreenPoint::new(0.0, 5.0));
        assert_eq!(clipped.1, ScreenPoint::new(5.0, 5.0));
    }

    #[test]
    fn clip_segment_outside() {
        assert!(
            clip_segment(
                ScreenPoint::new(-5.0, -5.0),
                ScreenPoint::new(-1.0, 20.0),
                rect()
            )
            .is_none()
        );
    }

    #[test]
    fn build_segments_flips_y() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let space = CoordinateSpace::new(viewport, CanvasSize::new(10.0, 10.0)).unwrap();
        let segments = [Segment::from_coords(0.0, 0.0, 1.0, 1.0)];
        let mut out = Vec::new();
        build_line_segments(&segments, &space, rect(), &mut out);
        assert_eq!(out.len(), 1);
        assert!((out[0].start.y - 10.0).abs() < 1e-9);
        assert!(out[0].end.y.abs() < 1e-9);
    }
}
