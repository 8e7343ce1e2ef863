//! gpui_fnplot is an interactive function plotter built for GPUI.
//! A headless viewport engine handles panning, anchor-preserving zoom, and
//! adaptive "nice" grid spacing; the optional GPUI view draws its output.

#![forbid(unsafe_code)]

pub mod animation;
pub mod axis;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod interaction;
pub mod log;
pub mod plot;
pub mod render;
pub mod sampler;
pub mod state;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use animation::{HomeAnimation, ViewSnapshot, ease_in_out_cubic};
pub use axis::{GridSpacing, TextMeasurer, format_tick, nice_grid_size};
pub use config::PlotConfig;
pub use error::PlotError;
pub use geom::{CanvasSize, ClipPoint, Point, ScreenPoint, ScreenRect, Segment};
pub use grid::{GridGeometry, GridGeometryBuilder, Ticks};
pub use interaction::{PanController, PanState, SpacingUpdate, ZoomController, ZoomOutcome};
pub use plot::{LabelAxis, Plot, PlotBuilder, TickLabel};
pub use render::{
    Color, LINE_SEGMENT_INSTANCE, Layer, LineSegment, LineStyle, PlotGeometry, RenderCommand,
    RenderList, TextStyle, build_line_segments, round_join_geometry,
};
pub use sampler::{PlotFunction, sample};
pub use state::{LineWidths, ViewportState};
pub use style::Theme;
pub use transform::CoordinateSpace;
pub use view::{Range, Viewport};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPlotView, GpuiTextMeasurer, PlotHandle, PlotViewConfig};
