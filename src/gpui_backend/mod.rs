//! GPUI integration for gpui_fnplot.
//!
//! This module provides a GPUI view that renders a [`Plot`](crate::plot::Plot),
//! forwards pointer and wheel input to its pan and zoom controllers, and keeps
//! requesting frames while the ease-to-home animation runs.

mod config;
mod frame;
mod paint;
mod state;
mod text;
mod view;

pub use config::PlotViewConfig;
pub use text::GpuiTextMeasurer;
pub use view::{GpuiPlotView, PlotHandle};
