use crate::geom::{ScreenPoint, ScreenRect};

/// View-side state shared between the paint closure and the input handlers.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlotUiState {
    /// Canvas bounds in window coordinates, known after the first prepaint.
    pub(crate) canvas_rect: Option<ScreenRect>,
}

impl PlotUiState {
    /// Convert a window position into canvas-local pixels.
    pub(crate) fn to_canvas(&self, pos: ScreenPoint) -> Option<ScreenPoint> {
        let rect = self.canvas_rect?;
        Some(ScreenPoint::new(pos.x - rect.min.x, pos.y - rect.min.y))
    }
}
