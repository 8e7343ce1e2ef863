use gpui::SharedString;

/// Configuration for the GPUI plot view.
#[derive(Debug, Clone)]
pub struct PlotViewConfig {
    /// Draw tick labels along the axes.
    pub show_labels: bool,
    /// Tick label font size in pixels.
    pub label_size: f32,
    /// Font family used to measure and draw tick labels.
    pub label_font: SharedString,
    /// Ease back to the home view on a left double click.
    pub double_click_home: bool,
    /// Line height used to convert line-based wheel deltas into pixels.
    pub scroll_line_height: f32,
}

impl Default for PlotViewConfig {
    fn default() -> Self {
        Self {
            show_labels: true,
            label_size: 14.0,
            label_font: SharedString::new_static(".SystemUIFont"),
            double_click_home: true,
            scroll_line_height: 16.0,
        }
    }
}
