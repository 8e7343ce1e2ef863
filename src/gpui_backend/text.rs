use gpui::{Font, SharedString, TextRun, Window, font, px};

use crate::axis::TextMeasurer;

/// Measures tick label text with the window's text system.
pub struct GpuiTextMeasurer<'a> {
    window: &'a Window,
    font: Font,
}

impl<'a> GpuiTextMeasurer<'a> {
    /// Create a measurer for the given label font family.
    pub fn new(window: &'a Window, family: impl Into<SharedString>) -> Self {
        Self {
            window,
            font: font(family),
        }
    }

    pub(crate) fn font(&self) -> &Font {
        &self.font
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f64) -> (f64, f64) {
        if text.is_empty() || size <= 0.0 {
            return (0.0, 0.0);
        }
        let size = size as f32;
        let run = TextRun {
            len: text.len(),
            font: self.font.clone(),
            color: gpui::black(),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let line = self.window.text_system().shape_line(
            SharedString::from(text.to_owned()),
            px(size),
            &[run],
            None,
        );
        // Labels share one baseline, so the height never drops below a line.
        let height = f32::from(line.ascent + line.descent).max(size * 1.2);
        (f64::from(f32::from(line.width)), f64::from(height))
    }
}
