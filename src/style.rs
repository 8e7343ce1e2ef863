//! Plot colors.

use crate::render::{Color, Layer};

/// Visual theme for plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Canvas fill.
    pub background: Color,
    /// Function curve.
    pub curve: Color,
    /// Major grid lines.
    pub major_grid: Color,
    /// Minor grid lines.
    pub minor_grid: Color,
    /// Coordinate axes.
    pub axes: Color,
    /// Tick labels.
    pub label: Color,
}

impl Theme {
    /// Greys on white.
    pub const fn light() -> Self {
        Self {
            background: Color::WHITE,
            curve: Color::grey(0.25),
            major_grid: Color::grey(0.75),
            minor_grid: Color::grey(0.9),
            axes: Color::grey(0.5),
            label: Color::grey(0.25),
        }
    }

    /// Light strokes on a near-black canvas.
    pub const fn dark() -> Self {
        Self {
            background: Color::new(0.07, 0.07, 0.08, 1.0),
            curve: Color::new(0.45, 0.75, 1.0, 1.0),
            major_grid: Color::grey(0.3),
            minor_grid: Color::grey(0.17),
            axes: Color::grey(0.6),
            label: Color::grey(0.8),
        }
    }

    /// Stroke color of a layer.
    pub fn layer_color(&self, layer: Layer) -> Color {
        match layer {
            Layer::MinorGrid => self.minor_grid,
            Layer::MajorGrid => self.major_grid,
            Layer::Curve => self.curve,
            Layer::Axes => self.axes,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_uses_grey_ladder() {
        let theme = Theme::default();
        assert_eq!(theme.layer_color(Layer::Curve), Color::grey(0.25));
        assert_eq!(theme.layer_color(Layer::MajorGrid), Color::grey(0.75));
        assert_eq!(theme.layer_color(Layer::MinorGrid), Color::grey(0.9));
        assert_eq!(theme.layer_color(Layer::Axes), Color::grey(0.5));
    }
}
