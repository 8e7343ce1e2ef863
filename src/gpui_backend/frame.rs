use gpui::{Bounds, Font, Pixels, Window, font};

use crate::axis::TextMeasurer;
use crate::geom::{CanvasSize, ScreenPoint, ScreenRect};
use crate::log;
use crate::plot::Plot;
use crate::render::{
    Layer, LineSegment, LineStyle, RenderCommand, RenderList, TextStyle, build_line_segments,
};
use crate::state::LineWidths;

use super::config::PlotViewConfig;
use super::state::PlotUiState;
use super::text::GpuiTextMeasurer;

#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
    pub(crate) font: Font,
}

pub(crate) fn build_frame(
    plot: &mut Plot,
    state: &mut PlotUiState,
    config: &PlotViewConfig,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> PlotFrame {
    let width = f64::from(f32::from(bounds.size.width));
    let height = f64::from(f32::from(bounds.size.height));
    if width <= 1.0 || height <= 1.0 {
        return PlotFrame {
            render: RenderList::new(),
            font: font(config.label_font.clone()),
        };
    }

    let origin = ScreenPoint::new(
        f64::from(f32::from(bounds.origin.x)),
        f64::from(f32::from(bounds.origin.y)),
    );
    state.canvas_rect = Some(ScreenRect::new(
        origin,
        ScreenPoint::new(origin.x + width, origin.y + height),
    ));

    if let Err(err) = plot.resize(CanvasSize::new(width, height)) {
        log::warn!(%err, "canvas resize rejected");
    }

    let measurer = GpuiTextMeasurer::new(window, config.label_font.clone());
    let labels: Option<&dyn TextMeasurer> = if config.show_labels {
        Some(&measurer)
    } else {
        None
    };
    PlotFrame {
        render: build_render_list(plot, origin, config, labels),
        font: measurer.font().clone(),
    }
}

/// Project the plot geometry into a window-space render list.
pub(crate) fn build_render_list(
    plot: &Plot,
    origin: ScreenPoint,
    config: &PlotViewConfig,
    labels: Option<&dyn TextMeasurer>,
) -> RenderList {
    let mut render = RenderList::new();
    let Ok(space) = plot.coordinate_space() else {
        return render;
    };
    let clip = space.canvas().rect();
    let theme = plot.theme();
    let pixels_per_world = 1.0 / space.world_per_pixel().x;
    let widths = plot.line_widths();

    render.push(RenderCommand::ClipRect(offset_rect(clip, origin)));
    let mut segments = Vec::new();
    for layer in Layer::ALL {
        build_line_segments(plot.geometry().layer(layer), &space, clip, &mut segments);
        if segments.is_empty() {
            continue;
        }
        render.push(RenderCommand::LineSegments {
            segments: segments
                .iter()
                .map(|segment| {
                    LineSegment::new(
                        offset_point(segment.start, origin),
                        offset_point(segment.end, origin),
                    )
                })
                .collect(),
            style: LineStyle {
                color: theme.layer_color(layer),
                width: (layer_width(widths, layer) * pixels_per_world) as f32,
            },
        });
    }

    if let Some(measurer) = labels {
        let style = TextStyle {
            color: theme.label,
            size: config.label_size,
        };
        for label in plot.tick_labels(measurer, f64::from(config.label_size)) {
            render.push(RenderCommand::Text {
                position: offset_point(label.position, origin),
                text: label.text,
                style,
            });
        }
    }
    render.push(RenderCommand::ClipEnd);
    render
}

fn layer_width(widths: LineWidths, layer: Layer) -> f64 {
    match layer {
        Layer::MinorGrid => widths.minor_grid,
        Layer::MajorGrid => widths.major_grid,
        Layer::Curve => widths.curve,
        Layer::Axes => widths.axis,
    }
}

fn offset_point(point: ScreenPoint, origin: ScreenPoint) -> ScreenPoint {
    ScreenPoint::new(point.x + origin.x, point.y + origin.y)
}

fn offset_rect(rect: ScreenRect, origin: ScreenPoint) -> ScreenRect {
    ScreenRect::new(offset_point(rect.min, origin), offset_point(rect.max, origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure(&self, text: &str, size: f64) -> (f64, f64) {
            (text.chars().count() as f64 * 8.0, size)
        }
    }

    fn plot() -> Plot {
        Plot::new(CanvasSize::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn layers_are_drawn_back_to_front_inside_a_clip() {
        let render = build_render_list(
            &plot(),
            ScreenPoint::new(0.0, 0.0),
            &PlotViewConfig::default(),
            None,
        );
        let commands = render.commands();
        assert!(matches!(commands.first(), Some(RenderCommand::ClipRect(_))));
        assert!(matches!(commands.last(), Some(RenderCommand::ClipEnd)));
        let widths: Vec<f32> = commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { style, .. } => Some(style.width),
                _ => None,
            })
            .collect();
        // minor, major, curve, axes in pixels
        assert_eq!(widths.len(), 4);
        let expected = [1.0, 1.0, 3.0, 2.0];
        for (width, expected) in widths.iter().zip(expected) {
            assert!((width - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn commands_are_offset_to_the_canvas_origin() {
        let origin = ScreenPoint::new(50.0, 20.0);
        let render = build_render_list(
            &plot(),
            origin,
            &PlotViewConfig::default(),
            Some(&FixedWidth),
        );
        let Some(RenderCommand::ClipRect(rect)) = render.commands().first() else {
            panic!("expected a clip rect");
        };
        assert_eq!(rect.min, origin);
        assert_eq!(rect.max, ScreenPoint::new(850.0, 620.0));
        let texts = render
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::Text { .. }))
            .count();
        assert_eq!(texts, 10);
    }
}
