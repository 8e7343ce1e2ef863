use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent,
    Window, canvas, div, px,
};

use crate::geom::ScreenPoint;
use crate::log;
use crate::plot::Plot;

use super::config::PlotViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::PlotUiState;

/// A GPUI view that renders a [`Plot`] with interactive controls.
///
/// Left-drag pans, the wheel zooms around the pointer, and a left double
/// click eases back to the home view.
#[derive(Clone)]
pub struct GpuiPlotView {
    plot: Arc<RwLock<Plot>>,
    state: Arc<RwLock<PlotUiState>>,
    config: PlotViewConfig,
}

impl GpuiPlotView {
    /// Create a new GPUI plot view for the given plot.
    ///
    /// Uses the default [`PlotViewConfig`].
    pub fn new(plot: Plot) -> Self {
        Self::with_config(plot, PlotViewConfig::default())
    }

    /// Create a new GPUI plot view with a custom configuration.
    pub fn with_config(plot: Plot, config: PlotViewConfig) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            state: Arc::new(RwLock::new(PlotUiState::default())),
            config,
        }
    }

    /// Get a handle for mutating the underlying plot.
    ///
    /// This is useful for switching functions from other views or tasks.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    fn canvas_point(&self, position: Point<Pixels>) -> Option<ScreenPoint> {
        let state = self.state.read().expect("plot state lock");
        state.to_canvas(screen_point(position))
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let Some(pos) = self.canvas_point(ev.position) else {
            return;
        };
        let mut plot = self.plot.write().expect("plot lock");
        if ev.click_count >= 2 && self.config.double_click_home {
            plot.go_home(Instant::now());
        } else {
            plot.pointer_down(pos);
        }
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let Some(pos) = self.canvas_point(ev.position) else {
            return;
        };
        let mut plot = self.plot.write().expect("plot lock");
        if !plot.is_panning() {
            return;
        }
        // The release happened somewhere this view never saw.
        if ev.pressed_button != Some(MouseButton::Left) {
            plot.pointer_leave();
            return;
        }
        match plot.pointer_move(pos) {
            Ok(true) => cx.notify(),
            Ok(false) => {}
            Err(err) => {
                log::warn!(%err, "pan rejected");
            }
        }
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        self.plot.write().expect("plot lock").pointer_up();
        cx.notify();
    }

    fn on_mouse_up_out(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        self.plot.write().expect("plot lock").pointer_leave();
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let Some(pos) = self.canvas_point(ev.position) else {
            return;
        };
        let delta = ev.delta.pixel_delta(px(self.config.scroll_line_height));
        // GPUI reports upward scrolling as positive; the engine expects the
        // opposite sign.
        let delta_y = -f64::from(f32::from(delta.y));
        let mut plot = self.plot.write().expect("plot lock");
        match plot.wheel(delta_y, pos) {
            Ok(Some(_)) => cx.notify(),
            Ok(None) => {}
            Err(err) => {
                log::warn!(%err, "zoom rejected");
            }
        }
    }
}

impl Render for GpuiPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let theme = *plot.read().expect("plot lock").theme();

        div()
            .size_full()
            .bg(to_hsla(theme.background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut plot = plot.write().expect("plot lock");
                        let mut state = state.write().expect("plot state lock");
                        if let Err(err) = plot.tick(Instant::now()) {
                            log::warn!(%err, "home animation step rejected");
                        }
                        if plot.is_animating() {
                            window.request_animation_frame();
                        }
                        build_frame(&mut plot, &mut state, &config, bounds, window)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up_out(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

/// A handle for mutating a [`Plot`] held inside a `GpuiPlotView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct PlotHandle {
    plot: Arc<RwLock<Plot>>,
}

impl PlotHandle {
    /// Read the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Plot) -> R) -> R {
        let plot = self.plot.read().expect("plot lock");
        f(&plot)
    }

    /// Mutate the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Plot) -> R) -> R {
        let mut plot = self.plot.write().expect("plot lock");
        f(&mut plot)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}
