use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    AppContext, Application, Bounds, MouseButton, WindowBounds, WindowOptions, div, px, rgb, size,
};

use gpui_fnplot::{GpuiPlotView, Plot, PlotFunction, PlotHandle, PlotViewConfig, Theme};

const WINDOW_WIDTH: f32 = 960.0;
const WINDOW_HEIGHT: f32 = 640.0;
const TOOLBAR_HEIGHT: f32 = 40.0;

struct FunctionDemo {
    view: gpui::Entity<GpuiPlotView>,
    handle: PlotHandle,
}

impl FunctionDemo {
    fn button(
        &self,
        label: impl Into<gpui::SharedString>,
        active: bool,
        cx: &mut gpui::Context<Self>,
        on_click: impl Fn(&PlotHandle) + 'static,
    ) -> impl IntoElement {
        let view = self.view.clone();
        let handle = self.handle.clone();
        div()
            .px_3()
            .py_1()
            .rounded_md()
            .text_color(rgb(0xe6e6e6))
            .bg(if active { rgb(0x3b5b7a) } else { rgb(0x2a2a2e) })
            .child(label.into())
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |_, _, _, cx| {
                    on_click(&handle);
                    view.update(cx, |_, cx| cx.notify());
                    cx.notify();
                }),
            )
    }
}

impl gpui::Render for FunctionDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        let selected = self.handle.read(|plot| plot.function());
        let mut toolbar = div()
            .h(px(TOOLBAR_HEIGHT))
            .flex()
            .flex_row()
            .items_center()
            .gap_2()
            .px_2()
            .bg(rgb(0x1c1c1f));
        for function in PlotFunction::ALL {
            toolbar = toolbar.child(self.button(
                function.name(),
                selected == Some(function),
                cx,
                move |handle| {
                    if let Err(err) = handle.write(|plot| plot.select_function(function)) {
                        eprintln!("cannot plot {function}: {err}");
                    }
                },
            ));
        }
        toolbar = toolbar.child(self.button("home", false, cx, |handle| {
            handle.write(|plot| plot.go_home(Instant::now()));
        }));

        div()
            .size_full()
            .flex()
            .flex_col()
            .child(toolbar)
            .child(div().flex_1().child(self.view.clone()))
    }
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            // The plot fills the window below the toolbar. Building it for that
            // size keeps the first frame's grid cells square.
            let canvas = gpui_fnplot::CanvasSize::new(
                f64::from(WINDOW_WIDTH),
                f64::from(WINDOW_HEIGHT - TOOLBAR_HEIGHT),
            );
            let plot = Plot::builder()
                .theme(Theme::dark())
                .function(PlotFunction::Square)
                .build(canvas)
                .expect("valid initial plot");

            let config = PlotViewConfig {
                label_size: 13.0,
                ..Default::default()
            };

            let view = GpuiPlotView::with_config(plot, config);
            let handle = view.plot_handle();
            let view = cx.new(|_| view);
            cx.new(|_| FunctionDemo { view, handle })
        })
        .unwrap();
    });
}
