#[cfg(feature = "gpui")]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(feature = "gpui")]
use gpui::{AppContext, Application, Bounds, TitlebarOptions, WindowBounds, WindowOptions, px, size};
#[cfg(feature = "gpui")]
use rand::SeedableRng;
#[cfg(feature = "gpui")]
use rand::rngs::StdRng;

#[cfg(feature = "gpui")]
use gpui_axesplot::{AxesInteraction, GpuiPlotView, demo::demo_plot, telemetry};

#[cfg(feature = "gpui")]
fn main() {
    if !telemetry::init_default_tracing() {
        eprintln!("tracing output disabled; build with the telemetry feature to enable it");
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let plot = match demo_plot(&mut StdRng::seed_from_u64(seed)) {
        Ok(plot) => plot,
        Err(err) => {
            eprintln!("failed to build the demo plot: {err}");
            return;
        }
    };

    Application::new().run(move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(1024.0), px(768.0)),
                cx,
            ))),
            titlebar: Some(TitlebarOptions {
                title: Some("Independent axes interaction".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            cx.new(|cx| GpuiPlotView::new(plot, AxesInteraction::from_time_seed(), cx))
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
