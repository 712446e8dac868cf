use gpui::{Bounds, Pixels, Window};

use crate::frame::build_frame as build_render_list;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::layout::PlotLayout;
use crate::plot::Plot;
use crate::render::RenderList;

use super::state::PlotUiState;
use super::text::GpuiTextMeasurer;

#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
}

/// Lay the plot out inside `bounds` and record the layout for hit testing.
pub(crate) fn build_frame(
    plot: &Plot,
    state: &mut PlotUiState,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> PlotFrame {
    let measurer = GpuiTextMeasurer::new(window);
    let origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    let rect = ScreenRect::from_origin_size(
        origin,
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    );
    state.layout = PlotLayout::compute(plot, rect, &measurer);
    let render = state
        .layout
        .as_ref()
        .map(|layout| build_render_list(plot, layout, &measurer))
        .unwrap_or_default();
    PlotFrame { render }
}
