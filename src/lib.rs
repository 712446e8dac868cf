//! gpui_axesplot is an interactive multi-axis plotting library for GPUI.
//!
//! Every axis of a [`Plot`] can be dragged and zoomed on its own. Clicking an
//! axis backbone, a graph or a legend item selects it, and the selection
//! decides which axes the next drag or wheel gesture moves. Reactions to the
//! widget's notifications live in a [`PlotEventHandler`]; [`AxesInteraction`]
//! is the stock one used by the bundled demo.

#![forbid(unsafe_code)]

pub mod axis;
pub mod demo;
pub mod error;
pub mod events;
pub mod frame;
pub mod geom;
pub mod graph;
pub mod handlers;
pub mod interaction;
pub mod layout;
pub mod legend;
pub mod plot;
pub mod range;
pub mod render;
pub mod selection;
pub mod style;
pub mod telemetry;
pub mod transform;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{Axis, AxisPart, AxisParts, AxisTicker, AxisType};
pub use error::{PlotError, PlotResult};
pub use events::{
    ContextMenu, EditTarget, MenuAction, MenuEntry, PlotEvent, PromptRequest, Response,
    StatusMessage,
};
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use graph::{DataRange, Graph, GraphId, LineStyle, Pen, PenStyle, ScatterShape, ScatterStyle};
pub use handlers::{AxesInteraction, PlotEventHandler};
pub use interaction::{AxisSet, Gesture, resolve_gesture_axes};
pub use layout::{HitTarget, PlotLayout, TextMeasurer};
pub use legend::{Legend, LegendAlignment, LegendItem};
pub use plot::{Interactions, Plot, PlotBuilder, Title};
pub use range::Range;
pub use render::{Color, RenderCommand, RenderList};
pub use selection::synchronize_selection;
pub use style::Theme;
pub use transform::{AxisTransform, GraphTransform};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPlotView, PlotHandle, PlotViewConfig};
