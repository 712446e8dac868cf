//! GPUI integration for gpui_axesplot.
//!
//! This module provides a GPUI view that renders a [`Plot`](crate::plot::Plot),
//! turns mouse and keyboard input into [`PlotEvent`](crate::events::PlotEvent)s
//! for a [`PlotEventHandler`](crate::handlers::PlotEventHandler), and draws the
//! context menus, prompts and status messages the handler asks for.

#![allow(clippy::collapsible_if)]

mod config;
mod frame;
mod paint;
mod state;
mod text;
mod view;

pub use config::PlotViewConfig;
pub use view::{GpuiPlotView, PlotHandle};
