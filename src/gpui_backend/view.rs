use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use gpui::prelude::*;
use gpui::{
    AnyElement, App, AsyncWindowContext, FocusHandle, Focusable, KeyDownEvent, MouseButton,
    MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent, Timer, Window,
    canvas, div, px,
};
use tracing::trace;

use crate::events::{ContextMenu, MenuAction, PlotEvent, Response};
use crate::geom::ScreenPoint;
use crate::handlers::PlotEventHandler;
use crate::interaction::{AxisSet, pan_axes, wheel_zoom_factor, zoom_axes};
use crate::layout::HitTarget;
use crate::plot::Plot;
use crate::selection::apply_click_selection;
use crate::style::Theme;

use super::config::PlotViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::{DragState, PendingClick, PlotUiState, PromptState, StatusState};

/// A GPUI view that renders a [`Plot`] and forwards user actions to a
/// [`PlotEventHandler`].
///
/// Dragging pans the plot's drag axes and the wheel zooms its zoom axes;
/// the handler decides which axes those are when the gesture starts.
/// Context menus, text prompts and status messages requested by the
/// handler are drawn as overlays on top of the plot.
pub struct GpuiPlotView {
    plot: Arc<RwLock<Plot>>,
    state: Arc<RwLock<PlotUiState>>,
    config: PlotViewConfig,
    handler: Box<dyn PlotEventHandler>,
    focus_handle: FocusHandle,
}

impl GpuiPlotView {
    /// Create a view with the default [`PlotViewConfig`].
    pub fn new(
        plot: Plot,
        handler: impl PlotEventHandler + 'static,
        cx: &mut Context<Self>,
    ) -> Self {
        Self::with_config(plot, handler, PlotViewConfig::default(), cx)
    }

    /// Create a view with a custom configuration.
    pub fn with_config(
        plot: Plot,
        handler: impl PlotEventHandler + 'static,
        config: PlotViewConfig,
        cx: &mut Context<Self>,
    ) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            state: Arc::new(RwLock::new(PlotUiState::default())),
            config,
            handler: Box::new(handler),
            focus_handle: cx.focus_handle(),
        }
    }

    /// Get a handle for reading or mutating the underlying plot.
    pub fn plot_handle(&self) -> PlotHandle {
        PlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    fn dispatch(&mut self, event: PlotEvent) -> Response {
        let mut plot = self.plot.write().expect("plot lock");
        self.handler.handle(&mut plot, &event)
    }

    fn apply_response(&mut self, response: Response, window: &mut Window, cx: &mut Context<Self>) {
        let mut changed = response.replot;
        let mut status_duration = None;
        {
            let mut state = self.state.write().expect("plot state lock");
            if let Some(menu) = response.menu {
                state.menu = Some(menu);
                changed = true;
            }
            if let Some(request) = response.prompt {
                state.clear_interaction();
                state.menu = None;
                state.prompt = Some(PromptState::new(request));
                changed = true;
            }
            if let Some(status) = response.status {
                status_duration = Some(status.duration);
                state.status = Some(StatusState::new(status, Instant::now()));
                changed = true;
            }
        }
        if let Some(duration) = status_duration {
            self.schedule_refresh(duration, window, cx);
        }
        if changed {
            cx.notify();
        }
    }

    /// Repaint once `delay` has passed so an expired status disappears.
    fn schedule_refresh(&self, delay: Duration, window: &mut Window, cx: &mut Context<Self>) {
        let entity = cx.entity();
        window
            .spawn(cx, move |cx: &mut AsyncWindowContext| {
                let mut cx = cx.clone();
                async move {
                    Timer::after(delay + Duration::from_millis(16)).await;
                    cx.update(|_, cx| {
                        entity.update(cx, |_view, view_cx| view_cx.notify());
                    })
                    .ok();
                }
            })
            .detach();
    }

    fn on_left_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let pos = screen_point(ev.position);
        let target = {
            let mut state = self.state.write().expect("plot state lock");
            if state.prompt.is_some() {
                return;
            }
            if state.menu.take().is_some() {
                cx.notify();
                return;
            }
            let plot = self.plot.read().expect("plot lock");
            state.hit_test(&plot, pos, self.config.graph_hit_threshold_px)
        };

        if ev.click_count >= 2 {
            if let Some(event) = double_click_event(target) {
                self.state
                    .write()
                    .expect("plot state lock")
                    .clear_interaction();
                let response = self.dispatch(event);
                self.apply_response(response, window, cx);
                return;
            }
        }

        let response = self.dispatch(PlotEvent::MousePress { position: pos });
        {
            let plot = self.plot.read().expect("plot lock");
            let mut state = self.state.write().expect("plot state lock");
            state.drag = (plot.interactions().range_drag && starts_gesture(target))
                .then(|| DragState::new(pos, plot.range_drag_axes().iter().copied().collect()));
            state.pending_click = Some(PendingClick {
                target,
                additive: ev.modifiers.control || ev.modifiers.platform,
            });
        }
        self.apply_response(response, window, cx);
        cx.notify();
    }

    fn on_right_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let target = {
            let mut state = self.state.write().expect("plot state lock");
            if state.prompt.is_some() {
                return;
            }
            state.menu = None;
            state.clear_interaction();
            let plot = self.plot.read().expect("plot lock");
            state.hit_test(&plot, pos, self.config.graph_hit_threshold_px)
        };
        if target == HitTarget::Outside {
            cx.notify();
            return;
        }
        let response = self.dispatch(PlotEvent::MousePress { position: pos });
        self.apply_response(response, window, cx);
        let response = self.dispatch(PlotEvent::ContextMenuRequested {
            position: pos,
            over_legend: target.is_legend(),
        });
        self.apply_response(response, window, cx);
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = self.state.write().expect("plot state lock");
        let Some(mut drag) = state.drag.clone() else {
            return;
        };

        if !drag.active && drag.start.distance_sq(pos) > self.config.drag_threshold_px.powi(2) {
            drag.active = true;
            state.pending_click = None;
            trace!(axes = ?drag.axes, "drag started");
        }
        if !drag.active {
            return;
        }

        if let Some(axis_rect) = state.layout.as_ref().map(|layout| layout.axis_rect) {
            let mut plot = self.plot.write().expect("plot lock");
            pan_axes(&mut plot, &drag.axes, axis_rect, drag.last, pos);
        }
        drag.last = pos;
        state.drag = Some(drag);
        cx.notify();
    }

    fn on_left_up(&mut self, ev: &MouseUpEvent, window: &mut Window, cx: &mut Context<Self>) {
        let (drag, click) = {
            let mut state = self.state.write().expect("plot state lock");
            (state.drag.take(), state.pending_click.take())
        };
        let was_drag = drag.is_some_and(|drag| drag.active);
        let Some(click) = click.filter(|_| !was_drag && ev.click_count <= 1) else {
            if was_drag {
                cx.notify();
            }
            return;
        };

        let changed = {
            let mut plot = self.plot.write().expect("plot lock");
            apply_click_selection(&mut plot, click.target, click.additive)
        };
        if changed {
            let response = self.dispatch(PlotEvent::SelectionChangedByUser);
            self.apply_response(response, window, cx);
        }
        if let HitTarget::Graph { graph, index } = click.target {
            let response = self.dispatch(PlotEvent::PlottableClick { graph, index });
            self.apply_response(response, window, cx);
        }
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, window: &mut Window, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let delta = f32::from(ev.delta.pixel_delta(px(16.0)).y);
        if delta.abs() < 0.01 {
            return;
        }
        let (target, axis_rect) = {
            let state = self.state.read().expect("plot state lock");
            if state.prompt.is_some() || state.menu.is_some() {
                return;
            }
            let plot = self.plot.read().expect("plot lock");
            (
                state.hit_test(&plot, pos, self.config.graph_hit_threshold_px),
                state.layout.as_ref().map(|layout| layout.axis_rect),
            )
        };
        let (Some(axis_rect), true) = (axis_rect, starts_gesture(target)) else {
            return;
        };

        let response = self.dispatch(PlotEvent::MouseWheel {
            position: pos,
            delta,
        });
        {
            let mut plot = self.plot.write().expect("plot lock");
            if plot.interactions().range_zoom {
                let axes: AxisSet = plot.range_zoom_axes().iter().copied().collect();
                let factor = wheel_zoom_factor(self.config.zoom_factor, delta);
                zoom_axes(&mut plot, &axes, axis_rect, pos, factor);
            }
        }
        self.apply_response(response, window, cx);
        cx.notify();
    }

    fn on_key_down(&mut self, ev: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let key = ev.keystroke.key.as_str();
        let has_prompt = {
            let mut state = self.state.write().expect("plot state lock");
            if state.prompt.is_none() {
                if key == "escape" && state.menu.take().is_some() {
                    cx.notify();
                }
                return;
            }
            match key {
                "enter" | "escape" => true,
                "backspace" => {
                    if let Some(prompt) = state.prompt.as_mut() {
                        prompt.backspace();
                    }
                    false
                }
                _ => {
                    if let (Some(prompt), Some(text)) =
                        (state.prompt.as_mut(), ev.keystroke.key_char.as_deref())
                    {
                        prompt.insert(text);
                    }
                    false
                }
            }
        };
        cx.stop_propagation();
        if has_prompt {
            self.finish_prompt(key == "enter", window, cx);
        } else {
            cx.notify();
        }
    }

    fn finish_prompt(&mut self, accepted: bool, window: &mut Window, cx: &mut Context<Self>) {
        let Some(prompt) = self.state.write().expect("plot state lock").prompt.take() else {
            return;
        };
        let PromptState { request, text } = prompt;
        let response = self.dispatch(PlotEvent::PromptFinished {
            request,
            text: accepted.then_some(text),
        });
        self.apply_response(response, window, cx);
        cx.notify();
    }

    fn choose_menu_action(&mut self, action: MenuAction, window: &mut Window, cx: &mut Context<Self>) {
        self.state.write().expect("plot state lock").menu = None;
        let response = self.dispatch(PlotEvent::MenuActionTriggered(action));
        self.apply_response(response, window, cx);
        cx.notify();
    }

    fn render_menu(&self, menu: &ContextMenu, origin: ScreenPoint, theme: &Theme, cx: &mut Context<Self>) -> AnyElement {
        let accent = to_hsla(theme.overlay_accent);
        let entries = menu.entries.iter().map(|entry| {
            let action = entry.action;
            div()
                .px_3()
                .py_1()
                .cursor_pointer()
                .hover(move |style| style.bg(accent))
                .child(entry.label.clone())
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, _ev, window, cx| {
                        cx.stop_propagation();
                        this.choose_menu_action(action, window, cx);
                    }),
                )
        });
        div()
            .absolute()
            .left(px(menu.position.x - origin.x))
            .top(px(menu.position.y - origin.y))
            .flex()
            .flex_col()
            .py_1()
            .min_w(px(180.0))
            .bg(to_hsla(theme.overlay))
            .border_1()
            .border_color(to_hsla(theme.legend_border))
            .rounded_md()
            .text_size(px(12.0))
            .text_color(to_hsla(theme.text))
            .children(entries)
            .into_any_element()
    }

    fn render_prompt(&self, prompt: &PromptState, theme: &Theme, cx: &mut Context<Self>) -> AnyElement {
        let button = |label: &'static str, accepted: bool, cx: &mut Context<Self>| {
            div()
                .px_3()
                .py_1()
                .border_1()
                .border_color(to_hsla(theme.legend_border))
                .rounded_md()
                .cursor_pointer()
                .child(label)
                .on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, _ev, window, cx| {
                        cx.stop_propagation();
                        this.finish_prompt(accepted, window, cx);
                    }),
                )
        };
        let ok = button("OK", true, cx);
        let cancel = button("Cancel", false, cx);

        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(to_hsla(theme.background.with_alpha(0.4)))
            .on_mouse_down(MouseButton::Left, |_ev, _window, cx| cx.stop_propagation())
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .p_3()
                    .min_w(px(280.0))
                    .bg(to_hsla(theme.overlay))
                    .border_1()
                    .border_color(to_hsla(theme.legend_border))
                    .rounded_md()
                    .text_size(px(13.0))
                    .text_color(to_hsla(theme.text))
                    .child(prompt.request.label.clone())
                    .child(
                        div()
                            .px_2()
                            .py_1()
                            .border_1()
                            .border_color(to_hsla(theme.selection))
                            .child(format!("{}|", prompt.text)),
                    )
                    .child(div().flex().justify_end().gap_2().child(cancel).child(ok)),
            )
            .into_any_element()
    }
}

impl Focusable for GpuiPlotView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for GpuiPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let state = Arc::clone(&self.state);
        let theme = plot.read().expect("plot lock").theme().clone();

        let overlays: Vec<AnyElement> = {
            let ui = self.state.read().expect("plot state lock");
            let origin = ui
                .layout
                .as_ref()
                .map_or(ScreenPoint::new(0.0, 0.0), |layout| layout.bounds.min);
            let mut overlays = Vec::new();
            if let Some(menu) = ui.menu.as_ref() {
                overlays.push(self.render_menu(menu, origin, &theme, cx));
            }
            if self.config.show_status_bar {
                if let Some(text) = ui.active_status(Instant::now()) {
                    overlays.push(
                        div()
                            .absolute()
                            .bottom_0()
                            .left_0()
                            .right_0()
                            .px_2()
                            .py_1()
                            .bg(to_hsla(theme.overlay))
                            .text_size(px(12.0))
                            .text_color(to_hsla(theme.text))
                            .child(text.to_string())
                            .into_any_element(),
                    );
                }
            }
            if let Some(prompt) = ui.prompt.as_ref() {
                overlays.push(self.render_prompt(prompt, &theme, cx));
            }
            overlays
        };

        div()
            .track_focus(&self.focus_handle)
            .size_full()
            .relative()
            .bg(to_hsla(theme.background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let plot = plot.read().expect("plot lock");
                        let mut state = state.write().expect("plot state lock");
                        build_frame(&plot, &mut state, bounds, window)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .children(overlays)
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_left_down(ev, window, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    this.on_right_down(ev, window, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_left_up(ev, window, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, window, cx| {
                this.on_scroll(ev, window, cx);
            }))
            .on_key_down(cx.listener(|this, ev, window, cx| {
                this.on_key_down(ev, window, cx);
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

fn double_click_event(target: HitTarget) -> Option<PlotEvent> {
    match target {
        HitTarget::Title => Some(PlotEvent::TitleDoubleClick),
        HitTarget::LegendItem(graph) => Some(PlotEvent::LegendDoubleClick { item: Some(graph) }),
        HitTarget::Legend => Some(PlotEvent::LegendDoubleClick { item: None }),
        HitTarget::Axis { axis, part } => Some(PlotEvent::AxisDoubleClick { axis, part }),
        _ => None,
    }
}

/// Presses and wheel turns over these targets move axis ranges.
fn starts_gesture(target: HitTarget) -> bool {
    matches!(
        target,
        HitTarget::PlotArea | HitTarget::Graph { .. } | HitTarget::Axis { .. }
    )
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}
