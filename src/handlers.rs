//! Reactions to plot widget notifications.
//!
//! [`AxesInteraction`] is the handler of the independent axes demo: it keeps
//! selections consistent, chooses the axes each gesture moves, opens the
//! context menu and prompts, and adds or removes random graphs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info};

use crate::axis::{AxisPart, AxisType};
use crate::events::{
    ContextMenu, EditTarget, MenuAction, MenuEntry, PlotEvent, PromptRequest, Response,
    StatusMessage,
};
use crate::geom::ScreenPoint;
use crate::graph::{Graph, GraphId, LineStyle, Pen, ScatterShape, ScatterStyle};
use crate::interaction::{Gesture, prepare_gesture};
use crate::legend::LegendAlignment;
use crate::plot::Plot;
use crate::render::Color;
use crate::selection::synchronize_selection;

/// Points in a random graph.
pub const RANDOM_GRAPH_POINTS: usize = 50;

/// Default lifetime of a status message.
pub const STATUS_DURATION: Duration = Duration::from_millis(2500);

/// Scatter marker size used for random graphs.
const RANDOM_SCATTER_SIZE: f32 = 6.0;

/// Receives every notification the plot widget emits.
pub trait PlotEventHandler {
    /// React to `event`, possibly mutating `plot`.
    fn handle(&mut self, plot: &mut Plot, event: &PlotEvent) -> Response;
}

/// Handler implementing the independent axes interaction.
#[derive(Debug)]
pub struct AxesInteraction<R = StdRng> {
    rng: R,
    status_duration: Duration,
}

impl AxesInteraction<StdRng> {
    /// Handler with a random source seeded from the wall clock.
    pub fn from_time_seed() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AxesInteraction<R> {
    /// Handler drawing randomness from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            status_duration: STATUS_DURATION,
        }
    }

    /// Change how long status messages stay visible.
    pub fn with_status_duration(mut self, duration: Duration) -> Self {
        self.status_duration = duration;
        self
    }

    /// Append a random graph on the primary axes.
    pub fn add_random_graph(&mut self, plot: &mut Plot) -> GraphId {
        add_random_graph(plot, &mut self.rng)
    }

    fn selection_changed(&mut self, plot: &mut Plot) -> Response {
        match synchronize_selection(plot) {
            Ok(()) => Response::replot(),
            Err(err) => {
                error!(%err, "selection synchronization failed");
                Response::none()
            }
        }
    }

    fn menu_action(&mut self, plot: &mut Plot, action: MenuAction) -> Response {
        match action {
            MenuAction::MoveLegend(alignment) => {
                plot.legend_mut().set_alignment(alignment);
                debug!(?alignment, "legend moved");
            }
            MenuAction::AddRandomGraph => {
                self.add_random_graph(plot);
            }
            MenuAction::RemoveSelectedGraph => {
                if remove_selected_graph(plot).is_none() {
                    return Response::none();
                }
            }
            MenuAction::RemoveAllGraphs => {
                remove_all_graphs(plot);
            }
        }
        Response::replot()
    }

    fn graph_clicked(&self, plot: &Plot, graph: GraphId, index: usize) -> Response {
        let Some(text) = plot
            .graph_by_id(graph)
            .and_then(|graph| graph_click_message(graph, index))
        else {
            debug!(%graph, index, "clicked graph or data point no longer exists");
            return Response::none();
        };
        Response::status(StatusMessage {
            text,
            duration: self.status_duration,
        })
    }
}

impl<R: Rng> PlotEventHandler for AxesInteraction<R> {
    fn handle(&mut self, plot: &mut Plot, event: &PlotEvent) -> Response {
        match event {
            PlotEvent::SelectionChangedByUser => self.selection_changed(plot),
            PlotEvent::MousePress { .. } => {
                prepare_gesture(plot, Gesture::Drag);
                Response::none()
            }
            PlotEvent::MouseWheel { .. } => {
                prepare_gesture(plot, Gesture::Zoom);
                Response::none()
            }
            PlotEvent::AxisDoubleClick { axis, part } => axis_label_prompt(plot, *axis, *part)
                .map_or_else(Response::none, Response::prompt),
            PlotEvent::LegendDoubleClick { item } => item
                .and_then(|graph| graph_name_prompt(plot, graph))
                .map_or_else(Response::none, Response::prompt),
            PlotEvent::TitleDoubleClick => Response::prompt(title_prompt(plot)),
            PlotEvent::PlottableClick { graph, index } => self.graph_clicked(plot, *graph, *index),
            PlotEvent::ContextMenuRequested {
                position,
                over_legend,
            } => Response::menu(context_menu(plot, *position, *over_legend)),
            PlotEvent::MenuActionTriggered(action) => self.menu_action(plot, *action),
            PlotEvent::PromptFinished { request, text } => match text {
                Some(text) => {
                    if apply_prompt(plot, request.target, text) {
                        Response::replot()
                    } else {
                        Response::none()
                    }
                }
                None => {
                    debug!(edit = ?request.target, "prompt cancelled");
                    Response::none()
                }
            },
        }
    }
}

/// Build a 50 point graph with random shape and styling and append it.
///
/// The graph is named `New graph <n>` where `n` is its index.
pub fn add_random_graph(plot: &mut Plot, rng: &mut impl Rng) -> GraphId {
    let (keys, values) = random_graph_data(rng, RANDOM_GRAPH_POINTS);
    let line_style = LineStyle::DRAWN[rng.gen_range(0..LineStyle::DRAWN.len())];
    let scatter = (rng.gen_range(0..100) > 50).then(|| {
        let shape = ScatterShape::ALL[rng.gen_range(0..ScatterShape::ALL.len())];
        ScatterStyle::new(shape, RANDOM_SCATTER_SIZE)
    });
    let color = Color::rgb8(
        rng.gen_range(10..255),
        rng.gen_range(10..255),
        rng.gen_range(10..255),
    );
    let width = rng.gen_range(1.0..3.0);

    let name = format!("New graph {}", plot.graph_count());
    let graph = plot.add_default_graph();
    graph.set_name(name);
    // keys and values come out of the same loop
    if let Err(err) = graph.set_data(&keys, &values) {
        error!(%err, "random graph data rejected");
    }
    graph.set_line_style(line_style);
    graph.set_scatter(scatter);
    graph.set_pen(Pen::new(color).with_width(width));
    info!(graph = %graph.id(), name = graph.name(), "random graph added");
    graph.id()
}

/// Keys and values of a randomly shaped wave with random scale and offset.
pub fn random_graph_data(rng: &mut impl Rng, count: usize) -> (Vec<f64>, Vec<f64>) {
    let mut unit = || rng.gen_range(0.0_f64..1.0);
    let x_scale = (unit() + 0.5) * 2.0;
    let y_scale = (unit() + 0.5) * 2.0;
    let x_offset = (unit() - 0.5) * 4.0;
    let y_offset = (unit() - 0.5) * 10.0;
    let r1 = (unit() - 0.5) * 2.0;
    let r2 = (unit() - 0.5) * 2.0;
    let r3 = (unit() - 0.5) * 2.0;
    let r4 = (unit() - 0.5) * 2.0;

    let keys: Vec<f64> = (0..count)
        .map(|i| (i as f64 / count as f64 - 0.5) * 10.0 * x_scale + x_offset)
        .collect();
    let values = keys
        .iter()
        .map(|x| {
            let wave = (x * r1 * 5.0).sin() * ((x * r2).cos() * r4 * 3.0).sin()
                + r3 * (x.sin() * r4 * 2.0).cos();
            wave * y_scale + y_offset
        })
        .collect();
    (keys, values)
}

/// Remove the first graph that has a selection.
pub fn remove_selected_graph(plot: &mut Plot) -> Option<GraphId> {
    let Some(id) = plot.selected_graphs().first().copied() else {
        debug!("no selected graph to remove");
        return None;
    };
    match plot.remove_graph(id) {
        Ok(()) => Some(id),
        Err(err) => {
            error!(%err, "failed to remove selected graph");
            None
        }
    }
}

/// Remove every graph together with its legend item.
pub fn remove_all_graphs(plot: &mut Plot) -> usize {
    plot.clear_graphs()
}

/// Context menu for a right-click at `position`.
pub fn context_menu(plot: &Plot, position: ScreenPoint, over_legend: bool) -> ContextMenu {
    let entries = if over_legend {
        LegendAlignment::MENU
            .into_iter()
            .map(|alignment| {
                MenuEntry::new(alignment.menu_label(), MenuAction::MoveLegend(alignment))
            })
            .collect()
    } else {
        let mut entries = vec![MenuEntry::new(
            "Add random graph",
            MenuAction::AddRandomGraph,
        )];
        if !plot.selected_graphs().is_empty() {
            entries.push(MenuEntry::new(
                "Remove selected graph",
                MenuAction::RemoveSelectedGraph,
            ));
        }
        if plot.graph_count() > 0 {
            entries.push(MenuEntry::new("Remove all graphs", MenuAction::RemoveAllGraphs));
        }
        entries
    };
    ContextMenu { position, entries }
}

/// Status text for a click on data point `index` of `graph`.
pub fn graph_click_message(graph: &Graph, index: usize) -> Option<String> {
    let value = graph.main_value(index)?;
    Some(format!(
        "Clicked on graph '{}' at data point #{index} with value {value}.",
        graph.name()
    ))
}

fn title_prompt(plot: &Plot) -> PromptRequest {
    PromptRequest {
        target: EditTarget::Title,
        label: "New plot title:".to_string(),
        initial: plot
            .title()
            .map(|title| title.text.clone())
            .unwrap_or_default(),
    }
}

fn axis_label_prompt(plot: &Plot, axis: AxisType, part: AxisPart) -> Option<PromptRequest> {
    if part != AxisPart::Label {
        return None;
    }
    Some(PromptRequest {
        target: EditTarget::AxisLabel(axis),
        label: "New axis label:".to_string(),
        initial: plot.axis(axis).label().to_string(),
    })
}

fn graph_name_prompt(plot: &Plot, graph: GraphId) -> Option<PromptRequest> {
    let Some(graph) = plot.graph_by_id(graph) else {
        debug!(%graph, "legend item without graph");
        return None;
    };
    Some(PromptRequest {
        target: EditTarget::GraphName(graph.id()),
        label: "New graph name:".to_string(),
        initial: graph.name().to_string(),
    })
}

/// Apply confirmed prompt text; returns whether anything changed.
fn apply_prompt(plot: &mut Plot, target: EditTarget, text: &str) -> bool {
    match target {
        EditTarget::Title => plot.set_title_text(text),
        EditTarget::AxisLabel(axis) => plot.axis_mut(axis).set_label(text),
        EditTarget::GraphName(id) => match plot.graph_by_id_mut(id) {
            Some(graph) => graph.set_name(text),
            None => {
                debug!(graph = %id, "renamed graph no longer exists");
                return false;
            }
        },
    }
    debug!(edit = ?target, text, "prompt applied");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisParts;
    use crate::graph::DataRange;

    fn handler() -> AxesInteraction<StdRng> {
        AxesInteraction::new(StdRng::seed_from_u64(7))
    }

    fn plot_with_graphs(count: usize) -> (Plot, AxesInteraction<StdRng>) {
        let mut plot = Plot::new();
        let mut handler = handler();
        for _ in 0..count {
            handler.add_random_graph(&mut plot);
        }
        (plot, handler)
    }

    #[test]
    fn random_graph_has_fifty_points_and_index_name() {
        let (plot, _) = plot_with_graphs(3);
        let graph = plot.graph(2).unwrap();
        assert_eq!(graph.data().len(), RANDOM_GRAPH_POINTS);
        assert_eq!(graph.name(), "New graph 2");
        assert_eq!(graph.key_axis(), AxisType::Bottom);
        assert_eq!(graph.value_axis(), AxisType::Left);
        assert_ne!(graph.line_style(), LineStyle::None);
        assert!((1.0..3.0).contains(&graph.pen().width));
    }

    #[test]
    fn random_keys_are_increasing() {
        let mut rng = StdRng::seed_from_u64(1);
        let (keys, values) = random_graph_data(&mut rng, 50);
        assert_eq!(values.len(), 50);
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn remove_selected_without_selection_is_noop() {
        let (mut plot, mut handler) = plot_with_graphs(2);
        let response = handler.handle(
            &mut plot,
            &PlotEvent::MenuActionTriggered(MenuAction::RemoveSelectedGraph),
        );
        assert_eq!(plot.graph_count(), 2);
        assert!(!response.replot);
    }

    #[test]
    fn remove_selected_takes_first_selected() {
        let (mut plot, mut handler) = plot_with_graphs(3);
        let second = plot.graph(1).unwrap().id();
        let third = plot.graph(2).unwrap().id();
        for id in [second, third] {
            plot.graph_by_id_mut(id)
                .unwrap()
                .set_selection(Some(DataRange::new(0, 1)));
        }
        handler.handle(
            &mut plot,
            &PlotEvent::MenuActionTriggered(MenuAction::RemoveSelectedGraph),
        );
        assert!(plot.graph_by_id(second).is_none());
        assert!(plot.graph_by_id(third).is_some());
        assert!(plot.legend().item_for(second).is_none());
    }

    #[test]
    fn remove_all_then_add_restarts_naming() {
        let (mut plot, mut handler) = plot_with_graphs(4);
        handler.handle(
            &mut plot,
            &PlotEvent::MenuActionTriggered(MenuAction::RemoveAllGraphs),
        );
        assert_eq!(plot.graph_count(), 0);
        assert!(plot.legend().items().is_empty());
        handler.handle(
            &mut plot,
            &PlotEvent::MenuActionTriggered(MenuAction::AddRandomGraph),
        );
        assert_eq!(plot.graph_count(), 1);
        assert_eq!(plot.graph(0).unwrap().name(), "New graph 0");
    }

    #[test]
    fn rename_cancel_keeps_name() {
        let (mut plot, mut handler) = plot_with_graphs(1);
        let id = plot.graph(0).unwrap().id();
        let response = handler.handle(
            &mut plot,
            &PlotEvent::LegendDoubleClick { item: Some(id) },
        );
        let request = response.prompt.unwrap();
        assert_eq!(request.label, "New graph name:");
        assert_eq!(request.initial, "New graph 0");

        handler.handle(
            &mut plot,
            &PlotEvent::PromptFinished {
                request: request.clone(),
                text: None,
            },
        );
        assert_eq!(plot.graph(0).unwrap().name(), "New graph 0");

        let response = handler.handle(
            &mut plot,
            &PlotEvent::PromptFinished {
                request,
                text: Some("Renamed".to_string()),
            },
        );
        assert!(response.replot);
        assert_eq!(plot.graph(0).unwrap().name(), "Renamed");
    }

    #[test]
    fn legend_padding_double_click_is_ignored() {
        let (mut plot, mut handler) = plot_with_graphs(1);
        let response = handler.handle(&mut plot, &PlotEvent::LegendDoubleClick { item: None });
        assert_eq!(response, Response::none());
    }

    #[test]
    fn only_axis_label_double_click_prompts() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Top).set_label("Top");
        let mut handler = handler();
        let backbone = handler.handle(
            &mut plot,
            &PlotEvent::AxisDoubleClick {
                axis: AxisType::Top,
                part: AxisPart::Backbone,
            },
        );
        assert!(backbone.prompt.is_none());
        let label = handler.handle(
            &mut plot,
            &PlotEvent::AxisDoubleClick {
                axis: AxisType::Top,
                part: AxisPart::Label,
            },
        );
        let request = label.prompt.unwrap();
        assert_eq!(request.target, EditTarget::AxisLabel(AxisType::Top));
        assert_eq!(request.initial, "Top");
    }

    #[test]
    fn title_prompt_edits_title() {
        let mut plot = Plot::new();
        plot.set_title_text("Old");
        let mut handler = handler();
        let request = handler
            .handle(&mut plot, &PlotEvent::TitleDoubleClick)
            .prompt
            .unwrap();
        assert_eq!(request.label, "New plot title:");
        handler.handle(
            &mut plot,
            &PlotEvent::PromptFinished {
                request,
                text: Some(String::new()),
            },
        );
        assert_eq!(plot.title().unwrap().text, "");
    }

    #[test]
    fn menu_over_legend_lists_placements() {
        let (plot, _) = plot_with_graphs(1);
        let menu = context_menu(&plot, ScreenPoint::new(3.0, 4.0), true);
        let labels: Vec<_> = menu.entries.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Move to top left",
                "Move to top center",
                "Move to top right",
                "Move to bottom right",
                "Move to bottom left"
            ]
        );
    }

    #[test]
    fn menu_entries_depend_on_graphs() {
        let empty = Plot::new();
        let menu = context_menu(&empty, ScreenPoint::default(), false);
        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].action, MenuAction::AddRandomGraph);

        let (mut plot, _) = plot_with_graphs(2);
        let menu = context_menu(&plot, ScreenPoint::default(), false);
        assert_eq!(menu.entries.len(), 2);
        assert_eq!(menu.entries[1].action, MenuAction::RemoveAllGraphs);

        plot.graph_mut(0)
            .unwrap()
            .set_selection(Some(DataRange::new(0, 50)));
        let menu = context_menu(&plot, ScreenPoint::default(), false);
        let actions: Vec<_> = menu.entries.iter().map(|entry| entry.action).collect();
        assert_eq!(
            actions,
            [
                MenuAction::AddRandomGraph,
                MenuAction::RemoveSelectedGraph,
                MenuAction::RemoveAllGraphs
            ]
        );
    }

    #[test]
    fn legend_move_action() {
        let mut plot = Plot::new();
        let mut handler = handler();
        let response = handler.handle(
            &mut plot,
            &PlotEvent::MenuActionTriggered(MenuAction::MoveLegend(LegendAlignment::TopCenter)),
        );
        assert!(response.replot);
        assert_eq!(plot.legend().alignment(), LegendAlignment::TopCenter);
    }

    #[test]
    fn graph_click_reports_value() {
        let mut plot = Plot::new();
        let graph = plot.add_default_graph();
        graph.set_name("g");
        graph.set_data(&[0.0, 1.0], &[2.5, -1.0]).unwrap();
        let id = graph.id();
        let response = handler().handle(&mut plot, &PlotEvent::PlottableClick { graph: id, index: 1 });
        let status = response.status.unwrap();
        assert_eq!(status.text, "Clicked on graph 'g' at data point #1 with value -1.");
        assert_eq!(status.duration, STATUS_DURATION);

        let mut quick = handler().with_status_duration(Duration::from_millis(300));
        let status = quick
            .handle(&mut plot, &PlotEvent::PlottableClick { graph: id, index: 0 })
            .status
            .unwrap();
        assert_eq!(status.duration, Duration::from_millis(300));
        assert!(status.text.ends_with("with value 2.5."));
    }

    #[test]
    fn press_and_wheel_bind_resolved_axes() {
        let (mut plot, mut handler) = plot_with_graphs(1);
        plot.axis_mut(AxisType::Right)
            .set_selected_parts(AxisParts::BACKBONE);
        handler.handle(
            &mut plot,
            &PlotEvent::MouseWheel {
                position: ScreenPoint::default(),
                delta: 120.0,
            },
        );
        assert_eq!(plot.range_zoom_axes(), [AxisType::Right]);
        assert_eq!(plot.range_drag_axes(), [AxisType::Bottom, AxisType::Left]);
        handler.handle(
            &mut plot,
            &PlotEvent::MousePress {
                position: ScreenPoint::default(),
            },
        );
        assert_eq!(plot.range_drag_axes(), [AxisType::Right]);
    }

    #[test]
    fn selection_change_synchronizes() {
        let (mut plot, mut handler) = plot_with_graphs(1);
        let id = plot.graph(0).unwrap().id();
        plot.legend_mut().item_for_mut(id).unwrap().set_selected(true);
        plot.axis_mut(AxisType::Left)
            .set_selected_parts(AxisParts::TICK_LABELS);
        let response = handler.handle(&mut plot, &PlotEvent::SelectionChangedByUser);
        assert!(response.replot);
        assert!(plot.graph(0).unwrap().is_selected());
        assert!(plot.axis(AxisType::Left).is_selected(AxisPart::Backbone));
    }
}
