//! Selection synchronization and click selection.

use tracing::{debug, trace};

use crate::axis::{AxisPart, AxisParts, AxisType};
use crate::error::{PlotError, PlotResult};
use crate::graph::DataRange;
use crate::layout::HitTarget;
use crate::plot::Plot;

/// Normalize selection state after the user changed it.
///
/// Per axis, a selected backbone or tick-label band selects both; the
/// label keeps its own state. Per graph, a selected graph or legend item
/// selects both, and the graph selection widens to its full data range.
///
/// Graphs without a legend item are reported as
/// [`PlotError::MissingLegendItem`] before anything is written, so a failed
/// call leaves the plot untouched.
pub fn synchronize_selection(plot: &mut Plot) -> PlotResult<()> {
    if let Some(graph) = plot
        .graphs()
        .iter()
        .find(|graph| plot.legend().item_for(graph.id()).is_none())
    {
        return Err(PlotError::MissingLegendItem(graph.id()));
    }

    for kind in AxisType::ALL {
        let axis = plot.axis_mut(kind);
        let parts = axis.selected_parts();
        if parts.contains(AxisPart::Backbone) || parts.contains(AxisPart::TickLabels) {
            axis.set_selected_parts(parts | AxisParts::BACKBONE | AxisParts::TICK_LABELS);
        }
    }

    let (graphs, legend) = plot.graphs_and_legend_mut();
    for graph in graphs {
        let Some(item) = legend.item_for_mut(graph.id()) else {
            continue;
        };
        if item.is_selected() || graph.is_selected() {
            let full = graph.data_range();
            item.set_selected(true);
            graph.set_selection(Some(full));
        }
    }
    trace!("selection synchronized");
    Ok(())
}

/// Apply a single click on `target` to the selection.
///
/// Without `additive` every other selection is cleared first; with it the
/// clicked object is toggled. Returns whether anything changed.
pub fn apply_click_selection(plot: &mut Plot, target: HitTarget, additive: bool) -> bool {
    let before = SelectionSnapshot::capture(plot);
    let interactions = plot.interactions();

    if !additive {
        plot.deselect_all();
    }

    match target {
        HitTarget::Axis { axis, part } => {
            let axis = plot.axis_mut(axis);
            if interactions.select_axes && axis.selectable_parts().contains(part) {
                let mut parts = if additive {
                    axis.selected_parts()
                } else {
                    AxisParts::NONE
                };
                let on = !additive || !parts.contains(part);
                parts.set(part, on);
                axis.set_selected_parts(parts);
            }
        }
        HitTarget::LegendItem(graph) if interactions.select_legend => {
            if let Some(item) = plot.legend_mut().item_for_mut(graph) {
                let on = !additive || !item.is_selected();
                item.set_selected(on);
            }
        }
        HitTarget::Graph { graph, .. } if interactions.select_plottables => {
            if let Some(graph) = plot.graph_by_id_mut(graph) {
                let on = !additive || !graph.is_selected();
                let selection = on.then(|| graph.data_range());
                graph.set_selection(selection);
            }
        }
        _ => {}
    }

    let changed = SelectionSnapshot::capture(plot) != before;
    if changed {
        debug!(hit = ?target, additive, "selection changed by click");
    }
    changed
}

#[derive(Debug, PartialEq)]
struct SelectionSnapshot {
    axes: [AxisParts; 4],
    graphs: Vec<Option<DataRange>>,
    legend: Vec<bool>,
}

impl SelectionSnapshot {
    fn capture(plot: &Plot) -> Self {
        Self {
            axes: plot.axes().each_ref().map(|axis| axis.selected_parts()),
            graphs: plot.graphs().iter().map(|graph| graph.selection()).collect(),
            legend: plot
                .legend()
                .items()
                .iter()
                .map(|item| item.is_selected())
                .collect(),
        }
    }
}
