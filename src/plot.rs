//! Plot container and builder.

use smallvec::smallvec;
use tracing::debug;

use crate::axis::{Axis, AxisParts, AxisType};
use crate::error::{PlotError, PlotResult};
use crate::graph::{Graph, GraphId};
use crate::interaction::AxisSet;
use crate::legend::Legend;
use crate::style::Theme;

/// Which user interactions the widget honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interactions {
    /// Dragging pans the drag axes.
    pub range_drag: bool,
    /// The wheel zooms the zoom axes.
    pub range_zoom: bool,
    /// Clicks select axis parts.
    pub select_axes: bool,
    /// Clicks select legend items.
    pub select_legend: bool,
    /// Clicks select graphs.
    pub select_plottables: bool,
}

impl Interactions {
    /// Every interaction enabled.
    pub fn all() -> Self {
        Self {
            range_drag: true,
            range_zoom: true,
            select_axes: true,
            select_legend: true,
            select_plottables: true,
        }
    }
}

/// Title text shown in a row above the axis rect.
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    /// Title text.
    pub text: String,
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl Title {
    /// Create a bold title.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
            bold: true,
        }
    }
}

/// Plot model: four axes, graphs with their legend items, and a title.
#[derive(Debug, Clone)]
pub struct Plot {
    theme: Theme,
    title: Option<Title>,
    axes: [Axis; 4],
    graphs: Vec<Graph>,
    legend: Legend,
    interactions: Interactions,
    drag_axes: AxisSet,
    zoom_axes: AxisSet,
}

impl Plot {
    /// Create a plot with default configuration.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            title: None,
            axes: AxisType::ALL.map(Axis::new),
            graphs: Vec::new(),
            legend: Legend::new(),
            interactions: Interactions::default(),
            drag_axes: smallvec![AxisType::Bottom, AxisType::Left],
            zoom_axes: smallvec![AxisType::Bottom, AxisType::Left],
        }
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the title.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Replace or remove the title.
    pub fn set_title(&mut self, title: Option<Title>) {
        self.title = title;
    }

    /// Replace the title text, keeping its font.
    pub fn set_title_text(&mut self, text: impl Into<String>) {
        match &mut self.title {
            Some(title) => title.text = text.into(),
            None => self.title = Some(Title::new(text, 17.0)),
        }
    }

    /// Access one axis.
    pub fn axis(&self, kind: AxisType) -> &Axis {
        &self.axes[kind.index()]
    }

    /// Access one axis mutably.
    pub fn axis_mut(&mut self, kind: AxisType) -> &mut Axis {
        &mut self.axes[kind.index()]
    }

    /// All axes in priority order.
    pub fn axes(&self) -> &[Axis; 4] {
        &self.axes
    }

    /// Graphs in creation order.
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// Number of graphs.
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Graph at a creation-order index.
    pub fn graph(&self, index: usize) -> Option<&Graph> {
        self.graphs.get(index)
    }

    /// Graph at a creation-order index, mutably.
    pub fn graph_mut(&mut self, index: usize) -> Option<&mut Graph> {
        self.graphs.get_mut(index)
    }

    /// Graph with the given id.
    pub fn graph_by_id(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.iter().find(|graph| graph.id() == id)
    }

    /// Graph with the given id, mutably.
    pub fn graph_by_id_mut(&mut self, id: GraphId) -> Option<&mut Graph> {
        self.graphs.iter_mut().find(|graph| graph.id() == id)
    }

    /// Add a graph on the given axes together with its legend item.
    ///
    /// One axis must be horizontal and the other vertical.
    pub fn add_graph(&mut self, key_axis: AxisType, value_axis: AxisType) -> PlotResult<&mut Graph> {
        if key_axis.is_horizontal() == value_axis.is_horizontal() {
            return Err(PlotError::ParallelAxes {
                key: key_axis,
                value: value_axis,
            });
        }
        Ok(self.push_graph(Graph::new(key_axis, value_axis)))
    }

    /// Add a graph on the primary axes (key bottom, value left).
    pub fn add_default_graph(&mut self) -> &mut Graph {
        self.push_graph(Graph::new(AxisType::Bottom, AxisType::Left))
    }

    fn push_graph(&mut self, graph: Graph) -> &mut Graph {
        debug!(
            graph = %graph.id(),
            key_axis = %graph.key_axis(),
            value_axis = %graph.value_axis(),
            "graph added"
        );
        self.legend.push(graph.id());
        self.graphs.push(graph);
        let last = self.graphs.len() - 1;
        &mut self.graphs[last]
    }

    /// Remove a graph and its legend item.
    pub fn remove_graph(&mut self, id: GraphId) -> PlotResult<()> {
        let index = self
            .graphs
            .iter()
            .position(|graph| graph.id() == id)
            .ok_or(PlotError::UnknownGraph(id))?;
        self.graphs.remove(index);
        self.legend.remove(id);
        debug!(graph = %id, "graph removed");
        Ok(())
    }

    /// Remove every graph and legend item. Returns how many graphs were removed.
    pub fn clear_graphs(&mut self) -> usize {
        let removed = self.graphs.len();
        self.graphs.clear();
        self.legend.clear();
        debug!(removed, "graphs cleared");
        removed
    }

    /// Ids of graphs with a non-empty selection, in creation order.
    pub fn selected_graphs(&self) -> Vec<GraphId> {
        self.graphs
            .iter()
            .filter(|graph| graph.is_selected())
            .map(Graph::id)
            .collect()
    }

    /// Access the legend.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Access the legend mutably.
    pub fn legend_mut(&mut self) -> &mut Legend {
        &mut self.legend
    }

    pub(crate) fn graphs_and_legend_mut(&mut self) -> (&mut [Graph], &mut Legend) {
        (&mut self.graphs, &mut self.legend)
    }

    /// Enabled interactions.
    pub fn interactions(&self) -> Interactions {
        self.interactions
    }

    /// Replace the enabled interactions.
    pub fn set_interactions(&mut self, interactions: Interactions) {
        self.interactions = interactions;
    }

    /// Axes the next drag pans.
    pub fn range_drag_axes(&self) -> &[AxisType] {
        &self.drag_axes
    }

    /// Set the axes the next drag pans.
    pub fn set_range_drag_axes(&mut self, axes: AxisSet) {
        self.drag_axes = axes;
    }

    /// Axes the next wheel event zooms.
    pub fn range_zoom_axes(&self) -> &[AxisType] {
        &self.zoom_axes
    }

    /// Set the axes the next wheel event zooms.
    pub fn set_range_zoom_axes(&mut self, axes: AxisSet) {
        self.zoom_axes = axes;
    }

    /// Clear every axis part, graph and legend item selection.
    pub fn deselect_all(&mut self) {
        for axis in &mut self.axes {
            axis.set_selected_parts(AxisParts::NONE);
        }
        for graph in &mut self.graphs {
            graph.set_selection(None);
        }
        for item in self.legend.items_mut() {
            item.set_selected(false);
        }
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PlotBuilder {
    theme: Theme,
    title: Option<Title>,
    interactions: Interactions,
    legend_visible: bool,
    secondary_axes: bool,
}

impl PlotBuilder {
    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the title.
    pub fn title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the enabled interactions.
    pub fn interactions(mut self, interactions: Interactions) -> Self {
        self.interactions = interactions;
        self
    }

    /// Show the legend.
    pub fn legend(mut self, visible: bool) -> Self {
        self.legend_visible = visible;
        self
    }

    /// Show the top and right axes.
    pub fn secondary_axes(mut self, visible: bool) -> Self {
        self.secondary_axes = visible;
        self
    }

    /// Build the plot.
    pub fn build(self) -> Plot {
        let mut plot = Plot::new();
        plot.theme = self.theme;
        plot.title = self.title;
        plot.interactions = self.interactions;
        plot.legend.set_visible(self.legend_visible);
        if self.secondary_axes {
            plot.axis_mut(AxisType::Top).set_visible(true);
            plot.axis_mut(AxisType::Right).set_visible(true);
        }
        plot
    }
}
