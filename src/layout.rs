//! Plot layout and hit testing.
//!
//! The layout splits the widget bounds into a title row, one band per
//! visible axis, the axis rect and the legend box. Hit testing maps a
//! pointer position back onto those elements.

use crate::axis::{AxisPart, AxisType, TickSet};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::graph::{Graph, GraphId, LineStyle};
use crate::legend::LegendAlignment;
use crate::plot::Plot;
use crate::render::line_style_segments;
use crate::transform::GraphTransform;

pub(crate) const OUTER_MARGIN: f32 = 8.0;
pub(crate) const TITLE_PADDING: f32 = 6.0;
pub(crate) const AXIS_PADDING: f32 = 4.0;
pub(crate) const BACKBONE_HIT_MARGIN: f32 = 4.0;
pub(crate) const LEGEND_MARGIN: f32 = 7.0;
pub(crate) const LEGEND_PADDING: f32 = 5.0;
pub(crate) const LEGEND_ICON_WIDTH: f32 = 28.0;
pub(crate) const LEGEND_ICON_GAP: f32 = 7.0;
pub(crate) const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Measures rendered text.
pub trait TextMeasurer {
    /// Width and height of a single line of text.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);

    /// Width and height of text that may contain line breaks.
    fn measure_multiline(&self, text: &str, size: f32) -> (f32, f32) {
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for line in text.split('\n') {
            let (w, h) = self.measure(line, size);
            width = width.max(w);
            height += h.max(size * LINE_HEIGHT_FACTOR);
        }
        (width, height)
    }
}

/// What lies under a screen point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The plot title.
    Title,
    /// A legend row.
    LegendItem(GraphId),
    /// Legend padding outside every row.
    Legend,
    /// One part of an axis.
    Axis {
        /// The axis.
        axis: AxisType,
        /// The part that was hit.
        part: AxisPart,
    },
    /// A graph, with the index of the nearest data point.
    Graph {
        /// The graph.
        graph: GraphId,
        /// Nearest data index.
        index: usize,
    },
    /// Empty space inside the axis rect.
    PlotArea,
    /// Anything else.
    Outside,
}

impl HitTarget {
    /// Check whether the target belongs to the legend box.
    pub fn is_legend(&self) -> bool {
        matches!(self, Self::LegendItem(_) | Self::Legend)
    }
}

/// Geometry of one visible axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGeometry {
    /// The axis.
    pub kind: AxisType,
    /// Backbone line start.
    pub line_start: ScreenPoint,
    /// Backbone line end.
    pub line_end: ScreenPoint,
    /// Hit band around the backbone and its ticks.
    pub backbone: ScreenRect,
    /// Band holding the tick labels.
    pub tick_labels: ScreenRect,
    /// Label box, absent when the label is empty.
    pub label: Option<ScreenRect>,
    /// Ticks generated for the current range.
    pub ticks: TickSet,
}

impl AxisGeometry {
    /// Resolve a point to an axis part.
    pub fn part_at(&self, point: ScreenPoint) -> Option<AxisPart> {
        if self.label.is_some_and(|rect| rect.contains(point)) {
            Some(AxisPart::Label)
        } else if self.backbone.contains(point) {
            Some(AxisPart::Backbone)
        } else if self.tick_labels.contains(point) {
            Some(AxisPart::TickLabels)
        } else {
            None
        }
    }
}

/// One legend row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRow {
    /// Graph shown by the row.
    pub graph: GraphId,
    /// Row bounds.
    pub rect: ScreenRect,
}

/// Legend box and its rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendGeometry {
    /// Legend box.
    pub rect: ScreenRect,
    /// Rows in item order.
    pub rows: Vec<LegendRow>,
}

/// Complete layout of a plot inside some bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    /// Widget bounds.
    pub bounds: ScreenRect,
    /// Title text box.
    pub title: Option<ScreenRect>,
    /// Plot area.
    pub axis_rect: ScreenRect,
    /// Visible axes.
    pub axes: Vec<AxisGeometry>,
    /// Legend box, absent when hidden or empty.
    pub legend: Option<LegendGeometry>,
}

struct AxisExtent {
    ticks: TickSet,
    label_size: (f32, f32),
    tick_label_size: (f32, f32),
    thickness: f32,
}

impl PlotLayout {
    /// Lay the plot out inside `bounds`.
    ///
    /// Returns `None` when the bounds are too small for a plot area.
    pub fn compute(plot: &Plot, bounds: ScreenRect, measurer: &impl TextMeasurer) -> Option<Self> {
        let inner = bounds.inflate(-OUTER_MARGIN);
        if !inner.is_valid() {
            return None;
        }

        let mut top = inner.min.y;
        let title = plot
            .title()
            .filter(|title| !title.text.is_empty())
            .map(|title| {
                let size = measurer.measure_multiline(&title.text, title.size);
                let rect = ScreenRect::from_origin_size(
                    ScreenPoint::new(inner.center().x - size.0 * 0.5, top + TITLE_PADDING),
                    size.0,
                    size.1,
                );
                top += size.1 + TITLE_PADDING * 2.0;
                rect
            });

        let extents = AxisType::ALL.map(|kind| axis_extent(plot, kind, inner, measurer));
        let thickness = |kind: AxisType| {
            extents[kind.index()]
                .as_ref()
                .map_or(0.0, |extent| extent.thickness)
        };
        let vertical_label_row = [AxisType::Left, AxisType::Right]
            .into_iter()
            .filter_map(|kind| extents[kind.index()].as_ref())
            .map(|extent| extent.label_size.1)
            .fold(0.0_f32, f32::max);
        let vertical_label_row = if vertical_label_row > 0.0 {
            vertical_label_row + AXIS_PADDING
        } else {
            0.0
        };

        let top_band = thickness(AxisType::Top);
        let axis_rect = ScreenRect::new(
            ScreenPoint::new(
                inner.min.x + thickness(AxisType::Left),
                top + top_band + vertical_label_row,
            ),
            ScreenPoint::new(
                inner.max.x - thickness(AxisType::Right),
                inner.max.y - thickness(AxisType::Bottom),
            ),
        );
        if axis_rect.width() < 1.0 || axis_rect.height() < 1.0 {
            return None;
        }

        let label_row_top = top + top_band;
        let axes = AxisType::ALL
            .into_iter()
            .zip(extents)
            .filter_map(|(kind, extent)| {
                let extent = extent?;
                Some(axis_geometry(plot, kind, extent, axis_rect, inner, label_row_top))
            })
            .collect();

        let legend = legend_geometry(plot, axis_rect, measurer);

        Some(Self {
            bounds,
            title,
            axis_rect,
            axes,
            legend,
        })
    }

    /// Geometry of a visible axis.
    pub fn axis(&self, kind: AxisType) -> Option<&AxisGeometry> {
        self.axes.iter().find(|axis| axis.kind == kind)
    }

    /// Resolve a screen point to the element under it.
    ///
    /// Graphs count as hit when a data point or a line segment lies within
    /// `graph_threshold` pixels.
    pub fn hit_test(&self, plot: &Plot, point: ScreenPoint, graph_threshold: f32) -> HitTarget {
        if self.title.is_some_and(|rect| rect.contains(point)) {
            return HitTarget::Title;
        }
        if let Some(legend) = self.legend.as_ref().filter(|legend| legend.rect.contains(point)) {
            return legend
                .rows
                .iter()
                .find(|row| row.rect.contains(point))
                .map_or(HitTarget::Legend, |row| HitTarget::LegendItem(row.graph));
        }
        for axis in &self.axes {
            if let Some(part) = axis.part_at(point) {
                return HitTarget::Axis {
                    axis: axis.kind,
                    part,
                };
            }
        }
        if !self.axis_rect.contains(point) {
            return HitTarget::Outside;
        }
        self.graph_at(plot, point, graph_threshold)
            .map_or(HitTarget::PlotArea, |(graph, index)| HitTarget::Graph {
                graph,
                index,
            })
    }

    fn graph_at(&self, plot: &Plot, point: ScreenPoint, threshold: f32) -> Option<(GraphId, usize)> {
        let threshold_sq = threshold * threshold;
        let mut best: Option<(GraphId, usize, f32)> = None;
        // later graphs are drawn on top
        for graph in plot.graphs().iter().rev() {
            let Some((index, dist)) = nearest_on_graph(plot, graph, self.axis_rect, point) else {
                continue;
            };
            if dist > threshold_sq {
                continue;
            }
            if best.is_none_or(|best| dist < best.2) {
                best = Some((graph.id(), index, dist));
            }
        }
        best.map(|(graph, index, _)| (graph, index))
    }
}

/// Nearest data index and the squared distance to the graph's drawn shape.
fn nearest_on_graph(
    plot: &Plot,
    graph: &Graph,
    axis_rect: ScreenRect,
    point: ScreenPoint,
) -> Option<(usize, f32)> {
    let transform = GraphTransform::new(plot, graph, axis_rect)?;
    let (index, mut dist) = graph
        .data()
        .iter()
        .enumerate()
        .map(|(index, data)| (index, transform.data_to_screen(*data).distance_sq(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    if graph.line_style() != LineStyle::None {
        for (start, end) in line_style_segments(graph.line_style(), graph.data()) {
            let start = transform.data_to_screen(start);
            let end = transform.data_to_screen(end);
            dist = dist.min(segment_distance_sq(point, start, end));
        }
    }
    Some((index, dist))
}

pub(crate) fn segment_distance_sq(point: ScreenPoint, start: ScreenPoint, end: ScreenPoint) -> f32 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return point.distance_sq(start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq).clamp(0.0, 1.0);
    point.distance_sq(ScreenPoint::new(start.x + t * dx, start.y + t * dy))
}

/// Number of major ticks aimed for along `length` pixels.
pub(crate) fn tick_target(kind: AxisType, length: f32) -> usize {
    let spacing = if kind.is_horizontal() { 90.0 } else { 55.0 };
    ((length / spacing) as usize).clamp(2, 10)
}

fn axis_extent(
    plot: &Plot,
    kind: AxisType,
    inner: ScreenRect,
    measurer: &impl TextMeasurer,
) -> Option<AxisExtent> {
    let axis = plot.axis(kind);
    if !axis.is_visible() {
        return None;
    }
    let length = if kind.is_horizontal() {
        inner.width()
    } else {
        inner.height()
    };
    let ticks = axis.ticks(tick_target(kind, length));
    let tick_label_size = ticks
        .major
        .iter()
        .map(|tick| measurer.measure(&tick.label, axis.tick_label_size()))
        .fold((0.0_f32, 0.0_f32), |acc, size| {
            (acc.0.max(size.0), acc.1.max(size.1))
        });
    let label_size = if axis.label().is_empty() {
        (0.0, 0.0)
    } else {
        measurer.measure_multiline(axis.label(), axis.label_size())
    };
    let outside = axis
        .tick_length()
        .outside
        .max(axis.sub_tick_length().outside);
    let thickness = if kind.is_horizontal() {
        let label = if label_size.1 > 0.0 {
            label_size.1 + AXIS_PADDING
        } else {
            0.0
        };
        outside + AXIS_PADDING + tick_label_size.1 + label + AXIS_PADDING
    } else {
        outside + AXIS_PADDING + tick_label_size.0 + AXIS_PADDING
    };
    Some(AxisExtent {
        ticks,
        label_size,
        tick_label_size,
        thickness,
    })
}

fn axis_geometry(
    plot: &Plot,
    kind: AxisType,
    extent: AxisExtent,
    axis_rect: ScreenRect,
    inner: ScreenRect,
    label_row_top: f32,
) -> AxisGeometry {
    let axis = plot.axis(kind);
    let inside = axis.tick_length().inside.max(axis.sub_tick_length().inside);
    let outside = axis
        .tick_length()
        .outside
        .max(axis.sub_tick_length().outside);
    let reach_in = inside.max(BACKBONE_HIT_MARGIN);
    let reach_out = outside.max(BACKBONE_HIT_MARGIN);
    let (label_w, label_h) = extent.label_size;
    let (tick_w, tick_h) = extent.tick_label_size;
    let has_label = label_w > 0.0 || label_h > 0.0;

    let (line_start, line_end, backbone, tick_labels, label) = match kind {
        AxisType::Bottom | AxisType::Top => {
            let bottom = kind == AxisType::Bottom;
            let y = if bottom {
                axis_rect.max.y
            } else {
                axis_rect.min.y
            };
            // +1 for outward, -1 for inward from the axis rect
            let dir = if bottom { 1.0 } else { -1.0 };
            let span = |from: f32, to: f32| {
                let (a, b) = (y + dir * from, y + dir * to);
                (a.min(b), a.max(b))
            };
            let (b0, b1) = span(-reach_in, reach_out);
            let backbone = ScreenRect::new(
                ScreenPoint::new(axis_rect.min.x, b0),
                ScreenPoint::new(axis_rect.max.x, b1),
            );
            let label_start = outside + AXIS_PADDING;
            let (t0, t1) = span(label_start, label_start + tick_h);
            let tick_labels = ScreenRect::new(
                ScreenPoint::new(axis_rect.min.x - tick_w * 0.5, t0),
                ScreenPoint::new(axis_rect.max.x + tick_w * 0.5, t1),
            );
            let label = has_label.then(|| {
                let start = label_start + tick_h + AXIS_PADDING;
                let (l0, _) = span(start, start + label_h);
                ScreenRect::from_origin_size(
                    ScreenPoint::new(axis_rect.center().x - label_w * 0.5, l0),
                    label_w,
                    label_h,
                )
            });
            (
                ScreenPoint::new(axis_rect.min.x, y),
                ScreenPoint::new(axis_rect.max.x, y),
                backbone,
                tick_labels,
                label,
            )
        }
        AxisType::Left | AxisType::Right => {
            let left = kind == AxisType::Left;
            let x = if left {
                axis_rect.min.x
            } else {
                axis_rect.max.x
            };
            let dir = if left { -1.0 } else { 1.0 };
            let span = |from: f32, to: f32| {
                let (a, b) = (x + dir * from, x + dir * to);
                (a.min(b), a.max(b))
            };
            let (b0, b1) = span(-reach_in, reach_out);
            let backbone = ScreenRect::new(
                ScreenPoint::new(b0, axis_rect.min.y),
                ScreenPoint::new(b1, axis_rect.max.y),
            );
            let label_start = outside + AXIS_PADDING;
            let (t0, t1) = span(label_start, label_start + tick_w);
            let tick_labels = ScreenRect::new(
                ScreenPoint::new(t0, axis_rect.min.y - tick_h * 0.5),
                ScreenPoint::new(t1, axis_rect.max.y + tick_h * 0.5),
            );
            let label = has_label.then(|| {
                let label_x = if left {
                    inner.min.x
                } else {
                    inner.max.x - label_w
                };
                ScreenRect::from_origin_size(
                    ScreenPoint::new(label_x, label_row_top),
                    label_w,
                    label_h,
                )
            });
            (
                ScreenPoint::new(x, axis_rect.max.y),
                ScreenPoint::new(x, axis_rect.min.y),
                backbone,
                tick_labels,
                label,
            )
        }
    };

    AxisGeometry {
        kind,
        line_start,
        line_end,
        backbone,
        tick_labels,
        label,
        ticks: extent.ticks,
    }
}

fn legend_geometry(
    plot: &Plot,
    axis_rect: ScreenRect,
    measurer: &impl TextMeasurer,
) -> Option<LegendGeometry> {
    let legend = plot.legend();
    if !legend.is_visible() || legend.items().is_empty() {
        return None;
    }
    let font_size = legend.font_size();
    let sizes: Vec<(GraphId, (f32, f32))> = legend
        .items()
        .iter()
        .map(|item| {
            let name = plot
                .graph_by_id(item.graph())
                .map(|graph| graph.name())
                .unwrap_or_default();
            let (w, h) = measurer.measure_multiline(name, font_size);
            (item.graph(), (w, h.max(font_size * LINE_HEIGHT_FACTOR)))
        })
        .collect();
    let text_width = sizes.iter().map(|(_, size)| size.0).fold(0.0_f32, f32::max);
    let width = LEGEND_PADDING * 2.0 + LEGEND_ICON_WIDTH + LEGEND_ICON_GAP + text_width;
    let height = LEGEND_PADDING * 2.0 + sizes.iter().map(|(_, size)| size.1).sum::<f32>();

    let x = match legend.alignment() {
        LegendAlignment::TopLeft | LegendAlignment::BottomLeft => axis_rect.min.x + LEGEND_MARGIN,
        LegendAlignment::TopCenter => axis_rect.center().x - width * 0.5,
        LegendAlignment::TopRight | LegendAlignment::BottomRight => {
            axis_rect.max.x - LEGEND_MARGIN - width
        }
    };
    let y = if legend.alignment().is_top() {
        axis_rect.min.y + LEGEND_MARGIN
    } else {
        axis_rect.max.y - LEGEND_MARGIN - height
    };
    let rect = ScreenRect::from_origin_size(ScreenPoint::new(x, y), width, height);

    let mut row_top = y + LEGEND_PADDING;
    let rows = sizes
        .into_iter()
        .map(|(graph, (_, h))| {
            let row = LegendRow {
                graph,
                rect: ScreenRect::new(
                    ScreenPoint::new(x + LEGEND_PADDING, row_top),
                    ScreenPoint::new(x + width - LEGEND_PADDING, row_top + h),
                ),
            };
            row_top += h;
            row
        })
        .collect();
    Some(LegendGeometry { rect, rows })
}
