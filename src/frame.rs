//! Turn a laid out plot into a render list.

use crate::axis::{AxisPart, AxisType};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::graph::{Graph, LineStyle, PenStyle};
use crate::layout::{
    AxisGeometry, LEGEND_ICON_GAP, LEGEND_ICON_WIDTH, LINE_HEIGHT_FACTOR, LegendGeometry,
    PlotLayout, TextMeasurer,
};
use crate::plot::Plot;
use crate::render::{
    Color, LineSegment, MarkerStyle, RectStyle, RenderCommand, RenderList, Stroke, TextStyle,
    clip_points, clip_segment, dash_segments, line_style_segments,
};
use crate::transform::{AxisTransform, GraphTransform};

/// Stroke width of selected graphs.
pub const SELECTED_GRAPH_WIDTH: f32 = 2.5;

/// Build the render commands for one frame.
pub fn build_frame(plot: &Plot, layout: &PlotLayout, measurer: &impl TextMeasurer) -> RenderList {
    let mut render = RenderList::new();
    let theme = plot.theme();
    render.push(RenderCommand::Rect {
        rect: layout.bounds,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    build_grid(&mut render, plot, layout);

    render.push(RenderCommand::ClipRect(layout.axis_rect));
    for graph in plot.graphs() {
        build_graph(&mut render, plot, graph, layout.axis_rect);
    }
    render.push(RenderCommand::ClipEnd);

    for axis in &layout.axes {
        build_axis(&mut render, plot, axis, layout.axis_rect, measurer);
    }
    if let Some(legend) = &layout.legend {
        build_legend(&mut render, plot, legend);
    }
    if let (Some(title), Some(rect)) = (plot.title(), layout.title) {
        render.push(RenderCommand::Text {
            position: rect.min,
            text: title.text.clone(),
            style: TextStyle {
                color: theme.text,
                size: title.size,
                bold: title.bold,
            },
        });
    }
    render
}

fn build_grid(render: &mut RenderList, plot: &Plot, layout: &PlotLayout) {
    let rect = layout.axis_rect;
    let mut segments = Vec::new();
    for kind in [AxisType::Bottom, AxisType::Left] {
        let Some(geometry) = layout.axis(kind) else {
            continue;
        };
        let Some(transform) = AxisTransform::for_axis(kind, plot.axis(kind).range(), rect) else {
            continue;
        };
        for tick in &geometry.ticks.major {
            let pos = transform.coord_to_pixel(tick.value);
            segments.push(if kind.is_horizontal() {
                LineSegment::new(ScreenPoint::new(pos, rect.min.y), ScreenPoint::new(pos, rect.max.y))
            } else {
                LineSegment::new(ScreenPoint::new(rect.min.x, pos), ScreenPoint::new(rect.max.x, pos))
            });
        }
    }
    if !segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments,
            stroke: Stroke::new(plot.theme().grid, 1.0),
        });
    }
}

fn build_graph(render: &mut RenderList, plot: &Plot, graph: &Graph, rect: ScreenRect) {
    let Some(transform) = GraphTransform::new(plot, graph, rect) else {
        return;
    };
    let selected = graph.is_selected();
    let pen = graph.pen();
    let (color, width) = if selected {
        (plot.theme().selection, SELECTED_GRAPH_WIDTH.max(pen.width))
    } else {
        (pen.color, pen.width)
    };

    if graph.line_style() != LineStyle::None {
        let segments: Vec<LineSegment> = line_style_segments(graph.line_style(), graph.data())
            .into_iter()
            .filter_map(|(start, end)| {
                clip_segment(
                    transform.data_to_screen(start),
                    transform.data_to_screen(end),
                    rect,
                )
            })
            .map(|(start, end)| LineSegment::new(start, end))
            .collect();
        let style = if selected { PenStyle::Solid } else { pen.style };
        let segments = dash_segments(segments, style, width);
        if !segments.is_empty() {
            render.push(RenderCommand::LineSegments {
                segments,
                stroke: Stroke::new(color, width),
            });
        }
    }

    if let Some(scatter) = graph.scatter() {
        let screen: Vec<ScreenPoint> = graph
            .data()
            .iter()
            .map(|point| transform.data_to_screen(*point))
            .collect();
        let mut points = Vec::with_capacity(screen.len());
        clip_points(&screen, rect.inflate(scatter.size), &mut points);
        if !points.is_empty() {
            render.push(RenderCommand::Markers {
                points,
                style: MarkerStyle {
                    shape: scatter.shape,
                    size: scatter.size,
                    pen: if selected {
                        color
                    } else {
                        scatter.pen.unwrap_or(pen.color)
                    },
                    brush: scatter.brush,
                },
            });
        }
    }
}

/// Unit vector pointing away from the axis rect.
fn outward(kind: AxisType) -> (f32, f32) {
    match kind {
        AxisType::Bottom => (0.0, 1.0),
        AxisType::Top => (0.0, -1.0),
        AxisType::Left => (-1.0, 0.0),
        AxisType::Right => (1.0, 0.0),
    }
}

fn build_axis(
    render: &mut RenderList,
    plot: &Plot,
    geometry: &AxisGeometry,
    rect: ScreenRect,
    measurer: &impl TextMeasurer,
) {
    let kind = geometry.kind;
    let axis = plot.axis(kind);
    let theme = plot.theme();
    let part_color = |part: AxisPart| {
        if axis.is_selected(part) {
            theme.selection
        } else {
            theme.axis
        }
    };
    let Some(transform) = AxisTransform::for_axis(kind, axis.range(), rect) else {
        return;
    };
    let (nx, ny) = outward(kind);
    let anchor = |pos: f32| {
        if kind.is_horizontal() {
            ScreenPoint::new(pos, geometry.line_start.y)
        } else {
            ScreenPoint::new(geometry.line_start.x, pos)
        }
    };
    let tick = |pos: f32, inside: f32, outside: f32| {
        let base = anchor(pos);
        LineSegment::new(
            ScreenPoint::new(base.x - nx * inside, base.y - ny * inside),
            ScreenPoint::new(base.x + nx * outside, base.y + ny * outside),
        )
    };

    let mut segments = vec![LineSegment::new(geometry.line_start, geometry.line_end)];
    let length = axis.tick_length();
    segments.extend(
        geometry
            .ticks
            .major
            .iter()
            .map(|major| tick(transform.coord_to_pixel(major.value), length.inside, length.outside)),
    );
    let sub = axis.sub_tick_length();
    segments.extend(
        geometry
            .ticks
            .sub
            .iter()
            .map(|value| tick(transform.coord_to_pixel(*value), sub.inside, sub.outside)),
    );
    render.push(RenderCommand::LineSegments {
        segments,
        stroke: Stroke::new(part_color(AxisPart::Backbone), 1.0),
    });

    let label_style = TextStyle::new(part_color(AxisPart::TickLabels), axis.tick_label_size());
    let band = geometry.tick_labels;
    for major in &geometry.ticks.major {
        let (w, h) = measurer.measure(&major.label, label_style.size);
        let pos = transform.coord_to_pixel(major.value);
        let position = match kind {
            AxisType::Bottom => ScreenPoint::new(pos - w * 0.5, band.min.y),
            AxisType::Top => ScreenPoint::new(pos - w * 0.5, band.max.y - h),
            AxisType::Left => ScreenPoint::new(band.max.x - w, pos - h * 0.5),
            AxisType::Right => ScreenPoint::new(band.min.x, pos - h * 0.5),
        };
        render.push(RenderCommand::Text {
            position,
            text: major.label.clone(),
            style: label_style,
        });
    }

    if let Some(label) = geometry.label {
        render.push(RenderCommand::Text {
            position: label.min,
            text: axis.label().to_string(),
            style: TextStyle::new(part_color(AxisPart::Label), axis.label_size()),
        });
    }
}

fn build_legend(render: &mut RenderList, plot: &Plot, geometry: &LegendGeometry) {
    let theme = plot.theme();
    let legend = plot.legend();
    render.push(RenderCommand::Rect {
        rect: geometry.rect,
        style: RectStyle {
            fill: legend.fill(),
            stroke: theme.legend_border,
            stroke_width: 1.0,
        },
    });

    let font_size = legend.font_size();
    for row in &geometry.rows {
        let Some(graph) = plot.graph_by_id(row.graph) else {
            continue;
        };
        let selected = legend
            .item_for(row.graph)
            .is_some_and(|item| item.is_selected());
        let pen = graph.pen();
        let icon_y = row.rect.center().y;
        let icon_start = ScreenPoint::new(row.rect.min.x, icon_y);
        let icon_end = ScreenPoint::new(row.rect.min.x + LEGEND_ICON_WIDTH, icon_y);
        if graph.line_style() != LineStyle::None {
            render.push(RenderCommand::LineSegments {
                segments: dash_segments(
                    vec![LineSegment::new(icon_start, icon_end)],
                    pen.style,
                    pen.width,
                ),
                stroke: Stroke::new(pen.color, pen.width),
            });
        }
        if let Some(scatter) = graph.scatter() {
            render.push(RenderCommand::Markers {
                points: vec![ScreenPoint::new(
                    (icon_start.x + icon_end.x) * 0.5,
                    icon_y,
                )],
                style: MarkerStyle {
                    shape: scatter.shape,
                    size: scatter.size,
                    pen: scatter.pen.unwrap_or(pen.color),
                    brush: scatter.brush,
                },
            });
        }
        let text_height = graph.name().split('\n').count() as f32 * font_size * LINE_HEIGHT_FACTOR;
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                icon_end.x + LEGEND_ICON_GAP,
                icon_y - text_height * 0.5,
            ),
            text: graph.name().to_string(),
            style: TextStyle::new(
                if selected { theme.selection } else { theme.text },
                font_size,
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisParts;
    use crate::graph::{DataRange, Pen};
    use crate::layout::tests::{FixedMeasurer, bounds};
    use crate::range::Range;
    use crate::style::Theme;

    fn plot() -> Plot {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Bottom).set_range(Range::new(0.0, 10.0));
        plot.axis_mut(AxisType::Left).set_range(Range::new(0.0, 10.0));
        plot.legend_mut().set_visible(true);
        let graph = plot.add_default_graph();
        graph.set_name("line");
        graph.set_pen(Pen::new(Color::RED));
        graph
            .set_data(&[1.0, 5.0, 9.0], &[1.0, 5.0, 9.0])
            .expect("matching lengths");
        plot
    }

    fn line_strokes(render: &RenderList) -> Vec<Stroke> {
        render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { stroke, .. } => Some(*stroke),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn dark_theme_colors_background_and_axes() {
        let mut plot = Plot::builder().theme(Theme::dark()).build();
        plot.axis_mut(AxisType::Bottom).set_range(Range::new(0.0, 10.0));
        plot.axis_mut(AxisType::Left).set_range(Range::new(0.0, 10.0));
        plot.axis_mut(AxisType::Bottom).set_label("time");
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let dark = Theme::dark();
        match &render.commands()[0] {
            RenderCommand::Rect { rect, style } => {
                assert_eq!(*rect, layout.bounds);
                assert_eq!(style.fill, dark.background);
            }
            other => panic!("expected background rect, got {other:?}"),
        }
        let label = render.commands().iter().find_map(|command| match command {
            RenderCommand::Text { text, style, .. } if text == "time" => Some(style.color),
            _ => None,
        });
        assert_eq!(label, Some(dark.axis));
    }

    #[test]
    fn graphs_are_clipped_to_axis_rect() {
        let plot = plot();
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let commands = render.commands();
        let clip = commands
            .iter()
            .position(|command| *command == RenderCommand::ClipRect(layout.axis_rect))
            .unwrap();
        assert_eq!(commands[clip + 2], RenderCommand::ClipEnd);
    }

    #[test]
    fn selected_graph_uses_selection_pen() {
        let mut plot = plot();
        plot.graph_mut(0)
            .unwrap()
            .set_selection(Some(DataRange::new(0, 3)));
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let selection = plot.theme().selection;
        assert!(
            line_strokes(&render)
                .iter()
                .any(|stroke| stroke.color == selection && stroke.width == SELECTED_GRAPH_WIDTH)
        );
    }

    #[test]
    fn selected_backbone_changes_axis_color() {
        let mut plot = plot();
        plot.axis_mut(AxisType::Left)
            .set_selected_parts(AxisParts::BACKBONE);
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let selection = plot.theme().selection;
        let count = line_strokes(&render)
            .iter()
            .filter(|stroke| stroke.color == selection)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn legend_and_tick_labels_are_drawn() {
        let plot = plot();
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let texts: Vec<&str> = render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"line"));
        assert!(texts.contains(&"10"));
    }

    #[test]
    fn dotted_pen_is_split_into_dashes() {
        let mut plot = plot();
        let graph = plot.graph_mut(0).unwrap();
        graph.set_pen(graph.pen().with_style(PenStyle::Dot));
        let layout = PlotLayout::compute(&plot, bounds(), &FixedMeasurer).unwrap();
        let render = build_frame(&plot, &layout, &FixedMeasurer);
        let dashes = render
            .commands()
            .iter()
            .find_map(|command| match command {
                RenderCommand::LineSegments { segments, stroke } if stroke.color == Color::RED => {
                    Some(segments.len())
                }
                _ => None,
            })
            .unwrap();
        assert!(dashes > 10);
    }
}
