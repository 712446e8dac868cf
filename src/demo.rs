//! The five graph plot shown by the independent axes demo.

use std::f64::consts::PI;

use rand::Rng;

use crate::axis::{AxisTicker, AxisType};
use crate::error::PlotResult;
use crate::graph::{LineStyle, Pen, PenStyle, ScatterShape, ScatterStyle};
use crate::legend::LegendAlignment;
use crate::plot::{Interactions, Plot, Title};
use crate::range::Range;
use crate::render::Color;

/// Build the demo plot; `rng` scatters the points around the quadratic.
pub fn demo_plot(rng: &mut impl Rng) -> PlotResult<Plot> {
    let mut plot = Plot::builder()
        .title(Title::new("Independent Axes Interaction Example", 17.0))
        .interactions(Interactions::all())
        .legend(true)
        .secondary_axes(true)
        .build();

    let legend = plot.legend_mut();
    legend.set_font_size(9.0);
    legend.set_fill(Color::rgba8(255, 255, 255, 230));
    legend.set_alignment(LegendAlignment::BottomRight);

    let (x0, y0) = sample(25, |i| 3.0 * i as f64 / 25.0, |x| {
        (-x * x * 0.8).exp() * (x * x + x)
    });
    let graph = plot.add_graph(AxisType::Left, AxisType::Bottom)?;
    graph.set_name("Left maxwell function");
    graph.set_pen(Pen::new(Color::rgb8(255, 100, 0)));
    graph.set_line_style(LineStyle::Line);
    graph.set_scatter(Some(ScatterStyle::new(ScatterShape::Disc, 5.0)));
    graph.set_data(&x0, &y0)?;

    let (x1, y1) = sample(15, |i| 3.0 * i as f64 / 15.0, |x| {
        (-x * x).exp() * (x * x) * 2.6
    });
    let graph = plot.add_graph(AxisType::Bottom, AxisType::Left)?;
    graph.set_name("Bottom maxwell function");
    graph.set_pen(Pen::new(Color::RED));
    graph.set_line_style(LineStyle::StepCenter);
    graph.set_scatter(Some(ScatterStyle::with_colors(
        ScatterShape::Circle,
        7.0,
        Color::RED,
        Color::WHITE,
    )));
    graph.set_data(&x1, &y1)?;

    let (x2, y2) = sample(250, |i| i as f64 / 250.0 * 3.0 * PI, |x| {
        (x * 12.0).sin() * x.cos() * 10.0
    });
    let graph = plot.add_graph(AxisType::Top, AxisType::Right)?;
    graph.set_name("High frequency sine");
    graph.set_pen(Pen::new(Color::BLUE));
    graph.set_data(&x2, &y2)?;

    let y3: Vec<f64> = x2.iter().map(|x| x.cos() * 10.0).collect();
    let graph = plot.add_graph(AxisType::Top, AxisType::Right)?;
    graph.set_name("Sine envelope");
    graph.set_pen(
        Pen::new(Color::rgba8(30, 40, 255, 150))
            .with_width(4.0)
            .with_style(PenStyle::Dot),
    );
    graph.set_data(&x2, &y3)?;

    let x4: Vec<f64> = (0..250).map(|i| i as f64 / 250.0 * 100.0 - 50.0).collect();
    let y4: Vec<f64> = x4
        .iter()
        .map(|x| 0.01 * x * x + 1.5 * (rng.gen_range(0.0_f64..1.0) - 0.5) + 1.5 * PI)
        .collect();
    let graph = plot.add_graph(AxisType::Right, AxisType::Top)?;
    graph.set_name("Some random data around\na quadratic function");
    graph.set_pen(Pen::new(Color::rgb8(50, 50, 50)));
    graph.set_line_style(LineStyle::None);
    graph.set_scatter(Some(ScatterStyle::new(ScatterShape::Circle, 4.0)));
    graph.set_data(&x4, &y4)?;

    let bottom = plot.axis_mut(AxisType::Bottom);
    bottom.set_range(Range::new(0.0, 2.7));
    bottom.set_label("Bottom axis with outward ticks");
    bottom.set_tick_length(0.0, 5.0);
    bottom.set_sub_tick_length(0.0, 3.0);

    let left = plot.axis_mut(AxisType::Left);
    left.set_range(Range::new(0.0, 2.6));
    left.set_label("Left axis label");

    let top = plot.axis_mut(AxisType::Top);
    top.set_range(Range::new(0.0, 3.0 * PI));
    top.set_ticker(AxisTicker::Pi);
    top.set_label("Top axis label");

    let right = plot.axis_mut(AxisType::Right);
    right.set_range(Range::new(-70.0, 35.0));
    right.set_label("Right axis label");
    right.set_tick_length(3.0, 3.0);
    right.set_sub_tick_length(1.0, 1.0);

    Ok(plot)
}

fn sample(count: usize, key: impl Fn(usize) -> f64, value: impl Fn(f64) -> f64) -> (Vec<f64>, Vec<f64>) {
    let keys: Vec<f64> = (0..count).map(key).collect();
    let values = keys.iter().map(|x| value(*x)).collect();
    (keys, values)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::interaction::resolve_gesture_axes;

    #[test]
    fn demo_has_five_graphs_on_their_axes() {
        let plot = demo_plot(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(plot.graph_count(), 5);
        let axes: Vec<_> = plot
            .graphs()
            .iter()
            .map(|graph| (graph.key_axis(), graph.value_axis()))
            .collect();
        assert_eq!(
            axes,
            [
                (AxisType::Left, AxisType::Bottom),
                (AxisType::Bottom, AxisType::Left),
                (AxisType::Top, AxisType::Right),
                (AxisType::Top, AxisType::Right),
                (AxisType::Right, AxisType::Top),
            ]
        );
        assert_eq!(plot.graph(1).unwrap().data().len(), 15);
        assert_eq!(plot.graph(4).unwrap().data().len(), 250);
        assert!(plot.axis(AxisType::Top).is_visible());
        assert_eq!(plot.legend().items().len(), 5);
    }

    #[test]
    fn selecting_high_frequency_sine_binds_top_and_right() {
        let mut plot = demo_plot(&mut StdRng::seed_from_u64(3)).unwrap();
        let graph = plot.graph_mut(2).unwrap();
        let full = graph.data_range();
        graph.set_selection(Some(full));
        assert_eq!(
            resolve_gesture_axes(&plot).as_slice(),
            [AxisType::Top, AxisType::Right]
        );
    }
}
