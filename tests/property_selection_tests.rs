use gpui_axesplot::demo::demo_plot;
use gpui_axesplot::{
    AxisPart, AxisParts, AxisType, DataRange, Plot, ScreenPoint, ScreenRect, synchronize_selection,
};
use gpui_axesplot::interaction::pan_axes;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
struct GraphPick {
    graph: Option<(usize, usize)>,
    legend: bool,
}

fn parts(backbone: bool, tick_labels: bool, label: bool) -> AxisParts {
    let mut parts = AxisParts::NONE;
    parts.set(AxisPart::Backbone, backbone);
    parts.set(AxisPart::TickLabels, tick_labels);
    parts.set(AxisPart::Label, label);
    parts
}

fn axis_parts() -> impl Strategy<Value = AxisParts> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(b, t, l)| parts(b, t, l))
}

fn graph_pick() -> impl Strategy<Value = GraphPick> {
    (
        prop::option::of((0usize..15, 1usize..15)),
        any::<bool>(),
    )
        .prop_map(|(graph, legend)| GraphPick {
            graph: graph.map(|(begin, len)| (begin, begin + len)),
            legend,
        })
}

fn selected_plot(axes: &[AxisParts], picks: &[GraphPick]) -> Plot {
    let mut plot = demo_plot(&mut StdRng::seed_from_u64(11)).expect("demo plot");
    for (kind, parts) in AxisType::ALL.into_iter().zip(axes) {
        plot.axis_mut(kind).set_selected_parts(*parts);
    }
    for (index, pick) in picks.iter().enumerate() {
        let Some(graph) = plot.graph_mut(index) else {
            continue;
        };
        let id = graph.id();
        let selection = pick
            .graph
            .map(|(begin, end)| DataRange::new(begin, end.min(graph.data().len())));
        graph.set_selection(selection);
        if let Some(item) = plot.legend_mut().item_for_mut(id) {
            item.set_selected(pick.legend);
        }
    }
    plot
}

type SelectionState = (Vec<AxisParts>, Vec<Option<DataRange>>, Vec<bool>);

fn selection_state(plot: &Plot) -> SelectionState {
    (
        AxisType::ALL
            .iter()
            .map(|kind| plot.axis(*kind).selected_parts())
            .collect(),
        plot.graphs().iter().map(|graph| graph.selection()).collect(),
        plot.legend()
            .items()
            .iter()
            .map(|item| item.is_selected())
            .collect(),
    )
}

proptest! {
    #[test]
    fn backbone_and_tick_labels_select_together(
        axes in prop::collection::vec(axis_parts(), 4),
        picks in prop::collection::vec(graph_pick(), 5)
    ) {
        let mut plot = selected_plot(&axes, &picks);
        synchronize_selection(&mut plot).expect("every demo graph has a legend item");

        for (kind, before) in AxisType::ALL.into_iter().zip(&axes) {
            let axis = plot.axis(kind);
            prop_assert_eq!(
                axis.is_selected(AxisPart::Backbone),
                axis.is_selected(AxisPart::TickLabels)
            );
            prop_assert_eq!(
                axis.is_selected(AxisPart::Backbone),
                before.contains(AxisPart::Backbone) || before.contains(AxisPart::TickLabels)
            );
            prop_assert_eq!(
                axis.is_selected(AxisPart::Label),
                before.contains(AxisPart::Label)
            );
        }
    }

    #[test]
    fn graph_and_legend_item_agree_after_sync(
        picks in prop::collection::vec(graph_pick(), 5)
    ) {
        let mut plot = selected_plot(&[AxisParts::NONE; 4], &picks);
        synchronize_selection(&mut plot).expect("every demo graph has a legend item");

        for (graph, pick) in plot.graphs().iter().zip(&picks) {
            let item = plot.legend().item_for(graph.id()).expect("legend item");
            prop_assert_eq!(graph.is_selected(), item.is_selected());
            prop_assert_eq!(graph.is_selected(), pick.graph.is_some() || pick.legend);
            if graph.is_selected() {
                prop_assert_eq!(graph.selection(), Some(graph.data_range()));
            }
        }
    }

    #[test]
    fn synchronizing_twice_matches_once(
        axes in prop::collection::vec(axis_parts(), 4),
        picks in prop::collection::vec(graph_pick(), 5)
    ) {
        let mut plot = selected_plot(&axes, &picks);
        synchronize_selection(&mut plot).expect("first sync");
        let once = selection_state(&plot);
        synchronize_selection(&mut plot).expect("second sync");
        prop_assert_eq!(selection_state(&plot), once);
    }

    #[test]
    fn panning_there_and_back_restores_ranges(
        from_x in 100.0f32..700.0,
        from_y in 100.0f32..500.0,
        dx in -300.0f32..300.0,
        dy in -300.0f32..300.0
    ) {
        let mut plot = demo_plot(&mut StdRng::seed_from_u64(5)).expect("demo plot");
        let rect = ScreenRect::new(ScreenPoint::new(50.0, 40.0), ScreenPoint::new(750.0, 560.0));
        let before: Vec<_> = AxisType::ALL.iter().map(|kind| plot.axis(*kind).range()).collect();
        let from = ScreenPoint::new(from_x, from_y);
        let to = ScreenPoint::new(from_x + dx, from_y + dy);

        pan_axes(&mut plot, &AxisType::ALL, rect, from, to);
        pan_axes(&mut plot, &AxisType::ALL, rect, to, from);

        for (kind, range) in AxisType::ALL.into_iter().zip(before) {
            let after = plot.axis(kind).range();
            prop_assert!((after.lower - range.lower).abs() < 1e-6 * range.size().max(1.0));
            prop_assert!((after.upper - range.upper).abs() < 1e-6 * range.size().max(1.0));
        }
    }
}
