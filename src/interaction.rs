//! Gesture axis resolution, panning and zooming.
//!
//! Before every drag and wheel gesture the widget asks which axes should
//! respond; the answer depends on what the user has selected.

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::axis::{AxisPart, AxisType};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::plot::Plot;
use crate::transform::AxisTransform;

/// Ordered set of zero to two axes affected by a gesture.
pub type AxisSet = SmallVec<[AxisType; 2]>;

/// Pixel delta of one wheel notch.
pub const WHEEL_STEP_PIXELS: f32 = 120.0;

/// Kind of gesture about to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Mouse press, possibly followed by a drag.
    Drag,
    /// Wheel rotation.
    Zoom,
}

/// Decide which axes the next gesture moves.
///
/// An axis with a selected backbone wins (bottom, left, top, right order);
/// otherwise the first selected graph contributes its key and value axes;
/// otherwise the primary pair is used.
pub fn resolve_gesture_axes(plot: &Plot) -> AxisSet {
    if let Some(kind) = AxisType::ALL
        .into_iter()
        .find(|kind| plot.axis(*kind).is_selected(AxisPart::Backbone))
    {
        return smallvec![kind];
    }
    if let Some(graph) = plot.graphs().iter().find(|graph| graph.is_selected()) {
        return smallvec![graph.key_axis(), graph.value_axis()];
    }
    smallvec![AxisType::Bottom, AxisType::Left]
}

/// Resolve the gesture axes and store them as the drag or zoom binding.
pub fn prepare_gesture(plot: &mut Plot, gesture: Gesture) -> AxisSet {
    let axes = resolve_gesture_axes(plot);
    trace!(?gesture, ?axes, "gesture axes resolved");
    match gesture {
        Gesture::Drag => plot.set_range_drag_axes(axes.clone()),
        Gesture::Zoom => plot.set_range_zoom_axes(axes.clone()),
    }
    axes
}

/// Pan `axes` so the coordinate under `from` ends up under `to`.
pub fn pan_axes(
    plot: &mut Plot,
    axes: &[AxisType],
    axis_rect: ScreenRect,
    from: ScreenPoint,
    to: ScreenPoint,
) {
    for kind in axes {
        let axis = plot.axis_mut(*kind);
        let Some(transform) = AxisTransform::for_axis(*kind, axis.range(), axis_rect) else {
            continue;
        };
        let (start, end) = along(*kind, from, to);
        let diff = transform.pixel_to_coord(start) - transform.pixel_to_coord(end);
        axis.move_range(diff);
    }
}

/// Scale `axes` by `factor` around the coordinate under `center`.
pub fn zoom_axes(
    plot: &mut Plot,
    axes: &[AxisType],
    axis_rect: ScreenRect,
    center: ScreenPoint,
    factor: f64,
) {
    for kind in axes {
        let axis = plot.axis_mut(*kind);
        let Some(transform) = AxisTransform::for_axis(*kind, axis.range(), axis_rect) else {
            continue;
        };
        let pixel = if kind.is_horizontal() {
            center.x
        } else {
            center.y
        };
        axis.scale_range(factor, transform.pixel_to_coord(pixel));
    }
}

/// Zoom factor for a vertical wheel delta in pixels.
///
/// Every [`WHEEL_STEP_PIXELS`] scrolled up multiplies the ranges by `base`.
pub fn wheel_zoom_factor(base: f64, delta_y: f32) -> f64 {
    let steps = -(delta_y / WHEEL_STEP_PIXELS) as f64;
    base.powf(steps).clamp(0.01, 100.0)
}

fn along(kind: AxisType, from: ScreenPoint, to: ScreenPoint) -> (f32, f32) {
    if kind.is_horizontal() {
        (from.x, to.x)
    } else {
        (from.y, to.y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::axis::AxisParts;
    use crate::demo::demo_plot;
    use crate::range::Range;

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    #[test]
    fn backbone_order_is_bottom_left_top_right() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Right)
            .set_selected_parts(AxisParts::BACKBONE);
        plot.axis_mut(AxisType::Left)
            .set_selected_parts(AxisParts::BACKBONE);
        assert_eq!(resolve_gesture_axes(&plot).as_slice(), [AxisType::Left]);
    }

    #[test]
    fn selected_label_does_not_count() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Top).set_selected_parts(AxisParts::LABEL);
        assert_eq!(
            resolve_gesture_axes(&plot).as_slice(),
            [AxisType::Bottom, AxisType::Left]
        );
    }

    #[test]
    fn axis_backbone_beats_selected_graph() {
        let mut plot = demo_plot(&mut StdRng::seed_from_u64(11)).unwrap();
        let graph = plot.graph_mut(3).unwrap();
        let full = graph.data_range();
        graph.set_selection(Some(full));
        assert_eq!(
            resolve_gesture_axes(&plot).as_slice(),
            [AxisType::Top, AxisType::Right]
        );

        plot.axis_mut(AxisType::Bottom)
            .set_selected_parts(AxisParts::BACKBONE);
        assert_eq!(resolve_gesture_axes(&plot).as_slice(), [AxisType::Bottom]);

        prepare_gesture(&mut plot, Gesture::Drag);
        prepare_gesture(&mut plot, Gesture::Zoom);
        assert_eq!(plot.range_drag_axes(), [AxisType::Bottom]);
        assert_eq!(plot.range_zoom_axes(), [AxisType::Bottom]);
    }

    #[test]
    fn prepare_writes_only_the_requested_binding() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Top)
            .set_selected_parts(AxisParts::BACKBONE);
        prepare_gesture(&mut plot, Gesture::Zoom);
        assert_eq!(plot.range_zoom_axes(), [AxisType::Top]);
        assert_eq!(plot.range_drag_axes(), [AxisType::Bottom, AxisType::Left]);
    }

    #[test]
    fn pan_moves_ranges_against_pointer() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Bottom).set_range(Range::new(0.0, 10.0));
        plot.axis_mut(AxisType::Left).set_range(Range::new(0.0, 10.0));
        pan_axes(
            &mut plot,
            &[AxisType::Bottom, AxisType::Left],
            rect(),
            ScreenPoint::new(50.0, 50.0),
            ScreenPoint::new(60.0, 40.0),
        );
        let bottom = plot.axis(AxisType::Bottom).range();
        let left = plot.axis(AxisType::Left).range();
        assert_relative_eq!(bottom.lower, -1.0, epsilon = 1e-9);
        assert_relative_eq!(left.lower, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn pan_leaves_other_axes_alone() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Left).set_range(Range::new(0.0, 10.0));
        pan_axes(
            &mut plot,
            &[AxisType::Bottom],
            rect(),
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(30.0, 30.0),
        );
        assert_eq!(plot.axis(AxisType::Left).range(), Range::new(0.0, 10.0));
    }

    #[test]
    fn zoom_keeps_coordinate_under_cursor() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Bottom).set_range(Range::new(0.0, 10.0));
        zoom_axes(
            &mut plot,
            &[AxisType::Bottom],
            rect(),
            ScreenPoint::new(20.0, 0.0),
            0.5,
        );
        let range = plot.axis(AxisType::Bottom).range();
        assert_relative_eq!(range.lower, 1.0, epsilon = 1e-9);
        assert_relative_eq!(range.upper, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn wheel_up_zooms_in() {
        assert_relative_eq!(wheel_zoom_factor(0.85, -120.0), 0.85);
        assert_relative_eq!(wheel_zoom_factor(0.85, 240.0), 1.0 / (0.85 * 0.85));
    }
}
