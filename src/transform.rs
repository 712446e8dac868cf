//! Coordinate transforms between axis coordinates and screen pixels.

use crate::axis::AxisType;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::graph::Graph;
use crate::plot::Plot;
use crate::range::Range;

const MIN_SPAN: f64 = 1e-12;

/// Linear mapping between one axis' range and a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    range: Range,
    pixel_lower: f32,
    pixel_upper: f32,
}

impl AxisTransform {
    /// Map `range.lower` to `pixel_lower` and `range.upper` to `pixel_upper`.
    pub fn new(range: Range, pixel_lower: f32, pixel_upper: f32) -> Option<Self> {
        if !range.is_finite() || (pixel_upper - pixel_lower).abs() < f32::EPSILON {
            return None;
        }
        Some(Self {
            range: range.with_min_size(MIN_SPAN),
            pixel_lower,
            pixel_upper,
        })
    }

    /// Transform for an axis laid along the edge of `axis_rect`.
    ///
    /// Horizontal axes grow to the right, vertical axes grow upward.
    pub fn for_axis(kind: AxisType, range: Range, axis_rect: ScreenRect) -> Option<Self> {
        if kind.is_horizontal() {
            Self::new(range, axis_rect.min.x, axis_rect.max.x)
        } else {
            Self::new(range, axis_rect.max.y, axis_rect.min.y)
        }
    }

    /// Map an axis coordinate to a pixel position along the axis.
    pub fn coord_to_pixel(&self, value: f64) -> f32 {
        let norm = (value - self.range.lower) / self.range.size();
        let span = (self.pixel_upper - self.pixel_lower) as f64;
        (self.pixel_lower as f64 + norm * span) as f32
    }

    /// Map a pixel position along the axis to an axis coordinate.
    pub fn pixel_to_coord(&self, pixel: f32) -> f64 {
        let span = (self.pixel_upper - self.pixel_lower) as f64;
        let norm = (pixel - self.pixel_lower) as f64 / span;
        self.range.lower + norm * self.range.size()
    }
}

/// Transform for one graph: key and value axes combined into screen points.
///
/// The key axis may be vertical, in which case keys map to y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphTransform {
    key: AxisTransform,
    value: AxisTransform,
    key_horizontal: bool,
}

impl GraphTransform {
    /// Build the transform for `graph` inside `axis_rect`.
    pub fn new(plot: &Plot, graph: &Graph, axis_rect: ScreenRect) -> Option<Self> {
        let key_kind = graph.key_axis();
        let value_kind = graph.value_axis();
        if key_kind.is_horizontal() == value_kind.is_horizontal() {
            return None;
        }
        Some(Self {
            key: AxisTransform::for_axis(key_kind, plot.axis(key_kind).range(), axis_rect)?,
            value: AxisTransform::for_axis(value_kind, plot.axis(value_kind).range(), axis_rect)?,
            key_horizontal: key_kind.is_horizontal(),
        })
    }

    /// Map a data point to the screen.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        let key = self.key.coord_to_pixel(point.key);
        let value = self.value.coord_to_pixel(point.value);
        if self.key_horizontal {
            ScreenPoint::new(key, value)
        } else {
            ScreenPoint::new(value, key)
        }
    }

    /// Map a screen point back to data coordinates.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let (key_pixel, value_pixel) = if self.key_horizontal {
            (point.x, point.y)
        } else {
            (point.y, point.x)
        };
        Point::new(
            self.key.pixel_to_coord(key_pixel),
            self.value.pixel_to_coord(value_pixel),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0))
    }

    #[test]
    fn vertical_axis_grows_upward() {
        let transform =
            AxisTransform::for_axis(AxisType::Left, Range::new(0.0, 10.0), rect()).unwrap();
        assert_relative_eq!(transform.coord_to_pixel(0.0), 100.0);
        assert_relative_eq!(transform.coord_to_pixel(10.0), 0.0);
        assert_relative_eq!(transform.pixel_to_coord(25.0), 7.5);
    }

    #[test]
    fn vertical_key_axis_maps_keys_to_y() {
        let mut plot = Plot::new();
        plot.axis_mut(AxisType::Left).set_range(Range::new(0.0, 10.0));
        plot.axis_mut(AxisType::Bottom).set_range(Range::new(0.0, 1.0));
        let id = plot.add_graph(AxisType::Left, AxisType::Bottom).unwrap().id();
        let graph = plot.graph_by_id(id).unwrap();
        let transform = GraphTransform::new(&plot, graph, rect()).unwrap();
        let screen = transform.data_to_screen(Point::new(5.0, 0.25));
        assert_relative_eq!(screen.x, 25.0);
        assert_relative_eq!(screen.y, 50.0);
        let back = transform.screen_to_data(screen);
        assert_relative_eq!(back.key, 5.0, epsilon = 1e-6);
        assert_relative_eq!(back.value, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_pixel_span_is_rejected() {
        assert!(AxisTransform::new(Range::new(0.0, 1.0), 5.0, 5.0).is_none());
    }
}
