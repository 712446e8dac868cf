//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic and are used by render backends (such as
//! the GPUI backend) to describe how a plot should be drawn.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::graph::{LineStyle, PenStyle, ScatterShape};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Create a color from 8-bit channels.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Line stroke used for segment batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Stroke {
    /// Create a stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Marker styling for scatter points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker shape.
    pub shape: ScatterShape,
    /// Marker size in pixels.
    pub size: f32,
    /// Outline color.
    pub pen: Color,
    /// Fill color for closed shapes.
    pub brush: Option<Color>,
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Regular text of the given size and color.
    pub fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            bold: false,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    fn length(&self) -> f32 {
        self.start.distance_sq(self.end).sqrt()
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Stroke for every segment.
        stroke: Stroke,
    },
    /// Draw scatter markers centered on the points.
    Markers {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text; the position is the top-left corner of the first line.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Expand graph data into data-space segments for the given line style.
///
/// Steps are built along the key direction, impulses drop to value zero.
pub fn line_style_segments(style: LineStyle, points: &[Point]) -> Vec<(Point, Point)> {
    let mut out = Vec::new();
    match style {
        LineStyle::None => {}
        LineStyle::Line => {
            for pair in points.windows(2) {
                out.push((pair[0], pair[1]));
            }
        }
        LineStyle::StepLeft => {
            for pair in points.windows(2) {
                let corner = Point::new(pair[1].key, pair[0].value);
                out.push((pair[0], corner));
                out.push((corner, pair[1]));
            }
        }
        LineStyle::StepRight => {
            for pair in points.windows(2) {
                let corner = Point::new(pair[0].key, pair[1].value);
                out.push((pair[0], corner));
                out.push((corner, pair[1]));
            }
        }
        LineStyle::StepCenter => {
            for pair in points.windows(2) {
                let mid = (pair[0].key + pair[1].key) * 0.5;
                let first = Point::new(mid, pair[0].value);
                let second = Point::new(mid, pair[1].value);
                out.push((pair[0], first));
                out.push((first, second));
                out.push((second, pair[1]));
            }
        }
        LineStyle::Impulse => {
            for point in points {
                out.push((Point::new(point.key, 0.0), *point));
            }
        }
    }
    out
}

/// Split segments into dashes according to the pen style.
///
/// Dot pens draw one pen width on and two pen widths off.
pub fn dash_segments(segments: Vec<LineSegment>, pen: PenStyle, width: f32) -> Vec<LineSegment> {
    let (on, off) = match pen {
        PenStyle::Solid => return segments,
        PenStyle::Dot => (width.max(1.0), width.max(1.0) * 2.0),
    };
    let mut out = Vec::new();
    for segment in segments {
        let length = segment.length();
        if length <= f32::EPSILON {
            continue;
        }
        let dir_x = (segment.end.x - segment.start.x) / length;
        let dir_y = (segment.end.y - segment.start.y) / length;
        let mut offset = 0.0;
        while offset < length {
            let end = (offset + on).min(length);
            out.push(LineSegment::new(
                ScreenPoint::new(
                    segment.start.x + dir_x * offset,
                    segment.start.y + dir_y * offset,
                ),
                ScreenPoint::new(segment.start.x + dir_x * end, segment.start.y + dir_y * end),
            ));
            offset += on + off;
        }
    }
    out
}

/// Keep only the points inside the clip rectangle.
pub fn clip_points(points: &[ScreenPoint], clip: ScreenRect, out: &mut Vec<ScreenPoint>) {
    out.clear();
    out.extend(points.iter().copied().filter(|point| clip.contains(*point)));
}

/// Clip a segment to a rectangle (Liang-Barsky).
pub fn clip_segment(
    start: ScreenPoint,
    end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let mut enter = 0.0_f32;
    let mut exit = 1.0_f32;
    let edges = [
        (-dx, start.x - rect.min.x),
        (dx, rect.max.x - start.x),
        (-dy, start.y - rect.min.y),
        (dy, rect.max.y - start.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
        if enter > exit {
            return None;
        }
    }
    let at = |t: f32| ScreenPoint::new(start.x + dx * t, start.y + dy * t);
    Some((at(enter), at(exit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_segment_inside() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let start = ScreenPoint::new(2.0, 2.0);
        let end = ScreenPoint::new(8.0, 8.0);
        let clipped = clip_segment(start, end, rect).expect("segment should clip");
        assert_eq!(clipped.0, start);
        assert_eq!(clipped.1, end);
    }

    #[test]
    fn clip_segment_crossing_edge() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let (start, end) = clip_segment(
            ScreenPoint::new(-5.0, 5.0),
            ScreenPoint::new(5.0, 5.0),
            rect,
        )
        .expect("segment should clip");
        assert_eq!(start, ScreenPoint::new(0.0, 5.0));
        assert_eq!(end, ScreenPoint::new(5.0, 5.0));
    }

    #[test]
    fn step_center_inserts_midpoint_corners() {
        let points = [Point::new(0.0, 1.0), Point::new(2.0, 3.0)];
        let segments = line_style_segments(LineStyle::StepCenter, &points);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].1, Point::new(1.0, 1.0));
        assert_eq!(segments[1].1, Point::new(1.0, 3.0));
        assert_eq!(segments[2].1, Point::new(2.0, 3.0));
    }

    #[test]
    fn impulse_drops_to_zero() {
        let segments = line_style_segments(LineStyle::Impulse, &[Point::new(4.0, -2.0)]);
        assert_eq!(segments, vec![(Point::new(4.0, 0.0), Point::new(4.0, -2.0))]);
    }

    #[test]
    fn none_style_draws_nothing() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert!(line_style_segments(LineStyle::None, &points).is_empty());
    }

    #[test]
    fn dot_pen_splits_segment() {
        let segment = LineSegment::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(12.0, 0.0));
        let dashes = dash_segments(vec![segment], PenStyle::Dot, 2.0);
        // 2 on, 4 off: dashes start at 0, 6
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[1].start, ScreenPoint::new(6.0, 0.0));
        assert_eq!(dashes[1].end, ScreenPoint::new(8.0, 0.0));
    }
}
