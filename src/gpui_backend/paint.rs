use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, FontWeight, PathBuilder, Pixels,
    TextRun, Window, font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::graph::ScatterShape;
use crate::layout::LINE_HEIGHT_FACTOR;
use crate::render::{Color, LineSegment, MarkerStyle, RectStyle, RenderCommand, Stroke, TextStyle};

use super::frame::PlotFrame;
use super::text::FONT_FAMILY;

const MARKER_PEN_WIDTH: f32 = 1.0;

pub(crate) fn paint_frame(frame: &PlotFrame, window: &mut Window, cx: &mut App) {
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in frame.render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: to_bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::LineSegments { segments, stroke } => {
                with_clip(window, &clip_stack, |window| {
                    paint_lines(window, segments, *stroke);
                });
            }
            RenderCommand::Markers { points, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_markers(window, points, *style);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_rect(window, *rect, *style);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_text(window, cx, *position, text, style);
                });
            }
        }
    }
}

fn paint_lines(window: &mut Window, segments: &[LineSegment], stroke: Stroke) {
    if segments.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(stroke.width.max(0.5)));
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(stroke.color));
    }
}

fn paint_markers(window: &mut Window, points: &[ScreenPoint], style: MarkerStyle) {
    if points.is_empty() {
        return;
    }
    let size = style.size.max(2.0);
    let half = size * 0.5;
    let fill = style.brush.unwrap_or(Color::TRANSPARENT);
    let mut outline = Vec::new();
    for pt in points {
        match style.shape {
            ScatterShape::Dot => {
                paint_marker_quad(window, *pt, 1.0, 1.0, style.pen, style.pen);
            }
            ScatterShape::Disc => {
                paint_marker_quad(window, *pt, half, half, style.pen, style.pen);
            }
            ScatterShape::Circle => {
                paint_marker_quad(window, *pt, half, half, fill, style.pen);
            }
            ScatterShape::Square => {
                paint_marker_quad(window, *pt, half, 0.0, fill, style.pen);
            }
            ScatterShape::CrossSquare => {
                paint_marker_quad(window, *pt, half, 0.0, fill, style.pen);
                push_cross(&mut outline, *pt, half);
            }
            ScatterShape::PlusSquare => {
                paint_marker_quad(window, *pt, half, 0.0, fill, style.pen);
                push_plus(&mut outline, *pt, half);
            }
            ScatterShape::CrossCircle => {
                paint_marker_quad(window, *pt, half, half, fill, style.pen);
                push_cross(&mut outline, *pt, half * std::f32::consts::FRAC_1_SQRT_2);
            }
            ScatterShape::PlusCircle => {
                paint_marker_quad(window, *pt, half, half, fill, style.pen);
                push_plus(&mut outline, *pt, half);
            }
            ScatterShape::Cross => push_cross(&mut outline, *pt, half),
            ScatterShape::Plus => push_plus(&mut outline, *pt, half),
            ScatterShape::Star => {
                push_plus(&mut outline, *pt, half);
                push_cross(&mut outline, *pt, half * std::f32::consts::FRAC_1_SQRT_2);
            }
            ScatterShape::Diamond => push_polygon(
                &mut outline,
                &[(0.0, -half), (half, 0.0), (0.0, half), (-half, 0.0)],
                *pt,
            ),
            ScatterShape::Triangle => push_polygon(
                &mut outline,
                &[(0.0, -half), (half, half), (-half, half)],
                *pt,
            ),
            ScatterShape::TriangleInverted => push_polygon(
                &mut outline,
                &[(0.0, half), (half, -half), (-half, -half)],
                *pt,
            ),
        }
    }
    paint_lines(window, &outline, Stroke::new(style.pen, MARKER_PEN_WIDTH));
}

fn paint_marker_quad(
    window: &mut Window,
    center: ScreenPoint,
    half: f32,
    radius: f32,
    fill: Color,
    pen: Color,
) {
    let bounds = Bounds::from_corners(
        point(px(center.x - half), px(center.y - half)),
        point(px(center.x + half), px(center.y + half)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_rgba(fill),
        Edges::all(px(MARKER_PEN_WIDTH)),
        to_rgba(pen),
        BorderStyle::default(),
    ));
}

fn push_cross(out: &mut Vec<LineSegment>, c: ScreenPoint, half: f32) {
    out.push(LineSegment::new(
        ScreenPoint::new(c.x - half, c.y - half),
        ScreenPoint::new(c.x + half, c.y + half),
    ));
    out.push(LineSegment::new(
        ScreenPoint::new(c.x - half, c.y + half),
        ScreenPoint::new(c.x + half, c.y - half),
    ));
}

fn push_plus(out: &mut Vec<LineSegment>, c: ScreenPoint, half: f32) {
    out.push(LineSegment::new(
        ScreenPoint::new(c.x - half, c.y),
        ScreenPoint::new(c.x + half, c.y),
    ));
    out.push(LineSegment::new(
        ScreenPoint::new(c.x, c.y - half),
        ScreenPoint::new(c.x, c.y + half),
    ));
}

fn push_polygon(out: &mut Vec<LineSegment>, corners: &[(f32, f32)], c: ScreenPoint) {
    for (i, (dx, dy)) in corners.iter().enumerate() {
        let (nx, ny) = corners[(i + 1) % corners.len()];
        out.push(LineSegment::new(
            ScreenPoint::new(c.x + dx, c.y + dy),
            ScreenPoint::new(c.x + nx, c.y + ny),
        ));
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    let mut text_font = font(FONT_FAMILY);
    if style.bold {
        text_font.weight = FontWeight::BOLD;
    }
    let line_height = px(style.size * LINE_HEIGHT_FACTOR);
    for (row, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let run = TextRun {
            len: line.len(),
            font: text_font.clone(),
            color: to_hsla(style.color),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped =
            window
                .text_system()
                .shape_line(line.to_string().into(), px(style.size), &[run], None);
        let origin = point(
            px(position.x),
            px(position.y + row as f32 * style.size * LINE_HEIGHT_FACTOR),
        );
        let _ = shaped.paint(origin, line_height, window, cx);
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
