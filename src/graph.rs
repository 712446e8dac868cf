//! Graphs (data series) and their styling.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::axis::AxisType;
use crate::error::{PlotError, PlotResult};
use crate::geom::Point;
use crate::render::Color;

static GRAPH_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        Self(GRAPH_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How consecutive data points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// No line, only scatter markers.
    None,
    /// Straight lines between points.
    #[default]
    Line,
    /// Steps holding the left point's value.
    StepLeft,
    /// Steps taking the right point's value.
    StepRight,
    /// Steps switching halfway between keys.
    StepCenter,
    /// Vertical impulses from zero to each point.
    Impulse,
}

impl LineStyle {
    /// Every style that actually draws a line.
    pub const DRAWN: [LineStyle; 5] = [
        Self::Line,
        Self::StepLeft,
        Self::StepRight,
        Self::StepCenter,
        Self::Impulse,
    ];
}

/// Scatter marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterShape {
    Dot,
    Cross,
    Plus,
    Circle,
    Disc,
    Square,
    Diamond,
    Star,
    Triangle,
    TriangleInverted,
    CrossSquare,
    PlusSquare,
    CrossCircle,
    PlusCircle,
}

impl ScatterShape {
    /// All shapes.
    pub const ALL: [ScatterShape; 14] = [
        Self::Dot,
        Self::Cross,
        Self::Plus,
        Self::Circle,
        Self::Disc,
        Self::Square,
        Self::Diamond,
        Self::Star,
        Self::Triangle,
        Self::TriangleInverted,
        Self::CrossSquare,
        Self::PlusSquare,
        Self::CrossCircle,
        Self::PlusCircle,
    ];
}

/// Scatter marker styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterStyle {
    /// Marker shape.
    pub shape: ScatterShape,
    /// Marker size in pixels.
    pub size: f32,
    /// Outline color; the graph pen color when `None`.
    pub pen: Option<Color>,
    /// Fill color for closed shapes.
    pub brush: Option<Color>,
}

impl ScatterStyle {
    /// Marker using the graph pen.
    pub fn new(shape: ScatterShape, size: f32) -> Self {
        Self {
            shape,
            size,
            pen: None,
            brush: None,
        }
    }

    /// Marker with explicit outline and fill colors.
    pub fn with_colors(shape: ScatterShape, size: f32, pen: Color, brush: Color) -> Self {
        Self {
            shape,
            size,
            pen: Some(pen),
            brush: Some(brush),
        }
    }
}

/// Pen dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Dotted line.
    Dot,
}

/// Pen used for lines and default marker outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Dash pattern.
    pub style: PenStyle,
}

impl Pen {
    /// Solid one pixel pen.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            width: 1.0,
            style: PenStyle::Solid,
        }
    }

    /// Replace the width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Replace the dash pattern.
    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Color::BLUE)
    }
}

/// Half-open range of data indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRange {
    /// First index.
    pub begin: usize,
    /// One past the last index.
    pub end: usize,
}

impl DataRange {
    /// Create a data range.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Check whether the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A plotted data series bound to a key axis and a value axis.
#[derive(Debug, Clone)]
pub struct Graph {
    id: GraphId,
    name: String,
    data: Vec<Point>,
    key_axis: AxisType,
    value_axis: AxisType,
    line_style: LineStyle,
    scatter: Option<ScatterStyle>,
    pen: Pen,
    selection: Option<DataRange>,
}

impl Graph {
    pub(crate) fn new(key_axis: AxisType, value_axis: AxisType) -> Self {
        Self {
            id: GraphId::next(),
            name: String::new(),
            data: Vec::new(),
            key_axis,
            value_axis,
            line_style: LineStyle::default(),
            scatter: None,
            pen: Pen::default(),
            selection: None,
        }
    }

    /// Access the graph identifier.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Access the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the graph name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Axis supplying the key coordinate.
    pub fn key_axis(&self) -> AxisType {
        self.key_axis
    }

    /// Axis supplying the value coordinate.
    pub fn value_axis(&self) -> AxisType {
        self.value_axis
    }

    /// Access the data points.
    pub fn data(&self) -> &[Point] {
        &self.data
    }

    /// Replace the data from parallel key and value vectors.
    ///
    /// Any selection is dropped since indices no longer refer to the same points.
    pub fn set_data(&mut self, keys: &[f64], values: &[f64]) -> PlotResult<()> {
        if keys.len() != values.len() {
            return Err(PlotError::DataLengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        self.data = keys
            .iter()
            .zip(values)
            .map(|(key, value)| Point::new(*key, *value))
            .collect();
        self.selection = None;
        Ok(())
    }

    /// Value of the data point at `index`.
    pub fn main_value(&self, index: usize) -> Option<f64> {
        self.data.get(index).map(|point| point.value)
    }

    /// The range covering every data point.
    pub fn data_range(&self) -> DataRange {
        DataRange::new(0, self.data.len())
    }

    /// Access the line style.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Replace the line style.
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    /// Access the scatter style.
    pub fn scatter(&self) -> Option<ScatterStyle> {
        self.scatter
    }

    /// Replace the scatter style.
    pub fn set_scatter(&mut self, scatter: Option<ScatterStyle>) {
        self.scatter = scatter;
    }

    /// Access the pen.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Replace the pen.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    /// Selected data range, if any.
    pub fn selection(&self) -> Option<DataRange> {
        self.selection
    }

    /// Check whether any data is selected.
    pub fn is_selected(&self) -> bool {
        self.selection.is_some_and(|range| !range.is_empty())
    }

    /// Replace the selection. Empty ranges clear it.
    pub fn set_selection(&mut self, selection: Option<DataRange>) {
        self.selection = selection.filter(|range| !range.is_empty());
    }
}
