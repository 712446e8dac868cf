//! Axes, their selectable parts, and tick generation.

use std::fmt;
use std::ops::BitOr;

use crate::range::Range;

/// The four axes around the axis rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    /// Primary key axis below the plot area.
    Bottom,
    /// Primary value axis left of the plot area.
    Left,
    /// Secondary horizontal axis above the plot area.
    Top,
    /// Secondary vertical axis right of the plot area.
    Right,
}

impl AxisType {
    /// All axes in gesture priority order.
    pub const ALL: [AxisType; 4] = [Self::Bottom, Self::Left, Self::Top, Self::Right];

    /// Whether the axis runs left to right.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Right => 3,
        }
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Independently selectable parts of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisPart {
    /// The axis line itself.
    Backbone,
    /// The numbers next to the major ticks.
    TickLabels,
    /// The descriptive label text.
    Label,
}

impl AxisPart {
    fn bit(self) -> u8 {
        match self {
            Self::Backbone => 0b001,
            Self::TickLabels => 0b010,
            Self::Label => 0b100,
        }
    }
}

/// A set of [`AxisPart`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisParts(u8);

impl AxisParts {
    /// No parts.
    pub const NONE: Self = Self(0);
    /// Backbone only.
    pub const BACKBONE: Self = Self(0b001);
    /// Tick labels only.
    pub const TICK_LABELS: Self = Self(0b010);
    /// Label only.
    pub const LABEL: Self = Self(0b100);
    /// Every part.
    pub const ALL: Self = Self(0b111);

    /// Check whether the part is in the set.
    pub fn contains(self, part: AxisPart) -> bool {
        self.0 & part.bit() != 0
    }

    /// Check whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Set or clear a single part.
    pub fn set(&mut self, part: AxisPart, on: bool) {
        if on {
            self.0 |= part.bit();
        } else {
            self.0 &= !part.bit();
        }
    }

    /// The set containing exactly one part.
    pub fn only(part: AxisPart) -> Self {
        Self(part.bit())
    }
}

impl BitOr for AxisParts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<AxisPart> for AxisParts {
    fn from(part: AxisPart) -> Self {
        Self::only(part)
    }
}

/// Tick length inside and outside the axis rect, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLength {
    /// Length reaching into the plot area.
    pub inside: f32,
    /// Length reaching away from the plot area.
    pub outside: f32,
}

impl TickLength {
    /// Create a tick length.
    pub const fn new(inside: f32, outside: f32) -> Self {
        Self { inside, outside }
    }
}

/// Strategy used to place and label ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisTicker {
    /// Decimal steps of 1, 2 or 5 times a power of ten.
    #[default]
    Decimal,
    /// Multiples and binary fractions of π, labelled symbolically.
    Pi,
}

/// A labelled major tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Tick position in axis coordinates.
    pub value: f64,
    /// Tick label.
    pub label: String,
}

/// Major and sub ticks for one axis range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    /// Major ticks with labels.
    pub major: Vec<Tick>,
    /// Sub tick positions between the major ticks.
    pub sub: Vec<f64>,
}

/// One of the four axes of a plot.
#[derive(Debug, Clone)]
pub struct Axis {
    kind: AxisType,
    label: String,
    range: Range,
    visible: bool,
    ticker: AxisTicker,
    tick_length: TickLength,
    sub_tick_length: TickLength,
    selected_parts: AxisParts,
    selectable_parts: AxisParts,
    label_size: f32,
    tick_label_size: f32,
}

impl Axis {
    /// Create an axis with default styling.
    ///
    /// The primary pair (bottom, left) is visible, the secondary pair hidden.
    pub fn new(kind: AxisType) -> Self {
        Self {
            kind,
            label: String::new(),
            range: Range::default(),
            visible: matches!(kind, AxisType::Bottom | AxisType::Left),
            ticker: AxisTicker::default(),
            tick_length: TickLength::new(5.0, 0.0),
            sub_tick_length: TickLength::new(2.0, 0.0),
            selected_parts: AxisParts::NONE,
            selectable_parts: AxisParts::ALL,
            label_size: 13.0,
            tick_label_size: 12.0,
        }
    }

    /// Which side of the axis rect this axis sits on.
    pub fn kind(&self) -> AxisType {
        self.kind
    }

    /// Access the label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Access the visible range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Replace the visible range. Non-finite ranges are ignored.
    pub fn set_range(&mut self, range: Range) {
        if range.is_finite() {
            self.range = range.with_min_size(1e-12);
        }
    }

    /// Shift the visible range by `diff` axis units.
    pub fn move_range(&mut self, diff: f64) {
        self.set_range(self.range.moved(diff));
    }

    /// Scale the visible range around `center`.
    pub fn scale_range(&mut self, factor: f64, center: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.set_range(self.range.scaled(factor, center));
        }
    }

    /// Check axis visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the axis.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Access the ticker.
    pub fn ticker(&self) -> AxisTicker {
        self.ticker
    }

    /// Replace the ticker.
    pub fn set_ticker(&mut self, ticker: AxisTicker) {
        self.ticker = ticker;
    }

    /// Major tick length.
    pub fn tick_length(&self) -> TickLength {
        self.tick_length
    }

    /// Set the major tick length.
    pub fn set_tick_length(&mut self, inside: f32, outside: f32) {
        self.tick_length = TickLength::new(inside, outside);
    }

    /// Sub tick length.
    pub fn sub_tick_length(&self) -> TickLength {
        self.sub_tick_length
    }

    /// Set the sub tick length.
    pub fn set_sub_tick_length(&mut self, inside: f32, outside: f32) {
        self.sub_tick_length = TickLength::new(inside, outside);
    }

    /// Label font size in pixels.
    pub fn label_size(&self) -> f32 {
        self.label_size
    }

    /// Tick label font size in pixels.
    pub fn tick_label_size(&self) -> f32 {
        self.tick_label_size
    }

    /// Currently selected parts.
    pub fn selected_parts(&self) -> AxisParts {
        self.selected_parts
    }

    /// Replace the selected parts.
    ///
    /// Programmatic selection is not limited by [`Axis::selectable_parts`].
    pub fn set_selected_parts(&mut self, parts: AxisParts) {
        self.selected_parts = parts;
    }

    /// Check whether a part is selected.
    pub fn is_selected(&self, part: AxisPart) -> bool {
        self.selected_parts.contains(part)
    }

    /// Parts a click may select.
    pub fn selectable_parts(&self) -> AxisParts {
        self.selectable_parts
    }

    /// Restrict which parts a click may select.
    pub fn set_selectable_parts(&mut self, parts: AxisParts) {
        self.selectable_parts = parts;
    }

    /// Generate ticks for the current range, aiming for `target` major ticks.
    pub fn ticks(&self, target: usize) -> TickSet {
        match self.ticker {
            AxisTicker::Decimal => decimal_ticks(self.range, target),
            AxisTicker::Pi => pi_ticks(self.range, target),
        }
    }
}

fn decimal_ticks(range: Range, target: usize) -> TickSet {
    let Some((step, mantissa)) = nice_step(range.size() / target.max(1) as f64) else {
        return TickSet::default();
    };
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let sub_count = if mantissa == 2.0 { 3 } else { 4 };
    build_ticks(range, step, sub_count, |value| format_decimal(value, decimals))
}

fn pi_ticks(range: Range, target: usize) -> TickSet {
    let pi = std::f64::consts::PI;
    let raw = range.size() / pi / target.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return TickSet::default();
    }
    let step = if raw < 1.0 {
        // binary fractions of pi
        let exponent = (-raw.log2()).round().clamp(0.0, 6.0);
        0.5_f64.powf(exponent)
    } else {
        match nice_step(raw) {
            Some((step, _)) => step,
            None => return TickSet::default(),
        }
    };
    build_ticks(range, step * pi, 1, |value| format_pi(value / pi))
}

fn build_ticks(range: Range, step: f64, sub_count: usize, label: impl Fn(f64) -> String) -> TickSet {
    let mut set = TickSet::default();
    if !range.is_valid() || !step.is_finite() || step <= 0.0 {
        return set;
    }
    let first = (range.lower / step).floor() as i64;
    let last = (range.upper / step).ceil() as i64;
    if last - first > 1000 {
        return set;
    }
    let sub_step = step / (sub_count + 1) as f64;
    for index in first..=last {
        let value = index as f64 * step;
        if range.contains(value) {
            set.major.push(Tick {
                value,
                label: label(value),
            });
        }
        for sub in 1..=sub_count {
            let sub_value = value + sub as f64 * sub_step;
            if range.contains(sub_value) {
                set.sub.push(sub_value);
            }
        }
    }
    set
}

/// Round a raw step to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> Option<(f64, f64)> {
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let mantissa = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    Some((mantissa * magnitude, mantissa))
}

fn format_decimal(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return text.trim_start_matches('-').to_string();
    }
    text
}

fn format_pi(multiple: f64) -> String {
    const DENOMINATOR: i64 = 64;
    let numerator = (multiple * DENOMINATOR as f64).round() as i64;
    if numerator == 0 {
        return "0".to_string();
    }
    let divisor = gcd(numerator.abs(), DENOMINATOR);
    let (num, den) = (numerator / divisor, DENOMINATOR / divisor);
    let sign = if num < 0 { "-" } else { "" };
    let num = num.abs();
    let head = if num == 1 {
        "π".to_string()
    } else {
        format!("{num}π")
    };
    if den == 1 {
        format!("{sign}{head}")
    } else {
        format!("{sign}{head}/{den}")
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parts_set_and_clear() {
        let mut parts = AxisParts::BACKBONE | AxisParts::LABEL;
        assert!(parts.contains(AxisPart::Backbone));
        assert!(!parts.contains(AxisPart::TickLabels));
        parts.set(AxisPart::Backbone, false);
        assert_eq!(parts, AxisParts::LABEL);
    }

    #[test]
    fn programmatic_selection_ignores_selectable_mask() {
        let mut axis = Axis::new(AxisType::Left);
        axis.set_selectable_parts(AxisParts::LABEL);
        axis.set_selected_parts(AxisParts::ALL);
        assert_eq!(axis.selected_parts(), AxisParts::ALL);
    }

    #[test]
    fn secondary_axes_start_hidden() {
        assert!(Axis::new(AxisType::Bottom).is_visible());
        assert!(!Axis::new(AxisType::Right).is_visible());
    }

    #[test]
    fn decimal_ticks_use_nice_steps() {
        let mut axis = Axis::new(AxisType::Bottom);
        axis.set_range(Range::new(0.0, 2.7));
        let ticks = axis.ticks(5);
        let labels: Vec<_> = ticks.major.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, ["0.0", "0.5", "1.0", "1.5", "2.0", "2.5"]);
        assert!(!ticks.sub.is_empty());
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(format_decimal(-0.0001, 2), "0.00");
    }

    #[test]
    fn pi_labels_are_symbolic() {
        assert_eq!(format_pi(0.0), "0");
        assert_eq!(format_pi(1.0), "π");
        assert_eq!(format_pi(0.5), "π/2");
        assert_eq!(format_pi(-0.75), "-3π/4");
        assert_eq!(format_pi(3.0), "3π");
    }

    #[test]
    fn pi_ticker_spans_range() {
        let mut axis = Axis::new(AxisType::Top);
        axis.set_ticker(AxisTicker::Pi);
        axis.set_range(Range::new(0.0, 3.0 * std::f64::consts::PI));
        let ticks = axis.ticks(5);
        let labels: Vec<_> = ticks.major.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, ["0", "π/2", "π", "3π/2", "2π", "5π/2", "3π"]);
    }

    #[test]
    fn scale_range_zooms_around_center() {
        let mut axis = Axis::new(AxisType::Left);
        axis.set_range(Range::new(0.0, 10.0));
        axis.scale_range(0.5, 10.0);
        assert_eq!(axis.range(), Range::new(5.0, 10.0));
    }
}
