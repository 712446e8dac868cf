//! Axis ranges.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut lower: f64, mut upper: f64) -> Self {
        if lower > upper {
            std::mem::swap(&mut lower, &mut upper);
        }
        Self { lower, upper }
    }

    /// Span of the range.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.size() > 0.0
    }

    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Shift both bounds by `diff`.
    pub fn moved(&self, diff: f64) -> Self {
        Self {
            lower: self.lower + diff,
            upper: self.upper + diff,
        }
    }

    /// Scale the range around `center` by `factor`.
    ///
    /// A factor below one zooms in, above one zooms out.
    pub fn scaled(&self, factor: f64, center: f64) -> Self {
        Self::new(
            center + (self.lower - center) * factor,
            center + (self.upper - center) * factor,
        )
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_size(&self, min_size: f64) -> Self {
        if self.size() >= min_size {
            return *self;
        }
        let center = self.center();
        let half = min_size * 0.5;
        Self {
            lower: center - half,
            upper: center + half,
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, 5.0)
    }
}
