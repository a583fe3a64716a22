//! Thumb values: the public value shape, bounds arithmetic and neighbor ordering.

use serde::{Deserialize, Serialize};

/// A slider value as seen by callers: one number, or one per thumb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliderValue {
    /// Single-thumb slider
    Single(f64),
    /// Multi-thumb slider, ordered by thumb index
    Multiple(Vec<f64>),
}

impl SliderValue {
    /// Values as a slice, one per thumb.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multiple(vs) => vs,
        }
    }

    /// Number of thumbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether there are no thumbs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Value of the thumb at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.as_slice().get(index).copied()
    }

    /// Whether this is the single-thumb shape.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self::Single(0.0)
    }
}

impl From<f64> for SliderValue {
    fn from(value: f64) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<f64>> for SliderValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Multiple(values)
    }
}

/// Decimal places kept after stepping.
const ALIGN_PRECISION: f64 = 1e5;

/// Float noise accepted when comparing against the step grid.
const GRID_TOLERANCE: f64 = 1e-6;

fn round5(value: f64) -> f64 {
    (value * ALIGN_PRECISION).round() / ALIGN_PRECISION
}

/// Range and granularity of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBounds {
    /// Lowest value
    pub min: f64,
    /// Highest value
    pub max: f64,
    /// Granularity, measured from `min`
    pub step: f64,
}

impl ValueBounds {
    /// Create bounds. Callers validate `step > 0` and `min <= max`.
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]`.
    #[must_use]
    pub fn trim(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Round to the nearest whole step above `min`, keeping five decimals.
    ///
    /// Never lands above `max`: a value that would round up past an off-grid
    /// `max` takes the step below instead.
    #[must_use]
    pub fn align(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let aligned = round5(steps.mul_add(self.step, self.min));
        if aligned > self.max + GRID_TOLERANCE {
            round5(aligned - self.step)
        } else {
            aligned
        }
    }

    /// Highest value on the step grid.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.align(self.max)
    }

    /// Whether `value` is a whole number of steps above `min`.
    #[must_use]
    pub fn on_grid(&self, value: f64) -> bool {
        (self.align(value) - value).abs() < GRID_TOLERANCE
    }

    /// [`trim`](Self::trim) then [`align`](Self::align).
    #[must_use]
    pub fn trim_align(&self, value: f64) -> f64 {
        self.align(self.trim(value))
    }

    /// Whether `value` is in range and on the step grid.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max && self.on_grid(value)
    }

    /// Position of `value` in the range, from 0.0 to 1.0.
    #[must_use]
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    /// Inverse of [`ratio`](Self::ratio).
    #[must_use]
    pub fn at_ratio(&self, ratio: f64) -> f64 {
        ratio.clamp(0.0, 1.0).mul_add(self.max - self.min, self.min)
    }
}

/// How a moving thumb interacts with its neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborOptions {
    /// Lowest value any thumb may take
    pub min: f64,
    /// Highest value any thumb may take
    pub max: f64,
    /// Minimum gap between adjacent thumbs
    pub min_distance: f64,
    /// Push neighbors instead of stopping at them
    pub pearling: bool,
}

/// Place `candidate` at `index` and return the resulting values.
///
/// Without pearling the candidate stops `min_distance` short of its
/// neighbors. With pearling it moves freely within the room left for the
/// other thumbs, and neighbors are pushed to keep every gap.
///
/// The result is non-decreasing and within `[min, max]` when `values` is.
#[must_use]
pub fn clamp_against_neighbors(
    index: usize,
    candidate: f64,
    values: &[f64],
    opts: &NeighborOptions,
) -> Vec<f64> {
    let mut out = values.to_vec();
    let n = out.len();
    if index >= n || candidate.is_nan() {
        return out;
    }
    let gap = opts.min_distance;

    if opts.pearling {
        let lo = (index as f64).mul_add(gap, opts.min);
        let hi = ((n - 1 - index) as f64).mul_add(-gap, opts.max);
        out[index] = candidate.max(lo).min(hi.max(lo));
        for i in index + 1..n {
            let floor = out[i - 1] + gap;
            if out[i] >= floor {
                break;
            }
            out[i] = floor;
        }
        for i in (0..index).rev() {
            let ceil = out[i + 1] - gap;
            if out[i] <= ceil {
                break;
            }
            out[i] = ceil;
        }
    } else {
        let lo = if index > 0 {
            (out[index - 1] + gap).max(opts.min)
        } else {
            opts.min
        };
        let hi = if index + 1 < n {
            (out[index + 1] - gap).min(opts.max)
        } else {
            opts.max
        };
        if lo <= hi {
            out[index] = candidate.max(lo).min(hi);
        }
    }
    out
}

/// The committed thumb values of a slider.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSet {
    values: Vec<f64>,
    single: bool,
}

impl ValueSet {
    /// Build from a caller-supplied value, sorting, trimming, aligning and
    /// spreading thumbs `min_distance` apart.
    ///
    /// The flag is true when any input value had to change.
    #[must_use]
    pub fn normalized(value: &SliderValue, bounds: &ValueBounds, min_distance: f64) -> (Self, bool) {
        let input = value.as_slice();
        let mut values: Vec<f64> = input.iter().map(|v| bounds.trim_align(*v)).collect();
        values.sort_by(f64::total_cmp);

        for i in 1..values.len() {
            let floor = values[i - 1] + min_distance;
            if values[i] < floor {
                values[i] = floor;
            }
        }
        if let Some(last) = values.last_mut() {
            *last = last.min(bounds.top());
        }
        for i in (0..values.len().saturating_sub(1)).rev() {
            let ceil = values[i + 1] - min_distance;
            if values[i] > ceil {
                values[i] = ceil;
            }
        }

        let adjusted = values.len() != input.len()
            || values.iter().zip(input).any(|(a, b)| (a - b).abs() > f64::EPSILON);
        (
            Self {
                values,
                single: value.is_single(),
            },
            adjusted,
        )
    }

    /// Values, one per thumb.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of thumbs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no thumbs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the thumb at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Replace all values. The caller keeps them ordered.
    pub fn replace(&mut self, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.values.len());
        self.values = values;
    }

    /// The public shape, matching how the slider was configured.
    #[must_use]
    pub fn to_slider_value(&self) -> SliderValue {
        match (self.single, self.values.first()) {
            (true, Some(v)) => SliderValue::Single(*v),
            _ => SliderValue::Multiple(self.values.clone()),
        }
    }

    /// Index of the thumb nearest to `target`.
    ///
    /// Among thumbs stacked on the same value, a press above the stack picks
    /// the last one and a press at or below it picks the first.
    #[must_use]
    pub fn closest(&self, target: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, v) in self.values.iter().enumerate() {
            let distance = (v - target).abs();
            let tie = (distance - best_distance).abs() < f64::EPSILON;
            if (distance < best_distance && !tie) || (tie && target > *v) {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    /// Whether values are on the grid and gapped by `min_distance`.
    #[must_use]
    pub fn check(&self, bounds: &ValueBounds, min_distance: f64) -> Result<(), String> {
        if self.values.is_empty() {
            return Err("no thumbs".into());
        }
        for (i, v) in self.values.iter().enumerate() {
            if *v < bounds.min || *v > bounds.max {
                return Err(format!("thumb {i} value {v} outside [{}, {}]", bounds.min, bounds.max));
            }
            if !bounds.on_grid(*v) {
                return Err(format!("thumb {i} value {v} is off the {} step grid", bounds.step));
            }
        }
        for (i, pair) in self.values.windows(2).enumerate() {
            if pair[1] - pair[0] < min_distance - 1e-9 {
                return Err(format!(
                    "thumbs {i} and {} closer than {min_distance}: {} and {}",
                    i + 1,
                    pair[0],
                    pair[1]
                ));
            }
        }
        Ok(())
    }
}
