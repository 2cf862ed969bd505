//! Shared domain types.
//!
//! - `ControlPoint`: one `(time, frequency)` knot of a pitch contour
//! - `PitchTier`: the knots plus the nominal span `[xmin, xmax]`
//! - `Tier`: the narrow interface other pipeline stages see
//! - `RunConfig`: resolved CLI options

use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// A single `(time, frequency)` sample on a pitch contour.
///
/// Equality is bit-for-bit on both fields so that `Eq` and `Hash` agree.
#[derive(Debug, Clone, Copy)]
pub struct ControlPoint {
    time: f64,
    frequency: f64,
}

impl ControlPoint {
    pub fn new(time: f64, frequency: f64) -> Self {
        Self { time, frequency }
    }

    /// Seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Hertz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl PartialEq for ControlPoint {
    fn eq(&self, other: &Self) -> bool {
        self.time.to_bits() == other.time.to_bits()
            && self.frequency.to_bits() == other.frequency.to_bits()
    }
}

impl Eq for ControlPoint {}

impl Hash for ControlPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.to_bits().hash(state);
        self.frequency.to_bits().hash(state);
    }
}

/// Common accessors for any annotation tier.
pub trait Tier {
    /// Tier name, if the format carries one.
    fn name(&self) -> Option<&str>;
    fn xmin(&self) -> f64;
    fn xmax(&self) -> f64;
}

/// A sparse pitch contour.
///
/// The point count is always `points().len()`; there is no separately stored
/// count that could drift from the points actually held.
#[derive(Debug, Clone)]
pub struct PitchTier {
    xmin: f64,
    xmax: f64,
    points: Vec<ControlPoint>,
}

impl PitchTier {
    /// Build a tier directly. Points are expected in non-decreasing time order
    /// but this is not checked.
    pub fn new(xmin: f64, xmax: f64, points: Vec<ControlPoint>) -> Self {
        Self { xmin, xmax, points }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Frequency at `time`, or NaN where the contour is undefined.
    pub fn frequency_at(&self, time: f64) -> f64 {
        crate::math::frequency_at(&self.points, time)
    }

    /// Resample to a dense frame array from `xmin` to `xmax`.
    pub fn to_frames(&self, step: f64) -> Vec<f64> {
        crate::math::to_frames(&self.points, self.xmin, self.xmax, step)
    }

    /// Build a tier from a dense frame array (NaN = no pitch).
    pub fn from_frames(xmin: f64, frames: &[f64], step: f64) -> Self {
        let xmax = crate::math::frames_xmax(xmin, frames.len(), step);
        Self {
            xmin,
            xmax,
            points: crate::math::frames_to_points(xmin, frames, step),
        }
    }

    /// Replace all points with the defined entries of `frames`, anchored at this
    /// tier's `xmin`. The span is left as is.
    pub fn import_frames(&mut self, frames: &[f64], step: f64) {
        self.points = crate::math::frames_to_points(self.xmin, frames, step);
    }
}

impl Tier for PitchTier {
    fn name(&self) -> Option<&str> {
        None
    }

    fn xmin(&self) -> f64 {
        self.xmin
    }

    fn xmax(&self) -> f64 {
        self.xmax
    }
}

impl PartialEq for PitchTier {
    fn eq(&self, other: &Self) -> bool {
        self.xmin.to_bits() == other.xmin.to_bits()
            && self.xmax.to_bits() == other.xmax.to_bits()
            && self.points == other.points
    }
}

impl Eq for PitchTier {}

impl Hash for PitchTier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.xmin.to_bits().hash(state);
        self.xmax.to_bits().hash(state);
        self.points.len().hash(state);
        for p in &self.points {
            p.hash(state);
        }
    }
}

/// A run's configuration as understood by the binary.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    /// Frame step in seconds.
    pub step: f64,
    pub output: Option<PathBuf>,
    pub json_output: Option<PathBuf>,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            step: 0.01,
            output: None,
            json_output: None,
            plot_width: 80,
            plot_height: 20,
        }
    }
}
