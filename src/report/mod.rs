//! Reporting utilities: contour statistics and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::PitchTier;

/// Summary statistics over a tier's control points.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourStats {
    pub n_points: usize,
    pub f_min: f64,
    pub f_max: f64,
    pub f_mean: f64,
    /// First and last control-point times.
    pub t_first: f64,
    pub t_last: f64,
}

impl ContourStats {
    /// Time between the first and last control point.
    pub fn voiced_span(&self) -> f64 {
        self.t_last - self.t_first
    }
}

/// Compute stats over the finite control points, or `None` if there are none.
pub fn compute_stats(tier: &PitchTier) -> Option<ContourStats> {
    let mut f_min = f64::INFINITY;
    let mut f_max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut n = 0usize;

    for p in tier.points().iter().filter(|p| p.frequency().is_finite()) {
        f_min = f_min.min(p.frequency());
        f_max = f_max.max(p.frequency());
        sum += p.frequency();
        n += 1;
    }

    if n == 0 {
        return None;
    }

    let first = tier.points().first()?;
    let last = tier.points().last()?;

    Some(ContourStats {
        n_points: n,
        f_min,
        f_max,
        f_mean: sum / n as f64,
        t_first: first.time(),
        t_last: last.time(),
    })
}
