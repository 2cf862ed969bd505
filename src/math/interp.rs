//! Conversion between sparse control points and dense frames.
//!
//! NaN is the "no pitch" sentinel in both directions:
//!
//! - before the first and after the last control point, `frequency_at` is NaN
//! - NaN frames produce no control point on import
//!
//! Nothing here returns an error.

use crate::domain::ControlPoint;

/// Queries closer than this to a knot return the knot's value unchanged.
pub const KNOT_EPS: f64 = 1e-7;

/// Upper bound on the frames a single resample will produce (1 GiB of `f64`).
pub const MAX_FRAMES: usize = 1 << 27;

/// Linearly interpolated frequency at `time`.
///
/// Points are assumed to be in non-decreasing time order; the first point at or
/// after `time` is used as the right-hand knot.
pub fn frequency_at(points: &[ControlPoint], time: f64) -> f64 {
    let Some(idx) = points.iter().position(|p| time <= p.time()) else {
        return f64::NAN;
    };
    let current = points[idx];

    if (time - current.time()).abs() < KNOT_EPS {
        return current.frequency();
    }
    if idx == 0 {
        return f64::NAN;
    }

    let prev = points[idx - 1];
    let dt = current.time() - prev.time();
    let df = current.frequency() - prev.frequency();
    prev.frequency() + (time - prev.time()) / dt * df
}

/// Number of frames covering `[xmin, xmax]` at `step`.
///
/// Degenerate inputs (non-positive or non-finite step, inverted span) give 0,
/// and so does a request for more than [`MAX_FRAMES`] frames.
pub fn frame_count(xmin: f64, xmax: f64, step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    let n = ((xmax - xmin) / step).floor() + 1.0;
    if n.is_finite() && n > 0.0 && n <= MAX_FRAMES as f64 {
        n as usize
    } else {
        0
    }
}

/// True when `[xmin, xmax]` at `step` needs more than [`MAX_FRAMES`] frames.
pub fn exceeds_frame_limit(xmin: f64, xmax: f64, step: f64) -> bool {
    let n = ((xmax - xmin) / step).floor() + 1.0;
    step > 0.0 && n > MAX_FRAMES as f64
}

/// Sample the contour at `xmin + i * step` for every frame in the span.
pub fn to_frames(points: &[ControlPoint], xmin: f64, xmax: f64, step: f64) -> Vec<f64> {
    let n = frame_count(xmin, xmax, step);
    (0..n)
        .map(|i| frequency_at(points, xmin + i as f64 * step))
        .collect()
}

/// One control point per defined frame, at `xmin + i * step`.
pub fn frames_to_points(xmin: f64, frames: &[f64], step: f64) -> Vec<ControlPoint> {
    frames
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_nan())
        .map(|(i, &f)| ControlPoint::new(xmin + i as f64 * step, f))
        .collect()
}

/// End of the span covered by `len` frames starting at `xmin`.
pub fn frames_xmax(xmin: f64, len: usize, step: f64) -> f64 {
    match len {
        0 => xmin,
        n => xmin + (n - 1) as f64 * step,
    }
}
