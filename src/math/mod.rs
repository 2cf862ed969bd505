//! Numeric utilities: contour interpolation and frame resampling.

pub mod interp;

pub use interp::*;
