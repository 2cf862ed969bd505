//! `pitchtier` library crate.
//!
//! Reads, writes, and resamples Praat `PitchTier` contours:
//!
//! - parse either text layout (`io::ingest`)
//! - write the short layout (`io::export`)
//! - convert between control points and dense frames (`math::interp`)
//!
//! The binary (`ptier`) is a thin wrapper around this library.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;

pub use domain::{ControlPoint, PitchTier, Tier};
pub use error::TierError;
