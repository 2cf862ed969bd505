//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the control-point model (`ControlPoint`, `PitchTier`)
//! - the `Tier` interface shared with other pipeline stages
//! - resolved run configuration (`RunConfig`)

pub mod types;

pub use types::*;
