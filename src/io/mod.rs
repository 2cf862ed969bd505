//! Input/output helpers.
//!
//! - PitchTier text ingest, both layouts (`ingest`)
//! - PitchTier text export, short layout (`export`)
//! - dense frame tracks as JSON or plain text (`frames`)

pub mod export;
pub mod frames;
pub mod ingest;

pub use export::*;
pub use frames::*;
pub use ingest::*;
