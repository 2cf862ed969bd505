//! Read/write dense frame tracks.
//!
//! A frame track is the evenly spaced counterpart of a `PitchTier`:
//! - start time and step (seconds)
//! - one frequency per frame, `null` where there is no pitch
//!
//! JSON has no NaN or infinity, so every non-finite frame travels as `null`
//! and becomes NaN (undefined) on the way in.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::PitchTier;
use crate::error::TierError;

/// Text printed for undefined frames in plain-text dumps.
pub const UNDEFINED: &str = "--undefined--";

/// Decimals for frame times in plain-text dumps (matches the knot tolerance).
const TIME_DECIMALS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTrack {
    pub xmin: f64,
    pub step: f64,
    pub frames: Vec<Option<f64>>,
}

impl FrameTrack {
    /// Resample `tier` at `step` from its `xmin`.
    pub fn from_tier(tier: &PitchTier, step: f64) -> Self {
        Self::from_dense(tier.xmin(), step, &tier.to_frames(step))
    }

    /// Non-finite frames (NaN and both infinities) become `None`.
    pub fn from_dense(xmin: f64, step: f64, frames: &[f64]) -> Self {
        Self {
            xmin,
            step,
            frames: frames.iter().map(|&f| f.is_finite().then_some(f)).collect(),
        }
    }

    /// Frames with NaN for undefined entries.
    pub fn dense(&self) -> Vec<f64> {
        self.frames.iter().map(|f| f.unwrap_or(f64::NAN)).collect()
    }

    /// Build a tier with one control point per defined frame.
    pub fn to_tier(&self) -> PitchTier {
        PitchTier::from_frames(self.xmin, &self.dense(), self.step)
    }

    /// Time of frame `i`.
    pub fn time_at(&self, i: usize) -> f64 {
        self.xmin + i as f64 * self.step
    }

    pub fn defined_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }
}

/// Write a frame track as pretty JSON.
pub fn write_frames_json(path: &Path, track: &FrameTrack) -> Result<(), TierError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, track)?;
    out.flush()?;
    Ok(())
}

/// Read a frame track JSON file.
pub fn read_frames_json(path: &Path) -> Result<FrameTrack, TierError> {
    let file = File::open(path)?;
    let track: FrameTrack = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(track)
}

/// Plain `time<TAB>frequency` listing, one frame per line.
pub fn format_frames_text(track: &FrameTrack) -> String {
    let mut out = String::new();
    for (i, f) in track.frames.iter().enumerate() {
        let t = track.time_at(i);
        match f {
            Some(f) => out.push_str(&format!("{t:.TIME_DECIMALS$}\t{f}\n")),
            None => out.push_str(&format!("{t:.TIME_DECIMALS$}\t{UNDEFINED}\n")),
        }
    }
    out
}
