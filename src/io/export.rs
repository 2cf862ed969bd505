//! Write tiers back to PitchTier text.
//!
//! Output is always the short layout (bare literals, no index lines), whatever
//! layout the tier was read from.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::PitchTier;
use crate::error::TierError;
use crate::io::ingest::{FILE_TYPE_LINE, OBJECT_CLASS_LINE};

/// Write `tier` in the short layout.
pub fn write_pitch_tier<W: Write>(tier: &PitchTier, out: W) -> Result<(), TierError> {
    let mut out = BufWriter::new(out);
    write!(out, "{tier}")?;
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `tier` to it.
pub fn write_pitch_tier_path(tier: &PitchTier, path: &Path) -> Result<(), TierError> {
    let file = File::create(path)?;
    write_pitch_tier(tier, file)
}

/// Locale-independent decimal rendering that parses back to the same value.
///
/// Integral values keep a trailing `.0` (`100.0`, not `100`).
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

impl PitchTier {
    /// Short-layout text of this tier.
    pub fn to_short_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PitchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FILE_TYPE_LINE}")?;
        writeln!(f, "{OBJECT_CLASS_LINE}")?;
        writeln!(f)?;
        writeln!(f, "{}", format_number(self.xmin()))?;
        writeln!(f, "{}", format_number(self.xmax()))?;
        writeln!(f, "{}", self.count())?;
        for p in self.points() {
            writeln!(f, "{}", format_number(p.time()))?;
            writeln!(f, "{}", format_number(p.frequency()))?;
        }
        Ok(())
    }
}
