//! Formatted terminal output for tiers.
//!
//! Formatting lives here so the parser and interpolator stay free of
//! presentation concerns.

use crate::domain::PitchTier;
use crate::report::compute_stats;

/// Format the `info` report: span, point count, frequency range.
pub fn format_tier_summary(tier: &PitchTier) -> String {
    let mut out = String::new();

    out.push_str("=== PitchTier ===\n");
    out.push_str(&format!(
        "Span: [{:.4}, {:.4}] s ({:.4} s)\n",
        tier.xmin(),
        tier.xmax(),
        tier.xmax() - tier.xmin()
    ));
    out.push_str(&format!("Points: {}\n", tier.count()));

    match compute_stats(tier) {
        Some(stats) => {
            out.push_str(&format!(
                "Voiced: [{:.4}, {:.4}] s ({:.4} s)\n",
                stats.t_first,
                stats.t_last,
                stats.voiced_span()
            ));
            out.push_str(&format!(
                "F0: min={:.2} Hz | max={:.2} Hz | mean={:.2} Hz\n",
                stats.f_min, stats.f_max, stats.f_mean
            ));
        }
        None => out.push_str("F0: (no control points)\n"),
    }

    out
}

/// Format the control points as a two-column table.
pub fn format_points_table(tier: &PitchTier, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4} {:>12} {:>12}\n", "#", "time_s", "f0_hz"));
    out.push_str(&format!("{:->4} {:->12} {:->12}\n", "", "", ""));

    for (i, p) in tier.points().iter().take(max_rows).enumerate() {
        out.push_str(&format!("{:>4} {:>12.6} {:>12.3}\n", i + 1, p.time(), p.frequency()));
    }
    if tier.count() > max_rows {
        out.push_str(&format!("... ({} more)\n", tier.count() - max_rows));
    }

    out
}
