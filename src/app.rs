//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments into a `RunConfig`
//! - reads/resamples/writes tiers
//! - prints reports and plots

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::domain::{PitchTier, RunConfig};
use crate::math::{MAX_FRAMES, exceeds_frame_limit};
use crate::error::AppError;
use crate::io::{FrameTrack, format_frames_text, read_frames_json, write_frames_json, write_pitch_tier, write_pitch_tier_path};

/// Entry point for the `ptier` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();

    let cli = Cli::parse();
    let config = run_config_from_command(&cli.command);

    match cli.command {
        Command::Info(args) => handle_info(&config, args.points),
        Command::Frames(_) => handle_frames(&config),
        Command::Normalize(_) => handle_normalize(&config),
        Command::Import(_) => handle_import(&config),
        Command::Plot(_) => handle_plot(&config),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_config_from_command(command: &Command) -> RunConfig {
    let defaults = RunConfig::default();
    match command {
        Command::Info(args) => RunConfig {
            input: args.input.clone(),
            ..defaults
        },
        Command::Frames(args) => RunConfig {
            input: args.input.clone(),
            step: args.step,
            json_output: args.json.clone(),
            ..defaults
        },
        Command::Normalize(args) => RunConfig {
            input: args.input.clone(),
            output: args.output.clone(),
            ..defaults
        },
        Command::Import(args) => RunConfig {
            input: args.input.clone(),
            output: Some(args.output.clone()),
            ..defaults
        },
        Command::Plot(args) => RunConfig {
            input: args.input.clone(),
            plot_width: args.width,
            plot_height: args.height,
            ..defaults
        },
    }
}

fn handle_info(config: &RunConfig, max_points: usize) -> Result<(), AppError> {
    let tier = load_tier(&config.input)?;
    print!("{}", crate::report::format_tier_summary(&tier));
    if max_points > 0 {
        print!("\n{}", crate::report::format_points_table(&tier, max_points));
    }
    Ok(())
}

fn handle_frames(config: &RunConfig) -> Result<(), AppError> {
    let tier = load_tier(&config.input)?;
    let track = frame_track_for(&tier, config.step)?;

    match &config.json_output {
        Some(path) => {
            write_frames_json(path, &track).map_err(|e| {
                AppError::new(2, format!("Failed to write frame JSON '{}': {e}", path.display()))
            })?;
            info!(
                frames = track.frames.len(),
                defined = track.defined_count(),
                path = %path.display(),
                "wrote frame track"
            );
        }
        None => print!("{}", format_frames_text(&track)),
    }
    Ok(())
}

/// Resample `tier`, turning an empty or oversized result into exit code 3.
fn frame_track_for(tier: &PitchTier, step: f64) -> Result<FrameTrack, AppError> {
    if exceeds_frame_limit(tier.xmin(), tier.xmax(), step) {
        return Err(AppError::new(
            3,
            format!(
                "Too many frames for step {step} over [{}, {}] (limit is {MAX_FRAMES}).",
                tier.xmin(),
                tier.xmax()
            ),
        ));
    }
    let track = FrameTrack::from_tier(tier, step);
    if track.frames.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No frames for step {} over [{}, {}] (step must be positive and the span non-negative).",
                step,
                tier.xmin(),
                tier.xmax()
            ),
        ));
    }
    Ok(track)
}

fn handle_normalize(config: &RunConfig) -> Result<(), AppError> {
    let tier = load_tier(&config.input)?;
    match &config.output {
        Some(path) => save_tier(&tier, path),
        None => write_normalized(&tier, std::io::stdout().lock()),
    }
}

fn write_normalized<W: Write>(tier: &PitchTier, out: W) -> Result<(), AppError> {
    write_pitch_tier(tier, out)?;
    Ok(())
}

fn handle_import(config: &RunConfig) -> Result<(), AppError> {
    let track = read_frames_json(&config.input).map_err(|e| {
        AppError::new(2, format!("Failed to read frame JSON '{}': {e}", config.input.display()))
    })?;
    let tier = track.to_tier();
    info!(frames = track.frames.len(), points = tier.count(), "imported frame track");

    let path = config
        .output
        .as_deref()
        .ok_or_else(|| AppError::new(2, "`import` requires an output path."))?;
    save_tier(&tier, path)
}

fn handle_plot(config: &RunConfig) -> Result<(), AppError> {
    let tier = load_tier(&config.input)?;
    if tier.is_empty() {
        return Err(AppError::new(3, "PitchTier has no control points to plot."));
    }
    let plot = crate::plot::render_contour_plot(&tier, config.plot_width, config.plot_height);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(plot.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write plot: {e}")))?;
    Ok(())
}

fn load_tier(path: &Path) -> Result<PitchTier, AppError> {
    PitchTier::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to read PitchTier '{}': {e}", path.display())))
}

fn save_tier(tier: &PitchTier, path: &Path) -> Result<(), AppError> {
    write_pitch_tier_path(tier, path)
        .map_err(|e| AppError::new(2, format!("Failed to write PitchTier '{}': {e}", path.display())))
}
