//! Command-line parsing for the PitchTier tool.
//!
//! Argument parsing and command dispatch are kept separate from the
//! parsing/interpolation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ptier", version, about = "Read, resample, and rewrite Praat PitchTier files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print span, point count, and F0 range of a PitchTier file.
    Info(InfoArgs),
    /// Resample a PitchTier to evenly spaced frames.
    Frames(FramesArgs),
    /// Re-emit a PitchTier (either layout) in the short text layout.
    Normalize(NormalizeArgs),
    /// Build a PitchTier from a frame-track JSON file.
    Import(ImportArgs),
    /// Plot the contour in the terminal.
    Plot(PlotArgs),
}

#[derive(Debug, Args, Clone)]
pub struct InfoArgs {
    /// PitchTier text file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Also list up to N control points.
    #[arg(long, default_value_t = 0)]
    pub points: usize,
}

#[derive(Debug, Args, Clone)]
pub struct FramesArgs {
    /// PitchTier text file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Frame step in seconds.
    #[arg(long, default_value_t = 0.01)]
    pub step: f64,

    /// Write a frame-track JSON file instead of printing frames.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct NormalizeArgs {
    /// PitchTier text file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (stdout if omitted).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ImportArgs {
    /// Frame-track JSON file (as written by `ptier frames --json`).
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Output PitchTier file.
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// PitchTier text file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
