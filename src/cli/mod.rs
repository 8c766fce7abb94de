//! CLI Module
//!
//! Command-line interface for kdenclip.

pub mod commands;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Split the clips cut on a Kdenlive project's video tracks into standalone files
#[derive(Parser, Debug)]
#[command(name = "kdenclip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Kdenlive/MLT project file
    pub project: PathBuf,

    /// Directory receiving the extracted clips
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Seek before opening the input (faster, snaps to keyframes)
    #[arg(short, long)]
    pub seek_start: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print per-clip diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// ffmpeg executable used for extraction
    #[arg(long, env = "KDENCLIP_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Print the clip list as JSON and exit without extracting
    #[arg(long, conflicts_with = "dry_run")]
    pub list: bool,

    /// Log the extractor commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Log level selected by the verbosity flags.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
