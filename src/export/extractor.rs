//! Clip extractors
//!
//! The export driver hands each clip to a [`ClipExtractor`]. The real one
//! runs ffmpeg with stream copy; the dry-run one only logs the command.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{ClipperError, Result};

/// Where the seek flag goes relative to the input flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekMode {
    /// Seek before opening the input: fast, lands on the preceding keyframe.
    BeforeInput,
    /// Open the input, then seek: frame accurate, slower.
    #[default]
    AfterInput,
}

impl SeekMode {
    pub fn from_seek_start(seek_start: bool) -> Self {
        if seek_start {
            SeekMode::BeforeInput
        } else {
            SeekMode::AfterInput
        }
    }
}

/// One extraction to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractJob {
    pub input: PathBuf,
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub output: PathBuf,
    pub seek_mode: SeekMode,
}

impl ExtractJob {
    /// Arguments for ffmpeg: overwrite, input, seek, duration, stream copy,
    /// output. Times use three decimals.
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let seek = [OsString::from("-ss"), OsString::from(format!("{:.3}", self.start_seconds))];
        let input = [OsString::from("-i"), self.input.clone().into_os_string()];

        let mut args = vec![OsString::from("-y")];
        match self.seek_mode {
            SeekMode::BeforeInput => {
                args.extend(seek);
                args.extend(input);
            }
            SeekMode::AfterInput => {
                args.extend(input);
                args.extend(seek);
            }
        }
        args.push(OsString::from("-t"));
        args.push(OsString::from(format!("{:.3}", self.duration_seconds)));
        args.push(OsString::from("-c"));
        args.push(OsString::from("copy"));
        args.push(self.output.clone().into_os_string());
        args
    }
}

/// Something that can materialize a clip as a file.
pub trait ClipExtractor {
    /// Run one extraction, blocking until it is done.
    ///
    /// # Errors
    /// * `ExtractorLaunch` - the extractor could not be started
    /// * `ExtractorFailed` - it ran but reported failure
    fn extract(&mut self, job: &ExtractJob) -> Result<()>;
}

/// Runs ffmpeg as a child process.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: String,
}

impl FfmpegExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ClipExtractor for FfmpegExtractor {
    fn extract(&mut self, job: &ExtractJob) -> Result<()> {
        let args = job.ffmpeg_args();
        debug!("Running {} {}", self.program, display_args(&args));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ClipperError::ExtractorLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            debug!("{} stderr:\n{}", self.program, String::from_utf8_lossy(&output.stderr));
            return Err(ClipperError::ExtractorFailed {
                output: job.output.clone(),
                status: output.status.to_string(),
            });
        }

        Ok(())
    }
}

/// Logs the command line instead of running it.
#[derive(Debug, Clone)]
pub struct DryRunExtractor {
    program: String,
}

impl DryRunExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ClipExtractor for DryRunExtractor {
    fn extract(&mut self, job: &ExtractJob) -> Result<()> {
        info!("[dry-run] {} {}", self.program, display_args(&job.ffmpeg_args()));
        Ok(())
    }
}

fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
