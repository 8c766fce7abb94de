//! Export driver
//!
//! Hands clips to an extractor one at a time. A failing clip is counted and
//! skipped; only a missing output directory stops the run.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{ClipperError, Result};
use crate::export::extractor::{ClipExtractor, ExtractJob, SeekMode};
use crate::export::naming::{output_file_name, split_extension};
use crate::project::Clip;

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory receiving the extracted files; must already exist.
    pub output_dir: PathBuf,
    /// Seek before opening the input.
    pub seek_start: bool,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ExportOptions {
            output_dir: output_dir.into(),
            seek_start: false,
        }
    }

    pub fn with_seek_start(mut self, seek_start: bool) -> Self {
        self.seek_start = seek_start;
        self
    }
}

/// Counts reported after an export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Clips the driver attempted.
    pub processed: usize,
    pub succeeded: usize,
    pub errors: usize,
}

/// Drives a [`ClipExtractor`] over a clip list.
pub struct Exporter<E: ClipExtractor> {
    extractor: E,
    options: ExportOptions,
    summary: ExportSummary,
}

impl<E: ClipExtractor> Exporter<E> {
    pub fn new(extractor: E, options: ExportOptions) -> Self {
        Exporter {
            extractor,
            options,
            summary: ExportSummary::default(),
        }
    }

    /// Counts of the last `export` call, including one that was aborted.
    pub fn summary(&self) -> ExportSummary {
        self.summary
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Build the extraction job for one clip.
    ///
    /// A name without an extension is logged and used whole as the base.
    ///
    /// # Errors
    /// * `NonPositiveDuration` - the clip ends at or before its start
    pub fn job_for(&self, clip: &Clip) -> Result<ExtractJob> {
        if clip.duration_seconds <= 0.0 {
            return Err(ClipperError::NonPositiveDuration {
                name: clip.name.clone(),
                duration_secs: clip.duration_seconds,
            });
        }

        let (base, extension) = match split_extension(&clip.name) {
            Ok(parts) => parts,
            Err(e) => {
                warn!("{}; using the whole name", e);
                (clip.name.as_str(), "")
            }
        };
        let file_name = output_file_name(base, extension, clip.start_seconds, clip.end_seconds);

        Ok(ExtractJob {
            input: clip.resource_path.clone(),
            start_seconds: clip.start_seconds,
            duration_seconds: clip.duration_seconds,
            output: self.options.output_dir.join(file_name),
            seek_mode: SeekMode::from_seek_start(self.options.seek_start),
        })
    }

    /// Export every clip in order.
    ///
    /// The summary is logged whether or not the run was aborted.
    ///
    /// # Errors
    /// * `OutputDirNotFound` - the output directory does not exist; no clip
    ///   is attempted and the summary reports zero processed, one error
    pub fn export(&mut self, clips: &[Clip]) -> Result<ExportSummary> {
        let output_dir: &Path = &self.options.output_dir;
        if !output_dir.is_dir() {
            let err = ClipperError::OutputDirNotFound {
                path: output_dir.to_path_buf(),
            };
            self.summary = ExportSummary {
                errors: 1,
                ..ExportSummary::default()
            };
            report(&self.summary);
            return Err(err);
        }

        let mut summary = ExportSummary::default();

        for clip in clips {
            summary.processed += 1;

            let result = self
                .job_for(clip)
                .and_then(|job| {
                    debug!(
                        "Extracting {} [{:.3}s +{:.3}s] -> {}",
                        job.input.display(),
                        job.start_seconds,
                        job.duration_seconds,
                        job.output.display()
                    );
                    self.extractor.extract(&job)
                });

            match result {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    warn!("Clip {} ({}) failed: {}", clip.id, clip.name, e);
                    summary.errors += 1;
                }
            }
        }

        self.summary = summary;
        report(&summary);

        Ok(summary)
    }
}

fn report(summary: &ExportSummary) {
    info!(
        "Processed {} clips: {} succeeded, {} errors",
        summary.processed, summary.succeeded, summary.errors
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        jobs: Vec<ExtractJob>,
    }

    impl ClipExtractor for Recorder {
        fn extract(&mut self, job: &ExtractJob) -> Result<()> {
            self.jobs.push(job.clone());
            Ok(())
        }
    }

    fn clip(name: &str, start: f64, end: f64) -> Clip {
        Clip {
            id: "1".to_string(),
            name: name.to_string(),
            resource_path: PathBuf::from(format!("/media/{}", name)),
            start_seconds: start,
            end_seconds: end,
            duration_seconds: end - start,
        }
    }

    #[test]
    fn test_job_for_clip() {
        let exporter = Exporter::new(Recorder::default(), ExportOptions::new("/out"));
        let job = exporter.job_for(&clip("movie.mp4", 10.2, 15.9)).unwrap();
        assert_eq!(job.output, PathBuf::from("/out/movie-10-15.mp4"));
        assert_eq!(job.input, PathBuf::from("/media/movie.mp4"));
        assert_eq!(job.seek_mode, SeekMode::AfterInput);
    }

    #[test]
    fn test_job_for_name_without_extension() {
        let exporter = Exporter::new(
            Recorder::default(),
            ExportOptions::new("/out").with_seek_start(true),
        );
        let job = exporter.job_for(&clip("capture", 1.5, 4.0)).unwrap();
        assert_eq!(job.output, PathBuf::from("/out/capture-1-4"));
        assert_eq!(job.seek_mode, SeekMode::BeforeInput);
    }

    #[test]
    fn test_job_for_rejects_non_positive_duration() {
        let exporter = Exporter::new(Recorder::default(), ExportOptions::new("/out"));
        let err = exporter.job_for(&clip("a.mov", 5.0, 5.0)).unwrap_err();
        assert_eq!(err.error_code(), "NON_POSITIVE_DURATION");
    }

    #[test]
    fn test_export_counts_bad_duration_as_error() {
        let dir = TempDir::new().unwrap();
        let mut exporter = Exporter::new(Recorder::default(), ExportOptions::new(dir.path()));
        let clips = vec![clip("a.mov", 1.0, 2.0), clip("b.mov", 4.0, 3.0)];

        let summary = exporter.export(&clips).unwrap();

        assert_eq!(summary, ExportSummary { processed: 2, succeeded: 1, errors: 1 });
        assert_eq!(exporter.summary(), summary);
        assert_eq!(exporter.extractor().jobs.len(), 1);
    }

    #[test]
    fn test_export_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let mut exporter = Exporter::new(Recorder::default(), ExportOptions::new(&missing));

        let err = exporter.export(&[clip("a.mov", 1.0, 2.0)]).unwrap_err();

        assert!(matches!(err, ClipperError::OutputDirNotFound { .. }));
        assert!(exporter.extractor().jobs.is_empty());
        assert_eq!(exporter.summary(), ExportSummary { processed: 0, succeeded: 0, errors: 1 });
    }
}
