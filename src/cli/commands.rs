//! CLI Command Implementations

use log::info;

use crate::cli::Cli;
use crate::error::Result;
use crate::export::{ClipExtractor, DryRunExtractor, ExportOptions, ExportSummary, Exporter, FfmpegExtractor};
use crate::project::Project;

/// Outcome of a CLI run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Listed { clips: usize },
    Exported(ExportSummary),
}

impl RunOutcome {
    /// Whether anything went wrong along the way.
    pub fn has_errors(&self) -> bool {
        match self {
            RunOutcome::Listed { .. } => false,
            RunOutcome::Exported(summary) => summary.errors > 0,
        }
    }
}

/// Process exit status for a run.
///
/// Terminal errors and runs with failed clips both map to 1, so scripts
/// can tell a clean run apart without parsing the log.
pub fn exit_status(result: &Result<RunOutcome>) -> u8 {
    match result {
        Ok(outcome) if !outcome.has_errors() => 0,
        _ => 1,
    }
}

/// Run the command selected by the parsed arguments.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let project = Project::open(&cli.project)?;

    if cli.list {
        return list_clips(&project);
    }

    let options = ExportOptions::new(&cli.output_dir).with_seek_start(cli.seek_start);
    let summary = if cli.dry_run {
        export_clips(&project, DryRunExtractor::new(&cli.ffmpeg), options)?
    } else {
        export_clips(&project, FfmpegExtractor::new(&cli.ffmpeg), options)?
    };

    Ok(RunOutcome::Exported(summary))
}

/// Print the project's clips as JSON.
pub fn list_clips(project: &Project) -> Result<RunOutcome> {
    let json = serde_json::to_string_pretty(project.clips())?;
    println!("{}", json);

    Ok(RunOutcome::Listed {
        clips: project.clips().len(),
    })
}

/// Export the project's clips with the given extractor.
pub fn export_clips<E: ClipExtractor>(
    project: &Project,
    extractor: E,
    options: ExportOptions,
) -> Result<ExportSummary> {
    info!(
        "Exporting {} clips to {}",
        project.clips().len(),
        options.output_dir.display()
    );

    let mut exporter = Exporter::new(extractor, options);
    exporter.export(project.clips())
}
