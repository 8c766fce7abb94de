//! Export Module
//!
//! Names each clip's output file and runs the extractor for it.

pub mod driver;
pub mod extractor;
pub mod naming;

pub use driver::{ExportOptions, ExportSummary, Exporter};
pub use extractor::{ClipExtractor, DryRunExtractor, ExtractJob, FfmpegExtractor, SeekMode};
pub use naming::{output_file_name, split_extension};
