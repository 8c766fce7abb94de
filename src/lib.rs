//! kdenclip - Kdenlive clip extractor
//!
//! Reads a Kdenlive/MLT project file, finds every cut placed on a video
//! track and writes each one out as its own media file with ffmpeg stream
//! copy.
//!
//! # Architecture
//!
//! - `project`: document parsing, producer resolution, placement filtering
//!   and clip building
//! - `export`: output naming and the extractor driver
//! - `cli`: argument parsing and the top-level run

pub mod cli;
pub mod error;
pub mod export;
pub mod project;

pub use error::{ClipperError, Result};
pub use export::{ExportOptions, ExportSummary, Exporter};
pub use project::{Clip, Project};
