//! Error handling for kdenclip
//!
//! Errors fall in two groups: terminal ones that stop a whole parse or
//! export, and per-item ones that are logged while the loop moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for kdenclip operations
pub type Result<T> = std::result::Result<T, ClipperError>;

/// Main error type for kdenclip operations
#[derive(Error, Debug)]
pub enum ClipperError {
    // Project Errors
    #[error("Project file not found: {}", .path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("Failed to read project file: {}: {source}", .path.display())]
    ProjectRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed project document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed timecode: '{timecode}' (expected HH:MM:SS.fraction)")]
    MalformedTimecode { timecode: String },

    #[error("Producer '{producer_id}' has no resource property")]
    MissingResource { producer_id: String },

    #[error("Timeline entry has no producer reference")]
    MissingProducerRef,

    // Export Errors
    #[error("Output directory not found: {}", .path.display())]
    OutputDirNotFound { path: PathBuf },

    #[error("Could not find a file extension in '{name}'")]
    ExtensionParse { name: String },

    #[error("Clip '{name}' has a non-positive duration ({duration_secs:.3}s)")]
    NonPositiveDuration { name: String, duration_secs: f64 },

    #[error("Failed to launch extractor '{program}': {source}")]
    ExtractorLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Extractor failed for {} ({status})", .output.display())]
    ExtractorFailed { output: PathBuf, status: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClipperError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ClipperError::ProjectNotFound { .. } => "PROJECT_NOT_FOUND",
            ClipperError::ProjectRead { .. } => "PROJECT_READ",
            ClipperError::Xml(_) => "MALFORMED_PROJECT",
            ClipperError::MalformedTimecode { .. } => "MALFORMED_TIMECODE",
            ClipperError::MissingResource { .. } => "MISSING_RESOURCE",
            ClipperError::MissingProducerRef => "MISSING_PRODUCER_REF",
            ClipperError::OutputDirNotFound { .. } => "OUTPUT_DIR_NOT_FOUND",
            ClipperError::ExtensionParse { .. } => "EXTENSION_PARSE",
            ClipperError::NonPositiveDuration { .. } => "NON_POSITIVE_DURATION",
            ClipperError::ExtractorLaunch { .. } => "EXTRACTOR_LAUNCH",
            ClipperError::ExtractorFailed { .. } => "EXTRACTOR_FAILED",
            ClipperError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error only affects a single producer, placement or clip.
    ///
    /// Recoverable errors are logged and skipped; the others abort the
    /// enclosing parse or export.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClipperError::MalformedTimecode { .. }
                | ClipperError::MissingResource { .. }
                | ClipperError::MissingProducerRef
                | ClipperError::ExtensionParse { .. }
                | ClipperError::NonPositiveDuration { .. }
                | ClipperError::ExtractorLaunch { .. }
                | ClipperError::ExtractorFailed { .. }
        )
    }
}
