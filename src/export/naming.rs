//! Output file naming

use crate::error::{ClipperError, Result};

/// Split a file name at its last dot into `(base, extension)`, the
/// extension keeping its leading dot.
///
/// # Errors
/// * `ExtensionParse` - the name contains no dot
pub fn split_extension(name: &str) -> Result<(&str, &str)> {
    match name.rfind('.') {
        Some(idx) => Ok((&name[..idx], &name[idx..])),
        None => Err(ClipperError::ExtensionParse {
            name: name.to_string(),
        }),
    }
}

/// `<base>-<start>-<end><extension>` with both times truncated to whole
/// seconds.
pub fn output_file_name(base: &str, extension: &str, start_seconds: f64, end_seconds: f64) -> String {
    format!(
        "{}-{}-{}{}",
        base,
        start_seconds.floor() as i64,
        end_seconds.floor() as i64,
        extension
    )
}
