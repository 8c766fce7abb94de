//! Timecode conversion
//!
//! MLT writes entry points as `HH:MM:SS.fraction` clock strings. They are
//! turned into fractional seconds here; nothing is rounded.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ClipperError, Result};

fn timecode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})\.(\d+)$").expect("timecode pattern is valid")
    })
}

/// Convert a `HH:MM:SS.fraction` timecode into seconds.
///
/// # Errors
/// * `MalformedTimecode` - missing separators, missing fractional part or
///   non-numeric components
pub fn timecode_to_seconds(timecode: &str) -> Result<f64> {
    let malformed = || ClipperError::MalformedTimecode {
        timecode: timecode.to_string(),
    };

    let caps = timecode_pattern().captures(timecode.trim()).ok_or_else(malformed)?;

    let hours: f64 = caps[1].parse().map_err(|_| malformed())?;
    let minutes: f64 = caps[2].parse().map_err(|_| malformed())?;
    let seconds: f64 = caps[3].parse().map_err(|_| malformed())?;
    let fraction: f64 = format!("0.{}", &caps[4]).parse().map_err(|_| malformed())?;

    Ok(hours * 3600.0 + minutes * 60.0 + seconds + fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_timecode() {
        assert_relative_eq!(timecode_to_seconds("00:00:05.000").unwrap(), 5.0);
        assert_relative_eq!(timecode_to_seconds("00:00:08.500").unwrap(), 8.5);
    }

    #[test]
    fn test_all_components() {
        let secs = timecode_to_seconds("01:02:03.25").unwrap();
        assert_relative_eq!(secs, 3600.0 + 120.0 + 3.0 + 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_single_digit_fraction() {
        assert_relative_eq!(timecode_to_seconds("00:00:10.2").unwrap(), 10.2, epsilon = 1e-9);
    }

    #[test]
    fn test_long_fraction_keeps_precision() {
        let secs = timecode_to_seconds("00:00:01.041666").unwrap();
        assert_relative_eq!(secs, 1.041666, epsilon = 1e-12);
    }

    #[test]
    fn test_malformed_timecodes() {
        for bad in ["bad", "12:30", "12:30:00", "", "aa:bb:cc.dd", "00:00:05.", "00-00-05.000"] {
            let err = timecode_to_seconds(bad).unwrap_err();
            assert!(
                matches!(err, ClipperError::MalformedTimecode { .. }),
                "expected MalformedTimecode for {:?}",
                bad
            );
        }
    }
}
