//! Clip model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::project::document::Placement;
use crate::project::producer::Producer;
use crate::project::timecode::timecode_to_seconds;

/// One timeline cut of a producer, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Id of the originating producer.
    pub id: String,
    /// File name of the source media.
    pub name: String,
    pub resource_path: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub duration_seconds: f64,
}

impl Clip {
    /// Build a clip from a producer and one of its qualifying placements.
    ///
    /// The duration is not validated here; `in >= out` yields a zero or
    /// negative duration.
    ///
    /// # Errors
    /// * `MalformedTimecode` - either entry point cannot be converted
    pub fn from_placement(producer: &Producer, placement: &Placement) -> Result<Self> {
        let start_seconds = timecode_to_seconds(&placement.in_timecode)?;
        let end_seconds = timecode_to_seconds(&placement.out_timecode)?;

        Ok(Clip {
            id: producer.id.clone(),
            name: producer.name.clone(),
            resource_path: producer.resource_path.clone(),
            start_seconds,
            end_seconds,
            duration_seconds: end_seconds - start_seconds,
        })
    }
}
