//! Project Module
//!
//! Interprets a Kdenlive/MLT project file and produces the ordered list of
//! clips cut on its video tracks.
//!
//! Parsing is linear: open the file, read the header, resolve producers,
//! then collect each producer's qualifying placements as clips. Producer
//! order is kept, and within a producer the placements keep document order.

pub mod clip;
pub mod document;
pub mod placement;
pub mod producer;
pub mod timecode;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{ClipperError, Result};

pub use clip::Clip;
pub use document::{Document, Placement, TrackKind};
pub use placement::{placements_for, references_producer, Rejection};
pub use producer::{expand_home, Producer};
pub use timecode::timecode_to_seconds;

/// A parsed project and the clips it cuts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    /// Frames per second, 0.0 when the header does not declare it.
    pub frame_rate: f64,
    pub format_version: String,
    /// Directory that relative resources are resolved against.
    pub root_path: PathBuf,
    clips: Vec<Clip>,
}

impl Project {
    /// Open and interpret a project file.
    ///
    /// # Errors
    /// * `ProjectNotFound` - the path does not exist
    /// * `ProjectRead` - the file cannot be read
    /// * `Xml` - the file is not well-formed XML
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening project: {}", path.display());

        if !path.exists() {
            return Err(ClipperError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ClipperError::ProjectRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_xml(&content)
    }

    /// Interpret project XML that is already in memory.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml)?;
        Ok(Self::from_document(&document))
    }

    /// Build the project from a parsed document.
    pub fn from_document(document: &Document) -> Self {
        let header = &document.header;

        let frame_rate = match header.frame_rate() {
            Some(rate) => rate,
            None => {
                warn!("Project header has no usable frame rate");
                0.0
            }
        };
        let format_version = header.version.clone().unwrap_or_default();
        let root_path = header
            .root
            .as_deref()
            .map(expand_home)
            .unwrap_or_default();

        debug!(
            "Header: version {}, {:.3} fps, root {}",
            format_version,
            frame_rate,
            root_path.display()
        );

        let producers = producer::resolve_producers(&document.producers, &root_path);
        let placements = document.placements();

        let mut clips = Vec::new();
        for producer in &producers {
            for placement in placements_for(&producer.id, &placements) {
                match Clip::from_placement(producer, placement) {
                    Ok(clip) => {
                        debug!(
                            "Clip {} ({}): {:.3}s - {:.3}s",
                            clip.id, clip.name, clip.start_seconds, clip.end_seconds
                        );
                        clips.push(clip);
                    }
                    Err(e) => warn!("Skipping entry of producer {}: {}", producer.id, e),
                }
            }
        }

        info!("Found {} clips", clips.len());

        Project {
            frame_rate,
            format_version,
            root_path,
            clips,
        }
    }

    /// Clips in producer order, then placement order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PROJECT: &str = r#"<mlt version="7.22.0" root="/videos">
  <profile frame_rate_num="25" frame_rate_den="1"/>
  <producer id="2"><property name="resource">b.mp4</property></producer>
  <producer id="1"><property name="resource">clips/a.mov</property></producer>
  <producer id="3"/>
  <playlist id="playlist1">
    <entry producer="1" in="00:00:01.000" out="00:00:02.000"/>
    <entry producer="2" in="00:00:03.000" out="00:00:04.000"/>
    <entry producer="1" in="00:00:05.000" out="bogus"/>
    <entry producer="3" in="00:00:05.000" out="00:00:06.000"/>
  </playlist>
  <playlist id="playlist2">
    <entry producer="1_2" in="00:00:07.000" out="00:00:09.000"/>
  </playlist>
</mlt>"#;

    #[test]
    fn test_header_fields() {
        let project = Project::from_xml(PROJECT).unwrap();
        assert_relative_eq!(project.frame_rate, 25.0);
        assert_eq!(project.format_version, "7.22.0");
        assert_eq!(project.root_path, PathBuf::from("/videos"));
    }

    #[test]
    fn test_clips_follow_producer_order() {
        let project = Project::from_xml(PROJECT).unwrap();
        let summary: Vec<(&str, f64)> = project
            .clips()
            .iter()
            .map(|c| (c.id.as_str(), c.start_seconds))
            .collect();
        assert_eq!(summary, vec![("2", 3.0), ("1", 1.0), ("1", 7.0)]);
    }

    #[test]
    fn test_empty_resource_producer_is_skipped() {
        let xml = r#"<mlt root="/footage">
  <producer id="1"><property name="resource"/></producer>
  <playlist id="playlist1">
    <entry producer="1" in="00:00:01.000" out="00:00:02.000"/>
  </playlist>
</mlt>"#;
        let project = Project::from_xml(xml).unwrap();
        assert!(project.clips().is_empty());
    }

    #[test]
    fn test_missing_header_defaults() {
        let project = Project::from_xml("<mlt/>").unwrap();
        assert_eq!(project.frame_rate, 0.0);
        assert_eq!(project.format_version, "");
        assert_eq!(project.root_path, PathBuf::new());
        assert!(project.clips().is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        let err = Project::open(Path::new("/definitely/not/here.kdenlive")).unwrap_err();
        assert!(matches!(err, ClipperError::ProjectNotFound { .. }));
    }
}
