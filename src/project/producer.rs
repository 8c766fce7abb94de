//! Producer resolution
//!
//! Turns producer declarations into media sources with absolute paths.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ClipperError, Result};
use crate::project::document::ProducerDecl;

/// A declared media source with its resource path resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Producer {
    pub id: String,
    /// Final path component of the resource.
    pub name: String,
    pub resource_path: PathBuf,
}

impl Producer {
    /// Resolve a single declaration against the project root.
    ///
    /// # Errors
    /// * `MissingResource` - the producer has no `resource` property, or
    ///   an empty one
    pub fn resolve(decl: &ProducerDecl, root: &Path) -> Result<Self> {
        let resource = decl
            .resource
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ClipperError::MissingResource {
                producer_id: decl.id.clone(),
            })?;

        let resource_path = resolve_resource(resource, root);
        let name = resource_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| resource.to_string());

        Ok(Producer {
            id: decl.id.clone(),
            name,
            resource_path,
        })
    }
}

/// Resolve every declaration in document order, skipping the ones without
/// a resource.
pub fn resolve_producers(decls: &[ProducerDecl], root: &Path) -> Vec<Producer> {
    decls
        .iter()
        .filter_map(|decl| match Producer::resolve(decl, root) {
            Ok(producer) => {
                debug!(
                    "Producer {}: {}",
                    producer.id,
                    producer.resource_path.display()
                );
                Some(producer)
            }
            Err(e) => {
                warn!("Skipping producer: {}", e);
                None
            }
        })
        .collect()
}

/// Join a relative resource onto the root; absolute resources are kept.
pub fn resolve_resource(resource: &str, root: &Path) -> PathBuf {
    let path = Path::new(resource);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = match dirs::home_dir() {
        Some(home) => home,
        None => return PathBuf::from(path),
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(id: &str, resource: Option<&str>) -> ProducerDecl {
        ProducerDecl {
            id: id.to_string(),
            resource: resource.map(str::to_string),
        }
    }

    #[test]
    fn test_relative_resource_joins_root() {
        let producer = Producer::resolve(&decl("1", Some("clips/a.mov")), Path::new("/videos")).unwrap();
        assert_eq!(producer.resource_path, PathBuf::from("/videos/clips/a.mov"));
        assert_eq!(producer.name, "a.mov");
        assert_eq!(producer.id, "1");
    }

    #[test]
    fn test_absolute_resource_is_kept() {
        let producer = Producer::resolve(&decl("2", Some("/media/b.mp4")), Path::new("/videos")).unwrap();
        assert_eq!(producer.resource_path, PathBuf::from("/media/b.mp4"));
        assert_eq!(producer.name, "b.mp4");
    }

    #[test]
    fn test_empty_root_keeps_relative_path() {
        let producer = Producer::resolve(&decl("1", Some("clips/a.mov")), Path::new("")).unwrap();
        assert_eq!(producer.resource_path, PathBuf::from("clips/a.mov"));
    }

    #[test]
    fn test_missing_resource() {
        let err = Producer::resolve(&decl("7", None), Path::new("/videos")).unwrap_err();
        assert!(matches!(err, ClipperError::MissingResource { ref producer_id } if producer_id == "7"));
    }

    #[test]
    fn test_empty_resource_is_missing() {
        for empty in ["", "   "] {
            let err = Producer::resolve(&decl("4", Some(empty)), Path::new("/footage")).unwrap_err();
            assert!(matches!(err, ClipperError::MissingResource { ref producer_id } if producer_id == "4"));
        }
    }

    #[test]
    fn test_resolve_producers_skips_missing() {
        let decls = vec![decl("1", Some("a.mov")), decl("2", None), decl("3", Some("c.mov"))];
        let producers = resolve_producers(&decls, Path::new("/root"));
        let ids: Vec<&str> = producers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
            assert_eq!(expand_home("~/videos"), home.join("videos"));
        }
    }
}
