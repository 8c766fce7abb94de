//! MLT document model
//!
//! One streaming pass over the project XML collects the header, every
//! producer declaration, every playlist and every timeline entry. The rest
//! of the crate works on these typed records instead of querying the tree.

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ClipperError, Result};

/// Property marking a playlist as an audio track.
pub const AUDIO_TRACK_PROPERTY: &str = "kdenlive:audio_track";

/// Property holding a producer's media path.
pub const RESOURCE_PROPERTY: &str = "resource";

/// Header attributes of the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub version: Option<String>,
    pub root: Option<String>,
    pub frame_rate_num: Option<String>,
    pub frame_rate_den: Option<String>,
}

impl Header {
    /// Frame rate as `num / den`, or `None` when either part is missing,
    /// non-numeric or the denominator is zero.
    pub fn frame_rate(&self) -> Option<f64> {
        let num: u64 = self.frame_rate_num.as_deref()?.trim().parse().ok()?;
        let den: u64 = self.frame_rate_den.as_deref()?.trim().parse().ok()?;
        if den == 0 {
            return None;
        }
        Some(num as f64 / den as f64)
    }

    fn absorb(&mut self, element: &BytesStart) -> Result<()> {
        fill(&mut self.version, element, b"version")?;
        fill(&mut self.root, element, b"root")?;
        fill(&mut self.frame_rate_num, element, b"frame_rate_num")?;
        fill(&mut self.frame_rate_den, element, b"frame_rate_den")?;
        Ok(())
    }
}

/// A `producer` (or `chain`) element.
#[derive(Debug, Clone, PartialEq)]
pub struct ProducerDecl {
    pub id: String,
    pub resource: Option<String>,
}

/// A `playlist` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDecl {
    pub id: String,
    pub audio_track: Option<String>,
}

/// An `entry` element inside some parent element.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDecl {
    pub producer: String,
    pub in_point: Option<String>,
    pub out_point: Option<String>,
    /// Index into `Document::playlists` when the direct parent is a playlist.
    pub playlist: Option<usize>,
}

/// What kind of track a playlist represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    /// No audio-track marker at all.
    Unlabeled,
}

impl TrackKind {
    /// Classify from the value of the `kdenlive:audio_track` property.
    pub fn from_audio_marker(marker: Option<&str>) -> Self {
        match marker.map(str::trim) {
            None => TrackKind::Unlabeled,
            Some("0") => TrackKind::Video,
            Some(_) => TrackKind::Audio,
        }
    }
}

/// A timeline entry with its parent playlist already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub producer_ref: String,
    pub in_timecode: String,
    pub out_timecode: String,
    pub parent_playlist_id: Option<String>,
    pub parent_track_kind: TrackKind,
}

/// The parsed project document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub header: Header,
    pub producers: Vec<ProducerDecl>,
    pub playlists: Vec<PlaylistDecl>,
    pub entries: Vec<EntryDecl>,
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    Producer(usize),
    Playlist(usize),
    Other,
}

struct PendingProperty {
    name: String,
    value: String,
}

impl Document {
    /// Parse an MLT XML document.
    ///
    /// # Errors
    /// * `Xml` - the text is not well-formed XML
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = Document::default();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut property: Option<PendingProperty> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let scope = doc.open_element(&e, &scopes, &mut property)?;
                    scopes.push(scope);
                }
                Event::Empty(e) => {
                    doc.open_element(&e, &scopes, &mut property)?;
                    if let Some(pending) = property.take() {
                        doc.store_property(scopes.last().copied(), pending);
                    }
                }
                Event::Text(t) => {
                    if let Some(pending) = property.as_mut() {
                        pending.value.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(pending) = property.as_mut() {
                        pending.value.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Event::End(e) => {
                    if e.local_name().as_ref() == b"property" {
                        if let Some(pending) = property.take() {
                            // The property's own scope is on top; its owner sits below.
                            let owner = scopes.len().checked_sub(2).map(|i| scopes[i]);
                            doc.store_property(owner, pending);
                        }
                    }
                    scopes.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        debug!(
            "Parsed document: {} producers, {} playlists, {} entries",
            doc.producers.len(),
            doc.playlists.len(),
            doc.entries.len()
        );

        Ok(doc)
    }

    fn open_element(
        &mut self,
        e: &BytesStart,
        scopes: &[Scope],
        property: &mut Option<PendingProperty>,
    ) -> Result<Scope> {
        match e.local_name().as_ref() {
            b"mlt" | b"profile" => {
                self.header.absorb(e)?;
                Ok(Scope::Other)
            }
            b"producer" | b"chain" => {
                let id = attribute(e, b"id")?.unwrap_or_default();
                self.producers.push(ProducerDecl { id, resource: None });
                Ok(Scope::Producer(self.producers.len() - 1))
            }
            b"playlist" => {
                let id = attribute(e, b"id")?.unwrap_or_default();
                self.playlists.push(PlaylistDecl {
                    id,
                    audio_track: None,
                });
                Ok(Scope::Playlist(self.playlists.len() - 1))
            }
            b"entry" => {
                let Some(producer) = attribute(e, b"producer")? else {
                    warn!("{}", ClipperError::MissingProducerRef);
                    return Ok(Scope::Other);
                };
                let playlist = match scopes.last() {
                    Some(Scope::Playlist(idx)) => Some(*idx),
                    _ => None,
                };
                self.entries.push(EntryDecl {
                    producer,
                    in_point: attribute(e, b"in")?,
                    out_point: attribute(e, b"out")?,
                    playlist,
                });
                Ok(Scope::Other)
            }
            b"property" => {
                *property = attribute(e, b"name")?.map(|name| PendingProperty {
                    name,
                    value: String::new(),
                });
                Ok(Scope::Other)
            }
            _ => Ok(Scope::Other),
        }
    }

    fn store_property(&mut self, owner: Option<Scope>, pending: PendingProperty) {
        match owner {
            Some(Scope::Producer(idx)) if pending.name == RESOURCE_PROPERTY => {
                self.producers[idx].resource = Some(pending.value);
            }
            Some(Scope::Playlist(idx)) if pending.name == AUDIO_TRACK_PROPERTY => {
                self.playlists[idx].audio_track = Some(pending.value);
            }
            _ => {}
        }
    }

    /// All timeline entries in document order, with their parent playlist
    /// id and track kind resolved.
    pub fn placements(&self) -> Vec<Placement> {
        self.entries
            .iter()
            .map(|entry| {
                let playlist = entry.playlist.and_then(|idx| self.playlists.get(idx));
                Placement {
                    producer_ref: entry.producer.clone(),
                    in_timecode: entry.in_point.clone().unwrap_or_default(),
                    out_timecode: entry.out_point.clone().unwrap_or_default(),
                    parent_playlist_id: playlist.map(|p| p.id.clone()),
                    parent_track_kind: TrackKind::from_audio_marker(
                        playlist.and_then(|p| p.audio_track.as_deref()),
                    ),
                }
            })
            .collect()
    }
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    match e.try_get_attribute(key)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn fill(slot: &mut Option<String>, e: &BytesStart, key: &[u8]) -> Result<()> {
    if slot.is_none() {
        *slot = attribute(e, key)?;
    }
    Ok(())
}
