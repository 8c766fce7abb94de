//! Placement filtering
//!
//! Decides which timeline entries count as video usage of a producer.
//!
//! A producer used on a track other than the first one is referenced as
//! `<id>_<track>`, so an entry belongs to producer `P` when its reference is
//! exactly `P` or starts with `P_`. Of those, only entries sitting in a
//! numbered playlist (`playlist<N>`) that is not marked as an audio track
//! are kept.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::project::document::{Placement, TrackKind};

fn track_playlist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^playlist\d+$").expect("playlist pattern is valid"))
}

/// Why a placement referencing the producer was not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotInPlaylist,
    AudioTrack,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotInPlaylist => write!(f, "not in a playlist"),
            Rejection::AudioTrack => write!(f, "audio track"),
        }
    }
}

/// Whether `producer_ref` names producer `producer_id`, directly or with a
/// `_<track>` suffix.
pub fn references_producer(producer_ref: &str, producer_id: &str) -> bool {
    match producer_ref.strip_prefix(producer_id) {
        Some(rest) => rest.is_empty() || rest.starts_with('_'),
        None => false,
    }
}

/// Whether a playlist id names a timeline track playlist.
pub fn is_track_playlist(playlist_id: &str) -> bool {
    track_playlist_pattern().is_match(playlist_id)
}

/// Apply the playlist and track-kind policy to one placement.
pub fn check_placement(placement: &Placement) -> Result<(), Rejection> {
    match placement.parent_playlist_id.as_deref() {
        Some(id) if is_track_playlist(id) => {}
        _ => return Err(Rejection::NotInPlaylist),
    }
    if placement.parent_track_kind == TrackKind::Audio {
        return Err(Rejection::AudioTrack);
    }
    Ok(())
}

/// Placements of `producer_id` that represent video-track usage, in
/// document order.
pub fn placements_for<'a>(producer_id: &str, placements: &'a [Placement]) -> Vec<&'a Placement> {
    placements
        .iter()
        .filter(|p| references_producer(&p.producer_ref, producer_id))
        .filter(|p| match check_placement(p) {
            Ok(()) => true,
            Err(reason) => {
                debug!(
                    "Dropping entry {} [{} - {}] in {}: {}",
                    p.producer_ref,
                    p.in_timecode,
                    p.out_timecode,
                    p.parent_playlist_id.as_deref().unwrap_or("<none>"),
                    reason
                );
                false
            }
        })
        .collect()
}
