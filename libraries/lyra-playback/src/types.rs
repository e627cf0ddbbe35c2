//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A fully resolved, playable track
///
/// A denormalized projection of a catalog song, enriched with its artist,
/// album, and cover art. Built on demand by the resolver whenever a song is
/// selected for playback, queuing, or history. Self-contained: rendering or
/// replaying a stored track never needs the catalog again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique song identifier (shared with the catalog entry)
    pub id: String,

    /// Track title
    pub title: String,

    /// Track duration as listed in the catalog
    pub duration: Duration,

    /// Genre (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover art locator
    pub cover: String,
}

/// Engine playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No track selected
    Idle,

    /// Source resolution in flight
    Loading,

    /// Audio is playing
    Playing,

    /// Paused mid-track (also the resting state after a failed load,
    /// with the requested track still selected)
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// No repeat
    Off,

    /// Loop album traversal indefinitely
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: Off -> All -> One -> Off
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Snapshot of playback state delivered to observers
///
/// `duration` is zero until the media element has reported metadata for the
/// current source; consumers treat zero as indeterminate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Currently selected track, if any
    pub current_track: Option<Track>,

    /// Whether audio is actually playing
    pub is_playing: bool,

    /// Current playback position
    pub position: Duration,

    /// Authoritative duration of the loaded source (zero = unknown)
    pub duration: Duration,
}

/// Configuration for the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Base URL for audio content
    pub audio_base_url: String,

    /// Base URL for album artwork
    pub artwork_base_url: String,

    /// Artwork used when an album name is absent or unresolvable
    pub default_artwork_url: String,

    /// Audio container/encoding extensions, in load priority order
    pub audio_formats: Vec<String>,

    /// In-memory history capacity (default: 50)
    pub history_limit: usize,

    /// Persisted history slice capacity (default: 20)
    pub persisted_history_limit: usize,

    /// "Previous" restarts the current track beyond this position (default: 3s)
    pub restart_threshold: Duration,

    /// Arrow-key seek step (default: 5s)
    pub arrow_seek: Duration,

    /// Page-key seek step (default: 10s)
    pub page_seek: Duration,

    /// Remote seek offset when the platform supplies none (default: 10s)
    pub remote_seek_offset: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_base_url: "https://content.lyra.example/audio".to_string(),
            artwork_base_url: "https://content.lyra.example/images/albumCovers".to_string(),
            default_artwork_url:
                "https://content.lyra.example/images/albumCovers/default-album.png".to_string(),
            audio_formats: vec![
                "mp3".to_string(),
                "ogg".to_string(),
                "m4a".to_string(),
                "wav".to_string(),
            ],
            history_limit: 50,
            persisted_history_limit: 20,
            restart_threshold: Duration::from_secs(3),
            arrow_seek: Duration::from_secs(5),
            page_seek: Duration::from_secs(10),
            remote_seek_offset: Duration::from_secs(10),
        }
    }
}
