//! OS media-session mirror
//!
//! Bridges engine state to the platform's media-session surface (lock
//! screen, media keys, system now-playing UI) and routes the platform's
//! remote-control commands back into the engine. The platform surface is
//! behind a trait so the mirror works against any host integration.

use crate::engine::PlayerEngine;
use crate::events::PlayerEvent;
use crate::types::{EngineState, PlaybackSnapshot, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Artwork size ladder expected by platform session surfaces
const ARTWORK_SIZES: [u32; 6] = [96, 128, 192, 256, 384, 512];

/// Minimum media time between unforced position pushes
const POSITION_THROTTLE: Duration = Duration::from_millis(500);

/// One artwork variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionArtwork {
    /// Image locator
    pub src: String,
    /// Size descriptor, e.g. "512x512"
    pub sizes: String,
    /// MIME type
    pub mime: String,
}

/// Track metadata mirrored to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Artwork variants, smallest first
    pub artwork: Vec<SessionArtwork>,
}

/// Playback state as the platform models it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPlaybackState {
    /// Nothing to report
    None,
    /// Audio playing
    Playing,
    /// Audio paused
    Paused,
}

/// Position state mirrored to the platform scrubber
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionPosition {
    /// Track duration (always finite and positive when reported)
    pub duration: Duration,
    /// Current position, clamped to the duration
    pub position: Duration,
    /// Playback rate
    pub playback_rate: f64,
}

/// Remote-control commands arriving from the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoteAction {
    /// Resume playback
    Play,
    /// Pause playback
    Pause,
    /// Stop: pause and rewind to the start
    Stop,
    /// Previous track (restart-vs-previous threshold applies)
    PreviousTrack,
    /// Next track
    NextTrack,
    /// Absolute seek
    SeekTo {
        /// Target time in seconds
        time: f64,
    },
    /// Relative seek backward
    SeekBackward {
        /// Offset in seconds; platform may omit it
        offset: Option<f64>,
    },
    /// Relative seek forward
    SeekForward {
        /// Offset in seconds; platform may omit it
        offset: Option<f64>,
    },
}

/// Platform media-session boundary
pub trait MediaSessionSink {
    /// Replace the mirrored metadata (`None` clears it)
    fn set_metadata(&mut self, metadata: Option<SessionMetadata>);

    /// Update the mirrored playback state
    fn set_playback_state(&mut self, state: SessionPlaybackState);

    /// Update the mirrored position state (`None` clears it)
    fn set_position_state(&mut self, position: Option<SessionPosition>);
}

/// Expand one artwork URL into the platform's size ladder
pub fn artwork_set(url: &str) -> Vec<SessionArtwork> {
    if url.is_empty() {
        return Vec::new();
    }
    ARTWORK_SIZES
        .iter()
        .map(|size| SessionArtwork {
            src: url.to_string(),
            sizes: format!("{size}x{size}"),
            mime: "image/png".to_string(),
        })
        .collect()
}

/// Mirrors engine transitions to the platform session surface
pub struct SessionMirror {
    sink: Box<dyn MediaSessionSink>,
    last_pushed_position: Option<Duration>,
    playback_rate: f64,
    remote_seek_offset: f64,
}

impl SessionMirror {
    /// Create a mirror over a platform sink
    pub fn new(sink: Box<dyn MediaSessionSink>) -> Self {
        Self {
            sink,
            last_pushed_position: None,
            playback_rate: 1.0,
            remote_seek_offset: 10.0,
        }
    }

    /// Override the default 10s offset used when a remote seek command
    /// carries none
    pub fn with_remote_seek_offset(mut self, offset: Duration) -> Self {
        self.remote_seek_offset = offset.as_secs_f64();
        self
    }

    /// Engine observer: mirror every relevant transition
    ///
    /// Periodic progress is throttled; track/state/seek/duration/rate
    /// transitions force an immediate position push.
    pub fn on_event(&mut self, event: &PlayerEvent, snapshot: &PlaybackSnapshot) {
        match event {
            PlayerEvent::TrackChanged { track } => {
                self.sink.set_metadata(Some(Self::metadata_for(track)));
                self.push_position(snapshot, true);
            }
            PlayerEvent::StateChanged { state } => {
                self.sink.set_playback_state(Self::map_state(*state));
                self.push_position(snapshot, true);
            }
            PlayerEvent::Progress { .. } => {
                self.push_position(snapshot, false);
            }
            PlayerEvent::Seeked { .. } | PlayerEvent::DurationChanged { .. } => {
                self.push_position(snapshot, true);
            }
            PlayerEvent::RateChanged { rate } => {
                self.playback_rate = *rate;
                self.push_position(snapshot, true);
            }
            PlayerEvent::PlaybackError { .. } => {
                self.sink.set_playback_state(SessionPlaybackState::Paused);
            }
            PlayerEvent::QueueChanged { .. } | PlayerEvent::HistoryChanged { .. } => {}
        }
    }

    /// Execute a platform remote-control command against the engine
    pub fn handle_action(&mut self, action: RemoteAction, engine: &mut PlayerEngine) {
        match action {
            RemoteAction::Play => engine.play(),
            RemoteAction::Pause => engine.pause(),
            RemoteAction::Stop => {
                engine.pause();
                engine.seek_to(0.0);
                self.sink.set_playback_state(SessionPlaybackState::None);
                self.sink.set_position_state(None);
                self.last_pushed_position = None;
            }
            RemoteAction::PreviousTrack => engine.previous(),
            RemoteAction::NextTrack => engine.next(),
            RemoteAction::SeekTo { time } => engine.seek_to(time),
            RemoteAction::SeekBackward { offset } => {
                engine.skip_by(-offset.unwrap_or(self.remote_seek_offset));
            }
            RemoteAction::SeekForward { offset } => {
                engine.skip_by(offset.unwrap_or(self.remote_seek_offset));
            }
        }
    }

    /// Clear everything mirrored to the platform
    ///
    /// Idempotent; safe to call on a mirror that never saw an event.
    pub fn teardown(&mut self) {
        self.sink.set_metadata(None);
        self.sink.set_position_state(None);
        self.sink.set_playback_state(SessionPlaybackState::None);
        self.last_pushed_position = None;
        self.playback_rate = 1.0;
    }

    fn metadata_for(track: &Track) -> SessionMetadata {
        SessionMetadata {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            artwork: artwork_set(&track.cover),
        }
    }

    fn map_state(state: EngineState) -> SessionPlaybackState {
        match state {
            EngineState::Playing => SessionPlaybackState::Playing,
            EngineState::Paused | EngineState::Loading => SessionPlaybackState::Paused,
            EngineState::Idle => SessionPlaybackState::None,
        }
    }

    /// Push position state, guarding against unknown durations
    ///
    /// An unset duration is never reported: a zero/unknown duration would
    /// break the platform scrubber.
    fn push_position(&mut self, snapshot: &PlaybackSnapshot, forced: bool) {
        let duration = snapshot.duration;
        if duration.is_zero() {
            return;
        }

        let position = snapshot.position.min(duration);
        if !forced {
            if let Some(last) = self.last_pushed_position {
                let elapsed = position.checked_sub(last).or_else(|| last.checked_sub(position));
                if elapsed.unwrap_or(Duration::ZERO) < POSITION_THROTTLE {
                    return;
                }
            }
        }

        self.last_pushed_position = Some(position);
        self.sink.set_position_state(Some(SessionPosition {
            duration,
            position,
            playback_rate: self.playback_rate,
        }));
    }
}
