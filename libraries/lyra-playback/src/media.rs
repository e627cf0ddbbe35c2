//! Platform media-element seam
//!
//! Abstracts the host's audio element. The engine is the exclusive owner
//! of the element: it alone sets sources and calls play/pause, while every
//! other component reads state or routes requests back through the
//! engine's public surface.
//!
//! Loading is asynchronous on the platform side. The engine hands the
//! element a source URL together with a [`LoadToken`]; when the platform
//! learns whether that source can play through, it feeds the result back
//! as a [`MediaEvent`] carrying the same token. The engine discards
//! results whose token is no longer current, which is how a newer
//! `play_track` wins over a stale in-flight load.

use crate::error::Result;
use std::time::Duration;

/// Token identifying one source-load request
///
/// Monotonically increasing per engine; compared at resolution time so
/// only the latest request's continuation may mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(pub u64);

/// Events originating from the media element
///
/// The platform adapter translates element callbacks (time updates,
/// metadata, natural end, errors, load results) into these and feeds them
/// to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The source assigned under `token` is buffered enough to play through
    SourceReady {
        /// Token of the originating load request
        token: LoadToken,
    },

    /// The source assigned under `token` failed to load
    SourceError {
        /// Token of the originating load request
        token: LoadToken,
        /// Element error description
        message: String,
    },

    /// The element reported authoritative metadata for the current source
    LoadedMetadata {
        /// Source duration
        duration: Duration,
    },

    /// Periodic position update
    TimeUpdate {
        /// Current position
        position: Duration,
    },

    /// The element started playing (e.g. hardware key acting on the element)
    Play,

    /// The element paused
    Pause,

    /// The current source played to its natural end
    Ended,

    /// Playback rate changed
    RateChanged {
        /// New rate
        rate: f64,
    },

    /// Element error outside of a load (decode/network failure mid-playback)
    Error {
        /// Element error description
        message: String,
    },
}

/// Platform-agnostic media element
///
/// Implementors wrap the host's audio element (or a test double). All
/// methods are synchronous requests; asynchronous outcomes come back as
/// [`MediaEvent`]s.
pub trait MediaElement {
    /// Assign a source URL under a load token
    ///
    /// Replaces any in-flight load; the platform reports the outcome via
    /// `SourceReady`/`SourceError` with the same token.
    fn set_source(&mut self, url: &str, token: LoadToken);

    /// Start or resume playback of the current source
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Move the playback position
    fn set_position(&mut self, position: Duration);

    /// Duration of the current source, once known
    fn duration(&self) -> Option<Duration>;

    /// Current playback rate
    fn playback_rate(&self) -> f64 {
        1.0
    }
}
