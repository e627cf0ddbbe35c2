//! Lyra - Playback Engine
//!
//! Platform-agnostic playback management for the Lyra player.
//!
//! This crate provides:
//! - The playback engine: the single source of truth for "what is playing"
//! - Track resolution (cover art and audio source derivation)
//! - Play queue (FIFO with positional insert) and bounded history
//! - Shuffle and repeat policy (independent toggles)
//! - A subscription registry fanning state out to observers
//! - Progress/scrub control for the position bar
//! - An OS media-session mirror with remote-command routing
//! - Favorites, playlists, and a sleep timer
//!
//! # Architecture
//!
//! `lyra-playback` is completely platform-agnostic. The host supplies its
//! audio element behind [`MediaElement`], its media-session surface behind
//! [`MediaSessionSink`], its progress display behind [`DisplaySink`], and
//! persistence behind `lyra_core`'s `KeyValueStore`. The engine owns the
//! media element exclusively; everything else observes engine state or
//! routes requests back through the engine's public methods. All of it
//! runs on one event loop - there is no parallelism, only interleaved
//! callbacks.
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_playback::{MediaElement, LoadToken, PlayerConfig, PlayerEngine};
//! use lyra_core::{Catalog, MemoryStore};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! struct MyAudioElement { /* platform audio handle */ }
//!
//! impl MediaElement for MyAudioElement {
//!     fn set_source(&mut self, url: &str, token: LoadToken) { /* ... */ }
//!     fn play(&mut self) -> lyra_playback::Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn set_position(&mut self, _position: Duration) {}
//!     fn duration(&self) -> Option<Duration> { None }
//! }
//!
//! let mut engine = PlayerEngine::new(
//!     PlayerConfig::default(),
//!     Catalog::default(),
//!     Box::new(MyAudioElement {}),
//!     Rc::new(MemoryStore::new()),
//! );
//!
//! engine.subscribe(Box::new(|event, snapshot| {
//!     // drive UI from (event, snapshot)
//! }));
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod events;
mod favorites;
mod history;
mod media;
mod playlists;
mod queue;
mod resolver;
mod scrub;
mod session;
mod timer;
pub mod types;

// Public exports
pub use engine::PlayerEngine;
pub use error::{PlayerError, Result};
pub use events::{Listener, Listeners, PlayerEvent, SubscriptionId};
pub use favorites::{FavoriteKind, Favorites};
pub use history::History;
pub use media::{LoadToken, MediaElement, MediaEvent};
pub use playlists::{Playlist, Playlists};
pub use queue::Queue;
pub use resolver::{slug, TrackResolver};
pub use scrub::{DisplaySink, ScrubController, SeekKey};
pub use session::{
    artwork_set, MediaSessionSink, RemoteAction, SessionArtwork, SessionMetadata, SessionMirror,
    SessionPlaybackState, SessionPosition,
};
pub use timer::SleepTimer;
pub use types::{EngineState, PlaybackSnapshot, PlayerConfig, RepeatMode, Track};
