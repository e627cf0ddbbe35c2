//! Playback events and observer registry
//!
//! Event-based fan-out for the consumers that track the engine: progress
//! bar, session mirror, sidebar mirrors, audio-graph enable logic. Every
//! listener receives the event plus a full state snapshot, synchronously
//! and in subscription order, before the engine call that caused the
//! transition returns.

use crate::types::{EngineState, PlaybackSnapshot, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A new track was selected (emitted before its audio is ready)
    TrackChanged {
        /// The newly selected track
        track: Track,
    },

    /// Engine state transition (loading, playing, paused, idle)
    StateChanged {
        /// The new engine state
        state: EngineState,
    },

    /// Periodic position update
    Progress {
        /// Current playback position
        position: Duration,
        /// Authoritative duration (zero = unknown)
        duration: Duration,
    },

    /// The media element reported an authoritative duration
    DurationChanged {
        /// Duration of the loaded source
        duration: Duration,
    },

    /// A seek completed (emitted immediately, ahead of the next tick)
    Seeked {
        /// Position after the seek
        position: Duration,
    },

    /// Playback rate changed
    RateChanged {
        /// New playback rate
        rate: f64,
    },

    /// Queue mutated (tracks added/removed/cleared/consumed)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// History mutated
    HistoryChanged {
        /// New history length
        length: usize,
    },

    /// Playback failed (source resolution exhausted or element error)
    PlaybackError {
        /// Human-readable description
        message: String,
    },
}

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Boxed listener callback
pub type Listener = Box<dyn FnMut(&PlayerEvent, &PlaybackSnapshot)>;

/// Subscription registry with explicit unsubscribe handles
///
/// Replaces ad-hoc listener bookkeeping: each registration returns a
/// [`SubscriptionId`] its owner holds and tears down deterministically.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returning its handle
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Remove a listener by handle
    ///
    /// Returns `false` if the handle was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Deliver an event to every listener, in subscription order
    pub fn emit(&mut self, event: &PlayerEvent, snapshot: &PlaybackSnapshot) {
        for (_, listener) in &mut self.entries {
            listener(event, snapshot);
        }
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
