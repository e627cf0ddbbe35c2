//! Playback engine - core orchestration
//!
//! The single source of truth for "what is playing". Owns the media
//! element, the current-track pointer, the queue and history, and the
//! shuffle/repeat policy, and runs the transition protocol that decides
//! what plays next (queue first, then album context, then stop).
//!
//! The public control surface never returns errors for expected conditions
//! (empty queue, bad seek targets, unplayable sources); those are logged,
//! reflected in state, and fanned out to observers. Every state-changing
//! call notifies observers synchronously before returning.

use crate::{
    events::{Listeners, PlayerEvent, SubscriptionId},
    history::History,
    media::{LoadToken, MediaElement, MediaEvent},
    queue::Queue,
    resolver::TrackResolver,
    types::{EngineState, PlaybackSnapshot, PlayerConfig, RepeatMode, Track},
};
use lyra_core::storage::{keys, load_json, save_json, KeyValueStore};
use lyra_core::Catalog;
use rand::Rng;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, warn};

/// An in-flight source load: the token it was issued under and the
/// candidates not yet attempted
#[derive(Debug)]
struct PendingLoad {
    token: LoadToken,
    remaining: VecDeque<String>,
}

/// Album traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Central playback engine
///
/// Exclusive owner of the media element: no other component may assign its
/// source or drive play/pause directly.
pub struct PlayerEngine {
    // Configuration and collaborators
    config: PlayerConfig,
    resolver: TrackResolver,
    catalog: Catalog,
    media: Box<dyn MediaElement>,
    store: Rc<dyn KeyValueStore>,

    // State
    state: EngineState,
    current_track: Option<Track>,
    duration: Duration,
    shuffle: bool,
    repeat: RepeatMode,

    // Queue and history
    queue: Queue,
    history: History,

    // In-flight source load, superseded by any newer play_track
    load_generation: u64,
    pending_load: Option<PendingLoad>,

    // Observers
    listeners: Listeners,
}

impl PlayerEngine {
    /// Create a new engine
    ///
    /// Restores the queue snapshot and recently-played slice from storage.
    pub fn new(
        config: PlayerConfig,
        catalog: Catalog,
        media: Box<dyn MediaElement>,
        store: Rc<dyn KeyValueStore>,
    ) -> Self {
        let queue = Queue::from_tracks(
            load_json::<Vec<Track>>(store.as_ref(), keys::QUEUE).unwrap_or_default(),
        );

        let mut history = History::new(config.history_limit, config.persisted_history_limit);
        if let Some(tracks) = load_json::<Vec<Track>>(store.as_ref(), keys::RECENTLY_PLAYED) {
            history.restore(tracks);
        }

        Self {
            resolver: TrackResolver::new(&config),
            config,
            catalog,
            media,
            store,
            state: EngineState::Idle,
            current_track: None,
            duration: Duration::ZERO,
            shuffle: false,
            repeat: RepeatMode::Off,
            queue,
            history,
            load_generation: 0,
            pending_load: None,
            listeners: Listeners::new(),
        }
    }

    // ===== Observation Surface =====

    /// Register an observer; delivered `(event, snapshot)` on every
    /// meaningful transition, synchronously and in subscription order
    pub fn subscribe(
        &mut self,
        listener: Box<dyn FnMut(&PlayerEvent, &PlaybackSnapshot)>,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    /// Remove an observer by handle
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Current playback snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track.clone(),
            is_playing: self.state == EngineState::Playing,
            position: self.media.position(),
            duration: self.duration,
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        let snapshot = self.snapshot();
        self.listeners.emit(&event, &snapshot);
    }

    // ===== Playback Control =====

    /// Select and start playing a track
    ///
    /// The outgoing current track (if any) is recorded into history. The
    /// metadata change is announced immediately, before any audio is
    /// ready, so consumers can show the new title/artist without waiting
    /// for the load. If every source candidate fails, the engine stops
    /// with the requested track still selected.
    pub fn play_track(&mut self, track: Track) {
        if let Some(previous) = self.current_track.take() {
            self.record_history(previous);
        }

        self.current_track = Some(track.clone());
        self.duration = Duration::ZERO;
        self.state = EngineState::Loading;

        self.emit(PlayerEvent::TrackChanged { track });
        self.emit(PlayerEvent::StateChanged {
            state: EngineState::Loading,
        });

        self.begin_load();
    }

    /// Resume the current track (no-op without one)
    pub fn play(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        match self.media.play() {
            Ok(()) => {
                if self.state != EngineState::Playing {
                    self.state = EngineState::Playing;
                    self.emit(PlayerEvent::StateChanged {
                        state: EngineState::Playing,
                    });
                }
            }
            Err(err) => warn!(%err, "resume rejected by media element"),
        }
    }

    /// Pause the current track
    pub fn pause(&mut self) {
        self.media.pause();
        if self.state == EngineState::Playing {
            self.state = EngineState::Paused;
            self.emit(PlayerEvent::StateChanged {
                state: EngineState::Paused,
            });
        }
    }

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) {
        if self.state == EngineState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Skip to the next track
    ///
    /// Precedence: (1) the queue front, (2) the album context of the
    /// current track - a uniformly random index under shuffle (repeating
    /// the current song by chance is accepted behavior), the next index
    /// with wraparound otherwise - then (3) stop.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if let Some(track) = self.queue.dequeue_front() {
            self.persist_queue();
            self.emit(PlayerEvent::QueueChanged {
                length: self.queue.len(),
            });
            self.play_track(track);
            return;
        }

        if let Some(track) = self.neighbor_in_album(Direction::Forward) {
            self.play_track(track);
            return;
        }

        self.halt();
    }

    /// Go to the previous track
    ///
    /// Beyond the restart threshold this restarts the current track.
    /// Otherwise history is consumed first, then the album context; with
    /// neither, this is a no-op.
    pub fn previous(&mut self) {
        if self.current_track.is_some() && self.media.position() > self.config.restart_threshold {
            self.seek_to(0.0);
            return;
        }

        if let Some(track) = self.history.consume_front() {
            self.persist_history();
            self.emit(PlayerEvent::HistoryChanged {
                length: self.history.len(),
            });
            self.play_track(track);
            return;
        }

        if let Some(track) = self.neighbor_in_album(Direction::Backward) {
            self.play_track(track);
        }
    }

    // ===== Seek =====

    /// Seek to an absolute position in seconds
    ///
    /// Non-finite targets are rejected (no-op); finite targets are clamped
    /// to `[0, duration]` (0 while the duration is unknown). Emits the
    /// progress notification immediately rather than waiting for the next
    /// periodic tick.
    pub fn seek_to(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            debug!(seconds, "ignoring non-finite seek target");
            return;
        }

        let clamped = seconds.clamp(0.0, self.duration.as_secs_f64());
        let position = Duration::from_secs_f64(clamped);
        self.media.set_position(position);

        self.emit(PlayerEvent::Seeked { position });
        self.emit(PlayerEvent::Progress {
            position,
            duration: self.duration,
        });
    }

    /// Seek relative to the current position
    pub fn skip_by(&mut self, delta_seconds: f64) {
        if !delta_seconds.is_finite() {
            debug!(delta_seconds, "ignoring non-finite skip delta");
            return;
        }
        self.seek_to(self.media.position().as_secs_f64() + delta_seconds);
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle, returning the new value
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    /// Cycle repeat Off -> All -> One -> Off, returning the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycled();
        self.repeat
    }

    /// Set shuffle directly
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    /// Set repeat mode directly
    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    /// Current shuffle setting
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Queue Management =====

    /// Add a track to the queue
    ///
    /// Appends by default; inserts at `position` when given (out-of-range
    /// positions clamp to append). Persists and notifies before returning.
    pub fn enqueue(&mut self, track: Track, position: Option<usize>) {
        self.queue.enqueue(track, position);
        self.persist_queue();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Remove the queued track at `index`
    ///
    /// Out-of-range indices return `None` with no mutation and no
    /// notification.
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let removed = self.queue.remove_at(index)?;
        self.persist_queue();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        Some(removed)
    }

    /// Remove all queued tracks
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.persist_queue();
        self.emit(PlayerEvent::QueueChanged { length: 0 });
    }

    /// Pending tracks in playback order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Pull the queued track at `index` out of the queue and play it
    pub fn play_from_queue(&mut self, index: usize) {
        if let Some(track) = self.remove_from_queue(index) {
            self.play_track(track);
        }
    }

    /// Replay the history entry at `index` (0 = most recent) without
    /// removing it; the dedup on record keeps each song listed once
    pub fn play_from_history(&mut self, index: usize) {
        if let Some(track) = self.history.get(index).cloned() {
            self.play_track(track);
        }
    }

    /// Play an ordered collection (playlist, "shuffle all" pool)
    ///
    /// Replaces the queue with everything after the first track, then
    /// plays the first.
    pub fn play_collection(&mut self, tracks: Vec<Track>) {
        let mut tracks = tracks.into_iter();
        let Some(first) = tracks.next() else {
            return;
        };

        self.queue.clear();
        for track in tracks {
            self.queue.enqueue(track, None);
        }
        self.persist_queue();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });

        self.play_track(first);
    }

    /// Played tracks, most recent first
    pub fn history(&self) -> Vec<&Track> {
        self.history.tracks().collect()
    }

    // ===== State Queries =====

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Authoritative duration of the loaded source (zero = unknown)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current playback position
    pub fn position(&self) -> Duration {
        self.media.position()
    }

    /// Engine configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The track resolver (for callers building tracks from catalog songs)
    pub fn resolver(&self) -> &TrackResolver {
        &self.resolver
    }

    /// The music library
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // ===== Media Events =====

    /// Feed a media-element event into the engine
    ///
    /// The platform adapter calls this for every element callback. Load
    /// results carry the token of the request that issued them; results
    /// for superseded requests are discarded without touching state.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::SourceReady { token } => self.handle_source_ready(token),
            MediaEvent::SourceError { token, message } => {
                self.handle_source_error(token, &message);
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.duration = duration;
                self.emit(PlayerEvent::DurationChanged { duration });
            }
            MediaEvent::TimeUpdate { position } => {
                self.emit(PlayerEvent::Progress {
                    position,
                    duration: self.duration,
                });
            }
            MediaEvent::Play => {
                if self.state != EngineState::Playing {
                    self.state = EngineState::Playing;
                    self.emit(PlayerEvent::StateChanged {
                        state: EngineState::Playing,
                    });
                }
            }
            MediaEvent::Pause => {
                if self.state == EngineState::Playing {
                    self.state = EngineState::Paused;
                    self.emit(PlayerEvent::StateChanged {
                        state: EngineState::Paused,
                    });
                }
            }
            MediaEvent::Ended => self.handle_track_ended(),
            MediaEvent::RateChanged { rate } => {
                self.emit(PlayerEvent::RateChanged { rate });
            }
            MediaEvent::Error { message } => {
                warn!(message, "media element error");
                self.halt();
                self.emit(PlayerEvent::PlaybackError { message });
            }
        }
    }

    // ===== Internals =====

    fn handle_source_ready(&mut self, token: LoadToken) {
        let Some(pending) = &self.pending_load else {
            debug!(?token, "source ready with no load in flight, discarding");
            return;
        };
        if pending.token != token {
            debug!(?token, current = ?pending.token, "stale source ready, discarding");
            return;
        }

        self.pending_load = None;
        match self.media.play() {
            Ok(()) => {
                self.state = EngineState::Playing;
                self.emit(PlayerEvent::StateChanged {
                    state: EngineState::Playing,
                });
            }
            Err(err) => self.fail_load(&err.to_string()),
        }
    }

    fn handle_source_error(&mut self, token: LoadToken, message: &str) {
        let Some(pending) = &mut self.pending_load else {
            debug!(?token, "source error with no load in flight, discarding");
            return;
        };
        if pending.token != token {
            debug!(?token, current = ?pending.token, "stale source error, discarding");
            return;
        }

        if let Some(candidate) = pending.remaining.pop_front() {
            debug!(message, next = %candidate, "source candidate failed, trying next");
            self.media.set_source(&candidate, token);
        } else {
            let title = self
                .current_track
                .as_ref()
                .map(|t| t.title.clone())
                .unwrap_or_default();
            warn!(message, %title, "all source candidates failed");
            self.fail_load(&format!("no playable audio source for \"{title}\""));
        }
    }

    /// Start the asynchronous candidate walk for the current track
    fn begin_load(&mut self) {
        let Some(track) = &self.current_track else {
            return;
        };

        let mut candidates: VecDeque<String> =
            self.resolver.source_candidates(track).into_iter().collect();

        let Some(first) = candidates.pop_front() else {
            let title = track.title.clone();
            warn!(%title, "track has no source candidates");
            self.fail_load(&format!("no playable audio source for \"{title}\""));
            return;
        };

        self.load_generation += 1;
        let token = LoadToken(self.load_generation);
        self.pending_load = Some(PendingLoad {
            token,
            remaining: candidates,
        });
        self.media.set_source(&first, token);
    }

    /// Resolution failed: stop playing but keep the requested track
    /// selected so consumers show what was attempted
    fn fail_load(&mut self, message: &str) {
        self.pending_load = None;
        self.halt();
        self.emit(PlayerEvent::PlaybackError {
            message: message.to_string(),
        });
    }

    /// Stop playing without clearing the current selection
    fn halt(&mut self) {
        self.media.pause();
        let state = if self.current_track.is_some() {
            EngineState::Paused
        } else {
            EngineState::Idle
        };
        if self.state != state {
            self.state = state;
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    /// Natural end of the current source
    fn handle_track_ended(&mut self) {
        if self.repeat == RepeatMode::One && self.current_track.is_some() {
            // Restart in place: no history mutation, no advance
            self.media.set_position(Duration::ZERO);
            match self.media.play() {
                Ok(()) => {
                    if self.state != EngineState::Playing {
                        self.state = EngineState::Playing;
                        self.emit(PlayerEvent::StateChanged {
                            state: EngineState::Playing,
                        });
                    }
                    self.emit(PlayerEvent::Progress {
                        position: Duration::ZERO,
                        duration: self.duration,
                    });
                }
                Err(err) => {
                    warn!(%err, "repeat-one restart rejected by media element");
                    self.halt();
                }
            }
            return;
        }

        self.next();
    }

    /// Resolve the album-context neighbor of the current track
    fn neighbor_in_album(&self, direction: Direction) -> Option<Track> {
        let current = self.current_track.as_ref()?;
        let artist = self.catalog.artist(&current.artist)?;
        let album = artist.albums.iter().find(|al| al.name == current.album)?;
        if album.songs.is_empty() {
            return None;
        }

        let len = album.songs.len();
        let index = album.position_of(&current.id).unwrap_or(0);
        let target = match direction {
            // Uniformly random; may land on the current index by chance
            Direction::Forward if self.shuffle => rand::thread_rng().gen_range(0..len),
            Direction::Forward => (index + 1) % len,
            Direction::Backward => (index + len - 1) % len,
        };

        let song = &album.songs[target];
        Some(self.resolver.resolve(song, &artist.name, &album.name))
    }

    fn record_history(&mut self, track: Track) {
        self.history.record(track);
        self.persist_history();
        self.emit(PlayerEvent::HistoryChanged {
            length: self.history.len(),
        });
    }

    fn persist_queue(&self) {
        save_json(self.store.as_ref(), keys::QUEUE, &self.queue.tracks());
    }

    fn persist_history(&self) {
        save_json(
            self.store.as_ref(),
            keys::RECENTLY_PLAYED,
            &self.history.persisted_slice(),
        );
    }
}
