//! Progress bar scrubbing
//!
//! Translates pointer drags and keyboard input into seek requests and owns
//! the visual position bar while a drag is in progress. During a drag the
//! controller is the sole writer of the bar: the engine's periodic
//! progress notifications are not forwarded, which prevents the bar from
//! fighting between user input and playback ticks. The actual seek is
//! issued exactly once, on release.

use crate::engine::PlayerEngine;
use crate::events::PlayerEvent;
use crate::types::PlaybackSnapshot;
use std::time::Duration;

/// What the scrub controller needs from its display surface
///
/// An explicit capability interface: playback logic never reaches into the
/// rendering layer beyond these calls.
pub trait DisplaySink {
    /// Show metadata for a newly selected track
    fn update_metadata(&mut self, track: &crate::types::Track);

    /// Move the visual position bar
    fn update_progress(&mut self, position: Duration, duration: Duration);

    /// Reflect the playing/paused indicator
    fn set_playing(&mut self, playing: bool);
}

/// Keyboard seek inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekKey {
    /// Nudge backward (5s)
    ArrowLeft,
    /// Nudge forward (5s)
    ArrowRight,
    /// Jump forward (10s)
    PageUp,
    /// Jump backward (10s)
    PageDown,
    /// Jump to start
    Home,
    /// Jump to end
    End,
}

/// Drag/keyboard scrub controller for the position bar
pub struct ScrubController {
    display: Box<dyn DisplaySink>,
    is_scrubbing: bool,
    was_playing_before_scrub: bool,
}

impl ScrubController {
    /// Create a controller driving the given display
    pub fn new(display: Box<dyn DisplaySink>) -> Self {
        Self {
            display,
            is_scrubbing: false,
            was_playing_before_scrub: false,
        }
    }

    /// Whether a drag is in progress
    pub fn is_scrubbing(&self) -> bool {
        self.is_scrubbing
    }

    /// Pointer down on the bar: capture play state, pause, take ownership
    /// of the bar
    pub fn begin(&mut self, engine: &mut PlayerEngine) {
        self.was_playing_before_scrub = engine.snapshot().is_playing;
        if self.was_playing_before_scrub {
            engine.pause();
        }
        self.is_scrubbing = true;
    }

    /// Pointer move: update the visual bar only, no seek
    ///
    /// `fraction` is the pointer position within the bar, clamped to
    /// `[0, 1]`. Returns the time the bar now shows.
    pub fn drag(&mut self, engine: &PlayerEngine, fraction: f64) -> Duration {
        let position = self.fraction_to_time(engine, fraction);
        self.display.update_progress(position, engine.duration());
        position
    }

    /// Pointer up: issue the one seek, resume if we paused, release the bar
    pub fn finish(&mut self, engine: &mut PlayerEngine, fraction: f64) {
        let position = self.fraction_to_time(engine, fraction);
        engine.seek_to(position.as_secs_f64());
        if self.was_playing_before_scrub {
            engine.play();
        }
        self.is_scrubbing = false;
    }

    /// Keyboard seek: immediate, no scrub state involved
    pub fn handle_key(&mut self, engine: &mut PlayerEngine, key: SeekKey) {
        let arrow = engine.config().arrow_seek.as_secs_f64();
        let page = engine.config().page_seek.as_secs_f64();

        match key {
            SeekKey::ArrowLeft => engine.skip_by(-arrow),
            SeekKey::ArrowRight => engine.skip_by(arrow),
            SeekKey::PageUp => engine.skip_by(page),
            SeekKey::PageDown => engine.skip_by(-page),
            SeekKey::Home => engine.seek_to(0.0),
            SeekKey::End => engine.seek_to(engine.duration().as_secs_f64()),
        }
    }

    /// Engine observer: forwards state to the display, suppressing
    /// progress updates while a drag owns the bar
    pub fn on_event(&mut self, event: &PlayerEvent, snapshot: &PlaybackSnapshot) {
        match event {
            PlayerEvent::TrackChanged { track } => self.display.update_metadata(track),
            PlayerEvent::StateChanged { .. } => self.display.set_playing(snapshot.is_playing),
            PlayerEvent::Progress { position, duration } if !self.is_scrubbing => {
                self.display.update_progress(*position, *duration);
            }
            _ => {}
        }
    }

    fn fraction_to_time(&self, engine: &PlayerEngine, fraction: f64) -> Duration {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Duration::from_secs_f64(engine.duration().as_secs_f64() * fraction)
    }
}
