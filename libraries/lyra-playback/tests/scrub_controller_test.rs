//! Integration tests for the progress/scrub controller
//!
//! Verifies that a drag owns the visual bar (engine ticks are suppressed,
//! no seeks until release), that release issues exactly one seek and
//! restores the pre-drag play state, and that keyboard seeks are immediate.

mod common;

use common::*;
use lyra_playback::{DisplaySink, PlayerEvent, ScrubController, SeekKey, Track};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq)]
enum DisplayCall {
    Metadata(String),
    Progress(Duration, Duration),
    Playing(bool),
}

struct RecordingDisplay(Rc<RefCell<Vec<DisplayCall>>>);

impl DisplaySink for RecordingDisplay {
    fn update_metadata(&mut self, track: &Track) {
        self.0
            .borrow_mut()
            .push(DisplayCall::Metadata(track.id.clone()));
    }

    fn update_progress(&mut self, position: Duration, duration: Duration) {
        self.0
            .borrow_mut()
            .push(DisplayCall::Progress(position, duration));
    }

    fn set_playing(&mut self, playing: bool) {
        self.0.borrow_mut().push(DisplayCall::Playing(playing));
    }
}

fn scrub() -> (ScrubController, Rc<RefCell<Vec<DisplayCall>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let controller = ScrubController::new(Box::new(RecordingDisplay(Rc::clone(&calls))));
    (controller, calls)
}

fn seek_count(log: &Rc<RefCell<Vec<(PlayerEvent, lyra_playback::PlaybackSnapshot)>>>) -> usize {
    log.borrow()
        .iter()
        .filter(|(e, _)| matches!(e, PlayerEvent::Seeked { .. }))
        .count()
}

// ===== Drag Lifecycle =====

#[test]
fn begin_pauses_playback_and_takes_the_bar() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");

    controller.begin(&mut engine);

    assert!(controller.is_scrubbing());
    assert!(!engine.snapshot().is_playing);
}

#[test]
fn drag_moves_the_bar_without_seeking() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, calls) = scrub();
    play_song(&mut engine, &media, "s1");
    media.borrow_mut().position = Duration::from_secs(10);

    let log = record_events(&mut engine);
    controller.begin(&mut engine);
    controller.drag(&engine, 0.25);
    controller.drag(&engine, 0.5);

    // Visual updates only: the element position is untouched and no seek
    // has been issued
    assert_eq!(seek_count(&log), 0);
    assert_eq!(media.borrow().position, Duration::from_secs(10));

    let calls = calls.borrow();
    assert!(calls.contains(&DisplayCall::Progress(
        Duration::from_secs(45),
        Duration::from_secs(180)
    )));
    assert!(calls.contains(&DisplayCall::Progress(
        Duration::from_secs(90),
        Duration::from_secs(180)
    )));
}

#[test]
fn engine_ticks_are_suppressed_while_scrubbing() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, calls) = scrub();
    play_song(&mut engine, &media, "s1");

    controller.begin(&mut engine);
    let event = PlayerEvent::Progress {
        position: Duration::from_secs(55),
        duration: Duration::from_secs(180),
    };
    controller.on_event(&event, &engine.snapshot());

    // The playback tick never reached the display
    assert!(!calls
        .borrow()
        .iter()
        .any(|c| matches!(c, DisplayCall::Progress(p, _) if *p == Duration::from_secs(55))));

    // After release the same tick flows through again
    controller.finish(&mut engine, 0.0);
    controller.on_event(&event, &engine.snapshot());
    assert!(calls
        .borrow()
        .iter()
        .any(|c| matches!(c, DisplayCall::Progress(p, _) if *p == Duration::from_secs(55))));
}

#[test]
fn release_issues_exactly_one_seek_and_resumes() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");

    let log = record_events(&mut engine);
    controller.begin(&mut engine);
    controller.drag(&engine, 0.2);
    controller.drag(&engine, 0.4);
    controller.finish(&mut engine, 0.4);

    assert_eq!(seek_count(&log), 1);
    assert_eq!(media.borrow().position, Duration::from_secs(72));
    assert!(!controller.is_scrubbing());
    // We were playing before the drag, so playback resumes
    assert!(engine.snapshot().is_playing);
}

#[test]
fn release_stays_paused_when_playback_was_paused() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");
    engine.pause();

    controller.begin(&mut engine);
    controller.finish(&mut engine, 0.5);

    assert!(!engine.snapshot().is_playing);
    assert_eq!(media.borrow().position, Duration::from_secs(90));
}

#[test]
fn drag_fractions_clamp_to_the_bar() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");

    controller.begin(&mut engine);
    assert_eq!(controller.drag(&engine, 2.0), Duration::from_secs(180));
    assert_eq!(controller.drag(&engine, -0.5), Duration::ZERO);
    assert_eq!(controller.drag(&engine, f64::NAN), Duration::ZERO);
}

// ===== Display Mirroring =====

#[test]
fn track_and_state_changes_reach_the_display() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let calls = Rc::new(RefCell::new(Vec::new()));
    let controller = Rc::new(RefCell::new(ScrubController::new(Box::new(
        RecordingDisplay(Rc::clone(&calls)),
    ))));

    let observer = Rc::clone(&controller);
    engine.subscribe(Box::new(move |event, snapshot| {
        observer.borrow_mut().on_event(event, snapshot);
    }));

    play_song(&mut engine, &media, "s2");

    let calls = calls.borrow();
    assert!(calls.contains(&DisplayCall::Metadata("s2".to_string())));
    assert!(calls.contains(&DisplayCall::Playing(true)));
}

// ===== Keyboard Seeks =====

#[test]
fn arrow_keys_nudge_five_seconds() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");
    media.borrow_mut().position = Duration::from_secs(50);

    controller.handle_key(&mut engine, SeekKey::ArrowRight);
    assert_eq!(media.borrow().position, Duration::from_secs(55));

    controller.handle_key(&mut engine, SeekKey::ArrowLeft);
    assert_eq!(media.borrow().position, Duration::from_secs(50));
}

#[test]
fn page_keys_jump_ten_seconds() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");
    media.borrow_mut().position = Duration::from_secs(50);

    controller.handle_key(&mut engine, SeekKey::PageUp);
    assert_eq!(media.borrow().position, Duration::from_secs(60));

    controller.handle_key(&mut engine, SeekKey::PageDown);
    assert_eq!(media.borrow().position, Duration::from_secs(50));
}

#[test]
fn home_and_end_jump_to_track_bounds() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");
    media.borrow_mut().position = Duration::from_secs(50);

    controller.handle_key(&mut engine, SeekKey::End);
    assert_eq!(media.borrow().position, Duration::from_secs(180));

    controller.handle_key(&mut engine, SeekKey::Home);
    assert_eq!(media.borrow().position, Duration::ZERO);
}

#[test]
fn keyboard_seeks_clamp_at_track_edges() {
    let (mut engine, media, _store) = engine_with(sample_catalog());
    let (mut controller, _calls) = scrub();
    play_song(&mut engine, &media, "s1");

    media.borrow_mut().position = Duration::from_secs(2);
    controller.handle_key(&mut engine, SeekKey::PageDown);
    assert_eq!(media.borrow().position, Duration::ZERO);

    media.borrow_mut().position = Duration::from_secs(178);
    controller.handle_key(&mut engine, SeekKey::ArrowRight);
    assert_eq!(media.borrow().position, Duration::from_secs(180));
}
