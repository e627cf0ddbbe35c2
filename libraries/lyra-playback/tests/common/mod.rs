//! Shared fixtures for integration tests

use lyra_core::{Album, Artist, Catalog, KeyValueStore, MemoryStore, Song};
use lyra_playback::{
    LoadToken, MediaElement, MediaEvent, PlaybackSnapshot, PlayerConfig, PlayerEngine, PlayerError,
    PlayerEvent, Track,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Observable state of the mock media element
#[derive(Debug, Default)]
pub struct MediaState {
    /// Every source assignment, in order, with its load token
    pub loads: Vec<(String, LoadToken)>,
    /// Whether the element is currently playing
    pub playing: bool,
    /// Element position
    pub position: Duration,
    /// When set, `play()` is rejected (autoplay-style refusal)
    pub fail_play: bool,
}

/// Mock media element sharing its state with the test body
pub struct MockMediaElement(pub Rc<RefCell<MediaState>>);

impl MediaElement for MockMediaElement {
    fn set_source(&mut self, url: &str, token: LoadToken) {
        let mut state = self.0.borrow_mut();
        state.loads.push((url.to_string(), token));
        state.playing = false;
        state.position = Duration::ZERO;
    }

    fn play(&mut self) -> lyra_playback::Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_play {
            return Err(PlayerError::Media("play rejected".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().playing = false;
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn set_position(&mut self, position: Duration) {
        self.0.borrow_mut().position = position;
    }

    fn duration(&self) -> Option<Duration> {
        None
    }
}

/// Five-song single-album catalog used by the traversal scenarios
pub fn sample_catalog() -> Catalog {
    let songs = [
        ("s1", "Song One"),
        ("s2", "Song Two"),
        ("s3", "Song Three"),
        ("s4", "Song Four"),
        ("s5", "Song Five"),
    ];

    Catalog::new(vec![Artist {
        name: "The Owls".to_string(),
        albums: vec![Album {
            name: "Night Flight".to_string(),
            songs: songs
                .iter()
                .map(|(id, title)| Song::new(*id, *title, Duration::from_secs(180)))
                .collect(),
        }],
        similar: vec![],
    }])
}

/// Engine over the sample catalog with a mock element and in-memory store
pub fn engine_with(
    catalog: Catalog,
) -> (PlayerEngine, Rc<RefCell<MediaState>>, Rc<MemoryStore>) {
    engine_with_store(catalog, Rc::new(MemoryStore::new()))
}

/// Engine wired to an existing store (for persistence round-trips)
pub fn engine_with_store(
    catalog: Catalog,
    store: Rc<MemoryStore>,
) -> (PlayerEngine, Rc<RefCell<MediaState>>, Rc<MemoryStore>) {
    let media_state = Rc::new(RefCell::new(MediaState::default()));
    let media = MockMediaElement(Rc::clone(&media_state));
    let store_handle: Rc<dyn KeyValueStore> = store.clone();

    let engine = PlayerEngine::new(
        PlayerConfig::default(),
        catalog,
        Box::new(media),
        store_handle,
    );
    (engine, media_state, store)
}

/// Resolve a catalog song into a track through the engine's resolver
pub fn resolve_song(engine: &PlayerEngine, id: &str) -> Track {
    let (artist, album, song) = engine
        .catalog()
        .all_songs()
        .find(|(_, _, s)| s.id == id)
        .unwrap_or_else(|| panic!("song {id} not in catalog"));
    let artist = artist.name.clone();
    let album = album.name.clone();
    let song = song.clone();
    engine.resolver().resolve(&song, &artist, &album)
}

/// Token of the most recent source assignment
pub fn last_token(media: &Rc<RefCell<MediaState>>) -> LoadToken {
    media
        .borrow()
        .loads
        .last()
        .expect("no source assigned")
        .1
}

/// Drive the pending load to success and report element metadata
pub fn complete_load(
    engine: &mut PlayerEngine,
    media: &Rc<RefCell<MediaState>>,
    duration_secs: u64,
) {
    let token = last_token(media);
    engine.handle_media_event(MediaEvent::SourceReady { token });
    engine.handle_media_event(MediaEvent::LoadedMetadata {
        duration: Duration::from_secs(duration_secs),
    });
}

/// Select a song, complete its load, and report a 180s duration
pub fn play_song(engine: &mut PlayerEngine, media: &Rc<RefCell<MediaState>>, id: &str) {
    let track = resolve_song(engine, id);
    engine.play_track(track);
    complete_load(engine, media, 180);
}

/// Subscribe a recording listener, returning the captured (event, snapshot)
/// log
pub fn record_events(
    engine: &mut PlayerEngine,
) -> Rc<RefCell<Vec<(PlayerEvent, PlaybackSnapshot)>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.subscribe(Box::new(move |event, snapshot| {
        sink.borrow_mut().push((event.clone(), snapshot.clone()));
    }));
    log
}

/// Ids of current track for terse assertions
pub fn current_id(engine: &PlayerEngine) -> Option<String> {
    engine.current_track().map(|t| t.id.clone())
}
