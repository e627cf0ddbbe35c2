//! Key/value storage boundary
//!
//! Persistence for player state (queue snapshot, recently played,
//! playlists, favorite-id sets) behind a minimal key/value trait. Failures
//! are swallowed at this boundary: a store that cannot save or load simply
//! reports `false`/`None`, and the player degrades to memory-only state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Persisted keys
pub mod keys {
    /// Recently played slice (most recent first)
    pub const RECENTLY_PLAYED: &str = "recentlyPlayed";
    /// User playlists
    pub const PLAYLISTS: &str = "playlists";
    /// Pending queue snapshot
    pub const QUEUE: &str = "queue";
    /// Favorite song ids
    pub const FAVORITE_SONGS: &str = "favoriteSongs";
    /// Favorite artist ids
    pub const FAVORITE_ARTISTS: &str = "favoriteArtists";
    /// Favorite album ids
    pub const FAVORITE_ALBUMS: &str = "favoriteAlbums";
}

/// Key/value storage boundary
///
/// Methods take `&self`; implementations use interior mutability so a
/// single store can be shared by every component that persists state.
/// Neither method ever fails loudly.
pub trait KeyValueStore {
    /// Persist a value under a key, replacing any previous value
    ///
    /// Returns `false` if the value could not be persisted.
    fn save(&self, key: &str, value: &Value) -> bool;

    /// Load the value stored under a key, or `None`
    fn load(&self, key: &str) -> Option<Value>;
}

/// Serialize and persist a typed value
///
/// Serialization failures are swallowed (logged, `false` returned).
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match serde_json::to_value(value) {
        Ok(json) => store.save(key, &json),
        Err(err) => {
            warn!(key, %err, "failed to serialize value for storage");
            false
        }
    }
}

/// Load and deserialize a typed value
///
/// Missing keys and deserialization failures both yield `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.load(key)?;
    match serde_json::from_value(json) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "failed to deserialize stored value");
            None
        }
    }
}

/// In-memory store
///
/// Used by tests and by sessions that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&self, key: &str, value: &Value) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        true
    }

    fn load(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }
}

/// JSON-file-backed store
///
/// All keys live in a single JSON document that is rewritten on every save
/// (write-through). I/O failures are logged and swallowed; the in-memory
/// view stays current so only persistence degrades.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing document
    ///
    /// A missing or unreadable document starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring corrupt storage document");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: RefCell::new(entries),
        }
    }

    fn flush(&self) -> bool {
        let entries = self.entries.borrow();
        let contents = match serde_json::to_string(&*entries) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to serialize storage document");
                return false;
            }
        };

        if let Err(err) = std::fs::write(&self.path, contents) {
            warn!(path = %self.path.display(), %err, "failed to write storage document");
            return false;
        }
        true
    }
}

impl KeyValueStore for JsonFileStore {
    fn save(&self, key: &str, value: &Value) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.clone());
        self.flush()
    }

    fn load(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }
}
