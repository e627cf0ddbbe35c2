//! User playlists
//!
//! Playlists own full track snapshots so they render and replay without
//! the catalog. Ids are assigned at creation and never change; every
//! mutation goes through an explicit operation and writes the whole list
//! through to storage.

use crate::types::Track;
use chrono::{DateTime, Utc};
use lyra_core::storage::{keys, load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

/// A user playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier (immutable after creation)
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Track snapshots in playlist order
    pub songs: Vec<Track>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The user's playlist collection
pub struct Playlists {
    store: Rc<dyn KeyValueStore>,
    playlists: Vec<Playlist>,
}

impl Playlists {
    /// Load playlists from storage
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let playlists = load_json::<Vec<Playlist>>(store.as_ref(), keys::PLAYLISTS)
            .unwrap_or_default();
        Self { store, playlists }
    }

    /// Create a playlist
    ///
    /// The name is trimmed; an empty name creates nothing.
    pub fn create(&mut self, name: &str) -> Option<&Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        self.playlists.push(Playlist {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            songs: Vec::new(),
            created_at: Utc::now(),
        });
        self.persist();
        self.playlists.last()
    }

    /// Rename a playlist
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        playlist.name = name.to_string();
        self.persist();
        true
    }

    /// Delete a playlist
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        if self.playlists.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Add a track to a playlist
    ///
    /// Rejects tracks whose id is already present.
    pub fn add_song(&mut self, id: &str, track: Track) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if playlist.songs.iter().any(|s| s.id == track.id) {
            return false;
        }

        playlist.songs.push(track);
        self.persist();
        true
    }

    /// Remove a track from a playlist by song id
    pub fn remove_song(&mut self, id: &str, song_id: &str) -> bool {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        let before = playlist.songs.len();
        playlist.songs.retain(|s| s.id != song_id);
        if playlist.songs.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Playlist by id
    pub fn get(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// All playlists in creation order
    pub fn all(&self) -> &[Playlist] {
        &self.playlists
    }

    fn persist(&self) {
        save_json(self.store.as_ref(), keys::PLAYLISTS, &self.playlists);
    }
}
