//! Favorites
//!
//! Three independent sets of favorited identifiers (songs, artists,
//! albums). Membership is a pure set operation, so toggling twice always
//! returns to the original state. Every mutation writes through to
//! storage; each kind persists under its own key.

use lyra_core::storage::{keys, load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;

/// Which favorite set an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoriteKind {
    /// Favorite songs
    Songs,
    /// Favorite artists
    Artists,
    /// Favorite albums
    Albums,
}

impl FavoriteKind {
    fn storage_key(self) -> &'static str {
        match self {
            FavoriteKind::Songs => keys::FAVORITE_SONGS,
            FavoriteKind::Artists => keys::FAVORITE_ARTISTS,
            FavoriteKind::Albums => keys::FAVORITE_ALBUMS,
        }
    }
}

/// Favorited song/artist/album identifiers
pub struct Favorites {
    store: Rc<dyn KeyValueStore>,
    songs: HashSet<String>,
    artists: HashSet<String>,
    albums: HashSet<String>,
}

impl Favorites {
    /// Load favorites from storage
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let load_set = |key| {
            load_json::<Vec<String>>(store.as_ref(), key)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_default()
        };

        Self {
            songs: load_set(keys::FAVORITE_SONGS),
            artists: load_set(keys::FAVORITE_ARTISTS),
            albums: load_set(keys::FAVORITE_ALBUMS),
            store,
        }
    }

    /// Check membership
    pub fn has(&self, kind: FavoriteKind, id: &str) -> bool {
        self.set(kind).contains(id)
    }

    /// Add an identifier; returns false if it was already present
    pub fn add(&mut self, kind: FavoriteKind, id: impl Into<String>) -> bool {
        let added = self.set_mut(kind).insert(id.into());
        if added {
            self.persist(kind);
        }
        added
    }

    /// Remove an identifier; returns false if it was absent
    pub fn remove(&mut self, kind: FavoriteKind, id: &str) -> bool {
        let removed = self.set_mut(kind).remove(id);
        if removed {
            self.persist(kind);
        }
        removed
    }

    /// Toggle membership, returning the new state
    pub fn toggle(&mut self, kind: FavoriteKind, id: &str) -> bool {
        if self.has(kind, id) {
            self.remove(kind, id);
            false
        } else {
            self.add(kind, id);
            true
        }
    }

    /// Number of favorites of a kind
    pub fn count(&self, kind: FavoriteKind) -> usize {
        self.set(kind).len()
    }

    /// All favorited identifiers of a kind
    pub fn ids(&self, kind: FavoriteKind) -> &HashSet<String> {
        self.set(kind)
    }

    fn set(&self, kind: FavoriteKind) -> &HashSet<String> {
        match kind {
            FavoriteKind::Songs => &self.songs,
            FavoriteKind::Artists => &self.artists,
            FavoriteKind::Albums => &self.albums,
        }
    }

    fn set_mut(&mut self, kind: FavoriteKind) -> &mut HashSet<String> {
        match kind {
            FavoriteKind::Songs => &mut self.songs,
            FavoriteKind::Artists => &mut self.artists,
            FavoriteKind::Albums => &mut self.albums,
        }
    }

    fn persist(&self, kind: FavoriteKind) {
        // Sorted for stable storage documents
        let mut ids: Vec<&String> = self.set(kind).iter().collect();
        ids.sort();
        save_json(self.store.as_ref(), kind.storage_key(), &ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_core::MemoryStore;

    fn favorites() -> Favorites {
        Favorites::load(Rc::new(MemoryStore::new()))
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut favorites = favorites();

        assert!(favorites.toggle(FavoriteKind::Songs, "id1"));
        assert!(favorites.has(FavoriteKind::Songs, "id1"));

        assert!(!favorites.toggle(FavoriteKind::Songs, "id1"));
        assert!(!favorites.has(FavoriteKind::Songs, "id1"));
    }

    #[test]
    fn kinds_are_independent() {
        let mut favorites = favorites();
        favorites.add(FavoriteKind::Songs, "x");

        assert!(favorites.has(FavoriteKind::Songs, "x"));
        assert!(!favorites.has(FavoriteKind::Artists, "x"));
        assert!(!favorites.has(FavoriteKind::Albums, "x"));
    }

    #[test]
    fn add_twice_is_single_membership() {
        let mut favorites = favorites();
        assert!(favorites.add(FavoriteKind::Albums, "a"));
        assert!(!favorites.add(FavoriteKind::Albums, "a"));
        assert_eq!(favorites.count(FavoriteKind::Albums), 1);
    }

    #[test]
    fn mutations_write_through_and_reload() {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());

        {
            let mut favorites = Favorites::load(Rc::clone(&store));
            favorites.add(FavoriteKind::Songs, "s2");
            favorites.add(FavoriteKind::Songs, "s1");
            favorites.add(FavoriteKind::Artists, "a1");
        }

        let reloaded = Favorites::load(store);
        assert!(reloaded.has(FavoriteKind::Songs, "s1"));
        assert!(reloaded.has(FavoriteKind::Songs, "s2"));
        assert!(reloaded.has(FavoriteKind::Artists, "a1"));
        assert_eq!(reloaded.count(FavoriteKind::Albums), 0);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut favorites = favorites();
        assert!(!favorites.remove(FavoriteKind::Artists, "ghost"));
    }
}
