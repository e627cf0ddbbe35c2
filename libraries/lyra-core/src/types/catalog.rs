/// Catalog domain types
///
/// The catalog is the read-only music library: a nested collection of
/// artists, their albums, and the songs on each album. Playback code only
/// ever reads from it; mutation is out of scope.
use crate::types::Song;
use serde::{Deserialize, Serialize};

/// An album within an artist's discography
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Album name
    pub name: String,

    /// Songs in album order
    pub songs: Vec<Song>,
}

impl Album {
    /// Index of a song within this album, by id
    pub fn position_of(&self, song_id: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.id == song_id)
    }
}

/// An artist and their discography
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name (unique within the catalog)
    pub name: String,

    /// Albums in catalog order
    pub albums: Vec<Album>,

    /// Names of similar artists (may reference artists outside the catalog)
    #[serde(default)]
    pub similar: Vec<String>,
}

impl Artist {
    /// Total number of songs across all albums
    pub fn total_songs(&self) -> usize {
        self.albums.iter().map(|a| a.songs.len()).sum()
    }
}

/// The read-only music library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    artists: Vec<Artist>,
}

impl Catalog {
    /// Create a catalog from a list of artists
    pub fn new(artists: Vec<Artist>) -> Self {
        Self { artists }
    }

    /// All artists in catalog order
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Look up an artist by name
    pub fn artist(&self, name: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.name == name)
    }

    /// Look up an album by artist and album name
    ///
    /// This is the lookup the playback layer uses to resolve the album
    /// context of the current track.
    pub fn album(&self, artist_name: &str, album_name: &str) -> Option<&Album> {
        self.artist(artist_name)?
            .albums
            .iter()
            .find(|al| al.name == album_name)
    }

    /// Iterate every song in the catalog with its artist and album context
    pub fn all_songs(&self) -> impl Iterator<Item = (&Artist, &Album, &Song)> {
        self.artists.iter().flat_map(|artist| {
            artist.albums.iter().flat_map(move |album| {
                album.songs.iter().map(move |song| (artist, album, song))
            })
        })
    }

    /// Similar artists for a given artist name, de-duplicated, self excluded
    pub fn similar_artists(&self, artist_name: &str, limit: usize) -> Vec<&str> {
        let Some(artist) = self.artist(artist_name) else {
            return Vec::new();
        };

        let mut seen = std::collections::HashSet::new();
        artist
            .similar
            .iter()
            .map(String::as_str)
            .filter(|name| *name != artist_name && seen.insert(*name))
            .take(limit)
            .collect()
    }
}
