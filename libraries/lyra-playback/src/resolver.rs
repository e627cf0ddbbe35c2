//! Track resolution
//!
//! Turns catalog songs into self-contained playable tracks and derives the
//! content locators the media element loads: cover art from the album name,
//! audio source candidates from the track title. All derivations are pure
//! and deterministic.

use crate::types::{PlayerConfig, Track};
use lyra_core::Song;

/// Content-addressing slug: lowercase, whitespace and non-word characters
/// stripped
pub fn slug(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Resolves songs to tracks and tracks to content locators
#[derive(Debug, Clone)]
pub struct TrackResolver {
    config: PlayerConfig,
}

impl TrackResolver {
    /// Create a resolver with the given configuration
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Resolve a catalog song into a playable track
    pub fn resolve(&self, song: &Song, artist_name: &str, album_name: &str) -> Track {
        Track {
            id: song.id.clone(),
            title: song.title.clone(),
            duration: song.duration,
            genre: song.genre.clone(),
            artist: artist_name.to_string(),
            album: album_name.to_string(),
            cover: self.cover_url(album_name),
        }
    }

    /// Cover art locator for an album name
    ///
    /// An empty or unsluggable album name yields the default placeholder.
    pub fn cover_url(&self, album_name: &str) -> String {
        let clean = slug(album_name);
        if clean.is_empty() {
            return self.config.default_artwork_url.clone();
        }
        format!("{}/{}.png", self.config.artwork_base_url, clean)
    }

    /// Audio source candidates for a track, in load priority order
    ///
    /// One URL per configured format extension. An empty title slug yields
    /// no candidates, so resolution fails fast instead of requesting
    /// nonsense locators.
    pub fn source_candidates(&self, track: &Track) -> Vec<String> {
        let file_name = slug(&track.title);
        if file_name.is_empty() {
            return Vec::new();
        }

        self.config
            .audio_formats
            .iter()
            .map(|format| format!("{}/{}.{}", self.config.audio_base_url, file_name, format))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn resolver() -> TrackResolver {
        TrackResolver::new(&PlayerConfig::default())
    }

    #[test]
    fn slug_strips_whitespace_and_punctuation() {
        assert_eq!(slug("Night Flight"), "nightflight");
        assert_eq!(slug("Don't Stop!"), "dontstop");
        assert_eq!(slug("  A.B.C  "), "abc");
        assert_eq!(slug("snake_case"), "snake_case");
    }

    #[test]
    fn slug_of_punctuation_only_is_empty() {
        assert_eq!(slug("?!..."), "");
        assert_eq!(slug(""), "");
    }

    #[test]
    fn resolve_is_self_contained() {
        let song = Song::new("nf1", "First Light", Duration::from_secs(180));
        let track = resolver().resolve(&song, "The Owls", "Night Flight");

        assert_eq!(track.id, "nf1");
        assert_eq!(track.artist, "The Owls");
        assert_eq!(track.album, "Night Flight");
        assert!(track.cover.ends_with("/nightflight.png"));
    }

    #[test]
    fn cover_url_falls_back_to_placeholder() {
        let r = resolver();
        assert_eq!(r.cover_url(""), PlayerConfig::default().default_artwork_url);
        assert_eq!(
            r.cover_url("!!!"),
            PlayerConfig::default().default_artwork_url
        );
    }

    #[test]
    fn source_candidates_follow_format_priority() {
        let song = Song::new("nf1", "First Light", Duration::from_secs(180));
        let track = resolver().resolve(&song, "The Owls", "Night Flight");

        let candidates = resolver().source_candidates(&track);
        assert_eq!(candidates.len(), 4);
        assert!(candidates[0].ends_with("/firstlight.mp3"));
        assert!(candidates[1].ends_with("/firstlight.ogg"));
        assert!(candidates[2].ends_with("/firstlight.m4a"));
        assert!(candidates[3].ends_with("/firstlight.wav"));
    }

    #[test]
    fn unsluggable_title_yields_no_candidates() {
        let song = Song::new("x", "???", Duration::from_secs(10));
        let track = resolver().resolve(&song, "A", "B");
        assert!(resolver().source_candidates(&track).is_empty());
    }
}
