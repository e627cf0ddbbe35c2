//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No track is currently selected
    #[error("No track loaded")]
    NoTrackLoaded,

    /// No source candidate produced playable audio
    #[error("No playable audio source for \"{0}\"")]
    NoPlayableSource(String),

    /// Media element error
    #[error("Media element error: {0}")]
    Media(String),

    /// Invalid seek target
    #[error("Invalid seek target: {0}")]
    InvalidSeek(f64),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
