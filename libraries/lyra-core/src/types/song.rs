/// Song domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single song as it exists in the catalog
///
/// Immutable and owned by the [`Catalog`](crate::Catalog). Playback-facing
/// code never stores `Song` directly; it is projected into a self-contained
/// track record on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: String,

    /// Song title
    pub title: String,

    /// Song duration
    pub duration: Duration,

    /// Genre (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Song {
    /// Create a new song
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            genre: None,
        }
    }
}
