//! Lyra Core
//!
//! Platform-agnostic domain types, the storage boundary, and error handling
//! for the Lyra player.
//!
//! This crate defines:
//! - **Catalog Types**: `Artist`, `Album`, `Song`, and the read-only
//!   [`Catalog`] the playback layer traverses.
//! - **Storage Boundary**: the [`KeyValueStore`] trait plus in-memory and
//!   JSON-file-backed implementations.
//! - **Error Handling**: the [`CoreError`] and [`Result`] types.
//!
//! # Example
//!
//! ```rust
//! use lyra_core::{Album, Artist, Catalog, Song};
//! use std::time::Duration;
//!
//! let catalog = Catalog::new(vec![Artist {
//!     name: "The Owls".to_string(),
//!     albums: vec![Album {
//!         name: "Night Flight".to_string(),
//!         songs: vec![Song {
//!             id: "owls-01".to_string(),
//!             title: "First Light".to_string(),
//!             duration: Duration::from_secs(212),
//!             genre: None,
//!         }],
//!     }],
//!     similar: vec![],
//! }]);
//!
//! let album = catalog.album("The Owls", "Night Flight").unwrap();
//! assert_eq!(album.songs.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use storage::{load_json, save_json, JsonFileStore, KeyValueStore, MemoryStore};
pub use types::{Album, Artist, Catalog, Song};
