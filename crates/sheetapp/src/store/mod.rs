//! # Storage Layer
//!
//! The application persists a handful of JSON blobs under fixed keys. The
//! [`BlobStore`] trait is all the rest of the crate knows about storage:
//! get, set and remove a string by key.
//!
//! ## Keys
//!
//! | Key           | Contents                                   |
//! |---------------|--------------------------------------------|
//! | `sheet-store` | `{ topics, sheetName, darkMode }`          |
//! | `study-goals` | `[{ id, text, done, createdAt }]`          |
//!
//! What goes into each blob is decided by [`crate::persist`]; the store
//! treats contents as opaque text.
//!
//! ## Implementations
//!
//! - [`fs::FileBlobStore`]: one `<key>.json` file per key in a data
//!   directory, written atomically.
//! - [`memory::MemBlobStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── sheet-store.json
//! ├── study-goals.json
//! └── config.json       # managed by crate::config, not by the store
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Durable key-value storage for string blobs.
///
/// All methods take `&self`; implementations use interior mutability where
/// needed.
pub trait BlobStore {
    /// Returns `Ok(None)` when the key has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob. MUST be atomic: readers see the old or the new
    /// value, never a partial write.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
