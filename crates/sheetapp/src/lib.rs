//! # Sheetapp Architecture
//!
//! Sheetapp is a **UI-agnostic study tracker library**. It owns a curated list
//! of questions grouped into topics and subtopics, plus the user's progress on
//! it: completion, favorites, tags, notes and per-question timers. The `sheet`
//! binary is one client of it; nothing in here assumes a terminal.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (the `sheet` crate)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns AppState (sheet, theme, filter)                     │
//! │  - Validates input, resolves paths (2.1.3) to ids           │
//! │  - Persists after every change                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The mutation engine: total functions over &mut Sheet     │
//! │  - Readers: stats.rs, filter.rs, timer.rs                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, persist.rs)                         │
//! │  - BlobStore trait: string blobs by key                     │
//! │  - FileBlobStore (production), MemBlobStore (testing)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data enters from the side: [`loader`] fetches the source document and
//! builds the initial tree, and [`transfer`] reads and writes progress files.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments, including the current time
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`), `stats`, `filter`: thorough unit tests
//!    of the logic. This is where most testing lives.
//! 2. **API** (`api.rs`): validation, address resolution and persistence,
//!    against `MemBlobStore`.
//! 3. **Store / persistence**: `FileBlobStore` in temp dirs
//!    (`tests/` holds the cross-restart scenarios).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: The mutation engine
//! - [`model`]: Core data types (`Sheet`, `Topic`, `SubTopic`, `Question`)
//! - [`ordering`]: Stable move-to-index used by every reorder
//! - [`stats`]: Derived progress statistics
//! - [`filter`]: Search / favorites / tag filtering and visibility
//! - [`timer`]: Live elapsed time and duration formatting
//! - [`index`]: Display paths (`2.1.3`) and id resolution
//! - [`loader`]: Remote source fetch and tree building
//! - [`transfer`]: Progress export and import
//! - [`goals`]: The study-goal checklist
//! - [`persist`]: What is stored under each key
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration
//! - [`init`]: Data directory resolution and startup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod goals;
pub mod index;
pub mod init;
pub mod loader;
pub mod model;
pub mod ordering;
pub mod persist;
pub mod stats;
pub mod store;
pub mod timer;
pub mod transfer;

#[cfg(test)]
pub mod test_utils;
