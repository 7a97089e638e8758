//! # CLI Behavior
//!
//! This is **one possible UI client** for sheetapp, not the application
//! itself. The CLI is the only place that knows about terminal I/O, exit
//! codes and output formatting.
//!
//! ## Naked Execution (`sheet`)
//!
//! Running `sheet` with no arguments defaults to `sheet list`.
//!
//! ## First Run
//!
//! A fresh data directory is empty. `sheet fetch` downloads the configured
//! source sheet; `sheet seed --file <path>` does the same from a local copy.
//! Either one is a no-op once the sheet holds questions, so re-running it
//! never overwrites progress.
//!
//! ## Addressing
//!
//! `sheet list` prints a dotted path next to every entry. Paths are positions
//! in the full sheet, so a path read off a filtered listing is still valid.
//! Raw ids work too.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `render`: Output formatting (tree, stats, colors)
//! - `setup`: Argument parsing via clap
//! - `logging`: tracing subscriber, driven by `-v`

mod commands;
mod logging;
mod render;
pub mod setup;

pub use commands::run;
