//! # Sheet CLI Architecture
//!
//! The `sheet` binary is intentionally thin: the CLI lives in `src/cli/`,
//! while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/sheetapp/`: core library, UI-agnostic tracker logic
//! - `crates/sheet/`: this CLI, depends on the `sheetapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/sheet/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! │  - tracing subscriber setup (logging.rs)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/sheetapp/src/api.rs)                     │
//! │  - Resolves paths like 2.1.3 to ids                         │
//! │  - Dispatches to the mutation engine and persists           │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns the
//! user-facing concerns: argument parsing, reading the clock, rendering and
//! exit codes.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each module, plus restart scenarios in
//!   `crates/sheetapp/tests/`.
//! - **CLI**: parsing and rendering unit tests in `src/cli/`, and end-to-end
//!   runs of the real binary in `tests/` against a temporary `--data-dir`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
