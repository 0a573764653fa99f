//! # Drinklog CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/drinklogapp/`: Core library with UI-agnostic logic
//! - `crates/drinklog/`: This CLI tool, depends on the `drinklogapp` library
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/drinklog/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/drinklogapp/src/api.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to the logic, `tempfile` integration tests.
//! - **CLI parsing**: `Cli::try_parse_from` tests in `setup.rs`.
//! - **End to end**: `tests/cli_e2e.rs` runs the binary through `assert_cmd`
//!   against a throwaway data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
