//! # pagestore CLI
//!
//! An operator tool for page directories written by `pagestore`. It is a thin
//! client: all storage rules live in the `pagestore` library, this binary only
//! parses arguments, opens a store and prints results.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - config resolution + dispatch (commands.rs)               │
//! │  - text / JSON output (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  pagestore::PageProvider / FileSystemStore                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}
