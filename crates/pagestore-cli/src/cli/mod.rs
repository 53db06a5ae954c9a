//! # CLI Behavior
//!
//! The only place that knows about stdout, stderr and exit codes.
//!
//! ## Store Resolution
//!
//! Settings are layered, later wins:
//! 1. Compiled defaults (`ISO-8859-1`, `.txt`)
//! 2. `--config <file>` (TOML)
//! 3. `PAGESTORE_*` environment variables
//! 4. `--dir`, `--encoding`, `--ext` flags
//!
//! ## Exit Codes
//!
//! - `0`: success
//! - `1`: `exists` did not find the page
//! - `2`: any error
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Store setup and per-command handlers
//! - `render`: Text and JSON formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
