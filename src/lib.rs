//! `textswap` is a library for dictionary-driven bulk text replacement.
//!
//! It provides the core logic for the `textswap` command-line tool but can also
//! be used as a standalone library. The main components are:
//!
//! - `config`: For loading dictionaries and ignore rules from JSON (or YAML) files.
//! - `dictionary`: For picking a dictionary and applying a direction to it.
//! - `filter`: For deciding which files and directories a run leaves alone.
//! - `Replacer`: For applying ordered literal substitutions to text and files.
//! - `diff`: For rendering dry-run previews as unified diffs.
//! - `BatchRunner`: For walking a folder, one file at a time, and keeping counts.
//!
//! Substitutions are applied in declaration order, each over the result of the
//! previous one. A later pair can therefore match text produced by an earlier
//! pair, and an earlier pair can consume text a later one expected to see.

pub mod batch;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod diff;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod replacer;
pub mod reporter;

// Re-export main types for easier access by library users.
pub use batch::{BatchRunner, BatchSummary};
pub use config::{Config, ConfigLoader};
pub use dictionary::{Direction, ReplacementSet};
pub use errors::{Error, FileError, Result};
pub use filter::IgnoreRules;
pub use replacer::{ProcessOptions, Replacer, TextFiles, Utf8Files};
pub use reporter::{ConsoleReporter, Reporter};
