//! The main entry point for the `textswap` command-line application.
//!
//! This file parses command-line arguments, sets up logging and hands over to
//! the `textswap` library. Fatal errors print a message and exit with status 1;
//! files skipped during a batch do not affect the exit status.

use std::process;
use textswap::{cli, logging};

fn main() {
    let args = cli::parse_args();
    logging::setup_logging(args.verbose);

    if let Err(e) = cli::run(args) {
        tracing::debug!(error = ?e, "run aborted");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
