//! # Vanity CLI
//!
//! `vanity -url example.com/foo` prints the repository URL that hosts the
//! import path, e.g. `https://github.com/org/foo`.
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this
//! file only invokes `cli::run()` and handles process termination. All
//! resolution logic lives in the `vanityapp` library.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Resolved; the repository URL was printed to stdout |
//! | 1 | Missing/empty `-url`, or the import path could not be resolved |
//! | 2 | Invalid command-line usage (reported by clap) |
//!
//! On failure exactly one line is written to stderr.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
