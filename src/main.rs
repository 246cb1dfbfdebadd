//! eprintviews CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. Any failure has
//! already been reported on stdout as a JSON error response; it is repeated
//! on stderr and the process exits non-zero.

use eprintviews::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
