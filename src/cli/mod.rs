//! CLI module for eprintviews
//!
//! Provides a command-line harness around the aggregator:
//! - facet: build one facet from a records file
//! - views: build every view listed in a configuration file

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{facet_command, run, run_command, views_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_records, write_error, write_response};
