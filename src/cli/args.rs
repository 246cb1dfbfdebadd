//! CLI argument definitions using clap
//!
//! Commands:
//! - eprintviews facet --records <path> --facet <view>
//! - eprintviews views --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// eprintviews - faceted browse views over repository records
#[derive(Parser, Debug)]
#[command(name = "eprintviews")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum log level written to stderr (trace, info, warn, error, fatal)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a single facet and print it as JSON
    Facet {
        /// Path to a JSON array of records
        #[arg(long)]
        records: PathBuf,

        /// View name (ids, people, person, person-az, author, year,
        /// publication, issn, collection, event, subjects, types, latest)
        #[arg(long)]
        facet: String,

        /// Path to a subject code to label JSON file (default: built-in
        /// subject listing)
        #[arg(long)]
        subjects: Option<PathBuf>,

        /// Record set name used in logs (default: records file stem)
        #[arg(long)]
        name: Option<String>,

        /// End date of the latest window, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Build every view listed in a configuration file
    Views {
        /// Path to configuration file
        #[arg(long, default_value = "./eprintviews.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facet() {
        let cli = Cli::try_parse_from([
            "eprintviews",
            "facet",
            "--records",
            "records.json",
            "--facet",
            "year",
        ])
        .unwrap();

        match cli.command {
            Command::Facet {
                records, facet, subjects, ..
            } => {
                assert_eq!(records, PathBuf::from("records.json"));
                assert_eq!(facet, "year");
                assert!(subjects.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_views_default_config() {
        let cli = Cli::try_parse_from(["eprintviews", "--log-level", "warn", "views"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        match cli.command {
            Command::Views { config } => assert_eq!(config, PathBuf::from("./eprintviews.json")),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
