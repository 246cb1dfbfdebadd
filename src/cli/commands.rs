//! CLI command implementations
//!
//! Both commands follow the same sequence:
//! 1. Load inputs (records, subject directory, view registry)
//! 2. Build the requested facet(s)
//! 3. Print one JSON response on stdout

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{Aggregator, FacetKind};
use crate::lookup::{SubjectDirectory, SubjectMap, ViewRegistry};
use crate::observability::{log_event, log_event_with_fields, Event, Logger, Severity};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_records, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to a JSON array of records (required)
    pub records: String,

    /// Record set name used in logs (optional, default: records file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Path to a subject code to label file (optional, default: built-in
    /// subject listing)
    #[serde(default)]
    pub subjects: Option<String>,

    /// Path to a view registry file (optional, default: built-in views)
    #[serde(default)]
    pub views: Option<String>,

    /// Minimum log level (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// End date of the latest window, YYYY-MM-DD (optional, default: today)
    #[serde(default)]
    pub today: Option<String>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.records.trim().is_empty() {
            return Err(CliError::config_error("records must not be empty"));
        }

        self.severity()?;
        self.today_date()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Parsed `today`
    pub fn today_date(&self) -> CliResult<Option<NaiveDate>> {
        self.today
            .as_deref()
            .map(|s| parse_date(s).map_err(|e| CliError::config_error(e.message().to_string())))
            .transpose()
    }

    /// Records file, resolved against the config file's directory
    pub fn records_path(&self) -> PathBuf {
        self.base_dir.join(&self.records)
    }

    /// Subject directory file, if configured
    pub fn subjects_path(&self) -> Option<PathBuf> {
        self.subjects.as_ref().map(|p| self.base_dir.join(p))
    }

    /// View registry file, if configured
    pub fn views_path(&self) -> Option<PathBuf> {
        self.views.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Record set name: explicit `name`, else the records file stem
    pub fn record_set_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| file_stem(&self.records_path()))
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command. Failures are
/// also reported as a JSON error response on stdout.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();

    if let Some(level) = cli.log_level.as_deref() {
        let severity: Severity = level.parse().map_err(CliError::invalid_argument)?;
        Logger::set_min_severity(severity);
    }

    let result = run_command(cli.command, cli.log_level.is_some());
    if let Err(ref e) = result {
        write_error_response(e);
    }
    result
}

fn write_error_response(e: &CliError) {
    let _ = super::io::write_error(e.code_str(), e.message());
}

/// Run the appropriate command based on CLI args.
///
/// `log_level_pinned` is true when the command line already chose a log
/// level, which then wins over the configuration file.
pub fn run_command(cmd: Command, log_level_pinned: bool) -> CliResult<()> {
    match cmd {
        Command::Facet {
            records,
            facet,
            subjects,
            name,
            today,
        } => {
            let today = today.as_deref().map(parse_date).transpose()?;
            let data = facet_command(&records, &facet, subjects.as_deref(), name, today)?;
            write_response(data)
        }
        Command::Views { config } => {
            let config = Config::load(&config)?;
            if !log_level_pinned {
                Logger::set_min_severity(config.severity()?);
            }
            log_event(Event::ConfigLoaded);
            let data = views_command(&config)?;
            write_response(data)
        }
    }
}

/// Build one facet from a records file
pub fn facet_command(
    records_path: &Path,
    view: &str,
    subjects_path: Option<&Path>,
    name: Option<String>,
    today: Option<NaiveDate>,
) -> CliResult<Value> {
    let kind = FacetKind::from_view(view).map_err(|e| CliError::invalid_argument(e.to_string()))?;
    let subjects = load_subjects(subjects_path)?;

    let name = name.unwrap_or_else(|| file_stem(records_path));
    let aggregator = load_aggregator(records_path, name, today)?;

    let groups = aggregator.aggregate(kind, Some(as_directory(&subjects)))?;
    Ok(serde_json::to_value(&groups)?)
}

/// Build every view of the configured registry
pub fn views_command(config: &Config) -> CliResult<Value> {
    let registry = match config.views_path() {
        Some(path) => {
            let registry = ViewRegistry::load(&path)?;
            let count = registry.supported_views().len().to_string();
            log_event_with_fields(Event::ViewsLoaded, &[("count", count.as_str())]);
            registry
        }
        None => ViewRegistry::default(),
    };
    let facets = registry.facets();

    let subjects = load_subjects(config.subjects_path().as_deref())?;
    let aggregator = load_aggregator(
        &config.records_path(),
        config.record_set_name(),
        config.today_date()?,
    )?;

    let built = aggregator.aggregate_views(&facets, Some(as_directory(&subjects)))?;
    Ok(serde_json::to_value(&built)?)
}

fn load_aggregator(path: &Path, name: String, today: Option<NaiveDate>) -> CliResult<Aggregator> {
    let records = read_records(path)?;
    let count = records.len().to_string();
    log_event_with_fields(
        Event::RecordsLoaded,
        &[("count", count.as_str()), ("name", name.as_str())],
    );

    let aggregator = Aggregator::new(name, records);
    Ok(match today {
        Some(date) => aggregator.with_today(date),
        None => aggregator,
    })
}

fn load_subjects(path: Option<&Path>) -> CliResult<SubjectMap> {
    let (subjects, source) = match path {
        Some(path) => (SubjectMap::load(path)?, "file"),
        None => (SubjectMap::builtin(), "builtin"),
    };
    let count = subjects.len().to_string();
    log_event_with_fields(
        Event::SubjectsLoaded,
        &[("count", count.as_str()), ("source", source)],
    );
    Ok(subjects)
}

fn as_directory(subjects: &SubjectMap) -> &dyn SubjectDirectory {
    subjects
}

fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| CliError::invalid_argument(format!("Invalid date '{}': {}", s, e)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
