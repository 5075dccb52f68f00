//! Reporting for path-based ingestion.
//!
//! Every file ingested through [`super::ingest_from_path`] or
//! [`super::InputFileSource::ingest`] produces one [`IngestionEvent`], delivered to the
//! [`IngestionObserver`] in [`super::IngestionOptions`] together with an [`IngestionContext`]
//! naming the dataset and file.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ErrorKind, StatsError};

use super::columns::SourceFormat;

/// How badly a failed source affects the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The file was readable but its content was rejected. Rows merged before the failure stay.
    Error,
    /// The file could not be opened or the dataset description is unusable.
    Critical,
}

impl IngestionSeverity {
    pub fn of(error: &StatsError) -> Self {
        match error.kind() {
            ErrorKind::Io | ErrorKind::Configuration => Self::Critical,
            ErrorKind::NotFound | ErrorKind::InvalidFormat | ErrorKind::ParseFailure => Self::Error,
        }
    }
}

impl fmt::Display for IngestionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// Catalog identity of the dataset being ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLabel {
    pub code: String,
    pub name: String,
}

/// Which file is being ingested, and as which dataset.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// Set when the file comes from a [`super::DatasetCatalog`] entry.
    pub dataset: Option<DatasetLabel>,
}

impl fmt::Display for IngestionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ds) = &self.dataset {
            write!(f, "{} ({}) ", ds.name, ds.code)?;
        }
        write!(f, "[{} {}]", self.format, self.path.display())
    }
}

/// Counts reported by every parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionStats {
    /// Rows/records merged into the store.
    pub rows: usize,
    /// Rows/records rejected by a filter or skipped as incomplete.
    pub skipped: usize,
}

/// Outcome of ingesting one file.
#[derive(Debug)]
pub enum IngestionEvent<'a> {
    Loaded(IngestionStats),
    Failed {
        severity: IngestionSeverity,
        error: &'a StatsError,
    },
}

impl<'a> IngestionEvent<'a> {
    pub fn from_result(result: &'a Result<IngestionStats, StatsError>) -> Self {
        match result {
            Ok(stats) => Self::Loaded(*stats),
            Err(error) => Self::Failed {
                severity: IngestionSeverity::of(error),
                error,
            },
        }
    }
}

impl fmt::Display for IngestionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(stats) => write!(f, "ok rows={} skipped={}", stats.rows, stats.skipped),
            Self::Failed { severity, error } => write!(f, "fail severity={severity} err={error}"),
        }
    }
}

/// Receives one event per ingested file.
pub trait IngestionObserver: Send + Sync {
    fn observe(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>);
}

/// A list of observers is itself an observer; each receives every event in order.
impl IngestionObserver for Vec<Arc<dyn IngestionObserver>> {
    fn observe(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        for observer in self {
            observer.observe(ctx, event);
        }
    }
}

/// Writes failures to stderr. Successful imports are only reported when `verbose` is set.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdErrObserver {
    pub verbose: bool,
}

impl IngestionObserver for StdErrObserver {
    fn observe(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        match event {
            IngestionEvent::Failed { error, .. } => {
                eprintln!("Error importing dataset {ctx}: {error}");
            }
            IngestionEvent::Loaded(stats) if self.verbose => {
                eprintln!(
                    "Imported {ctx}: {} rows, {} skipped",
                    stats.rows, stats.skipped
                );
            }
            IngestionEvent::Loaded(_) => {}
        }
    }
}

/// Appends one timestamped line per event to a log file.
///
/// The log is opened for each event; a log that cannot be written is ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }
}

impl IngestionObserver for FileObserver {
    fn observe(&self, ctx: &IngestionContext, event: &IngestionEvent<'_>) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let _guard = self.lock.lock().ok();
        if let Ok(mut log) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(log, "{secs} {ctx} {event}");
        }
    }
}
