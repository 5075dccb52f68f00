//! Unified ingestion entrypoints.
//!
//! [`populate`] dispatches a reader to one of the three parsers by [`SourceFormat`].
//! [`ingest_from_path`] opens a file, populates the store, and reports the outcome to an
//! optional [`IngestionObserver`].

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{StatsError, StatsResult};
use crate::model::AreaStore;

use super::columns::{ColumnMapping, SourceFormat};
use super::filter::Filters;
use super::observability::{IngestionContext, IngestionEvent, IngestionObserver, IngestionStats};
use super::{csv, json};

/// Parse `input` as `format` and merge everything that passes `filters` into `store`.
///
/// `cols` must contain the entries the chosen parser needs; a missing entry is a
/// [`StatsError::Configuration`] raised before any data is read. On a parse failure, rows
/// merged before the failure stay in the store and the rest of the input is ignored.
///
/// # Examples
///
/// ```rust
/// use area_stats::ingestion::{populate, ColumnMapping, Filters, SourceColumn, SourceFormat};
/// use area_stats::model::AreaStore;
///
/// # fn main() -> Result<(), area_stats::StatsError> {
/// let cols = ColumnMapping::new()
///     .with(SourceColumn::AuthCode, "Local authority code")
///     .with(SourceColumn::SingleMeasureCode, "pop")
///     .with(SourceColumn::SingleMeasureName, "Population");
///
/// let input = "Local authority code,1999,2000\nW06000001,69000,69500\n";
/// let mut store = AreaStore::new();
/// populate(&mut store, input.as_bytes(), SourceFormat::AuthorityByYearCsv, &cols, &Filters::all())?;
///
/// let pop = store.area("w06000001")?.measure("POP")?;
/// assert_eq!(pop.value(2000)?, 69500.0);
/// # Ok(())
/// # }
/// ```
pub fn populate<R: Read>(
    store: &mut AreaStore,
    input: R,
    format: SourceFormat,
    cols: &ColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    match format {
        SourceFormat::AuthorityCodeCsv => {
            csv::populate_from_authority_code_csv(store, input, cols, filters)
        }
        SourceFormat::AuthorityByYearCsv => {
            csv::populate_from_authority_by_year_csv(store, input, cols, filters)
        }
        SourceFormat::StatsJson => json::populate_from_stats_json(store, input, cols, filters),
    }
}

impl AreaStore {
    /// Method form of [`populate`].
    pub fn populate<R: Read>(
        &mut self,
        input: R,
        format: SourceFormat,
        cols: &ColumnMapping,
        filters: &Filters,
    ) -> StatsResult<IngestionStats> {
        populate(self, input, format, cols, filters)
    }
}

/// Options controlling path-based ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct IngestionOptions {
    /// Receives one [`IngestionEvent`] per file.
    pub observer: Option<Arc<dyn IngestionObserver>>,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Open `path` and [`populate`] `store` from it.
///
/// The file is closed when this returns, whether or not ingestion succeeded. When
/// `options.observer` is set it receives the outcome as an [`IngestionEvent`]: the row counts on
/// success, or the error with its [`super::IngestionSeverity`] on failure.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use area_stats::ingestion::{
///     ingest_from_path, ColumnMapping, Filters, IngestionOptions, SourceColumn, SourceFormat,
///     StdErrObserver,
/// };
/// use area_stats::model::AreaStore;
///
/// # fn main() -> Result<(), area_stats::StatsError> {
/// let cols = ColumnMapping::new()
///     .with(SourceColumn::AuthCode, "Local authority code")
///     .with(SourceColumn::AuthNameEng, "Name (eng)")
///     .with(SourceColumn::AuthNameCym, "Name (cym)");
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(StdErrObserver { verbose: true })),
/// };
///
/// let mut store = AreaStore::new();
/// ingest_from_path(
///     &mut store,
///     "datasets/areas.csv",
///     SourceFormat::AuthorityCodeCsv,
///     &cols,
///     &Filters::all(),
///     &opts,
/// )?;
/// println!("areas={}", store.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    store: &mut AreaStore,
    path: impl AsRef<Path>,
    format: SourceFormat,
    cols: &ColumnMapping,
    filters: &Filters,
    options: &IngestionOptions,
) -> StatsResult<IngestionStats> {
    let ctx = IngestionContext {
        path: path.as_ref().to_path_buf(),
        format,
        dataset: None,
    };
    ingest_with_context(store, &ctx, cols, filters, options)
}

pub(crate) fn ingest_with_context(
    store: &mut AreaStore,
    ctx: &IngestionContext,
    cols: &ColumnMapping,
    filters: &Filters,
    options: &IngestionOptions,
) -> StatsResult<IngestionStats> {
    let result = File::open(&ctx.path)
        .map_err(StatsError::from)
        .and_then(|file| populate(store, BufReader::new(file), ctx.format, cols, filters));

    if let Some(obs) = options.observer.as_ref() {
        obs.observe(ctx, &IngestionEvent::from_result(&result));
    }
    result
}

/// An owned ingestion request.
///
/// This can be useful to queue several sources and run them against one store later.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Layout of the file.
    pub format: SourceFormat,
    /// Column mapping for the file.
    pub cols: ColumnMapping,
    /// Filters applied while ingesting.
    pub filters: Filters,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("cols", &self.cols.len())
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self, store: &mut AreaStore) -> StatsResult<IngestionStats> {
        ingest_from_path(
            store,
            &self.path,
            self.format,
            &self.cols,
            &self.filters,
            &self.options,
        )
    }
}
