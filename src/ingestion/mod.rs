//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`populate`] for an in-memory reader or [`ingest_from_path`] (from
//! [`unified`]) for a file. Both:
//!
//! - select a parser by [`SourceFormat`]
//! - resolve field names through a [`ColumnMapping`]
//! - drop rows rejected by [`Filters`] and merge the rest into an [`crate::model::AreaStore`]
//!
//! `ingest_from_path` also reports each outcome to an optional [`IngestionObserver`].
//!
//! Format-specific functions are also available under:
//! - [`csv`] (authority-code catalogs and authority-by-year tables)
//! - [`json`] (StatsWales object-list documents)
//!
//! [`datasets`] describes the known input files and loads several of them in order.

pub mod columns;
pub mod csv;
pub mod datasets;
pub mod filter;
pub mod json;
pub mod observability;
pub mod unified;

pub use columns::{ColumnMapping, SourceColumn, SourceFormat};
pub use datasets::{DatasetCatalog, InputFileSource, LoadReport, load_sources};
pub use filter::{Filters, StringFilter, YearFilter};
pub use observability::{
    DatasetLabel, FileObserver, IngestionContext, IngestionEvent, IngestionObserver,
    IngestionSeverity, IngestionStats, StdErrObserver,
};
pub use unified::{IngestionOptions, IngestionRequest, ingest_from_path, populate};
