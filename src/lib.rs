//! `area-stats` ingests StatsWales-style datasets about local authority areas into one in-memory
//! [`model::AreaStore`], then renders it as aligned text tables or as JSON.
//!
//! The primary entrypoints are [`ingestion::populate`] (any reader) and
//! [`ingestion::ingest_from_path`] (a file, with optional observer reporting).
//!
//! ## What you can ingest
//!
//! **Source formats ([`ingestion::SourceFormat`]):**
//!
//! - **Authority-code CSV**: `code,english name,welsh name` rows naming every area
//! - **Authority-by-year CSV**: one measure per file, one column per year
//! - **Stats JSON**: StatsWales OData documents with one record per (area, measure, year)
//!
//! Every parser locates its fields through an [`ingestion::ColumnMapping`] and drops whatever
//! the caller's [`ingestion::Filters`] reject (areas, measures, an inclusive year range).
//!
//! **Merging:**
//!
//! Repeated data never duplicates an area or a measure. An area ingested from several sources
//! ends up with the union of their names and measures; overlapping years take the value read
//! last.
//!
//! ## Quick example: ingest and render
//!
//! ```rust
//! use area_stats::ingestion::{populate, ColumnMapping, Filters, SourceColumn, SourceFormat};
//! use area_stats::model::AreaStore;
//!
//! # fn main() -> Result<(), area_stats::StatsError> {
//! let names = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "Local authority code")
//!     .with(SourceColumn::AuthNameEng, "Name (eng)")
//!     .with(SourceColumn::AuthNameCym, "Name (cym)");
//! let pop = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "Local authority code")
//!     .with(SourceColumn::SingleMeasureCode, "pop")
//!     .with(SourceColumn::SingleMeasureName, "Population");
//!
//! let mut store = AreaStore::new();
//! store.populate(
//!     "Local authority code,Name (eng),Name (cym)\nW06000011,Swansea,Abertawe\n".as_bytes(),
//!     SourceFormat::AuthorityCodeCsv,
//!     &names,
//!     &Filters::all(),
//! )?;
//! store.populate(
//!     "Local authority code,2010,2011\nW06000011,232500,239000\n".as_bytes(),
//!     SourceFormat::AuthorityByYearCsv,
//!     &pop,
//!     &Filters::all(),
//! )?;
//!
//! let report = store.to_string();
//! assert!(report.starts_with("Swansea / Abertawe (W06000011)\nPopulation (pop)\n"));
//! assert_eq!(
//!     store.to_json_string(),
//!     r#"{"w06000011":{"measures":{"pop":{"2010":232500.0,"2011":239000.0}},"names":{"cym":"Abertawe","eng":"Swansea"}}}"#
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: measures, areas and the store, with their merge rules
//! - [`ingestion`]: parsers, filters, column mappings, the dataset catalog and observers
//! - [`render`]: table (`Display`) and JSON output
//! - [`cli`]: the `area-stats` command line
//! - [`error`]: error types used across the crate

pub mod cli;
pub mod error;
pub mod ingestion;
pub mod model;
pub mod render;

pub use error::{ErrorKind, StatsError, StatsResult};
