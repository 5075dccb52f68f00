//! Dataset catalog and multi-source loading.
//!
//! A [`DatasetCatalog`] lists the known input files: their code, file name, [`SourceFormat`] and
//! [`ColumnMapping`]. The built-in catalog describes the StatsWales extracts. A catalog can also
//! be read from JSON using the same shape:
//!
//! ```json
//! [{"name": "Population", "code": "complete-pop", "file": "complete-popu1009-pop.csv",
//!   "format": "authority-by-year-csv",
//!   "cols": {"auth_code": "Local authority code",
//!            "single_measure_code": "pop", "single_measure_name": "Population"}}]
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::model::AreaStore;

use super::columns::{ColumnMapping, SourceColumn, SourceFormat};
use super::filter::Filters;
use super::observability::{DatasetLabel, IngestionContext, IngestionStats};
use super::unified::{IngestionOptions, ingest_with_context};

/// One importable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFileSource {
    /// Human-readable dataset name.
    pub name: String,
    /// Code used to select the dataset.
    pub code: String,
    /// File name, relative to the data directory.
    pub file: String,
    pub format: SourceFormat,
    pub cols: ColumnMapping,
}

impl InputFileSource {
    /// Ingest `dir/<file>` into `store`. Observer events carry this source's code and name.
    pub fn ingest(
        &self,
        store: &mut AreaStore,
        dir: &Path,
        filters: &Filters,
        options: &IngestionOptions,
    ) -> StatsResult<IngestionStats> {
        let ctx = IngestionContext {
            path: dir.join(&self.file),
            format: self.format,
            dataset: Some(self.label()),
        };
        ingest_with_context(store, &ctx, &self.cols, filters, options)
    }

    pub fn label(&self) -> DatasetLabel {
        DatasetLabel {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// An ordered list of [`InputFileSource`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetCatalog {
    sources: Vec<InputFileSource>,
}

impl DatasetCatalog {
    pub fn new(sources: Vec<InputFileSource>) -> Self {
        Self { sources }
    }

    /// The StatsWales datasets.
    pub fn builtin() -> Self {
        use SourceColumn::*;
        use SourceFormat::*;

        const POPDEN_COLS: &[(SourceColumn, &str)] = &[
            (AuthCode, "Localauthority_AltCode1"),
            (AuthNameEng, "Localauthority_ItemName_ENG"),
            (MeasureCode, "Measure_Code"),
            (MeasureName, "Measure_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ];
        const BIZ_COLS: &[(SourceColumn, &str)] = &[
            (AuthCode, "Area_AltCode1"),
            (AuthNameEng, "Area_ItemName_ENG"),
            (MeasureCode, "Variable_Code"),
            (MeasureName, "Variable_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ];
        const AQI_COLS: &[(SourceColumn, &str)] = &[
            (AuthCode, "Area_AltCode1"),
            (AuthNameEng, "Area_ItemName_ENG"),
            (MeasureCode, "Pollutant_ItemName_ENG"),
            (MeasureName, "Pollutant_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ];
        const TRAINS_COLS: &[(SourceColumn, &str)] = &[
            (AuthCode, "LocalAuthority_AltCode1"),
            (AuthNameEng, "LocalAuthority_ItemName_ENG"),
            (SingleMeasureCode, "rail"),
            (SingleMeasureName, "Rail passenger journeys"),
            (Year, "Year_Code"),
            (Value, "Data"),
        ];

        Self::new(vec![
            source(
                "Areas",
                "areas",
                "areas.csv",
                AuthorityCodeCsv,
                &[
                    (AuthCode, "Local authority code"),
                    (AuthNameEng, "Name (eng)"),
                    (AuthNameCym, "Name (cym)"),
                ],
            ),
            source("Population density", "popden", "popu1009.json", StatsJson, POPDEN_COLS),
            source("Active Businesses", "biz", "econ0080.json", StatsJson, BIZ_COLS),
            source("Air Quality Indicators", "aqi", "envi0201.json", StatsJson, AQI_COLS),
            source("Rail passenger journeys", "trains", "tran0152.json", StatsJson, TRAINS_COLS),
            source(
                "Population density",
                "complete-popden",
                "complete-popu1009-popden.csv",
                AuthorityByYearCsv,
                &[
                    (AuthCode, "Local authority code"),
                    (SingleMeasureCode, "dens"),
                    (SingleMeasureName, "Population density"),
                ],
            ),
            source(
                "Population",
                "complete-pop",
                "complete-popu1009-pop.csv",
                AuthorityByYearCsv,
                &[
                    (AuthCode, "Local authority code"),
                    (SingleMeasureCode, "pop"),
                    (SingleMeasureName, "Population"),
                ],
            ),
            source(
                "Land area",
                "complete-area",
                "complete-popu1009-area.csv",
                AuthorityByYearCsv,
                &[
                    (AuthCode, "Local authority code"),
                    (SingleMeasureCode, "area"),
                    (SingleMeasureName, "Land area"),
                ],
            ),
        ])
    }

    /// Read a catalog from a JSON array of sources.
    pub fn from_json_reader<R: Read>(input: R) -> StatsResult<Self> {
        serde_json::from_reader(input)
            .map_err(|e| StatsError::configuration(format!("invalid dataset catalog: {e}")))
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> StatsResult<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Source with `code` (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&InputFileSource> {
        self.sources
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(code))
    }

    /// Authority-code catalogs. These provide area names and are loaded before everything else.
    pub fn authority_sources(&self) -> impl Iterator<Item = &InputFileSource> {
        self.sources
            .iter()
            .filter(|s| s.format == SourceFormat::AuthorityCodeCsv)
    }

    /// Sources that carry measures.
    pub fn measure_sources(&self) -> impl Iterator<Item = &InputFileSource> {
        self.sources
            .iter()
            .filter(|s| s.format != SourceFormat::AuthorityCodeCsv)
    }

    /// Sources matching `codes` (case-insensitive), in the order given and without duplicates.
    ///
    /// An unknown code is a configuration error.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> StatsResult<Vec<&InputFileSource>> {
        let mut selected: Vec<&InputFileSource> = Vec::new();
        for code in codes {
            let code = code.as_ref();
            let source = self.get(code).ok_or_else(|| {
                StatsError::configuration(format!("no dataset matches key: {code}"))
            })?;
            if !selected.iter().any(|s| s.code == source.code) {
                selected.push(source);
            }
        }
        Ok(selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputFileSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn source(
    name: &str,
    code: &str,
    file: &str,
    format: SourceFormat,
    cols: &[(SourceColumn, &str)],
) -> InputFileSource {
    InputFileSource {
        name: name.to_string(),
        code: code.to_string(),
        file: file.to_string(),
        format,
        cols: cols.iter().copied().collect(),
    }
}

/// Outcome of [`load_sources`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Dataset codes that were ingested, with their counts.
    pub loaded: Vec<(String, IngestionStats)>,
    /// Dataset codes that failed, with the error that stopped them.
    pub failed: Vec<(String, StatsError)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ingest every source in order from `dir`.
///
/// A failing source does not stop the others: its error is recorded in the report and reported
/// to the observer in `options`, and loading continues with the next source.
pub fn load_sources<'a, I>(
    store: &mut AreaStore,
    dir: &Path,
    sources: I,
    filters: &Filters,
    options: &IngestionOptions,
) -> LoadReport
where
    I: IntoIterator<Item = &'a InputFileSource>,
{
    let mut report = LoadReport::default();
    for source in sources {
        match source.ingest(store, dir, filters, options) {
            Ok(stats) => report.loaded.push((source.code.clone(), stats)),
            Err(err) => report.failed.push((source.code.clone(), err)),
        }
    }
    report
}
