//! Source formats and the logical → literal column mapping handed to every parser.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Layout of an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `code,english name,welsh name` catalog of authority codes.
    AuthorityCodeCsv,
    /// One measure per file: authority code in column 0, one column per year after it.
    AuthorityByYearCsv,
    /// StatsWales OData JSON: flat records under the top-level `value` key.
    StatsJson,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorityCodeCsv => "authority-code-csv",
            Self::AuthorityByYearCsv => "authority-by-year-csv",
            Self::StatsJson => "stats-json",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = StatsError;

    /// Parse a format tag (case-insensitive). Unknown tags are a configuration error.
    fn from_str(tag: &str) -> StatsResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "authority-code-csv" | "authoritycodecsv" => Ok(Self::AuthorityCodeCsv),
            "authority-by-year-csv" | "authoritybyyearcsv" => Ok(Self::AuthorityByYearCsv),
            "stats-json" | "statsjson" | "welshstatsjson" => Ok(Self::StatsJson),
            _ => Err(StatsError::configuration(format!(
                "unexpected source format '{tag}'"
            ))),
        }
    }
}

/// Logical columns a parser may need to locate in a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceColumn {
    AuthCode,
    AuthNameEng,
    AuthNameCym,
    MeasureCode,
    MeasureName,
    SingleMeasureCode,
    SingleMeasureName,
    Year,
    Value,
}

impl SourceColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthCode => "auth_code",
            Self::AuthNameEng => "auth_name_eng",
            Self::AuthNameCym => "auth_name_cym",
            Self::MeasureCode => "measure_code",
            Self::MeasureName => "measure_name",
            Self::SingleMeasureCode => "single_measure_code",
            Self::SingleMeasureName => "single_measure_name",
            Self::Year => "year",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps each [`SourceColumn`] a source provides to the literal header or field name.
///
/// For the single-measure columns the value is the measure code/label itself rather than a
/// column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<SourceColumn, String>);

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: SourceColumn, name: impl Into<String>) -> Self {
        self.0.insert(column, name.into());
        self
    }

    pub fn insert(&mut self, column: SourceColumn, name: impl Into<String>) {
        self.0.insert(column, name.into());
    }

    pub fn get(&self, column: SourceColumn) -> Option<&str> {
        self.0.get(&column).map(String::as_str)
    }

    pub fn contains(&self, column: SourceColumn) -> bool {
        self.0.contains_key(&column)
    }

    /// Like [`Self::get`], but a missing entry is a configuration error.
    pub fn require(&self, column: SourceColumn) -> StatsResult<&str> {
        self.get(column).ok_or_else(|| {
            StatsError::configuration(format!("column mapping is missing '{column}'"))
        })
    }

    /// Number of mapped columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(SourceColumn, S)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (SourceColumn, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, s)| (c, s.into())).collect())
    }
}
