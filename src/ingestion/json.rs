//! StatsWales JSON ingestion.
//!
//! The payload is an OData document whose top-level `value` key holds a flat list of records,
//! one per (area, measure, year) observation:
//!
//! ```json
//! {"value": [{"Area_AltCode1": "W06000001", "Area_ItemName_ENG": "Isle of Anglesey",
//!             "Variable_Code": "ent", "Variable_ItemName_ENG": "Enterprises",
//!             "Year_Code": "2019", "Data": 3050.0}]}
//! ```
//!
//! Field names come from the caller's [`ColumnMapping`].

use std::io::Read;

use serde_json::{Map, Value};

use crate::error::{StatsError, StatsResult};
use crate::model::area::LANG_ENG;
use crate::model::{Area, AreaStore, Measure};

use super::columns::{ColumnMapping, SourceColumn};
use super::filter::Filters;
use super::observability::IngestionStats;

/// Top-level key holding the record list.
pub const RECORDS_KEY: &str = "value";

/// Ingest a StatsWales JSON document into `store`.
///
/// Each record is filtered on area code, measure code and year (in that order), then merged as
/// one area holding one measure with one value. Missing fields and failed conversions are
/// reported as a single [`StatsError::Malformed`] naming the record and the cause.
pub fn populate_from_stats_json<R: Read>(
    store: &mut AreaStore,
    mut input: R,
    cols: &ColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    let fields = JsonFields::from_mapping(cols)?;

    let mut text = String::new();
    input.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(StatsError::malformed("json input is empty"));
    }

    let root: Value = serde_json::from_str(&text)
        .map_err(|e| StatsError::malformed(format!("failure parsing JSON: {e}")))?;
    let records = root
        .get(RECORDS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            StatsError::malformed(format!("json document has no '{RECORDS_KEY}' array"))
        })?;

    let mut stats = IngestionStats::default();
    for (idx, item) in records.iter().enumerate() {
        let parsed = item
            .as_object()
            .ok_or_else(|| "record is not a json object".to_string())
            .and_then(|obj| parse_record(obj, &fields, filters))
            .map_err(|cause| {
                StatsError::malformed(format!("failure parsing JSON record {idx}: {cause}"))
            })?;

        match parsed {
            Some((code, area)) => {
                store.upsert_area(&code, area);
                stats.rows += 1;
            }
            None => stats.skipped += 1,
        }
    }

    Ok(stats)
}

enum MeasureFields<'a> {
    /// Measure code and label are read from each record.
    PerRecord { code: &'a str, label: &'a str },
    /// The whole file is one measure.
    Fixed { code: &'a str, label: &'a str },
}

struct JsonFields<'a> {
    code: &'a str,
    name_eng: &'a str,
    measure: MeasureFields<'a>,
    year: &'a str,
    value: &'a str,
}

impl<'a> JsonFields<'a> {
    fn from_mapping(cols: &'a ColumnMapping) -> StatsResult<Self> {
        let measure = if cols.contains(SourceColumn::SingleMeasureCode) {
            MeasureFields::Fixed {
                code: cols.require(SourceColumn::SingleMeasureCode)?,
                label: cols.require(SourceColumn::SingleMeasureName)?,
            }
        } else {
            MeasureFields::PerRecord {
                code: cols.require(SourceColumn::MeasureCode)?,
                label: cols.require(SourceColumn::MeasureName)?,
            }
        };

        Ok(Self {
            code: cols.require(SourceColumn::AuthCode)?,
            name_eng: cols.require(SourceColumn::AuthNameEng)?,
            measure,
            year: cols.require(SourceColumn::Year)?,
            value: cols.require(SourceColumn::Value)?,
        })
    }
}

/// Returns `Ok(None)` when a filter rejects the record.
fn parse_record(
    obj: &Map<String, Value>,
    fields: &JsonFields<'_>,
    filters: &Filters,
) -> Result<Option<(String, Area)>, String> {
    let code = string_field(obj, fields.code)?;
    if !filters.areas.matches(code) {
        return Ok(None);
    }
    let name = string_field(obj, fields.name_eng)?;

    let (measure_code, measure_label) = match fields.measure {
        MeasureFields::Fixed { code: c, label: l } => (c, l),
        MeasureFields::PerRecord { code: c, label: l } => {
            (string_field(obj, c)?, string_field(obj, l)?)
        }
    };
    if !filters.measures.matches(measure_code) {
        return Ok(None);
    }

    let raw_year = string_field(obj, fields.year)?;
    let year = raw_year
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid year '{raw_year}' in field '{}': {e}", fields.year))?;
    if !filters.years.matches(year) {
        return Ok(None);
    }

    let value = number_field(obj, fields.value)?;

    let mut measure = Measure::new(measure_code, measure_label);
    measure.set_value(year, value);

    let mut area = Area::new(code);
    area.set_name(LANG_ENG, name).map_err(|e| e.to_string())?;
    area.set_measure(measure_code, measure);

    Ok(Some((code.to_owned(), area)))
}

fn string_field<'v>(obj: &'v Map<String, Value>, field: &str) -> Result<&'v str, String> {
    let v = obj
        .get(field)
        .ok_or_else(|| format!("missing field '{field}'"))?;
    v.as_str()
        .ok_or_else(|| format!("field '{field}' must be a string, got {v}"))
}

fn number_field(obj: &Map<String, Value>, field: &str) -> Result<f64, String> {
    let v = obj
        .get(field)
        .ok_or_else(|| format!("missing field '{field}'"))?;
    v.as_f64()
        .ok_or_else(|| format!("field '{field}' must be a number, got {v}"))
}
