//! CSV ingestion: the authority-code catalog and wide year-column datasets.

use std::io::Read;

use csv::StringRecord;

use crate::error::{StatsError, StatsResult};
use crate::model::area::{LANG_CYM, LANG_ENG};
use crate::model::{Area, AreaStore, Measure};

use super::columns::{ColumnMapping, SourceColumn};
use super::filter::Filters;
use super::observability::IngestionStats;

/// Number of fields in every authority-code catalog row.
const AUTHORITY_CODE_FIELDS: usize = 3;

/// Rows of a year-column file with fewer fields than this are skipped.
const MIN_YEAR_ROW_FIELDS: usize = 3;

/// Ingest an authority-code catalog (`code,english name,welsh name`) into `store`.
///
/// Rules:
///
/// - `cols` must map [`SourceColumn::AuthCode`], [`SourceColumn::AuthNameEng`] and
///   [`SourceColumn::AuthNameCym`].
/// - The header may not have more columns than `cols` has entries.
/// - Every non-blank row must have exactly three fields.
/// - Rows whose code fails `filters.areas` are skipped.
pub fn populate_from_authority_code_csv<R: Read>(
    store: &mut AreaStore,
    input: R,
    cols: &ColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    for column in [
        SourceColumn::AuthCode,
        SourceColumn::AuthNameEng,
        SourceColumn::AuthNameCym,
    ] {
        cols.require(column)?;
    }

    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(StatsError::malformed("authority code csv is empty"));
    }
    if headers.len() > cols.len() {
        return Err(StatsError::configuration(format!(
            "authority code csv has {} columns but the column mapping only has {}",
            headers.len(),
            cols.len()
        )));
    }

    let mut stats = IngestionStats::default();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        if record.len() != AUTHORITY_CODE_FIELDS {
            return Err(StatsError::malformed(format!(
                "row {}: expected {AUTHORITY_CODE_FIELDS} fields (code, english name, welsh name), found {}",
                user_row(&record),
                record.len()
            )));
        }

        let code = &record[0];
        if !filters.areas.matches(code) {
            stats.skipped += 1;
            continue;
        }

        let mut area = Area::new(code);
        area.set_name(LANG_ENG, &record[1])?;
        area.set_name(LANG_CYM, &record[2])?;
        store.upsert_area(code, area);
        stats.rows += 1;
    }

    Ok(stats)
}

/// Ingest a single-measure file with one column per year into `store`.
///
/// Rules:
///
/// - `cols` must map [`SourceColumn::SingleMeasureCode`] and [`SourceColumn::SingleMeasureName`]
///   to the measure's code and label.
/// - If the measure code fails `filters.measures`, nothing is read.
/// - Header columns after the first must be years.
/// - Rows with fewer than three fields, or whose code fails `filters.areas`, are skipped.
/// - Blank cells and years outside `filters.years` contribute no value.
pub fn populate_from_authority_by_year_csv<R: Read>(
    store: &mut AreaStore,
    input: R,
    cols: &ColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    let measure_code = cols.require(SourceColumn::SingleMeasureCode)?;
    let measure_label = cols.require(SourceColumn::SingleMeasureName)?;

    let mut stats = IngestionStats::default();
    if !filters.measures.matches(measure_code) {
        return Ok(stats);
    }

    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(StatsError::malformed("authority by year csv is empty"));
    }
    let years = parse_year_header(&headers)?;

    for result in rdr.records() {
        let record = result?;
        if record.len() < MIN_YEAR_ROW_FIELDS {
            stats.skipped += 1;
            continue;
        }

        let code = &record[0];
        if !filters.areas.matches(code) {
            stats.skipped += 1;
            continue;
        }

        let row = user_row(&record);
        let mut measure = Measure::new(measure_code, measure_label);
        for (&year, raw) in years.iter().zip(record.iter().skip(1)) {
            if raw.is_empty() || !filters.years.matches(year) {
                continue;
            }
            let value = parse_value(raw).map_err(|message| StatsError::ParseError {
                row,
                column: year.to_string(),
                raw: raw.to_owned(),
                message,
            })?;
            measure.set_value(year, value);
        }

        let mut area = Area::new(code);
        area.set_measure(measure_code, measure);
        store.upsert_area(code, area);
        stats.rows += 1;
    }

    Ok(stats)
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn parse_year_header(headers: &StringRecord) -> StatsResult<Vec<u32>> {
    if headers.len() < 2 {
        return Err(StatsError::malformed(
            "header must contain the authority code column and at least one year",
        ));
    }

    headers
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, token)| {
            token.parse::<u32>().map_err(|e| StatsError::ParseError {
                row: 1,
                column: format!("#{idx}"),
                raw: token.to_owned(),
                message: format!("expected a year: {e}"),
            })
        })
        .collect()
}

// `f64::from_str` also accepts `NaN` and `inf`; those are not data.
fn parse_value(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err("expected a finite number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

// 1-based line number in the source; the header is line 1.
fn user_row(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}
