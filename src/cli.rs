//! Command-line interface components.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::error::{StatsError, StatsResult};
use crate::ingestion::{
    DatasetCatalog, FileObserver, Filters, IngestionObserver, IngestionOptions, InputFileSource,
    SourceFormat, StdErrObserver, StringFilter, YearFilter, load_sources,
};
use crate::model::AreaStore;

/// Argument value meaning "no restriction".
const ALL_ARG: &str = "all";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "area-stats")]
#[command(about = "Merge StatsWales local authority datasets and print them as tables or JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory holding the input files
    #[arg(long, default_value = "datasets")]
    pub dir: PathBuf,

    /// Datasets to import, as a comma-separated list of codes (omit or 'all' for every dataset)
    #[arg(short, long, value_delimiter = ',')]
    pub datasets: Vec<String>,

    /// Authority codes to import (omit or 'all' for every area)
    #[arg(short, long, value_delimiter = ',')]
    pub areas: Vec<String>,

    /// Measure codes to import (omit or 'all' for every measure)
    #[arg(short, long, value_delimiter = ',')]
    pub measures: Vec<String>,

    /// A single year (YYYY) or an inclusive range (YYYY-ZZZZ); 0 means every year
    #[arg(short, long, default_value = "0")]
    pub years: String,

    /// Print JSON instead of tables
    #[arg(short, long)]
    pub json: bool,

    /// JSON dataset catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Also append ingestion events to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Report every imported dataset on stderr, not only failures
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the ingestion filters from the area, measure and year arguments.
    pub fn filters(&self) -> StatsResult<Filters> {
        Ok(Filters {
            areas: parse_filter_arg(self.areas.as_slice()),
            measures: parse_filter_arg(self.measures.as_slice()),
            years: parse_years_arg(&self.years)?,
        })
    }

    fn catalog(&self) -> StatsResult<DatasetCatalog> {
        match &self.catalog {
            Some(path) => DatasetCatalog::from_json_path(path),
            None => Ok(DatasetCatalog::builtin()),
        }
    }

    fn ingestion_options(&self) -> IngestionOptions {
        let stderr: Arc<dyn IngestionObserver> = Arc::new(StdErrObserver {
            verbose: self.verbose,
        });
        let observer: Arc<dyn IngestionObserver> = match &self.log_file {
            Some(path) => {
                let observers: Vec<Arc<dyn IngestionObserver>> =
                    vec![stderr, Arc::new(FileObserver::new(path))];
                Arc::new(observers)
            }
            None => stderr,
        };
        IngestionOptions {
            observer: Some(observer),
        }
    }
}

fn wants_all<S: AsRef<str>>(values: &[S]) -> bool {
    values.is_empty()
        || values
            .iter()
            .any(|v| v.as_ref().trim().eq_ignore_ascii_case(ALL_ARG))
}

/// Resolve the datasets argument against `catalog`.
///
/// Empty or containing `all` selects every measure source. Authority-code sources are dropped
/// from the result since they are always loaded first.
pub fn parse_datasets_arg<'c, S: AsRef<str>>(
    catalog: &'c DatasetCatalog,
    values: &[S],
) -> StatsResult<Vec<&'c InputFileSource>> {
    let codes: Vec<&str> = values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.eq_ignore_ascii_case(ALL_ARG))
        .collect();
    // Unknown codes are rejected even when `all` is present.
    let selected = catalog.select(codes.as_slice())?;
    if wants_all(values) {
        return Ok(catalog.measure_sources().collect());
    }
    Ok(selected
        .into_iter()
        .filter(|s| s.format != SourceFormat::AuthorityCodeCsv)
        .collect())
}

/// Areas and measures arguments: empty or containing `all` yields an empty (match-all) filter.
pub fn parse_filter_arg<S: AsRef<str>>(values: &[S]) -> StringFilter {
    if wants_all(values) {
        return StringFilter::all();
    }
    values.iter().map(|v| v.as_ref().trim()).collect()
}

/// Parse `YYYY`, `YYYY-ZZZZ` or `0`.
///
/// Each token must be `0` or exactly four digits. A zero anywhere means every year.
pub fn parse_years_arg(arg: &str) -> StatsResult<YearFilter> {
    let invalid = || StatsError::invalid_format("invalid input for years argument");

    let tokens: Vec<&str> = arg.trim().split('-').collect();
    if tokens.len() > 2 {
        return Err(invalid());
    }

    let mut years = Vec::with_capacity(tokens.len());
    for token in tokens {
        let digits = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());
        if !digits || (token != "0" && token.len() != 4) {
            return Err(invalid());
        }
        years.push(token.parse::<u32>().map_err(|_| invalid())?);
    }

    match years.as_slice() {
        [year] => Ok(YearFilter::new(*year, *year)),
        [start, end] => Ok(YearFilter::new(*start, *end)),
        _ => Err(invalid()),
    }
}

/// Load the requested datasets and render the report.
///
/// Individual sources that fail are reported through the stderr observer and skipped. Bad
/// arguments or an unreadable catalog fail the whole run.
pub fn run(args: &Args) -> StatsResult<String> {
    let catalog = args.catalog()?;
    let datasets = parse_datasets_arg(&catalog, args.datasets.as_slice())?;
    let filters = args.filters()?;
    let options = args.ingestion_options();

    let mut store = AreaStore::new();
    load_sources(
        &mut store,
        &args.dir,
        catalog.authority_sources(),
        &filters.areas_only(),
        &options,
    );
    load_sources(&mut store, &args.dir, datasets, &filters, &options);

    if args.json {
        Ok(format!("{}\n", store.to_json_string()))
    } else {
        Ok(store.to_string())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Args, parse_datasets_arg, parse_filter_arg, parse_years_arg};
    use crate::error::ErrorKind;
    use crate::ingestion::{DatasetCatalog, YearFilter};

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["area-stats"]).unwrap();
        assert_eq!(args.dir.to_str(), Some("datasets"));
        assert_eq!(args.years, "0");
        assert!(args.datasets.is_empty());
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(args.filters().unwrap().years.is_all());
    }

    #[test]
    fn comma_lists_are_split() {
        let args =
            Args::try_parse_from(["area-stats", "-d", "popden,biz", "-a", "W1,W2", "-j"]).unwrap();
        assert_eq!(args.datasets, vec!["popden", "biz"]);
        assert_eq!(args.areas, vec!["W1", "W2"]);
        assert!(args.json);
    }

    #[test]
    fn stderr_reports_successes_only_when_verbose() {
        let quiet = Args::try_parse_from(["area-stats"]).unwrap();
        let verbose = Args::try_parse_from(["area-stats", "--verbose"]).unwrap();
        assert!(!quiet.verbose);
        assert!(verbose.verbose);
        assert!(!crate::ingestion::StdErrObserver::default().verbose);
    }

    #[test]
    fn datasets_all_or_omitted_selects_every_measure_source() {
        let catalog = DatasetCatalog::builtin();
        let omitted = parse_datasets_arg::<&str>(&catalog, &[]).unwrap();
        assert_eq!(omitted.len(), catalog.len() - 1);
        assert!(omitted.iter().all(|s| s.code != "areas"));

        let all = parse_datasets_arg(&catalog, &["popden", "ALL"]).unwrap();
        assert_eq!(all.len(), catalog.len() - 1);
    }

    #[test]
    fn datasets_dedupe_and_reject_unknown() {
        let catalog = DatasetCatalog::builtin();
        let picked = parse_datasets_arg(&catalog, &["biz", "areas", "biz", "trains"]).unwrap();
        let codes: Vec<&str> = picked.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["biz", "trains"]);

        let err = parse_datasets_arg(&catalog, &["all", "bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "configuration error: no dataset matches key: bogus");
    }

    #[test]
    fn filter_args() {
        assert!(parse_filter_arg::<&str>(&[]).is_empty());
        assert!(parse_filter_arg(&["W1", "all"]).is_empty());

        let f = parse_filter_arg(&["W06000011", "w06000023"]);
        assert_eq!(f.codes(), vec!["w06000011", "w06000023"]);
        assert!(f.matches("W06000023"));
    }

    #[test]
    fn years_arg_forms() {
        assert_eq!(parse_years_arg("0").unwrap(), YearFilter::all());
        assert_eq!(parse_years_arg("2010").unwrap(), YearFilter::new(2010, 2010));
        assert_eq!(
            parse_years_arg("2010-2015").unwrap().bounds(),
            Some((2010, 2015))
        );
        assert!(parse_years_arg("0-2015").unwrap().is_all());
        assert!(parse_years_arg("2010-0").unwrap().is_all());
    }

    #[test]
    fn years_arg_rejects_bad_input() {
        for bad in ["", "10", "20101", "2010-", "abcd", "2010-2011-2012", "-2010", "+201"] {
            let err = parse_years_arg(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "input {bad:?}");
            assert!(err.to_string().contains("invalid input for years argument"));
        }
    }
}
