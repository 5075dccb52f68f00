use area_stats::ErrorKind;
use area_stats::StatsError;
use area_stats::ingestion::csv::{
    populate_from_authority_by_year_csv, populate_from_authority_code_csv,
};
use area_stats::ingestion::{ColumnMapping, Filters, SourceColumn, StringFilter, YearFilter};
use area_stats::model::AreaStore;

fn authority_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Local authority code")
        .with(SourceColumn::AuthNameEng, "Name (eng)")
        .with(SourceColumn::AuthNameCym, "Name (cym)")
}

fn pop_cols() -> ColumnMapping {
    ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Local authority code")
        .with(SourceColumn::SingleMeasureCode, "pop")
        .with(SourceColumn::SingleMeasureName, "Population")
}

fn fixture(name: &str) -> std::fs::File {
    std::fs::File::open(format!("tests/fixtures/{name}")).unwrap()
}

#[test]
fn authority_code_csv_creates_named_areas() {
    let mut store = AreaStore::new();
    let stats = populate_from_authority_code_csv(
        &mut store,
        fixture("areas.csv"),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap();

    assert_eq!(stats.rows, 3);
    assert_eq!(store.len(), 3);
    let anglesey = store.area("W06000001").unwrap();
    assert_eq!(anglesey.name("eng").unwrap(), "Isle of Anglesey");
    assert_eq!(anglesey.name("cym").unwrap(), "Ynys Môn");
    assert!(anglesey.is_empty());
}

#[test]
fn authority_code_csv_applies_area_filter() {
    let filters = Filters {
        areas: StringFilter::new(["w06000023", "W99999999"]),
        ..Filters::default()
    };
    let mut store = AreaStore::new();
    let stats =
        populate_from_authority_code_csv(&mut store, fixture("areas.csv"), &authority_cols(), &filters)
            .unwrap();

    assert_eq!(stats.rows, 1);
    assert_eq!(stats.skipped, 2);
    assert!(store.contains("W06000023"));
    assert!(!store.contains("W06000011"));
}

#[test]
fn authority_code_csv_rejects_wrong_field_count() {
    let input = "Local authority code,Name (eng),Name (cym)\nW1,One,Un\nW2,Two\n";
    let mut store = AreaStore::new();
    let err = populate_from_authority_code_csv(
        &mut store,
        input.as_bytes(),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap_err();

    assert!(matches!(err, StatsError::Malformed { .. }));
    assert!(err.to_string().contains("row 3"));
    // Rows before the failure stay merged.
    assert!(store.contains("W1"));
}

#[test]
fn authority_code_csv_rejects_header_wider_than_mapping() {
    let input = "code,eng,cym,extra\nW1,One,Un,x\n";
    let mut store = AreaStore::new();
    let err = populate_from_authority_code_csv(
        &mut store,
        input.as_bytes(),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(store.is_empty());
}

#[test]
fn authority_code_csv_requires_all_name_columns() {
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Local authority code")
        .with(SourceColumn::AuthNameEng, "Name (eng)");
    let mut store = AreaStore::new();
    let err = populate_from_authority_code_csv(
        &mut store,
        fixture("areas.csv"),
        &cols,
        &Filters::all(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("auth_name_cym"));
}

#[test]
fn empty_inputs_are_parse_failures() {
    let mut store = AreaStore::new();
    let err = populate_from_authority_code_csv(
        &mut store,
        "".as_bytes(),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);

    let err =
        populate_from_authority_by_year_csv(&mut store, "".as_bytes(), &pop_cols(), &Filters::all())
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
}

#[test]
fn year_csv_skips_blank_cells() {
    let mut store = AreaStore::new();
    let stats = populate_from_authority_by_year_csv(
        &mut store,
        fixture("complete-popu1009-pop.csv"),
        &pop_cols(),
        &Filters::all(),
    )
    .unwrap();
    assert_eq!(stats.rows, 3);

    let anglesey = store.area("w06000001").unwrap().measure("pop").unwrap();
    assert_eq!(anglesey.label(), "Population");
    assert_eq!(anglesey.values().keys().copied().collect::<Vec<_>>(), vec![1991, 1993]);
    assert_eq!(
        anglesey.value(1992).unwrap_err().kind(),
        ErrorKind::NotFound
    );

    let powys = store.area("W06000023").unwrap().measure("POP").unwrap();
    assert_eq!(powys.len(), 2);
    assert_eq!(powys.value(1992).unwrap(), 122000.0);
}

#[test]
fn year_csv_applies_year_and_area_filters() {
    let filters = Filters {
        areas: StringFilter::new(["W06000011"]),
        years: YearFilter::new(1993, 1992),
        ..Filters::default()
    };
    let mut store = AreaStore::new();
    let stats = populate_from_authority_by_year_csv(
        &mut store,
        fixture("complete-popu1009-pop.csv"),
        &pop_cols(),
        &filters,
    )
    .unwrap();

    assert_eq!(stats.rows, 1);
    assert_eq!(stats.skipped, 2);
    assert_eq!(store.len(), 1);
    let swansea = store.area("W06000011").unwrap().measure("pop").unwrap();
    assert_eq!(swansea.values().keys().copied().collect::<Vec<_>>(), vec![1992, 1993]);
}

#[test]
fn year_csv_measure_filter_skips_whole_file() {
    let filters = Filters {
        measures: StringFilter::new(["dens"]),
        ..Filters::default()
    };
    let mut store = AreaStore::new();
    // The input is never read, so even garbage is accepted.
    let stats = populate_from_authority_by_year_csv(
        &mut store,
        "not,a\nyear,file".as_bytes(),
        &pop_cols(),
        &filters,
    )
    .unwrap();

    assert_eq!(stats.rows, 0);
    assert!(store.is_empty());
}

#[test]
fn year_csv_reports_non_numeric_cell() {
    let input = "Local authority code,1991,1992\nW1,10,11\nW2,oops,12\n";
    let mut store = AreaStore::new();
    let err =
        populate_from_authority_by_year_csv(&mut store, input.as_bytes(), &pop_cols(), &Filters::all())
            .unwrap_err();

    match &err {
        StatsError::ParseError { row, column, raw, .. } => {
            assert_eq!(*row, 3);
            assert_eq!(column, "1991");
            assert_eq!(raw, "oops");
        }
        other => panic!("expected ParseError, got {other:?}"),
    }
    assert!(store.contains("W1"));
    assert!(!store.contains("W2"));
}

#[test]
fn year_csv_rejects_non_year_header() {
    let input = "Local authority code,1991,Total\nW1,10,11\n";
    let mut store = AreaStore::new();
    let err =
        populate_from_authority_by_year_csv(&mut store, input.as_bytes(), &pop_cols(), &Filters::all())
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
    assert!(store.is_empty());
}

#[test]
fn year_csv_skips_short_rows() {
    let input = "Local authority code,1991,1992\nW1,10\nW2,20,21\n";
    let mut store = AreaStore::new();
    let stats =
        populate_from_authority_by_year_csv(&mut store, input.as_bytes(), &pop_cols(), &Filters::all())
            .unwrap();

    assert_eq!(stats.rows, 1);
    assert_eq!(stats.skipped, 1);
    assert!(!store.contains("W1"));
}

#[test]
fn year_csv_combines_with_existing_names() {
    let mut store = AreaStore::new();
    populate_from_authority_code_csv(&mut store, fixture("areas.csv"), &authority_cols(), &Filters::all())
        .unwrap();
    populate_from_authority_by_year_csv(
        &mut store,
        fixture("complete-popu1009-pop.csv"),
        &pop_cols(),
        &Filters::all(),
    )
    .unwrap();

    assert_eq!(store.len(), 3);
    let swansea = store.area("W06000011").unwrap();
    assert_eq!(swansea.name("eng").unwrap(), "Swansea");
    assert_eq!(swansea.measure("pop").unwrap().len(), 3);
}

#[test]
fn catalog_scenario() {
    let mut store = AreaStore::new();
    populate_from_authority_code_csv(
        &mut store,
        "code,eng,cym\nW1,Foo,Bar\n".as_bytes(),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap();

    assert_eq!(store.len(), 1);
    let area = store.area("W1").unwrap();
    assert_eq!(area.code(), "W1");
    assert_eq!(area.name("eng").unwrap(), "Foo");
    assert_eq!(area.name("cym").unwrap(), "Bar");
}

#[test]
fn wide_format_blank_cell_scenario() {
    let mut store = AreaStore::new();
    populate_from_authority_by_year_csv(
        &mut store,
        "code,1999,2000\nW1,10.5,\n".as_bytes(),
        &pop_cols(),
        &Filters::all(),
    )
    .unwrap();

    let pop = store.area("W1").unwrap().measure("pop").unwrap();
    assert_eq!(pop.values().len(), 1);
    assert_eq!(pop.value(1999).unwrap(), 10.5);
}

#[test]
fn catalog_skips_blank_lines() {
    let mut store = AreaStore::new();
    let stats = populate_from_authority_code_csv(
        &mut store,
        "code,eng,cym\n\nW1,Foo,Bar\n   \n".as_bytes(),
        &authority_cols(),
        &Filters::all(),
    )
    .unwrap();

    assert_eq!(stats.rows, 1);
    assert_eq!(stats.skipped, 0);
    assert_eq!(store.len(), 1);
    assert_eq!(store.area("W1").unwrap().name("eng").unwrap(), "Foo");
}

#[test]
fn year_csv_rejects_non_finite_cells() {
    for cell in ["NaN", "inf", "-Infinity"] {
        let input = format!("code,1999,2000\nW1,{cell},10\n");
        let mut store = AreaStore::new();
        let err = populate_from_authority_by_year_csv(
            &mut store,
            input.as_bytes(),
            &pop_cols(),
            &Filters::all(),
        )
        .unwrap_err();

        match &err {
            StatsError::ParseError { row, column, raw, .. } => {
                assert_eq!(*row, 2);
                assert_eq!(column, "1999");
                assert_eq!(raw, cell);
            }
            other => panic!("expected ParseError for {cell:?}, got {other:?}"),
        }
        assert!(store.is_empty());
    }
}

#[test]
fn measure_filter_skips_other_single_measure_file() {
    let area_cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Local authority code")
        .with(SourceColumn::SingleMeasureCode, "area")
        .with(SourceColumn::SingleMeasureName, "Land area");
    let input = "code,1999\nW1,100,\n";

    let pop_only = Filters {
        measures: StringFilter::new(["pop"]),
        ..Filters::default()
    };
    let mut store = AreaStore::new();
    populate_from_authority_by_year_csv(&mut store, input.as_bytes(), &area_cols, &pop_only)
        .unwrap();
    assert!(store.is_empty());

    populate_from_authority_by_year_csv(&mut store, input.as_bytes(), &area_cols, &Filters::all())
        .unwrap();
    assert_eq!(store.area("W1").unwrap().measure("area").unwrap().len(), 1);
}
