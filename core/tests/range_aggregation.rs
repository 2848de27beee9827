//! Range aggregation tests — inclusive slicing, missing rows, invalid ranges.

use frostcalc_core::{
    sum_range, try_sum_range, CostTable, Domain, LevelCatalog, LevelIndex, RangeError, RangeQuery,
    RawRow, Totals,
};

fn furnace_index() -> LevelIndex {
    LevelIndex::new(["F30", "FC1", "FC2"]).expect("valid index")
}

fn furnace_rows() -> Vec<RawRow> {
    vec![
        RawRow::new(Some("Furnace"), "F30").with("normal", 100).with("refined", 0),
        RawRow::new(Some("Furnace"), "FC1").with("normal", 200).with("refined", 50),
        RawRow::new(Some("Furnace"), "FC2").with("normal", 0).with("refined", 300),
    ]
}

fn fc(normal: u64, refined: u64) -> Totals {
    Totals::from_pairs(Domain::FireCrystals, [("normal", normal), ("refined", refined)])
}

/// Worked example: F30 → FC2 covers all three levels.
#[test]
fn sums_every_level_in_inclusive_range() {
    let table = CostTable::build_index(Domain::FireCrystals, furnace_rows());

    let totals = sum_range(&table, Some("Furnace"), "F30", "FC2", &furnace_index())
        .expect("valid range");

    assert_eq!(totals, fc(300, 350));
    assert_eq!(totals.get("normal"), Some(300));
    assert_eq!(totals.get("refined"), Some(350));
}

/// A level with no row contributes zero instead of failing the sum.
#[test]
fn missing_row_contributes_zero() {
    let rows: Vec<RawRow> = furnace_rows()
        .into_iter()
        .filter(|r| r.level != "FC1")
        .collect();
    let table = CostTable::build_index(Domain::FireCrystals, rows);

    let totals = sum_range(&table, Some("Furnace"), "F30", "FC2", &furnace_index());

    assert_eq!(totals, Some(fc(100, 300)));
}

#[test]
fn reversed_range_is_invalid() {
    let table = CostTable::build_index(Domain::FireCrystals, furnace_rows());
    let index = furnace_index();

    assert_eq!(sum_range(&table, Some("Furnace"), "FC2", "F30", &index), None);
    assert_eq!(
        try_sum_range(&table, Some("Furnace"), "FC2", "F30", &index),
        Err(RangeError::ReversedRange { from: "FC2".into(), to: "F30".into() })
    );
}

#[test]
fn unknown_level_is_invalid() {
    let table = CostTable::build_index(Domain::FireCrystals, furnace_rows());
    let index = furnace_index();

    assert_eq!(sum_range(&table, Some("Furnace"), "F30", "FC99", &index), None);
    assert_eq!(
        try_sum_range(&table, Some("Furnace"), "F30", "FC99", &index),
        Err(RangeError::UnknownLevel { level: "FC99".into() })
    );
    assert_eq!(sum_range(&table, Some("Furnace"), "fc1", "FC2", &index), None, "matching is exact");
}

/// from == to is a one-level query, not an empty or invalid one.
#[test]
fn single_level_range_returns_that_row() {
    let table = CostTable::build_index(Domain::FireCrystals, furnace_rows());

    let totals = sum_range(&table, Some("Furnace"), "FC1", "FC1", &furnace_index());

    assert_eq!(totals, Some(fc(200, 50)));
}

/// An all-zero result for a valid range is still a result, not the invalid signal.
#[test]
fn valid_range_without_rows_is_zero_not_invalid() {
    let table = CostTable::build_index(Domain::FireCrystals, furnace_rows());

    let totals = sum_range(&table, Some("Embassy"), "F30", "FC2", &furnace_index())
        .expect("range is valid even though Embassy has no rows");

    assert!(totals.is_zero());
}

#[test]
fn rows_of_other_entities_never_leak_in() {
    let mut rows = furnace_rows();
    rows.push(RawRow::new(Some("Embassy"), "FC1").with("normal", 9_999));
    let table = CostTable::build_index(Domain::FireCrystals, rows);

    let totals = sum_range(&table, Some("Furnace"), "F30", "FC2", &furnace_index());

    assert_eq!(totals, Some(fc(300, 350)));
}

#[test]
fn levels_outside_range_are_excluded() {
    let index = LevelIndex::new(["F30", "FC1", "FC2", "FC3"]).unwrap();
    let mut rows = furnace_rows();
    rows.push(RawRow::new(Some("Furnace"), "FC3").with("normal", 1_000));
    let table = CostTable::build_index(Domain::FireCrystals, rows);

    let totals = sum_range(&table, Some("Furnace"), "FC1", "FC2", &index);

    assert_eq!(totals, Some(fc(200, 350)));
}

#[test]
fn per_entity_index_overrides_default() {
    let default = LevelIndex::new(["F30", "FC1", "FC2"]).unwrap();
    let academy = LevelIndex::new(["FC1", "FC2"]).unwrap();
    let catalog = LevelCatalog::uniform(default).with_entity("War Academy", academy);
    let table = CostTable::build_index(
        Domain::FireCrystals,
        vec![
            RawRow::new(Some("War Academy"), "FC1").with("normal", 10),
            RawRow::new(Some("War Academy"), "FC2").with("normal", 20),
        ],
    );

    let academy_from_f30 = frostcalc_core::aggregator::sum_query(
        &table,
        &catalog,
        &RangeQuery::new(Some("War Academy"), "F30", "FC2"),
    );
    let academy_from_fc1 = frostcalc_core::aggregator::sum_query(
        &table,
        &catalog,
        &RangeQuery::new(Some("War Academy"), "FC1", "FC2"),
    );

    assert_eq!(
        academy_from_f30,
        Err(RangeError::UnknownLevel { level: "F30".into() }),
        "War Academy has no F30 level"
    );
    assert_eq!(academy_from_fc1, Ok(fc(30, 0)));
}

#[test]
fn catalog_without_default_rejects_unknown_entity() {
    let catalog = LevelCatalog::default()
        .with_entity("Furnace", LevelIndex::new(["F30", "FC1"]).unwrap());

    assert!(catalog.resolve(Some("Furnace")).is_ok());
    assert_eq!(
        catalog.resolve(Some("Embassy")).unwrap_err(),
        RangeError::NoIndexForEntity { entity: Some("Embassy".into()) }
    );
}

#[test]
fn level_index_rejects_duplicates() {
    let err = LevelIndex::new(["F30", "FC1", "F30"]).unwrap_err();
    assert!(
        matches!(err, frostcalc_core::CalcError::DuplicateLevel { ref level } if level == "F30"),
        "unexpected error: {err}"
    );
}

#[test]
fn slice_keeps_source_order() {
    let index = LevelIndex::new(["Green", "Green 1", "Blue", "Blue 1"]).unwrap();

    assert_eq!(index.index_of("Blue"), Some(2));
    assert_eq!(index.index_of("Purple"), None);
    assert_eq!(
        index.slice("Green 1", "Blue 1").unwrap(),
        ["Green 1".to_string(), "Blue".to_string(), "Blue 1".to_string()]
    );
}
