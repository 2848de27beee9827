//! Cost table construction — duplicate keys, coercion, insertion order.

use frostcalc_core::{sum_range, CostTable, Domain, LevelIndex, RawRow, Totals};
use serde_json::json;

fn gear_index() -> LevelIndex {
    LevelIndex::new(["Green", "Green 1", "Blue"]).unwrap()
}

/// Later rows for the same (entity, level) key replace earlier ones.
#[test]
fn later_duplicate_row_wins() {
    let rows = vec![
        RawRow::new(None, "Green").with("alloy", 10).with("polish", 1),
        RawRow::new(None, "Green").with("alloy", 25),
    ];
    let table = CostTable::build_index(Domain::ChiefGear, rows);

    let totals = sum_range(&table, None, "Green", "Green", &gear_index()).unwrap();

    assert_eq!(totals.get("alloy"), Some(25));
    assert_eq!(totals.get("polish"), Some(0), "the replaced row's fields do not merge in");
    assert_eq!(table.overwritten(), 1);
}

#[test]
fn duplicate_order_decides_the_winner() {
    let first = RawRow::new(None, "Blue").with("plans", 3);
    let second = RawRow::new(None, "Blue").with("plans", 7);

    let forward = CostTable::build_index(Domain::ChiefGear, vec![first.clone(), second.clone()]);
    let backward = CostTable::build_index(Domain::ChiefGear, vec![second, first]);

    let plans = |t: &CostTable| sum_range(t, None, "Blue", "Blue", &gear_index()).unwrap().get("plans");
    assert_eq!(plans(&forward), Some(7));
    assert_eq!(plans(&backward), Some(3));
}

/// Malformed fields become zero and never stop the build or the sum.
#[test]
fn malformed_fields_coerce_to_zero() {
    let rows = vec![
        RawRow::new(None, "Green")
            .with("alloy", "not a number")
            .with("polish", -40)
            .with("plans", json!(null))
            .with("amber", "2"),
        RawRow::new(None, "Green 1").with("alloy", 15.75).with("svsPoints", "1,200"),
    ];
    let table = CostTable::build_index(Domain::ChiefGear, rows);

    let totals = sum_range(&table, None, "Green", "Blue", &gear_index()).unwrap();

    assert_eq!(
        totals,
        Totals::from_pairs(
            Domain::ChiefGear,
            [("alloy", 15), ("polish", 0), ("plans", 0), ("amber", 2), ("power", 0), ("svsPoints", 1_200)],
        )
    );
    assert_eq!(table.coerced_fields(), 3);
}

#[test]
fn unknown_fields_are_ignored() {
    let rows = vec![RawRow::new(None, "Green").with("alloy", 5).with("meat", 1_000_000)];
    let table = CostTable::build_index(Domain::ChiefGear, rows);

    let totals = sum_range(&table, None, "Green", "Green", &gear_index()).unwrap();

    assert_eq!(totals.get("alloy"), Some(5));
    assert_eq!(totals.get("meat"), None);
    assert_eq!(totals.iter().count(), 6);
}

#[test]
fn entity_and_level_are_trimmed() {
    let rows = vec![RawRow::new(Some("  Furnace "), " FC1 ").with("normal", 158)];
    let table = CostTable::build_index(Domain::FireCrystals, rows);

    assert_eq!(table.row(Some("Furnace"), "FC1"), Some(&[158, 0][..]));
}

#[test]
fn loose_rows_deserialize_from_json() {
    let rows: Vec<RawRow> = serde_json::from_value(json!([
        { "building": "Furnace", "level": "FC1", "normal": 158, "refined": "0" },
        { "entity": "Embassy", "level": "FC1", "normal": "39" },
    ]))
    .unwrap();
    let table = CostTable::build_index(Domain::FireCrystals, rows);

    assert_eq!(table.row(Some("Furnace"), "FC1"), Some(&[158, 0][..]));
    assert_eq!(table.row(Some("Embassy"), "FC1"), Some(&[39, 0][..]));
}
