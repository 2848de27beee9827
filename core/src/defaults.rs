//! Built-in tables used when no data file is supplied.
//!
//! Charm costs are the published per-level values. Chief gear costs
//! are a placeholder curve; real data should come from a data file.

use crate::{
    book::DomainTables,
    cost_table::RawRow,
    domain::Domain,
    error::CalcResult,
    level_index::{LevelCatalog, LevelIndex},
};

pub const GEAR_LEVELS: [&str; 46] = [
    "Green", "Green 1", "Blue", "Blue 1", "Blue 2", "Blue 3",
    "Purple", "Purple 1", "Purple 2", "Purple 3",
    "Purple T1", "Purple T1 1", "Purple T1 2", "Purple T1 3",
    "Gold", "Gold 1", "Gold 2", "Gold 3",
    "Gold T1", "Gold T1 1", "Gold T1 2", "Gold T1 3",
    "Gold T2", "Gold T2 1", "Gold T2 2", "Gold T2 3",
    "Red", "Red 1", "Red 2", "Red 3",
    "Red T1", "Red T1 1", "Red T1 2", "Red T1 3",
    "Red T2", "Red T2 1", "Red T2 2", "Red T2 3",
    "Red T3", "Red T3 1", "Red T3 2", "Red T3 3",
    "Red T4", "Red T4 1", "Red T4 2", "Red T4 3",
];

/// Charm level, then guides, designs, secrets, power, svsPoints.
const CHARM_COSTS: [(u8, u64, u64, u64, u64, u64); 16] = [
    (0,    5,   5,   0,   205_700,    625),
    (1,   40,  15,   0,   288_000,  1_250),
    (2,   60,  40,   0,   370_000,  3_125),
    (3,   80, 100,   0,   452_000,  8_750),
    (4,  100, 200,   0,   576_000, 11_250),
    (5,  120, 300,   0,   700_000, 12_500),
    (6,  140, 400,   0,   824_000, 12_500),
    (7,  200, 400,   0,   948_000, 13_000),
    (8,  300, 400,   0, 1_072_000, 14_000),
    (9,  420, 420,   0, 1_196_000, 15_000),
    (10, 560, 420,   0, 1_320_000, 16_000),
    (11, 580, 450,  15, 1_536_000, 17_000),
    (12, 580, 450,  30, 1_752_000, 18_000),
    (13, 600, 500,  45, 1_968_000, 19_000),
    (14, 600, 500,  70, 2_184_000, 20_000),
    (15, 650, 550, 100, 2_400_000, 21_000),
];

/// The built-in level order for a domain, if it has one.
/// Fire crystal orders differ per building and always come from data.
pub fn level_order(domain: Domain) -> Option<Vec<String>> {
    match domain {
        Domain::FireCrystals => None,
        Domain::ChiefGear    => Some(GEAR_LEVELS.iter().map(|l| l.to_string()).collect()),
        Domain::Charms       => Some(CHARM_COSTS.iter().map(|c| c.0.to_string()).collect()),
    }
}

pub fn charm_rows() -> Vec<RawRow> {
    CHARM_COSTS
        .iter()
        .map(|&(level, guides, designs, secrets, power, svs)| {
            RawRow::new(None, &level.to_string())
                .with("guides", guides)
                .with("designs", designs)
                .with("secrets", secrets)
                .with("power", power)
                .with("svsPoints", svs)
        })
        .collect()
}

pub fn chief_gear_rows() -> Vec<RawRow> {
    GEAR_LEVELS
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let step = i as u64;
            let base = (step + 1) * 10;
            RawRow::new(None, level)
                .with("alloy", base)
                .with("polish", base)
                .with("plans", step / 2 + 1)
                .with("amber", step / 6)
                .with("power", 0)
                .with("svsPoints", (step + 1) * 100)
        })
        .collect()
}

/// Built-in tables for `domain`, or `None` when it has no defaults.
pub fn tables(domain: Domain) -> CalcResult<Option<DomainTables>> {
    let rows = match domain {
        Domain::FireCrystals => return Ok(None),
        Domain::ChiefGear    => chief_gear_rows(),
        Domain::Charms       => charm_rows(),
    };
    let levels = level_order(domain).unwrap_or_default();
    let catalog = LevelCatalog::uniform(LevelIndex::new(levels)?);
    Ok(Some(DomainTables::from_rows(domain, catalog, rows)))
}
