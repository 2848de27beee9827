//! Range aggregation — one routine for every domain.
//!
//! RULES:
//!   - Only levels inside the inclusive slice [from, to] contribute.
//!     Upgrade pricing drops `from` itself, since it is already reached.
//!   - A level with no row contributes zero. It is not an error.
//!   - An unresolvable range yields no totals at all, never zeros.
//!   - Pure: no logging, no I/O, no hidden state.

use crate::{
    cost_table::CostTable,
    error::RangeError,
    level_index::{LevelCatalog, LevelIndex},
    totals::Totals,
    types::{EntityName, Level},
};
use serde::{Deserialize, Serialize};

/// A request for the cumulative cost of climbing from one level to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub entity: Option<EntityName>,
    pub from:   Level,
    pub to:     Level,
}

impl RangeQuery {
    pub fn new(entity: Option<&str>, from: &str, to: &str) -> Self {
        Self {
            entity: entity.map(str::to_string),
            from:   from.to_string(),
            to:     to.to_string(),
        }
    }
}

/// Sum every tracked field over the inclusive slice [from, to].
///
/// Returns `None` when the range cannot be resolved (unknown level or
/// `from` after `to`). Callers must treat `None` as "cannot compute",
/// distinct from a record whose fields are all zero.
pub fn sum_range(
    table: &CostTable,
    entity: Option<&str>,
    from: &str,
    to: &str,
    levels: &LevelIndex,
) -> Option<Totals> {
    try_sum_range(table, entity, from, to, levels).ok()
}

/// [`sum_range`] with the reason for an invalid range.
pub fn try_sum_range(
    table: &CostTable,
    entity: Option<&str>,
    from: &str,
    to: &str,
    levels: &LevelIndex,
) -> Result<Totals, RangeError> {
    let slice = levels.slice(from, to)?;
    Ok(sum_levels(table, entity, slice))
}

/// Cost of upgrading from `from` to `to`: the levels after `from` up to and
/// including `to`. The starting level is already owned and is not charged.
///
/// Range validity is the same as [`try_sum_range`]; `from == to` is a valid
/// upgrade that costs nothing.
pub fn try_sum_upgrade(
    table: &CostTable,
    entity: Option<&str>,
    from: &str,
    to: &str,
    levels: &LevelIndex,
) -> Result<Totals, RangeError> {
    let slice = levels.slice(from, to)?;
    Ok(sum_levels(table, entity, &slice[1..]))
}

fn sum_levels(table: &CostTable, entity: Option<&str>, slice: &[Level]) -> Totals {
    let mut totals = Totals::zero(table.domain());
    for level in slice {
        if let Some(row) = table.row(entity, level) {
            totals.accumulate(row);
        }
    }
    totals
}

/// Resolve the entity's index from a catalog, then sum.
pub fn sum_query(
    table: &CostTable,
    catalog: &LevelCatalog,
    query: &RangeQuery,
) -> Result<Totals, RangeError> {
    let entity = query.entity.as_deref();
    let levels = catalog.resolve(entity)?;
    try_sum_range(table, entity, &query.from, &query.to, levels)
}

/// Resolve the entity's index from a catalog, then price the upgrade.
pub fn upgrade_query(
    table: &CostTable,
    catalog: &LevelCatalog,
    query: &RangeQuery,
) -> Result<Totals, RangeError> {
    let entity = query.entity.as_deref();
    let levels = catalog.resolve(entity)?;
    try_sum_upgrade(table, entity, &query.from, &query.to, levels)
}
