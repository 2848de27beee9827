//! Loader boundary — turns already-read text into validated tables.
//!
//! RULE: This module parses strings handed to it. Reading files is the
//! caller's job; nothing here touches the filesystem.

use crate::{
    book::DomainTables,
    cost_table::RawRow,
    defaults,
    domain::Domain,
    error::{CalcError, CalcResult},
    level_index::{LevelCatalog, LevelOrders, LevelIndex},
    types::Level,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON document describing one domain's levels and cost rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainFile {
    pub domain: Domain,
    #[serde(default)]
    pub levels: LevelOrders,
    #[serde(default)]
    pub rows:   Vec<RawRow>,
}

impl DomainFile {
    pub fn from_json(text: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build tables. When the file names no levels at all, the domain's
    /// built-in order is used, then the rows' first-appearance order.
    pub fn into_tables(self) -> CalcResult<DomainTables> {
        let catalog = if self.levels.default.is_none() && self.levels.entities.is_empty() {
            fallback_catalog(self.domain, &self.rows)?
        } else {
            LevelCatalog::from_orders(self.levels)?
        };
        Ok(DomainTables::from_rows(self.domain, catalog, self.rows))
    }
}

/// Parse comma-delimited text with a header row into loose rows.
///
/// Blank lines are skipped and cells trimmed. Quoting is not supported.
/// The level column is required; resource columns that are absent simply
/// leave the field unset (it coerces to zero).
pub fn parse_delimited(domain: Domain, text: &str) -> CalcResult<Vec<RawRow>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let find = |aliases: &[&str]| {
        aliases
            .iter()
            .find_map(|alias| header.iter().position(|h| h == alias))
    };

    let level_col = find(domain.level_aliases()).ok_or_else(|| CalcError::MissingColumn {
        column: "level".to_string(),
    })?;
    let entity_col = find(domain.entity_aliases());
    let field_cols: Vec<(&'static str, usize)> = domain
        .fields()
        .iter()
        .filter_map(|field| find(domain.field_aliases(field)).map(|col| (*field, col)))
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let level = cells.get(level_col).copied().unwrap_or_default();
        if level.is_empty() {
            continue;
        }
        let entity = entity_col.and_then(|col| cells.get(col).copied());
        let mut row = RawRow::new(entity, level);
        for (field, col) in &field_cols {
            let cell = cells.get(*col).copied().unwrap_or_default();
            row.fields.insert((*field).to_string(), Value::String(cell.to_string()));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Build tables from delimited text using the fallback level order.
///
/// Text with no usable rows yields the domain's built-in tables when it has
/// any, otherwise an empty table.
pub fn tables_from_delimited(domain: Domain, text: &str) -> CalcResult<DomainTables> {
    let rows = parse_delimited(domain, text)?;
    if rows.is_empty() {
        if let Some(builtin) = defaults::tables(domain)? {
            log::debug!("{domain}: delimited text has no rows, using built-in tables");
            return Ok(builtin);
        }
    }
    let catalog = fallback_catalog(domain, &rows)?;
    Ok(DomainTables::from_rows(domain, catalog, rows))
}

fn fallback_catalog(domain: Domain, rows: &[RawRow]) -> CalcResult<LevelCatalog> {
    if let Some(levels) = defaults::level_order(domain) {
        return Ok(LevelCatalog::uniform(LevelIndex::new(levels)?));
    }
    Ok(LevelCatalog::uniform(first_appearance(rows)?))
}

/// Levels in the order rows first mention them.
fn first_appearance(rows: &[RawRow]) -> CalcResult<LevelIndex> {
    let mut seen: Vec<Level> = Vec::new();
    for row in rows {
        let level = row.level.trim();
        if !seen.iter().any(|l| l == level) {
            seen.push(level.to_string());
        }
    }
    LevelIndex::new(seen)
}
