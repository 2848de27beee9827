//! Cost table — keyed (entity, level) → resource quantities.
//!
//! RULE: build_index never fails on data shape. Non-numeric, negative,
//! or missing fields coerce to 0. A later row for the same key
//! silently replaces the earlier one.

use crate::{
    domain::Domain,
    level_index::normalize_level,
    types::{EntityName, Level, Quantity},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A loose row as it arrives from a loader. Resource fields are untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, alias = "building")]
    pub entity: Option<EntityName>,
    #[serde(deserialize_with = "crate::level_index::deserialize_level")]
    pub level:  Level,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RawRow {
    pub fn new(entity: Option<&str>, level: &str) -> Self {
        Self {
            entity: entity.map(str::to_string),
            level:  level.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }
}

/// A validated row: quantities are aligned to the domain's field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRow {
    pub entity:     Option<EntityName>,
    pub level:      Level,
    pub quantities: Vec<Quantity>,
}

type RowKey = (Option<EntityName>, Level);

#[derive(Debug, Clone)]
pub struct CostTable {
    domain:         Domain,
    rows:           HashMap<RowKey, Vec<Quantity>>,
    coerced_fields: usize,
    overwritten:    usize,
}

impl CostTable {
    /// Normalize loose rows into the keyed lookup structure.
    pub fn build_index<I>(domain: Domain, rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut table = CostTable {
            domain,
            rows: HashMap::new(),
            coerced_fields: 0,
            overwritten: 0,
        };
        for raw in rows {
            let row = table.validate(raw);
            table.insert(row);
        }
        log::debug!(
            "{domain}: cost table built with {} rows ({} fields coerced, {} duplicates overwritten)",
            table.rows.len(),
            table.coerced_fields,
            table.overwritten,
        );
        table
    }

    fn validate(&mut self, raw: RawRow) -> CostRow {
        let domain = self.domain;
        let mut coerced = 0;
        let quantities = domain
            .fields()
            .iter()
            .map(|field| match raw.fields.get(*field) {
                Some(value) => coerce_quantity(value).unwrap_or_else(|| {
                    log::debug!("{domain}: {field}={value} at level {} coerced to 0", raw.level);
                    coerced += 1;
                    0
                }),
                None => 0,
            })
            .collect();
        self.coerced_fields += coerced;

        CostRow {
            entity: if domain.has_entity() {
                normalize_entity(raw.entity)
            } else {
                None
            },
            level: normalize_level(raw.level),
            quantities,
        }
    }

    fn insert(&mut self, row: CostRow) {
        let key = (row.entity, row.level);
        if let Some(previous) = self.rows.insert(key.clone(), row.quantities) {
            log::debug!(
                "{}: duplicate row for {:?}/{} replaced (was {previous:?})",
                self.domain, key.0, key.1,
            );
            self.overwritten += 1;
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// The row for (entity, level), if one was loaded.
    pub fn row(&self, entity: Option<&str>, level: &str) -> Option<&[Quantity]> {
        let entity = if self.domain.has_entity() { entity } else { None };
        // Tuple keys can't be probed with borrowed parts.
        self.rows
            .get(&(entity.map(str::to_string), level.to_string()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of fields that failed numeric coercion during the build.
    pub fn coerced_fields(&self) -> usize {
        self.coerced_fields
    }

    /// Number of rows replaced by a later row with the same key.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

fn normalize_entity(entity: Option<EntityName>) -> Option<EntityName> {
    entity
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

/// Coerce a loose value to a non-negative whole quantity.
///
/// Numbers are truncated toward zero; numeric strings may carry
/// thousands separators ("1,250"). Returns `None` for anything that is
/// not a finite, non-negative number.
pub fn coerce_quantity(value: &Value) -> Option<Quantity> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else {
                n.as_f64().and_then(coerce_float)
            }
        }
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned
                .parse::<Quantity>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().and_then(coerce_float))
        }
        _ => None,
    }
}

fn coerce_float(f: f64) -> Option<Quantity> {
    if f.is_finite() && f >= 0.0 && f < Quantity::MAX as f64 {
        Some(f.trunc() as Quantity)
    } else {
        None
    }
}
