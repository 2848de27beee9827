//! Level index — the total order used for range slicing.
//!
//! RULE: Order is whatever the source data encodes. It is never
//! re-sorted lexicographically or numerically.

use crate::{
    error::{CalcError, CalcResult, RangeError},
    types::Level,
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An ordered, duplicate-free sequence of levels with precomputed positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelIndex {
    levels:    Vec<Level>,
    positions: HashMap<Level, usize>,
}

impl LevelIndex {
    /// Build an index. Identifiers are trimmed the same way row levels are.
    /// Fails on the first duplicate identifier.
    pub fn new<I, S>(levels: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Level>,
    {
        let mut index = LevelIndex::default();
        for level in levels {
            let level = normalize_level(level.into());
            if index.positions.contains_key(&level) {
                return Err(CalcError::DuplicateLevel { level });
            }
            index.positions.insert(level.clone(), index.levels.len());
            index.levels.push(level);
        }
        Ok(index)
    }

    /// Exact-match position lookup.
    pub fn index_of(&self, level: &str) -> Option<usize> {
        self.positions.get(level).copied()
    }

    /// The inclusive run of levels from `from` to `to`.
    ///
    /// `from == to` is a valid one-level slice. An unknown level or a
    /// reversed pair is a [`RangeError`], never an empty slice.
    pub fn slice(&self, from: &str, to: &str) -> Result<&[Level], RangeError> {
        let start = self.index_of(from).ok_or_else(|| RangeError::UnknownLevel {
            level: from.to_string(),
        })?;
        let end = self.index_of(to).ok_or_else(|| RangeError::UnknownLevel {
            level: to.to_string(),
        })?;
        if start > end {
            return Err(RangeError::ReversedRange {
                from: from.to_string(),
                to:   to.to_string(),
            });
        }
        Ok(&self.levels[start..=end])
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Serialized shape of a level catalog inside a domain data file.
/// Levels may be written as strings or integers (`"FC1"`, `3`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelOrders {
    #[serde(default, deserialize_with = "deserialize_optional_levels")]
    pub default: Option<Vec<Level>>,
    #[serde(default, deserialize_with = "deserialize_entity_levels")]
    pub entities: HashMap<String, Vec<Level>>,
}

/// Level indices for one domain: an optional default plus per-entity
/// overrides (the Furnace climbs through sub-steps other buildings skip).
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    default:    Option<LevelIndex>,
    per_entity: HashMap<String, LevelIndex>,
}

impl LevelCatalog {
    /// A catalog where every entity shares one index.
    pub fn uniform(index: LevelIndex) -> Self {
        Self {
            default:    Some(index),
            per_entity: HashMap::new(),
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>, index: LevelIndex) -> Self {
        self.per_entity.insert(entity.into(), index);
        self
    }

    pub fn from_orders(orders: LevelOrders) -> CalcResult<Self> {
        let default = orders.default.map(LevelIndex::new).transpose()?;
        let per_entity = orders
            .entities
            .into_iter()
            .map(|(entity, levels)| Ok((entity.trim().to_string(), LevelIndex::new(levels)?)))
            .collect::<CalcResult<HashMap<_, _>>>()?;
        Ok(Self { default, per_entity })
    }

    /// The index governing `entity`, falling back to the default.
    pub fn resolve(&self, entity: Option<&str>) -> Result<&LevelIndex, RangeError> {
        entity
            .and_then(|e| self.per_entity.get(e))
            .or(self.default.as_ref())
            .ok_or_else(|| RangeError::NoIndexForEntity {
                entity: entity.map(str::to_string),
            })
    }

    /// Entities that carry their own index, sorted for stable output.
    pub fn entities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.per_entity.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Trim surrounding whitespace; levels are otherwise matched exactly.
pub(crate) fn normalize_level(level: Level) -> Level {
    let trimmed = level.trim();
    if trimmed.len() == level.len() {
        level
    } else {
        trimmed.to_string()
    }
}

/// A loose level identifier: a string, or an integer written in decimal.
pub(crate) fn level_from_value(value: Value) -> Result<Level, String> {
    match value {
        Value::String(s) => Ok(normalize_level(s)),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(format!("expected a level string or integer, found {other}")),
    }
}

pub(crate) fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
    level_from_value(Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

fn levels_from_values(values: Vec<Value>) -> Result<Vec<Level>, String> {
    values.into_iter().map(level_from_value).collect()
}

fn deserialize_optional_levels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Level>>, D::Error> {
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(levels_from_values)
        .transpose()
        .map_err(D::Error::custom)
}

fn deserialize_entity_levels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, Vec<Level>>, D::Error> {
    HashMap::<String, Vec<Value>>::deserialize(deserializer)?
        .into_iter()
        .map(|(entity, values)| Ok((entity, levels_from_values(values)?)))
        .collect::<Result<_, String>>()
        .map_err(D::Error::custom)
}
