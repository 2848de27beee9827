//! Calculator domains and their resource schemas.
//!
//! RULE: The aggregation algorithm is identical for every domain.
//! A domain only decides which resource fields are tracked and whether
//! rows carry an entity (building) dimension.

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    FireCrystals,
    ChiefGear,
    Charms,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::FireCrystals, Domain::ChiefGear, Domain::Charms];

    /// Stable snake_case name, also used for data file names.
    pub fn name(&self) -> &'static str {
        match self {
            Domain::FireCrystals => "fire_crystals",
            Domain::ChiefGear    => "chief_gear",
            Domain::Charms       => "charms",
        }
    }

    /// Tracked resource fields, in display order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Domain::FireCrystals => &["normal", "refined"],
            Domain::ChiefGear    => &["alloy", "polish", "plans", "amber", "power", "svsPoints"],
            Domain::Charms       => &["guides", "designs", "secrets", "power", "svsPoints"],
        }
    }

    /// Whether cost rows are keyed by entity as well as level.
    /// Chief gear and charm costs are shared by every slot.
    pub fn has_entity(&self) -> bool {
        matches!(self, Domain::FireCrystals)
    }

    /// Position of `field` in [`Domain::fields`].
    pub fn field_position(&self, field: &str) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// Lower-case header spellings accepted for each field by the delimited loader.
    pub fn field_aliases(&self, field: &str) -> &'static [&'static str] {
        match (self, field) {
            (Domain::FireCrystals, "normal")  => &["normal", "fc", "fire crystals", "normalfc"],
            (Domain::FireCrystals, "refined") => &["refined", "rfc", "refine", "refined fire crystals", "refinefc"],
            (Domain::ChiefGear, "alloy")      => &["alloy", "hardened alloy", "hardenedalloy"],
            (Domain::ChiefGear, "polish")     => &["polish", "polishing solution", "polishingsolution"],
            (Domain::ChiefGear, "plans")      => &["plans", "design plans", "designplans"],
            (Domain::ChiefGear, "amber")      => &["amber", "lunar amber", "lunaramber"],
            (_, "power")                      => &["power"],
            (_, "svsPoints")                  => &["svspoints", "svs points"],
            (Domain::Charms, "guides")        => &["guides", "charm guides"],
            (Domain::Charms, "designs")       => &["designs", "charm designs"],
            (Domain::Charms, "secrets")       => &["secrets", "charm secrets"],
            _ => &[],
        }
    }

    /// Header spellings of the level column.
    pub fn level_aliases(&self) -> &'static [&'static str] {
        match self {
            Domain::ChiefGear => &["gear level", "level"],
            _                 => &["level"],
        }
    }

    /// Header spellings of the entity column. Empty for single-entity domains.
    pub fn entity_aliases(&self) -> &'static [&'static str] {
        match self {
            Domain::FireCrystals => &["building", "entity"],
            _                    => &[],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        Domain::ALL
            .into_iter()
            .find(|d| d.name() == s.trim())
            .ok_or_else(|| CalcError::UnknownDomain { name: s.to_string() })
    }
}
