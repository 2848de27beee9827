//! Upgrade plans — several range queries evaluated together.
//!
//! A player usually plans every building (or gear/charm slot) at once.
//! Each step is priced on its own as an upgrade: the current level is
//! already owned, so only the levels after it through the target are
//! charged. Only valid steps reach the grand total.

use crate::{
    aggregator::RangeQuery,
    book::DomainTables,
    error::RangeError,
    totals::Totals,
    types::{EntityName, Level},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Display label ("Furnace", "Helmet", "Coat charm 2").
    pub label: String,
    #[serde(default)]
    pub entity: Option<EntityName>,
    pub from: Level,
    pub to: Level,
}

impl PlanStep {
    pub fn query(&self) -> RangeQuery {
        RangeQuery {
            entity: self.entity.clone(),
            from:   self.from.clone(),
            to:     self.to.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePlan {
    pub steps: Vec<PlanStep>,
}

impl UpgradePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, label: &str, entity: Option<&str>, from: &str, to: &str) -> Self {
        self.steps.push(PlanStep {
            label:  label.to_string(),
            entity: entity.map(str::to_string),
            from:   from.to_string(),
            to:     to.to_string(),
        });
        self
    }

    pub fn evaluate(&self, tables: &DomainTables) -> PlanReport {
        let mut total = Totals::zero(tables.domain());
        let mut invalid_steps = 0;
        let steps = self
            .steps
            .iter()
            .map(|step| {
                let outcome = tables.try_upgrade(&step.query());
                match &outcome {
                    Ok(totals) => total.accumulate(totals.amounts()),
                    Err(_) => invalid_steps += 1,
                }
                StepOutcome {
                    label: step.label.clone(),
                    totals: outcome.as_ref().ok().cloned(),
                    error: outcome.err(),
                }
            })
            .collect();

        PlanReport { steps, total, invalid_steps }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub label: String,
    /// `None` when the step's range could not be resolved.
    pub totals: Option<Totals>,
    #[serde(serialize_with = "serialize_error", skip_serializing_if = "Option::is_none")]
    pub error: Option<RangeError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub steps: Vec<StepOutcome>,
    /// Sum over valid steps only.
    pub total: Totals,
    pub invalid_steps: usize,
}

impl PlanReport {
    /// Resources still needed after spending `inventory`.
    /// `None` when `inventory` belongs to another domain.
    pub fn shortfall(&self, inventory: &Totals) -> Option<Totals> {
        self.total.shortfall(inventory)
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<RangeError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
