//! Totals — the resource-name → quantity record produced by a range query.

use crate::{domain::Domain, types::Quantity};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Summed quantities for every tracked field of one domain.
/// Field order follows [`Domain::fields`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Totals {
    domain:  Domain,
    amounts: Vec<Quantity>,
}

impl Totals {
    /// All-zero totals for `domain`.
    pub fn zero(domain: Domain) -> Self {
        Self {
            domain,
            amounts: vec![0; domain.fields().len()],
        }
    }

    /// Build from (field, amount) pairs. Unknown fields are ignored,
    /// fields not mentioned stay at zero.
    pub fn from_pairs<'a, I>(domain: Domain, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Quantity)>,
    {
        let mut totals = Totals::zero(domain);
        for (field, amount) in pairs {
            if let Some(pos) = domain.field_position(field) {
                totals.amounts[pos] = amount;
            }
        }
        totals
    }

    pub(crate) fn from_amounts(domain: Domain, amounts: Vec<Quantity>) -> Self {
        debug_assert_eq!(amounts.len(), domain.fields().len());
        Self { domain, amounts }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn get(&self, field: &str) -> Option<Quantity> {
        self.domain.field_position(field).map(|pos| self.amounts[pos])
    }

    /// (field, amount) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Quantity)> + '_ {
        self.domain.fields().iter().copied().zip(self.amounts.iter().copied())
    }

    pub fn is_zero(&self) -> bool {
        self.amounts.iter().all(|a| *a == 0)
    }

    /// Field-wise saturating addition of a row's quantities.
    pub(crate) fn accumulate(&mut self, row: &[Quantity]) {
        for (total, amount) in self.amounts.iter_mut().zip(row) {
            *total = total.saturating_add(*amount);
        }
    }

    pub(crate) fn amounts(&self) -> &[Quantity] {
        &self.amounts
    }

    /// Field-wise sum. `None` when the two totals belong to different domains.
    pub fn checked_add(&self, other: &Totals) -> Option<Totals> {
        if self.domain != other.domain {
            return None;
        }
        let mut sum = self.clone();
        sum.accumulate(&other.amounts);
        Some(sum)
    }

    /// Field-wise difference. `None` if any field would go negative or the
    /// domains differ.
    pub fn checked_sub(&self, other: &Totals) -> Option<Totals> {
        if self.domain != other.domain {
            return None;
        }
        let amounts = self
            .amounts
            .iter()
            .zip(&other.amounts)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<Vec<_>>>()?;
        Some(Totals::from_amounts(self.domain, amounts))
    }

    /// What is still missing after spending `owned`: `max(0, required - owned)`
    /// per field. `None` when `owned` belongs to another domain.
    pub fn shortfall(&self, owned: &Totals) -> Option<Totals> {
        if self.domain != owned.domain {
            return None;
        }
        let amounts = self
            .amounts
            .iter()
            .zip(&owned.amounts)
            .map(|(need, have)| need.saturating_sub(*have))
            .collect();
        Some(Totals::from_amounts(self.domain, amounts))
    }
}

impl Serialize for Totals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.amounts.len()))?;
        for (field, amount) in self.iter() {
            map.serialize_entry(field, &amount)?;
        }
        map.end()
    }
}
