//! Cost book — the loaded tables for every domain.
//!
//! RULE: A domain's level catalog and cost table are replaced together
//! or not at all. Nothing inside a loaded `DomainTables` ever mutates.

use crate::{
    aggregator::{sum_query, upgrade_query, RangeQuery},
    cost_table::{CostTable, RawRow},
    domain::Domain,
    error::{CalcError, CalcResult, RangeError},
    level_index::LevelCatalog,
    totals::Totals,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything needed to answer queries for one domain.
#[derive(Debug, Clone)]
pub struct DomainTables {
    pub catalog: LevelCatalog,
    pub costs:   CostTable,
}

impl DomainTables {
    pub fn new(catalog: LevelCatalog, costs: CostTable) -> Self {
        Self { catalog, costs }
    }

    /// Build the cost table from loose rows and pair it with `catalog`.
    pub fn from_rows<I>(domain: Domain, catalog: LevelCatalog, rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        Self::new(catalog, CostTable::build_index(domain, rows))
    }

    pub fn domain(&self) -> Domain {
        self.costs.domain()
    }

    pub fn try_sum(&self, query: &RangeQuery) -> Result<Totals, RangeError> {
        sum_query(&self.costs, &self.catalog, query)
    }

    pub fn sum_range(&self, entity: Option<&str>, from: &str, to: &str) -> Option<Totals> {
        self.try_sum(&RangeQuery::new(entity, from, to)).ok()
    }

    /// Price an upgrade: the levels after `from` through `to`.
    pub fn try_upgrade(&self, query: &RangeQuery) -> Result<Totals, RangeError> {
        upgrade_query(&self.costs, &self.catalog, query)
    }

    pub fn upgrade_cost(&self, entity: Option<&str>, from: &str, to: &str) -> Option<Totals> {
        self.try_upgrade(&RangeQuery::new(entity, from, to)).ok()
    }
}

/// Loaded tables keyed by domain. Handed explicitly to whoever queries.
#[derive(Debug, Clone, Default)]
pub struct CostBook {
    domains: BTreeMap<Domain, Arc<DomainTables>>,
}

impl CostBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `tables` for its domain, returning whatever was loaded before.
    /// Readers holding the old `Arc` keep a consistent view.
    pub fn replace(&mut self, tables: DomainTables) -> Option<Arc<DomainTables>> {
        let domain = tables.domain();
        log::info!(
            "{domain}: loaded {} cost rows ({} per-entity level indices)",
            tables.costs.len(),
            tables.catalog.entities().len(),
        );
        self.domains.insert(domain, Arc::new(tables))
    }

    pub fn remove(&mut self, domain: Domain) -> Option<Arc<DomainTables>> {
        self.domains.remove(&domain)
    }

    pub fn get(&self, domain: Domain) -> CalcResult<Arc<DomainTables>> {
        self.domains
            .get(&domain)
            .cloned()
            .ok_or_else(|| CalcError::DomainNotLoaded {
                domain: domain.to_string(),
            })
    }

    /// Loaded domains in stable order.
    pub fn domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.domains.keys().copied()
    }

    /// `Ok(None)` is the invalid-range signal; `Err` means the domain is not loaded.
    pub fn sum_range(
        &self,
        domain: Domain,
        entity: Option<&str>,
        from: &str,
        to: &str,
    ) -> CalcResult<Option<Totals>> {
        Ok(self.get(domain)?.sum_range(entity, from, to))
    }
}
