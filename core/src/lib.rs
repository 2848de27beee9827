//! Range-based upgrade cost aggregation.
//!
//! Loaders hand in level orders and loose cost rows; the core builds
//! immutable tables and answers "what does it cost to go from level A
//! to level B" as deterministic integer totals.

pub mod aggregator;
pub mod book;
pub mod cost_table;
pub mod defaults;
pub mod domain;
pub mod error;
pub mod level_index;
pub mod loader;
pub mod plan;
pub mod totals;
pub mod types;

pub use aggregator::{sum_range, try_sum_range, try_sum_upgrade, RangeQuery};
pub use book::{CostBook, DomainTables};
pub use cost_table::{CostTable, RawRow};
pub use domain::Domain;
pub use error::{CalcError, CalcResult, RangeError};
pub use level_index::{LevelCatalog, LevelIndex};
pub use plan::{PlanReport, UpgradePlan};
pub use totals::Totals;
