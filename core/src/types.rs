//! Shared primitive types used across every calculator domain.

/// A level identifier as it appears in the source data ("F30", "FC1-2", "Gold T1 3", "7").
pub type Level = String;

/// A building, gear slot, or charm name. Absent for single-entity domains.
pub type EntityName = String;

/// One resource amount. Game resources are whole numbers.
pub type Quantity = u64;
