use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("Duplicate level '{level}' in level index")]
    DuplicateLevel { level: String },

    #[error("No tables loaded for domain '{domain}'")]
    DomainNotLoaded { domain: String },

    #[error("Unknown domain '{name}'")]
    UnknownDomain { name: String },

    #[error("Required column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a (from, to) pair could not be resolved into a slice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Level '{level}' is not in the level index")]
    UnknownLevel { level: String },

    #[error("Range is reversed: '{from}' comes after '{to}'")]
    ReversedRange { from: String, to: String },

    #[error("No level index for entity {entity:?}")]
    NoIndexForEntity { entity: Option<String> },
}

pub type CalcResult<T> = Result<T, CalcError>;
