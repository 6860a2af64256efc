//! Error types for configuration, purchases, and strategy construction

use thiserror::Error;

use crate::upgrade::Upgrade;

/// Configuration validation error. Fails fast before any simulation starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Symbol table is empty
    #[error("no symbols defined")]
    NoSymbols,

    /// A symbol carries a negative weight
    #[error("symbol '{name}' has negative weight {weight}")]
    NegativeWeight { name: String, weight: f64 },

    /// Weights must sum to a positive normalizing total
    #[error("symbol weights must sum to a positive number")]
    ZeroWeightSum,

    /// A symbol carries a non-positive payout multiplier
    #[error("symbol '{name}' has non-positive multiplier {multiplier}")]
    InvalidMultiplier { name: String, multiplier: f64 },

    /// Bias delta table does not line up with the symbol table
    #[error("bias delta table has {got} entries, expected {expected}")]
    BiasTableMismatch { expected: usize, got: usize },

    /// A round target must be positive
    #[error("round {round} target must be positive, got {target}")]
    NonPositiveTarget { round: u8, target: f64 },

    /// No rounds configured
    #[error("no round targets defined")]
    NoRounds,

    /// Fill factor outside [0, 1]
    #[error("fill factor out of range [0, 1]: {0}")]
    InvalidFillFactor(f64),

    /// Negative upgrade cost
    #[error("upgrade cost must be non-negative, got {0}")]
    NegativeCost(f64),

    /// Weighted sampler rejected the weight table
    #[error("invalid weight table: {0}")]
    WeightTable(String),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(String),
}

/// Upgrade purchase rejection. Never fatal: the playthrough proceeds
/// without the upgrade and the rejection is recorded in statistics.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PurchaseError {
    /// Not enough credits to cover the cost
    #[error("insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: f64, available: f64 },

    /// Each upgrade is a one-time purchase
    #[error("upgrade {0:?} already owned")]
    AlreadyOwned(Upgrade),
}

/// Strategy construction error, rejected before any simulation starts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyError {
    /// The same one-time upgrade cannot be bought in both windows
    #[error("upgrade {0:?} purchased twice")]
    DuplicateUpgrade(Upgrade),
}
