//! Game configuration
//!
//! An immutable record consumed at the start of a run. The engine never
//! mutates it; biased weight tables and effective multipliers are derived
//! copies.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spin::{FILL_SCALE, Fill};
use crate::upgrade::UpgradeSet;

/// One symbol on the reel: identifier, base draw weight, payout multiplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Display name (e.g. "A".."E")
    pub name: String,
    /// Base selection weight (non-negative; normalized by the engine)
    pub weight: f64,
    /// Payout multiplier feeding the bar-fill formula
    pub multiplier: f64,
}

impl SymbolSpec {
    pub fn new(name: impl Into<String>, weight: f64, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            multiplier,
        }
    }
}

/// Bar-fill factors per outcome category, as a fraction of one bar per
/// multiplier unit. No-match always fills zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FillSpec {
    /// Fraction per multiplier unit for three-of-a-kind
    pub three_of_a_kind: f64,
    /// Fraction per multiplier unit for two-of-a-kind
    pub two_of_a_kind: f64,
}

impl Default for FillSpec {
    fn default() -> Self {
        // Calibrated to the documented reference probabilities:
        // round-1 baseline clearance 68.4%, top biased triple 2.7%.
        Self {
            three_of_a_kind: 0.200,
            two_of_a_kind: 0.067,
        }
    }
}

/// Upgrade costs and effect magnitudes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Flat cost per upgrade, in credits
    pub cost: f64,
    /// Reel-bias additive deltas per symbol (clamped at 0, renormalized)
    pub bias_deltas: Vec<f64>,
    /// Extra spins granted per round by the extra-spins upgrade
    pub extra_spins: u32,
    /// Additive bonus to every symbol multiplier from the bonus upgrade
    pub multiplier_bonus: f64,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            cost: 50.0,
            bias_deltas: vec![-0.10, -0.05, 0.0, 0.05, 0.10],
            extra_spins: 2,
            multiplier_bonus: 1.0,
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting credit balance
    pub credits_start: f64,
    /// Base spin budget per round (before extra-spins)
    pub spins_per_round: u32,
    /// Bar target per round, in bars; length defines the round count
    pub round_targets: Vec<f64>,
    /// Credit multiplier applied when a round is cleared
    pub reward_multiplier: f64,
    /// Symbol table
    pub symbols: Vec<SymbolSpec>,
    /// Bar-fill factors
    #[serde(default)]
    pub fill: FillSpec,
    /// Upgrade costs and effects
    #[serde(default)]
    pub upgrades: UpgradeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            credits_start: 100.0,
            spins_per_round: 8,
            round_targets: vec![1.0, 1.5, 2.0],
            reward_multiplier: 2.0,
            symbols: vec![
                SymbolSpec::new("A", 0.2, 2.0),
                SymbolSpec::new("B", 0.2, 3.0),
                SymbolSpec::new("C", 0.2, 4.0),
                SymbolSpec::new("D", 0.2, 5.0),
                SymbolSpec::new("E", 0.2, 6.0),
            ],
            fill: FillSpec::default(),
            upgrades: UpgradeConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration payload.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate consistency. Called before any simulation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        let mut weight_sum = 0.0;
        for s in &self.symbols {
            if s.weight < 0.0 {
                return Err(ConfigError::NegativeWeight {
                    name: s.name.clone(),
                    weight: s.weight,
                });
            }
            if s.multiplier <= 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: s.name.clone(),
                    multiplier: s.multiplier,
                });
            }
            weight_sum += s.weight;
        }
        if weight_sum <= 0.0 {
            return Err(ConfigError::ZeroWeightSum);
        }
        if self.upgrades.bias_deltas.len() != self.symbols.len() {
            return Err(ConfigError::BiasTableMismatch {
                expected: self.symbols.len(),
                got: self.upgrades.bias_deltas.len(),
            });
        }
        if self.upgrades.cost < 0.0 {
            return Err(ConfigError::NegativeCost(self.upgrades.cost));
        }
        if self.round_targets.is_empty() {
            return Err(ConfigError::NoRounds);
        }
        for (i, &target) in self.round_targets.iter().enumerate() {
            if target <= 0.0 {
                return Err(ConfigError::NonPositiveTarget {
                    round: (i + 1) as u8,
                    target,
                });
            }
        }
        for factor in [self.fill.three_of_a_kind, self.fill.two_of_a_kind] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::InvalidFillFactor(factor));
            }
        }
        Ok(())
    }

    /// Number of rounds in a playthrough.
    pub fn round_count(&self) -> u8 {
        self.round_targets.len() as u8
    }

    /// Bar target for a 1-based round index, in millibars.
    pub fn target_millis(&self, round: u8) -> Fill {
        let target = self.round_targets[(round - 1) as usize];
        (target * FILL_SCALE as f64).round() as Fill
    }

    /// Spin budget for a round given the active upgrade set.
    pub fn spin_budget(&self, upgrades: &UpgradeSet) -> u32 {
        self.spins_per_round
            + if upgrades.extra_spins() {
                self.upgrades.extra_spins
            } else {
                0
            }
    }

    /// Effective symbol multipliers given the active upgrade set.
    pub fn effective_multipliers(&self, upgrades: &UpgradeSet) -> Vec<f64> {
        let bonus = if upgrades.bonus_multiplier() {
            self.upgrades.multiplier_bonus
        } else {
            0.0
        };
        self.symbols.iter().map(|s| s.multiplier + bonus).collect()
    }
}
