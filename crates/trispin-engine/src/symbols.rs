//! Symbol model: weighted reel table and outcome classification

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::ConfigError;

/// Index into the configured symbol table.
pub type SymbolId = u8;

/// Outcome category for one three-symbol spin.
///
/// Classification is a pure function of the drawn symbols; the category
/// determines which fill formula applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    /// All three symbols identical
    ThreeOfAKind,
    /// Exactly one pair
    TwoOfAKind,
    /// All three distinct
    NoMatch,
}

/// Classify three drawn symbols into exactly one category.
pub fn classify(symbols: [SymbolId; 3]) -> OutcomeCategory {
    let [a, b, c] = symbols;
    if a == b && b == c {
        OutcomeCategory::ThreeOfAKind
    } else if a == b || a == c || b == c {
        OutcomeCategory::TwoOfAKind
    } else {
        OutcomeCategory::NoMatch
    }
}

/// The matched symbol of a spin: the tripled symbol, the paired symbol,
/// or `None` when all three are distinct.
pub fn matched_symbol(symbols: [SymbolId; 3]) -> Option<SymbolId> {
    let [a, b, c] = symbols;
    if a == b || a == c {
        Some(a)
    } else if b == c {
        Some(b)
    } else {
        None
    }
}

/// A normalized weight table over the symbol alphabet, with a prepared
/// sampler for drawing symbols with replacement.
///
/// The reel-bias upgrade never mutates a table in place: `biased_from`
/// builds a substituted table once, and applying the bias to an already
/// biased table yields the same table (no stacking).
#[derive(Debug, Clone)]
pub struct WeightTable {
    probs: Vec<f64>,
    sampler: WeightedIndex<f64>,
    biased: bool,
}

impl WeightTable {
    /// Build a normalized table from raw non-negative weights.
    pub fn new(weights: &[f64]) -> Result<Self, ConfigError> {
        Self::build(weights, false)
    }

    fn build(weights: &[f64], biased: bool) -> Result<Self, ConfigError> {
        if weights.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroWeightSum);
        }
        let probs: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let sampler =
            WeightedIndex::new(&probs).map_err(|e| ConfigError::WeightTable(e.to_string()))?;
        Ok(Self {
            probs,
            sampler,
            biased,
        })
    }

    /// Build the biased substitution of `base` using per-symbol additive
    /// deltas (clamped at zero, then renormalized). Idempotent: a table
    /// that is already biased is returned unchanged.
    pub fn biased_from(base: &Self, deltas: &[f64]) -> Result<Self, ConfigError> {
        if base.biased {
            return Ok(base.clone());
        }
        if deltas.len() != base.probs.len() {
            return Err(ConfigError::BiasTableMismatch {
                expected: base.probs.len(),
                got: deltas.len(),
            });
        }
        let weights: Vec<f64> = base
            .probs
            .iter()
            .zip(deltas)
            .map(|(p, d)| (p + d).max(0.0))
            .collect();
        Self::build(&weights, true)
    }

    /// Number of symbols in the alphabet.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// True when the table is empty (never, for a validated config).
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Normalized probability of one symbol.
    pub fn prob(&self, id: SymbolId) -> f64 {
        self.probs.get(id as usize).copied().unwrap_or(0.0)
    }

    /// All normalized probabilities, in symbol order.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Whether this is the biased substitution.
    pub fn is_biased(&self) -> bool {
        self.biased
    }

    /// Draw one symbol with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SymbolId {
        self.sampler.sample(rng) as SymbolId
    }
}

/// The base and biased weight tables for one game configuration.
///
/// Both tables are derived once from the immutable config; the active
/// upgrade set selects between them per round.
#[derive(Debug, Clone)]
pub struct ReelSet {
    base: WeightTable,
    biased: WeightTable,
}

impl ReelSet {
    /// Derive both tables from a validated config.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let weights: Vec<f64> = config.symbols.iter().map(|s| s.weight).collect();
        let base = WeightTable::new(&weights)?;
        let biased = WeightTable::biased_from(&base, &config.upgrades.bias_deltas)?;
        Ok(Self { base, biased })
    }

    /// The unbiased table.
    pub fn base(&self) -> &WeightTable {
        &self.base
    }

    /// The reel-bias substitution.
    pub fn biased(&self) -> &WeightTable {
        &self.biased
    }

    /// Active table for a round, given whether reel bias is owned.
    pub fn table(&self, reel_bias_active: bool) -> &WeightTable {
        if reel_bias_active { &self.biased } else { &self.base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_classify_categories() {
        assert_eq!(classify([0, 0, 0]), OutcomeCategory::ThreeOfAKind);
        assert_eq!(classify([0, 0, 1]), OutcomeCategory::TwoOfAKind);
        assert_eq!(classify([0, 1, 0]), OutcomeCategory::TwoOfAKind);
        assert_eq!(classify([1, 0, 0]), OutcomeCategory::TwoOfAKind);
        assert_eq!(classify([0, 1, 2]), OutcomeCategory::NoMatch);
    }

    #[test]
    fn test_matched_symbol() {
        assert_eq!(matched_symbol([2, 2, 2]), Some(2));
        assert_eq!(matched_symbol([3, 1, 3]), Some(3));
        assert_eq!(matched_symbol([1, 4, 4]), Some(4));
        assert_eq!(matched_symbol([0, 1, 2]), None);
    }

    #[test]
    fn test_normalization() {
        let table = WeightTable::new(&[2.0, 2.0, 2.0, 2.0, 2.0]).unwrap();
        for id in 0..5 {
            assert_abs_diff_eq!(table.prob(id), 0.2, epsilon = 1e-12);
        }
        let total: f64 = table.probs().iter().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_weight_sum_rejected() {
        assert!(matches!(
            WeightTable::new(&[0.0, 0.0]),
            Err(ConfigError::ZeroWeightSum)
        ));
    }

    #[test]
    fn test_bias_substitution() {
        // Documented baseline: uniform 0.2 each, deltas shift toward D and E
        let base = WeightTable::new(&[0.2; 5]).unwrap();
        let deltas = [-0.10, -0.05, 0.0, 0.05, 0.10];
        let biased = WeightTable::biased_from(&base, &deltas).unwrap();

        assert_abs_diff_eq!(biased.prob(0), 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(biased.prob(1), 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(biased.prob(2), 0.20, epsilon = 1e-12);
        assert_abs_diff_eq!(biased.prob(3), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(biased.prob(4), 0.30, epsilon = 1e-12);

        // Base table untouched by the substitution
        assert_abs_diff_eq!(base.prob(4), 0.20, epsilon = 1e-12);
    }

    #[test]
    fn test_bias_idempotent() {
        let base = WeightTable::new(&[0.2; 5]).unwrap();
        let deltas = [-0.10, -0.05, 0.0, 0.05, 0.10];
        let once = WeightTable::biased_from(&base, &deltas).unwrap();
        let twice = WeightTable::biased_from(&once, &deltas).unwrap();
        for id in 0..5 {
            assert_abs_diff_eq!(once.prob(id), twice.prob(id), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_draw_frequencies() {
        let table = WeightTable::new(&[1.0, 3.0]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 40_000;
        let ones = (0..draws).filter(|_| table.draw(&mut rng) == 1).count();
        let rate = ones as f64 / draws as f64;
        // p = 0.75, six sigma ≈ 0.013
        assert!((rate - 0.75).abs() < 0.015, "rate {rate}");
    }

    #[test]
    fn test_reel_set_selects_table() {
        let config = GameConfig::default();
        let reels = ReelSet::from_config(&config).unwrap();
        assert!(!reels.table(false).is_biased());
        assert!(reels.table(true).is_biased());
    }
}
