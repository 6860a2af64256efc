//! Single-spin increment distribution via exact outcome enumeration

use std::collections::BTreeMap;

use trispin_engine::{
    Fill, FillTable, OutcomeCategory, SpinOutcome, SymbolId, WeightTable, fill_increment,
};

/// Exact distribution of the bar-fill increment of one spin, collapsed from
/// the raw outcome space to the distinct millibar values.
#[derive(Debug, Clone)]
pub struct SpinDistribution {
    entries: Vec<(Fill, f64)>,
}

impl SpinDistribution {
    /// Enumerate all `n³` ordered draws under `table` and collapse them by
    /// increment. `multipliers` are the round's effective multipliers.
    pub fn enumerate(table: &WeightTable, multipliers: &[f64], fill: &FillTable) -> Self {
        let n = table.len() as SymbolId;
        let mut by_fill: BTreeMap<Fill, f64> = BTreeMap::new();

        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    let prob = table.prob(a) * table.prob(b) * table.prob(c);
                    if prob == 0.0 {
                        continue;
                    }
                    let outcome = SpinOutcome::new([a, b, c]);
                    let inc = fill_increment(&outcome, multipliers, fill);
                    *by_fill.entry(inc).or_insert(0.0) += prob;
                }
            }
        }

        Self {
            entries: by_fill.into_iter().collect(),
        }
    }

    /// Distinct `(increment, probability)` pairs, ascending by increment.
    pub fn entries(&self) -> &[(Fill, f64)] {
        &self.entries
    }

    /// Total probability mass (1 up to floating-point error).
    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Probability of a zero increment (the no-match mass).
    pub fn zero_probability(&self) -> f64 {
        match self.entries.first() {
            Some(&(0, p)) => p,
            _ => 0.0,
        }
    }
}

/// Exact probabilities of the three outcome categories for one spin,
/// in `[three-of-a-kind, two-of-a-kind, no-match]` order.
pub fn category_probabilities(table: &WeightTable) -> [f64; 3] {
    let n = table.len() as SymbolId;
    let mut out = [0.0f64; 3];
    for a in 0..n {
        for b in 0..n {
            for c in 0..n {
                let prob = table.prob(a) * table.prob(b) * table.prob(c);
                let slot = match trispin_engine::classify([a, b, c]) {
                    OutcomeCategory::ThreeOfAKind => 0,
                    OutcomeCategory::TwoOfAKind => 1,
                    OutcomeCategory::NoMatch => 2,
                };
                out[slot] += prob;
            }
        }
    }
    out
}

/// Exact probability of drawing three of the given symbol.
pub fn triple_probability(table: &WeightTable, symbol: SymbolId) -> f64 {
    table.prob(symbol).powi(3)
}
