//! Spin resolution: outcome draw and bar-fill increment
//!
//! The fill increment is a deterministic function of the outcome category
//! and the matched symbol's effective multiplier. Both the Monte Carlo path
//! and the exact enumeration in `trispin-exact` call [`fill_increment`], so
//! the two agree on every one of the raw three-draw combinations.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FillSpec;
use crate::symbols::{OutcomeCategory, SymbolId, WeightTable, classify, matched_symbol};

/// Bar progress in fixed-point millibars (1/1000 of a bar).
///
/// Fixed point keeps the stochastic accumulation and the exact DP
/// bit-for-bit identical; floats are only exposed at the API edges.
pub type Fill = u32;

/// Millibars per bar.
pub const FILL_SCALE: u32 = 1000;

/// Convert a millibar value to bars.
pub fn fill_to_bars(fill: Fill) -> f64 {
    fill as f64 / FILL_SCALE as f64
}

/// Fill increments per multiplier unit, in millibars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillTable {
    /// Millibars per multiplier unit for three-of-a-kind
    pub three_millis: u32,
    /// Millibars per multiplier unit for two-of-a-kind
    pub two_millis: u32,
}

impl FillTable {
    /// Quantize the configured fill fractions to millibars.
    pub fn from_spec(spec: &FillSpec) -> Self {
        Self {
            three_millis: (spec.three_of_a_kind * FILL_SCALE as f64).round() as u32,
            two_millis: (spec.two_of_a_kind * FILL_SCALE as f64).round() as u32,
        }
    }
}

/// One spin: three symbols drawn independently with replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub symbols: [SymbolId; 3],
}

impl SpinOutcome {
    pub fn new(symbols: [SymbolId; 3]) -> Self {
        Self { symbols }
    }

    /// Draw a spin from the active weight table.
    pub fn draw<R: Rng + ?Sized>(table: &WeightTable, rng: &mut R) -> Self {
        Self {
            symbols: [table.draw(rng), table.draw(rng), table.draw(rng)],
        }
    }

    /// Outcome category of this spin.
    pub fn category(&self) -> OutcomeCategory {
        classify(self.symbols)
    }

    /// The tripled or paired symbol, if any.
    pub fn matched(&self) -> Option<SymbolId> {
        matched_symbol(self.symbols)
    }
}

/// Bar-fill increment for one spin, in millibars.
///
/// Three-of-a-kind fills `multiplier × three_millis`, two-of-a-kind fills
/// `multiplier × two_millis`, no-match fills zero. `multipliers` are the
/// effective per-symbol multipliers for the round (bonus already applied).
pub fn fill_increment(outcome: &SpinOutcome, multipliers: &[f64], fill: &FillTable) -> Fill {
    let per_unit = match outcome.category() {
        OutcomeCategory::ThreeOfAKind => fill.three_millis,
        OutcomeCategory::TwoOfAKind => fill.two_millis,
        OutcomeCategory::NoMatch => return 0,
    };
    let Some(matched) = outcome.matched() else {
        return 0;
    };
    let multiplier = multipliers[matched as usize];
    (per_unit as f64 * multiplier).round() as Fill
}

/// One resolved spin, kept in diagnostic traces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpinRecord {
    pub outcome: SpinOutcome,
    pub category: OutcomeCategory,
    pub fill: Fill,
}
