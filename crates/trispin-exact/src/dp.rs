//! Round-clear probability by dynamic programming over millibar states

use serde::{Deserialize, Serialize};

use trispin_engine::Fill;

use crate::dist::SpinDistribution;

/// Exact analysis of one round under a fixed weight table and upgrade set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundAnalysis {
    /// Probability of reaching the target within the spin budget
    pub clear_probability: f64,
    /// Probability mass absorbed exactly at spin k (index k-1)
    pub cleared_by_spin: Vec<f64>,
}

/// Compute the exact probability of clearing a round.
///
/// State after k spins is a mass function over cumulative millibar values
/// below `target`; each spin convolves the unreached mass with `dist`,
/// absorbing everything at or above the target (early stopping makes the
/// absorbed mass terminal). A zero budget clears with probability 0.
pub fn round_clear_probability(dist: &SpinDistribution, target: Fill, budget: u32) -> RoundAnalysis {
    let mut cleared_by_spin = Vec::with_capacity(budget as usize);
    if budget == 0 || target == 0 {
        // target > 0 for any validated config; a zero budget never clears
        return RoundAnalysis {
            clear_probability: if target == 0 { 1.0 } else { 0.0 },
            cleared_by_spin,
        };
    }

    // state[v] = P(cumulative fill == v millibars, target not yet reached)
    let mut state = vec![0.0f64; target as usize];
    state[0] = 1.0;
    let mut cleared = 0.0;

    for _spin in 0..budget {
        let mut next = vec![0.0f64; target as usize];
        let mut absorbed = 0.0;
        for (value, &mass) in state.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            for &(inc, p) in dist.entries() {
                let reached = value as Fill + inc;
                if reached >= target {
                    absorbed += mass * p;
                } else {
                    next[reached as usize] += mass * p;
                }
            }
        }
        cleared += absorbed;
        cleared_by_spin.push(absorbed);
        state = next;
    }

    log::trace!("target {target} budget {budget}: clear probability {cleared:.6}");
    RoundAnalysis {
        clear_probability: cleared,
        cleared_by_spin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trispin_engine::{FillTable, GameConfig, ReelSet, UpgradeSet};

    fn baseline_dist() -> SpinDistribution {
        let config = GameConfig::default();
        let reels = ReelSet::from_config(&config).unwrap();
        let multipliers = config.effective_multipliers(&UpgradeSet::none());
        let fill = FillTable::from_spec(&config.fill);
        SpinDistribution::enumerate(reels.base(), &multipliers, &fill)
    }

    #[test]
    fn test_round_1_reference_value() {
        // Documented baseline: 8 spins, target 1.0 bar, ≈68.4%
        let analysis = round_clear_probability(&baseline_dist(), 1000, 8);
        assert_abs_diff_eq!(analysis.clear_probability, 0.68352, epsilon = 1e-4);
    }

    #[test]
    fn test_round_3_reference_value_well_under_half() {
        let analysis = round_clear_probability(&baseline_dist(), 2000, 8);
        assert_abs_diff_eq!(analysis.clear_probability, 0.12066, epsilon = 1e-4);
        assert!(analysis.clear_probability < 0.5);
    }

    #[test]
    fn test_monotone_in_target() {
        let dist = baseline_dist();
        let mut last = 1.0;
        for target in [500, 1000, 1500, 2000, 2500] {
            let p = round_clear_probability(&dist, target, 8).clear_probability;
            assert!(
                p <= last + 1e-12,
                "clear probability rose from {last} to {p} at target {target}"
            );
            last = p;
        }
    }

    #[test]
    fn test_monotone_in_budget() {
        let dist = baseline_dist();
        let mut last = 0.0;
        for budget in [0, 2, 4, 8, 10] {
            let p = round_clear_probability(&dist, 1000, budget).clear_probability;
            assert!(p >= last - 1e-12);
            last = p;
        }
    }

    #[test]
    fn test_zero_budget_is_zero() {
        let analysis = round_clear_probability(&baseline_dist(), 1000, 0);
        assert_eq!(analysis.clear_probability, 0.0);
        assert!(analysis.cleared_by_spin.is_empty());
    }

    #[test]
    fn test_per_spin_mass_sums_to_total() {
        let analysis = round_clear_probability(&baseline_dist(), 1500, 8);
        let sum: f64 = analysis.cleared_by_spin.iter().sum();
        assert_abs_diff_eq!(sum, analysis.clear_probability, epsilon = 1e-12);
        assert_eq!(analysis.cleared_by_spin.len(), 8);
    }

    #[test]
    fn test_single_spin_clear_mass() {
        // One spin, target 1.0: only triples of D (1.0 bars) and E (1.2 bars)
        // reach it, 2 × 0.008 = 1.6% exactly.
        let analysis = round_clear_probability(&baseline_dist(), 1000, 1);
        assert_abs_diff_eq!(analysis.clear_probability, 0.016, epsilon = 1e-12);
    }
}
