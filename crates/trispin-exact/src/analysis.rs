//! Sequential strategy evaluation
//!
//! Rounds are computed in order 1 → 2 → 3 with the weight table, multiplier
//! set, and spin budget that are actually in force entering each round.
//! Applying a strategy's purchases simultaneously across all rounds is the
//! documented accuracy bug this module exists to avoid: an upgrade bought
//! entering round 2 must leave round-1 figures untouched.

use serde::{Deserialize, Serialize};

use trispin_engine::{ConfigError, FillTable, GameConfig, ReelSet, Strategy, UpgradeSet};

use crate::dist::SpinDistribution;
use crate::dp::{RoundAnalysis, round_clear_probability};

/// Exact per-strategy figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub strategy: Strategy,
    pub strategy_label: String,
    /// Exact clear probability per round, in round order
    pub round_clear_probabilities: Vec<f64>,
    /// Probability of clearing all rounds (product of per-round figures)
    pub completion_probability: f64,
    /// Expected final credits over the failure tree
    pub expected_final_credits: f64,
    /// (expected final − starting) / starting
    pub expected_roi: f64,
    /// Expected final over starting, as a percentage
    pub expected_rtp: f64,
}

/// Exact probability engine for one validated configuration.
pub struct ExactEngine {
    config: GameConfig,
    reels: ReelSet,
    fill: FillTable,
}

impl ExactEngine {
    /// Validate the config and derive the weight tables.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reels = ReelSet::from_config(&config)?;
        let fill = FillTable::from_spec(&config.fill);
        Ok(Self {
            config,
            reels,
            fill,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Per-round analysis under a fixed upgrade set (the set in force
    /// entering that round).
    pub fn analyze_round(&self, round: u8, upgrades: &UpgradeSet) -> RoundAnalysis {
        let table = self.reels.table(upgrades.reel_bias());
        let multipliers = self.config.effective_multipliers(upgrades);
        let dist = SpinDistribution::enumerate(table, &multipliers, &self.fill);
        round_clear_probability(
            &dist,
            self.config.target_millis(round),
            self.config.spin_budget(upgrades),
        )
    }

    /// Evaluate a full strategy, applying purchases strictly in round order.
    ///
    /// Affordability along the all-clear path is deterministic (rewards and
    /// costs are fixed), so a purchase that cannot be covered is skipped
    /// exactly as the stochastic path would skip it.
    pub fn analyze(&self, strategy: &Strategy) -> StrategyAnalysis {
        let rounds = self.config.round_count();
        let mut upgrades = UpgradeSet::none();
        let mut credits = self.config.credits_start;

        // (clear probability, credits entering the round after purchase)
        let mut per_round = Vec::with_capacity(rounds as usize);
        for round in 1..=rounds {
            if let Some(upgrade) = strategy.purchase_for_round(round) {
                if credits >= self.config.upgrades.cost && !upgrades.contains(upgrade) {
                    credits -= self.config.upgrades.cost;
                    upgrades.insert(upgrade);
                } else {
                    log::debug!(
                        "strategy '{}': round {round} purchase skipped (credits {credits})",
                        strategy.label()
                    );
                }
            }
            let analysis = self.analyze_round(round, &upgrades);
            per_round.push((analysis.clear_probability, credits));
            credits *= self.config.reward_multiplier;
        }

        // E[final] = Σ_k P(reach round k, fail it) · credits entering k
        //          + P(clear all) · credits after the last reward
        let mut expected = 0.0;
        let mut reach = 1.0;
        for &(p_clear, credits_in) in &per_round {
            expected += reach * (1.0 - p_clear) * credits_in;
            reach *= p_clear;
        }
        let final_credits = per_round
            .last()
            .map(|&(_, c)| c * self.config.reward_multiplier)
            .unwrap_or(self.config.credits_start);
        expected += reach * final_credits;

        let start = self.config.credits_start;
        StrategyAnalysis {
            strategy: *strategy,
            strategy_label: strategy.label(),
            round_clear_probabilities: per_round.iter().map(|&(p, _)| p).collect(),
            completion_probability: reach,
            expected_final_credits: expected,
            expected_roi: (expected - start) / start,
            expected_rtp: expected / start * 100.0,
        }
    }

    /// Evaluate the whole 13-strategy catalogue.
    pub fn analyze_catalogue(&self) -> Vec<StrategyAnalysis> {
        Strategy::catalogue()
            .iter()
            .map(|s| self.analyze(s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trispin_engine::Upgrade;

    fn engine() -> ExactEngine {
        ExactEngine::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_baseline_round_figures() {
        let analysis = engine().analyze(&Strategy::baseline());
        assert_eq!(analysis.round_clear_probabilities.len(), 3);
        assert_abs_diff_eq!(analysis.round_clear_probabilities[0], 0.68352, epsilon = 1e-4);
        assert_abs_diff_eq!(analysis.round_clear_probabilities[1], 0.31129, epsilon = 1e-4);
        assert_abs_diff_eq!(analysis.round_clear_probabilities[2], 0.12066, epsilon = 1e-4);
        let product: f64 = analysis.round_clear_probabilities.iter().product();
        assert_abs_diff_eq!(analysis.completion_probability, product, epsilon = 1e-12);
    }

    #[test]
    fn test_round_2_purchase_leaves_round_1_untouched() {
        let eng = engine();
        let baseline = eng.analyze(&Strategy::baseline());
        for upgrade in Upgrade::ALL {
            let strategy = Strategy::new(Some(upgrade), None).unwrap();
            let upgraded = eng.analyze(&strategy);
            assert_abs_diff_eq!(
                upgraded.round_clear_probabilities[0],
                baseline.round_clear_probabilities[0],
                epsilon = 1e-15
            );
            // But rounds 2 and 3 improve
            assert!(
                upgraded.round_clear_probabilities[1] > baseline.round_clear_probabilities[1],
                "{}",
                strategy.label()
            );
            assert!(
                upgraded.round_clear_probabilities[2] > baseline.round_clear_probabilities[2],
                "{}",
                strategy.label()
            );
        }
    }

    #[test]
    fn test_round_3_purchase_leaves_earlier_rounds_untouched() {
        let eng = engine();
        let baseline = eng.analyze(&Strategy::baseline());
        let strategy = Strategy::new(None, Some(Upgrade::ReelBias)).unwrap();
        let upgraded = eng.analyze(&strategy);
        for round in 0..2 {
            assert_abs_diff_eq!(
                upgraded.round_clear_probabilities[round],
                baseline.round_clear_probabilities[round],
                epsilon = 1e-15
            );
        }
        assert!(upgraded.round_clear_probabilities[2] > baseline.round_clear_probabilities[2]);
    }

    #[test]
    fn test_reel_bias_round_2_reference() {
        // Biased table, target 1.5, 8 spins: ≈59.8% (vs 31.1% baseline)
        let eng = engine();
        let strategy = Strategy::new(Some(Upgrade::ReelBias), None).unwrap();
        let analysis = eng.analyze(&strategy);
        assert_abs_diff_eq!(analysis.round_clear_probabilities[1], 0.59837, epsilon = 1e-4);
    }

    #[test]
    fn test_expected_credits_baseline() {
        // Closed form over the failure tree with p1, p2, p3 and doubling
        let eng = engine();
        let a = eng.analyze(&Strategy::baseline());
        let [p1, p2, p3]: [f64; 3] = a.round_clear_probabilities.clone().try_into().unwrap();
        let expected = (1.0 - p1) * 100.0
            + p1 * (1.0 - p2) * 200.0
            + p1 * p2 * (1.0 - p3) * 400.0
            + p1 * p2 * p3 * 800.0;
        assert_abs_diff_eq!(a.expected_final_credits, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(a.expected_roi, (expected - 100.0) / 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(a.expected_rtp, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_upgrade_costs_debited_in_expectation() {
        // R2 purchase: credits entering round 2 are 150, clearing yields 300
        // entering round 3, 600 on completion.
        let eng = engine();
        let strategy = Strategy::new(Some(Upgrade::ExtraSpins), None).unwrap();
        let a = eng.analyze(&strategy);
        let [p1, p2, p3]: [f64; 3] = a.round_clear_probabilities.clone().try_into().unwrap();
        let expected = (1.0 - p1) * 100.0
            + p1 * (1.0 - p2) * 150.0
            + p1 * p2 * (1.0 - p3) * 300.0
            + p1 * p2 * p3 * 600.0;
        assert_abs_diff_eq!(a.expected_final_credits, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_catalogue_analysis() {
        let all = engine().analyze_catalogue();
        assert_eq!(all.len(), 13);
        for a in &all {
            assert!(a.completion_probability > 0.0 && a.completion_probability < 1.0);
            assert!(a.expected_final_credits > 0.0);
        }
        // Baseline is the first entry and the weakest completion odds belong
        // to it or a bonus-multiplier-only path, never a two-upgrade path.
        let baseline = &all[0];
        let best = all
            .iter()
            .map(|a| a.completion_probability)
            .fold(0.0, f64::max);
        assert!(best > baseline.completion_probability);
    }
}
