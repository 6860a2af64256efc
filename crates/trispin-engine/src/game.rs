//! Playthrough driver: rounds, upgrade purchases, credit flow
//!
//! One `Game` drives one stochastic playthrough of the full round
//! progression under a fixed strategy. Trials are independent: each owns its
//! `Game` and RNG stream, while the derived `ReelSet` and config are shared
//! read-only.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::PurchaseError;
use crate::round::{Round, RoundConfig, RoundResult, RoundState};
use crate::spin::{FillTable, SpinOutcome, SpinRecord, fill_increment};
use crate::strategy::Strategy;
use crate::symbols::ReelSet;
use crate::upgrade::{Upgrade, UpgradeSet};

/// Result of one complete playthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaythroughResult {
    pub final_credits: f64,
    /// Rounds entered (1..=round count)
    pub rounds_played: u8,
    /// All rounds cleared
    pub completed: bool,
    pub total_spins: u32,
    pub upgrade_costs_paid: f64,
    /// Purchases rejected for insufficient credits (non-fatal)
    pub purchase_rejections: u32,
    pub rounds: Vec<RoundResult>,
    /// Full spin trace, populated only when tracing is enabled
    pub spins: Vec<SpinRecord>,
}

/// One playthrough in progress.
pub struct Game<'a> {
    config: &'a GameConfig,
    reels: &'a ReelSet,
    fill: FillTable,
    credits: f64,
    upgrades: UpgradeSet,
    trace: bool,
}

impl<'a> Game<'a> {
    pub fn new(config: &'a GameConfig, reels: &'a ReelSet) -> Self {
        Self {
            config,
            reels,
            fill: FillTable::from_spec(&config.fill),
            credits: config.credits_start,
            upgrades: UpgradeSet::none(),
            trace: false,
        }
    }

    /// Enable the per-spin diagnostic trace.
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn upgrades(&self) -> &UpgradeSet {
        &self.upgrades
    }

    /// Attempt a one-time upgrade purchase. Rejection is not fatal; the
    /// caller proceeds without the upgrade.
    pub fn try_purchase(&mut self, upgrade: Upgrade) -> Result<(), PurchaseError> {
        if self.upgrades.contains(upgrade) {
            return Err(PurchaseError::AlreadyOwned(upgrade));
        }
        let cost = self.config.upgrades.cost;
        if self.credits < cost {
            return Err(PurchaseError::InsufficientCredits {
                needed: cost,
                available: self.credits,
            });
        }
        self.credits -= cost;
        self.upgrades.insert(upgrade);
        Ok(())
    }

    /// Play the full round progression under `strategy`.
    ///
    /// Each round's upgrade decision is resolved before that round's spins
    /// are drawn; upgrades never apply retroactively.
    pub fn play<R: Rng + ?Sized>(mut self, strategy: &Strategy, rng: &mut R) -> PlaythroughResult {
        let mut result = PlaythroughResult {
            final_credits: self.credits,
            rounds_played: 0,
            completed: false,
            total_spins: 0,
            upgrade_costs_paid: 0.0,
            purchase_rejections: 0,
            rounds: Vec::with_capacity(self.config.round_count() as usize),
            spins: Vec::new(),
        };

        for index in 1..=self.config.round_count() {
            result.rounds_played = index;

            // Purchase window: resolved before the round's spins begin.
            let mut upgrade_bought = None;
            if let Some(upgrade) = strategy.purchase_for_round(index) {
                match self.try_purchase(upgrade) {
                    Ok(()) => {
                        result.upgrade_costs_paid += self.config.upgrades.cost;
                        upgrade_bought = Some(upgrade.label().to_string());
                    }
                    Err(err) => {
                        result.purchase_rejections += 1;
                        log::debug!("round {index}: purchase rejected: {err}");
                    }
                }
            }

            let table = self.reels.table(self.upgrades.reel_bias());
            let multipliers = self.config.effective_multipliers(&self.upgrades);
            let mut round = Round::new(RoundConfig {
                index,
                target: self.config.target_millis(index),
                spin_budget: self.config.spin_budget(&self.upgrades),
            });
            round.begin();

            while round.state() == RoundState::InProgress {
                let outcome = SpinOutcome::draw(table, rng);
                let fill = fill_increment(&outcome, &multipliers, &self.fill);
                round.apply_spin(fill);
                if self.trace {
                    result.spins.push(SpinRecord {
                        outcome,
                        category: outcome.category(),
                        fill,
                    });
                }
            }
            result.total_spins += round.spins_used();

            let cleared = round.state() == RoundState::Cleared;
            if cleared {
                self.credits *= self.config.reward_multiplier;
            }
            result.rounds.push(RoundResult {
                index,
                cleared,
                bar_value: round.bar_value(),
                spins_used: round.spins_used(),
                spin_budget: round.config().spin_budget,
                upgrade_bought,
                credits_end: self.credits,
            });

            if !cleared {
                break;
            }
        }

        result.completed = result.rounds.iter().all(|r| r.cleared)
            && result.rounds.len() == self.config.round_count() as usize;
        result.final_credits = self.credits;
        result
    }
}
