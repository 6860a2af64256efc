//! Batch simulation of one strategy across N independent trials

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use trispin_engine::{ConfigError, Game, GameConfig, PlaythroughResult, ReelSet, Strategy};

/// Batch parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent trials
    pub trials: u64,
    /// Run seed; trial k uses the stream seeded with `seed + k`
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: 42,
        }
    }
}

/// Aggregated empirical figures for one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub strategy_label: String,
    pub trials: u64,
    /// Trials that entered each round, in round order
    pub round_attempts: Vec<u64>,
    /// Trials that cleared each round
    pub round_clears: Vec<u64>,
    /// Clears over attempts per round
    pub round_clear_rates: Vec<f64>,
    /// Fraction of trials that cleared every round
    pub completion_rate: f64,
    pub avg_final_credits: f64,
    pub std_final_credits: f64,
    pub min_final_credits: f64,
    pub max_final_credits: f64,
    pub avg_rounds_played: f64,
    pub avg_total_spins: f64,
    pub avg_upgrade_costs: f64,
    /// Purchase rejections across all trials (insufficient credits)
    pub purchase_rejections: u64,
    /// (avg final − starting) / starting
    pub roi: f64,
    /// Avg final over starting, as a percentage
    pub rtp: f64,
}

/// Per-batch accumulator, merged across rayon workers.
#[derive(Debug, Clone)]
struct TrialAccumulator {
    rounds: usize,
    trials: u64,
    completed: u64,
    round_attempts: Vec<u64>,
    round_clears: Vec<u64>,
    credits_sum: f64,
    credits_sumsq: f64,
    credits_min: f64,
    credits_max: f64,
    rounds_played_sum: u64,
    spins_sum: u64,
    upgrade_costs_sum: f64,
    purchase_rejections: u64,
}

impl TrialAccumulator {
    fn new(rounds: usize) -> Self {
        Self {
            rounds,
            trials: 0,
            completed: 0,
            round_attempts: vec![0; rounds],
            round_clears: vec![0; rounds],
            credits_sum: 0.0,
            credits_sumsq: 0.0,
            credits_min: f64::INFINITY,
            credits_max: f64::NEG_INFINITY,
            rounds_played_sum: 0,
            spins_sum: 0,
            upgrade_costs_sum: 0.0,
            purchase_rejections: 0,
        }
    }

    fn record(mut self, result: &PlaythroughResult) -> Self {
        self.trials += 1;
        if result.completed {
            self.completed += 1;
        }
        for round in &result.rounds {
            let i = (round.index - 1) as usize;
            self.round_attempts[i] += 1;
            if round.cleared {
                self.round_clears[i] += 1;
            }
        }
        self.credits_sum += result.final_credits;
        self.credits_sumsq += result.final_credits * result.final_credits;
        self.credits_min = self.credits_min.min(result.final_credits);
        self.credits_max = self.credits_max.max(result.final_credits);
        self.rounds_played_sum += result.rounds_played as u64;
        self.spins_sum += result.total_spins as u64;
        self.upgrade_costs_sum += result.upgrade_costs_paid;
        self.purchase_rejections += result.purchase_rejections as u64;
        self
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.completed += other.completed;
        for i in 0..self.rounds {
            self.round_attempts[i] += other.round_attempts[i];
            self.round_clears[i] += other.round_clears[i];
        }
        self.credits_sum += other.credits_sum;
        self.credits_sumsq += other.credits_sumsq;
        self.credits_min = self.credits_min.min(other.credits_min);
        self.credits_max = self.credits_max.max(other.credits_max);
        self.rounds_played_sum += other.rounds_played_sum;
        self.spins_sum += other.spins_sum;
        self.upgrade_costs_sum += other.upgrade_costs_sum;
        self.purchase_rejections += other.purchase_rejections;
        self
    }

    fn summarize(self, strategy: &Strategy, credits_start: f64) -> SimulationSummary {
        let n = self.trials.max(1) as f64;
        let mean = self.credits_sum / n;
        let variance = (self.credits_sumsq / n - mean * mean).max(0.0);
        SimulationSummary {
            strategy_label: strategy.label(),
            trials: self.trials,
            round_clear_rates: self
                .round_attempts
                .iter()
                .zip(&self.round_clears)
                .map(|(&a, &c)| if a > 0 { c as f64 / a as f64 } else { 0.0 })
                .collect(),
            round_attempts: self.round_attempts,
            round_clears: self.round_clears,
            completion_rate: self.completed as f64 / n,
            avg_final_credits: mean,
            std_final_credits: variance.sqrt(),
            min_final_credits: self.credits_min,
            max_final_credits: self.credits_max,
            avg_rounds_played: self.rounds_played_sum as f64 / n,
            avg_total_spins: self.spins_sum as f64 / n,
            avg_upgrade_costs: self.upgrade_costs_sum / n,
            purchase_rejections: self.purchase_rejections,
            roi: (mean - credits_start) / credits_start,
            rtp: mean / credits_start * 100.0,
        }
    }
}

/// Run `sim.trials` independent playthroughs of `strategy` and aggregate.
///
/// Deterministic for a fixed `(config, strategy, sim)`: trial k always uses
/// the ChaCha stream seeded with `sim.seed + k`, regardless of how rayon
/// schedules the batch.
pub fn simulate_strategy(
    config: &GameConfig,
    strategy: &Strategy,
    sim: &SimulationConfig,
) -> Result<SimulationSummary, ConfigError> {
    config.validate()?;
    let reels = ReelSet::from_config(config)?;
    let rounds = config.round_count() as usize;

    log::debug!(
        "simulating '{}': {} trials across {} workers",
        strategy.label(),
        sim.trials,
        num_cpus::get()
    );

    let acc = (0..sim.trials)
        .into_par_iter()
        .fold(
            || TrialAccumulator::new(rounds),
            |acc, trial| {
                let mut rng = ChaCha8Rng::seed_from_u64(sim.seed.wrapping_add(trial));
                let result = Game::new(config, &reels).play(strategy, &mut rng);
                acc.record(&result)
            },
        )
        .reduce(|| TrialAccumulator::new(rounds), TrialAccumulator::merge);

    Ok(acc.summarize(strategy, config.credits_start))
}
