//! Round state machine
//!
//! `NotStarted → InProgress → {Cleared, Failed}`. Early stopping at the
//! target is mandatory: once cumulative fill reaches the target the round is
//! `Cleared` and the remaining budget is unused. Exhausting the budget below
//! the target is `Failed`, an ordinary terminal state rather than an error.

use serde::{Deserialize, Serialize};

use crate::spin::{Fill, fill_to_bars};

/// Static parameters for one round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundConfig {
    /// 1-based round index
    pub index: u8,
    /// Bar target in millibars
    pub target: Fill,
    /// Spin budget (base plus extra-spins when active)
    pub spin_budget: u32,
}

/// Round lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    NotStarted,
    InProgress,
    /// Target reached; terminal, permits progression
    Cleared,
    /// Budget exhausted below target; terminal, ends the playthrough
    Failed,
}

impl RoundState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundState::Cleared | RoundState::Failed)
    }
}

/// One round being driven to a terminal state.
#[derive(Debug, Clone)]
pub struct Round {
    config: RoundConfig,
    state: RoundState,
    bar: Fill,
    spins_used: u32,
}

impl Round {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            state: RoundState::NotStarted,
            bar: 0,
            spins_used: 0,
        }
    }

    /// Enter `InProgress`. A zero spin budget fails immediately.
    pub fn begin(&mut self) -> RoundState {
        if self.state == RoundState::NotStarted {
            self.state = if self.config.spin_budget == 0 {
                RoundState::Failed
            } else {
                RoundState::InProgress
            };
        }
        self.state
    }

    /// Apply one spin's fill increment and transition.
    ///
    /// Terminal states absorb further calls unchanged.
    pub fn apply_spin(&mut self, fill: Fill) -> RoundState {
        if self.state != RoundState::InProgress {
            return self.state;
        }
        self.spins_used += 1;
        self.bar += fill;
        if self.bar >= self.config.target {
            self.state = RoundState::Cleared;
        } else if self.spins_used >= self.config.spin_budget {
            self.state = RoundState::Failed;
        }
        self.state
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Terminal bar value in millibars.
    pub fn bar(&self) -> Fill {
        self.bar
    }

    /// Terminal bar value in bars, for diagnostic traces.
    pub fn bar_value(&self) -> f64 {
        fill_to_bars(self.bar)
    }

    pub fn spins_used(&self) -> u32 {
        self.spins_used
    }
}

/// Terminal summary of one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResult {
    pub index: u8,
    pub cleared: bool,
    /// Terminal bar value in bars
    pub bar_value: f64,
    pub spins_used: u32,
    pub spin_budget: u32,
    /// Upgrade bought entering this round, by label
    pub upgrade_bought: Option<String>,
    /// Credits after the round resolved
    pub credits_end: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(target: Fill, budget: u32) -> Round {
        let mut r = Round::new(RoundConfig {
            index: 1,
            target,
            spin_budget: budget,
        });
        r.begin();
        r
    }

    #[test]
    fn test_early_stop_on_target() {
        let mut r = round(1000, 8);
        assert_eq!(r.apply_spin(600), RoundState::InProgress);
        assert_eq!(r.apply_spin(400), RoundState::Cleared);
        assert_eq!(r.spins_used(), 2);
        assert_eq!(r.bar(), 1000);
        // Terminal state absorbs further spins
        assert_eq!(r.apply_spin(600), RoundState::Cleared);
        assert_eq!(r.spins_used(), 2);
    }

    #[test]
    fn test_overshoot_clears() {
        let mut r = round(1000, 8);
        assert_eq!(r.apply_spin(1200), RoundState::Cleared);
        assert_eq!(r.bar_value(), 1.2);
    }

    #[test]
    fn test_budget_exhaustion_fails() {
        let mut r = round(1000, 3);
        assert_eq!(r.apply_spin(100), RoundState::InProgress);
        assert_eq!(r.apply_spin(0), RoundState::InProgress);
        assert_eq!(r.apply_spin(200), RoundState::Failed);
        assert!(r.state().is_terminal());
        assert_eq!(r.bar(), 300);
    }

    #[test]
    fn test_zero_budget_fails_at_begin() {
        let mut r = Round::new(RoundConfig {
            index: 1,
            target: 1000,
            spin_budget: 0,
        });
        assert_eq!(r.begin(), RoundState::Failed);
    }
}
