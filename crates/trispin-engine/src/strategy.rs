//! Strategy: a fixed upgrade-purchase sequence over the round-2/round-3 windows
//!
//! The catalogue holds the 13 meaningful paths, not the full power set:
//! the baseline, each single upgrade in either window, and the six ordered
//! two-upgrade sequences with distinct upgrades.

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;
use crate::upgrade::Upgrade;

/// An ordered record of which upgrade (if any) is purchased entering round 2
/// and which (if any) entering round 3. Purchases outside those windows are
/// unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    round2: Option<Upgrade>,
    round3: Option<Upgrade>,
}

impl Strategy {
    /// Build a strategy, rejecting a duplicate one-time purchase.
    pub fn new(round2: Option<Upgrade>, round3: Option<Upgrade>) -> Result<Self, StrategyError> {
        if let (Some(a), Some(b)) = (round2, round3) {
            if a == b {
                return Err(StrategyError::DuplicateUpgrade(a));
            }
        }
        Ok(Self { round2, round3 })
    }

    /// The no-upgrade baseline.
    pub const fn baseline() -> Self {
        Self {
            round2: None,
            round3: None,
        }
    }

    /// Upgrade purchased entering the given 1-based round, if any.
    pub fn purchase_for_round(&self, round: u8) -> Option<Upgrade> {
        match round {
            2 => self.round2,
            3 => self.round3,
            _ => None,
        }
    }

    pub fn round2(&self) -> Option<Upgrade> {
        self.round2
    }

    pub fn round3(&self) -> Option<Upgrade> {
        self.round3
    }

    /// Human-readable name, matching the original analysis output.
    pub fn label(&self) -> String {
        match (self.round2, self.round3) {
            (None, None) => "No Upgrades".to_string(),
            (Some(u), None) => format!("R2: {}", u.label()),
            (None, Some(u)) => format!("R3: {}", u.label()),
            (Some(a), Some(b)) => format!("R2: {} + R3: {}", a.label(), b.label()),
        }
    }

    /// The fixed catalogue of 13 meaningful strategies: baseline, three
    /// single purchases per window, and the six ordered distinct pairs.
    pub fn catalogue() -> Vec<Strategy> {
        let mut strategies = vec![Strategy::baseline()];
        for u in Upgrade::ALL {
            strategies.push(Strategy {
                round2: Some(u),
                round3: None,
            });
        }
        for u in Upgrade::ALL {
            strategies.push(Strategy {
                round2: None,
                round3: Some(u),
            });
        }
        for a in Upgrade::ALL {
            for b in Upgrade::ALL {
                if a != b {
                    strategies.push(Strategy {
                        round2: Some(a),
                        round3: Some(b),
                    });
                }
            }
        }
        strategies
    }
}
