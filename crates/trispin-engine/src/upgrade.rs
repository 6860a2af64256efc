//! Upgrades: three one-time purchases active from the round of purchase onward

use serde::{Deserialize, Serialize};

/// One of the three purchasable upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    /// Substitute the weight table with the biased one
    ReelBias,
    /// Extra spins per round
    ExtraSpins,
    /// Additive bonus to every symbol multiplier
    BonusMultiplier,
}

impl Upgrade {
    /// All upgrades in the designed hierarchy order
    /// (reel-bias > extra-spins > bonus-multiplier).
    pub const ALL: [Upgrade; 3] = [
        Upgrade::ReelBias,
        Upgrade::ExtraSpins,
        Upgrade::BonusMultiplier,
    ];

    /// Stable name used in strategy labels and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Upgrade::ReelBias => "reel_bias",
            Upgrade::ExtraSpins => "extra_spins",
            Upgrade::BonusMultiplier => "bonus_multiplier",
        }
    }
}

/// The set of upgrades active entering a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSet {
    reel_bias: bool,
    extra_spins: bool,
    bonus_multiplier: bool,
}

impl UpgradeSet {
    /// Empty set (no upgrades owned).
    pub fn none() -> Self {
        Self::default()
    }

    /// Add an upgrade. Returns false if it was already owned.
    pub fn insert(&mut self, upgrade: Upgrade) -> bool {
        let slot = match upgrade {
            Upgrade::ReelBias => &mut self.reel_bias,
            Upgrade::ExtraSpins => &mut self.extra_spins,
            Upgrade::BonusMultiplier => &mut self.bonus_multiplier,
        };
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    pub fn contains(&self, upgrade: Upgrade) -> bool {
        match upgrade {
            Upgrade::ReelBias => self.reel_bias,
            Upgrade::ExtraSpins => self.extra_spins,
            Upgrade::BonusMultiplier => self.bonus_multiplier,
        }
    }

    pub fn reel_bias(&self) -> bool {
        self.reel_bias
    }

    pub fn extra_spins(&self) -> bool {
        self.extra_spins
    }

    pub fn bonus_multiplier(&self) -> bool {
        self.bonus_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_once() {
        let mut set = UpgradeSet::none();
        assert!(set.insert(Upgrade::ReelBias));
        assert!(!set.insert(Upgrade::ReelBias));
        assert!(set.contains(Upgrade::ReelBias));
        assert!(!set.contains(Upgrade::ExtraSpins));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Upgrade::ReelBias.label(), "reel_bias");
        assert_eq!(Upgrade::BonusMultiplier.label(), "bonus_multiplier");
    }
}
