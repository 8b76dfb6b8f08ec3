use rand::Rng;

use crate::strategy::StrategyKind;

/// Upper bound (inclusive) of each strategy's slice of the 1..=100 roll.
pub const THRESHOLDS: [(u8, StrategyKind); 5] = [
    (10, StrategyKind::Cheat),
    (30, StrategyKind::LeastUsed),
    (50, StrategyKind::MostUsed),
    (70, StrategyKind::LastUsed),
    (100, StrategyKind::Random),
];

impl StrategyKind {
    pub fn from_roll(roll: u8) -> StrategyKind {
        THRESHOLDS
            .iter()
            .find(|(upper, _)| roll <= *upper)
            .map(|(_, kind)| *kind)
            .unwrap_or(StrategyKind::Random)
    }
}

pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=100)
}

pub fn select<R: Rng + ?Sized>(rng: &mut R) -> StrategyKind {
    StrategyKind::from_roll(roll(rng))
}
