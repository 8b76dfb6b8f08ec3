use common::model::game::Move;
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::{frequency::MoveFrequency, selector, strategy::StrategyKind};

/// The computer player. Picks a strategy every round and learns from the
/// player's moves once each round is over.
pub struct Opponent {
    frequency: MoveFrequency,
    rng: StdRng,
}

impl Opponent {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Opponent {
            frequency: MoveFrequency::new(),
            rng,
        }
    }

    pub fn respond(&mut self, player_move: Move) -> (StrategyKind, Move) {
        let kind = selector::select(&mut self.rng);
        self.respond_with(kind, player_move)
    }

    /// Answer with a fixed strategy instead of drawing one.
    pub fn respond_with(&mut self, kind: StrategyKind, player_move: Move) -> (StrategyKind, Move) {
        let computer_move = kind.make_move(player_move, &self.frequency, &mut self.rng);
        debug!("{} strategy answered {} with {}", kind, player_move, computer_move);
        (kind, computer_move)
    }

    // Must only run after the round has been resolved
    pub fn observe(&mut self, player_move: Move) {
        self.frequency.record(player_move);
    }

    pub fn frequency(&self) -> &MoveFrequency {
        &self.frequency
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new()
    }
}
