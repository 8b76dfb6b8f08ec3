use std::fmt;

use common::model::game::Move;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::frequency::MoveFrequency;

/// A policy producing the computer's move for one round.
///
/// `frequency` is the player's history up to, but not including, the round
/// being decided.
pub trait Strategy {
    fn make_move(&self, player_move: Move, frequency: &MoveFrequency, rng: &mut dyn RngCore)
        -> Move;
}

/// Reads the player's hand and answers with its counter.
pub struct Cheat;
impl Strategy for Cheat {
    fn make_move(&self, player_move: Move, _: &MoveFrequency, _: &mut dyn RngCore) -> Move {
        player_move.counter()
    }
}

pub struct RandomMove;
impl Strategy for RandomMove {
    fn make_move(&self, _: Move, _: &MoveFrequency, rng: &mut dyn RngCore) -> Move {
        Move::ALL[rng.random_range(0..Move::ALL.len())]
    }
}

pub struct LeastUsed;
impl Strategy for LeastUsed {
    fn make_move(&self, _: Move, frequency: &MoveFrequency, _: &mut dyn RngCore) -> Move {
        frequency.least_used().counter()
    }
}

pub struct MostUsed;
impl Strategy for MostUsed {
    fn make_move(&self, _: Move, frequency: &MoveFrequency, _: &mut dyn RngCore) -> Move {
        frequency.most_used().counter()
    }
}

/// Counters the player's previous move; random on the first round.
pub struct LastUsed;
impl Strategy for LastUsed {
    fn make_move(&self, player_move: Move, frequency: &MoveFrequency, rng: &mut dyn RngCore) -> Move {
        match frequency.last() {
            Some(last) => last.counter(),
            None => RandomMove.make_move(player_move, frequency, rng),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Cheat,
    #[serde(rename = "Least Used")]
    LeastUsed,
    #[serde(rename = "Most Used")]
    MostUsed,
    #[serde(rename = "Last Used")]
    LastUsed,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Cheat,
        StrategyKind::LeastUsed,
        StrategyKind::MostUsed,
        StrategyKind::LastUsed,
        StrategyKind::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Cheat => "Cheat",
            StrategyKind::LeastUsed => "Least Used",
            StrategyKind::MostUsed => "Most Used",
            StrategyKind::LastUsed => "Last Used",
            StrategyKind::Random => "Random",
        }
    }

    pub fn strategy(&self) -> &'static dyn Strategy {
        match self {
            StrategyKind::Cheat => &Cheat,
            StrategyKind::LeastUsed => &LeastUsed,
            StrategyKind::MostUsed => &MostUsed,
            StrategyKind::LastUsed => &LastUsed,
            StrategyKind::Random => &RandomMove,
        }
    }

    pub fn make_move(
        &self,
        player_move: Move,
        frequency: &MoveFrequency,
        rng: &mut dyn RngCore,
    ) -> Move {
        self.strategy().make_move(player_move, frequency, rng)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::frequency::frequency_of;

    #[test]
    fn cheat_always_wins() {
        let mut rng = StdRng::seed_from_u64(0);
        let frequency = MoveFrequency::new();
        for player_move in Move::ALL {
            let computer_move = Cheat.make_move(player_move, &frequency, &mut rng);
            assert_eq!(computer_move.beats(&player_move), Some(true));
        }
        assert_eq!(Cheat.make_move(Move::Rock, &frequency, &mut rng), Move::Paper);
        assert_eq!(Cheat.make_move(Move::Paper, &frequency, &mut rng), Move::Scissors);
        assert_eq!(Cheat.make_move(Move::Scissors, &frequency, &mut rng), Move::Rock);
    }

    #[test]
    fn random_covers_every_move() {
        let mut rng = StdRng::seed_from_u64(7);
        let frequency = MoveFrequency::new();
        let mut seen = [0u32; 3];
        for _ in 0..3_000 {
            seen[RandomMove.make_move(Move::Rock, &frequency, &mut rng).index()] += 1;
        }
        for count in seen {
            assert!((800..1200).contains(&count), "skewed: {:?}", seen);
        }
    }

    #[test]
    fn least_and_most_used_counter_the_history() {
        let mut rng = StdRng::seed_from_u64(0);
        let frequency = frequency_of(5, 2, 2);
        // Paper is least used, Rock most used
        assert_eq!(LeastUsed.make_move(Move::Rock, &frequency, &mut rng), Move::Scissors);
        assert_eq!(MostUsed.make_move(Move::Rock, &frequency, &mut rng), Move::Paper);
    }

    #[test]
    fn adaptive_strategies_ignore_the_current_move() {
        let mut rng = StdRng::seed_from_u64(0);
        let frequency = frequency_of(0, 0, 3);
        for player_move in Move::ALL {
            assert_eq!(MostUsed.make_move(player_move, &frequency, &mut rng), Move::Rock);
            assert_eq!(LeastUsed.make_move(player_move, &frequency, &mut rng), Move::Paper);
            assert_eq!(LastUsed.make_move(player_move, &frequency, &mut rng), Move::Rock);
        }
    }

    #[test]
    fn last_used_is_random_on_first_round() {
        let frequency = MoveFrequency::new();
        let mut last_used_rng = StdRng::seed_from_u64(42);
        let mut random_rng = StdRng::seed_from_u64(42);
        let mut seen = [0u32; 3];
        for _ in 0..30_000 {
            let last_used = LastUsed.make_move(Move::Rock, &frequency, &mut last_used_rng);
            let random = RandomMove.make_move(Move::Rock, &frequency, &mut random_rng);
            assert_eq!(last_used, random);
            seen[last_used.index()] += 1;
        }
        for count in seen {
            assert!((9_500..10_500).contains(&count), "skewed: {:?}", seen);
        }
    }

    #[test]
    fn names_match_serde() {
        for kind in StrategyKind::ALL {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.name())
            );
        }
    }
}
