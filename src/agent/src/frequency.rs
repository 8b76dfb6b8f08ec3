use common::model::game::Move;

/// How often the player has used each move, plus the most recent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveFrequency {
    counts: [u32; 3],
    last: Option<Move>,
}

impl MoveFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player_move: Move) {
        self.counts[player_move.index()] += 1;
        self.last = Some(player_move);
    }

    pub fn count(&self, player_move: Move) -> u32 {
        self.counts[player_move.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn last(&self) -> Option<Move> {
        self.last
    }

    // First minimum in canonical order
    pub fn least_used(&self) -> Move {
        let mut least = Move::Rock;
        for candidate in Move::ALL {
            if self.count(candidate) < self.count(least) {
                least = candidate;
            }
        }
        least
    }

    // First maximum in canonical order
    pub fn most_used(&self) -> Move {
        let mut most = Move::Rock;
        for candidate in Move::ALL {
            if self.count(candidate) > self.count(most) {
                most = candidate;
            }
        }
        most
    }
}

#[cfg(test)]
pub(crate) fn frequency_of(rock: u32, paper: u32, scissors: u32) -> MoveFrequency {
    let mut frequency = MoveFrequency::new();
    for (player_move, n) in [
        (Move::Rock, rock),
        (Move::Paper, paper),
        (Move::Scissors, scissors),
    ] {
        for _ in 0..n {
            frequency.record(player_move);
        }
    }
    frequency
}
