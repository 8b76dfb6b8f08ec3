use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Result of a round from the player's point of view.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Canonical iteration order. Frequency tie-breaks depend on it.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    pub fn beats(&self, other: &Move) -> Option<bool> {
        if self == other {
            None
        } else {
            Some(matches!(
                (self, other),
                (Move::Rock, Move::Scissors)
                    | (Move::Scissors, Move::Paper)
                    | (Move::Paper, Move::Rock)
            ))
        }
    }

    /// The move that beats this one.
    pub fn counter(&self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// Narration for `winner` defeating `loser`, `None` unless `winner` actually wins.
    pub fn relation(winner: Move, loser: Move) -> Option<&'static str> {
        match (winner, loser) {
            (Move::Rock, Move::Scissors) => Some("Rock breaks Scissors."),
            (Move::Paper, Move::Rock) => Some("Paper covers Rock."),
            (Move::Scissors, Move::Paper) => Some("Scissors cuts Paper."),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(Move::Rock),
            "p" | "paper" => Ok(Move::Paper),
            "s" | "scissors" => Ok(Move::Scissors),
            _ => Err(GameError::InvalidMove(token.to_owned())),
        }
    }
}

pub const TIE_RELATION: &str = "Both chose the same symbol.";
pub const TIE_RESULT: &str = "It's a tie.";
pub const PLAYER_WINS: &str = "Player wins!";
pub const COMPUTER_WINS: &str = "Computer Wins!";

/// A single evaluation of the beats-relation for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub relation: &'static str,
    pub result: &'static str,
}

impl Resolution {
    pub fn narration(&self, player: Move, computer: Move) -> String {
        format!(
            "{} vs {}: {} ({})",
            player, computer, self.relation, self.result
        )
    }
}

pub fn resolve(player: Move, computer: Move) -> Resolution {
    match player.beats(&computer) {
        None => Resolution {
            outcome: Outcome::Draw,
            relation: TIE_RELATION,
            result: TIE_RESULT,
        },
        Some(true) => Resolution {
            outcome: Outcome::Win,
            relation: Move::relation(player, computer).unwrap_or_default(),
            result: PLAYER_WINS,
        },
        Some(false) => Resolution {
            outcome: Outcome::Loss,
            relation: Move::relation(computer, player).unwrap_or_default(),
            result: COMPUTER_WINS,
        },
    }
}

/// Cumulative tallies for a session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player_wins: u32,
    pub computer_wins: u32,
    pub ties: u32,
}

impl Score {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.player_wins += 1,
            Outcome::Loss => self.computer_wins += 1,
            Outcome::Draw => self.ties += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.player_wins + self.computer_wins + self.ties
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub player_move: Move,
    pub computer_move: Move,
    pub strategy: String,
    pub narration: String,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Computer: {})", self.narration, self.strategy)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub player_move: Move,
    pub computer_move: Move,
    pub strategy: String,
    pub narration: String,
    pub score: Score,
}
