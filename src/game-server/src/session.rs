use agent::{frequency::MoveFrequency, opponent::Opponent, strategy::StrategyKind};
use common::{
    error::GameError,
    model::game::{resolve, Move, RoundOutcome, RoundRecord, Score},
};
use tracing::{debug, warn};

/// Everything one player's game remembers. Owned by exactly one session
/// thread (or the terminal loop); nothing is shared between sessions.
pub struct GameSession {
    opponent: Opponent,
    score: Score,
    history: Vec<RoundRecord>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_opponent(Opponent::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_opponent(Opponent::seeded(seed))
    }

    pub fn with_opponent(opponent: Opponent) -> Self {
        GameSession {
            opponent,
            score: Score::default(),
            history: Vec::new(),
        }
    }

    /// Validate a raw token, then play it. State is untouched on error.
    pub fn play_token(&mut self, token: &str) -> Result<RoundOutcome, GameError> {
        let player_move = token.parse::<Move>().inspect_err(|e| warn!("{}", e))?;
        Ok(self.play_round(player_move))
    }

    pub fn play_round(&mut self, player_move: Move) -> RoundOutcome {
        let (kind, computer_move) = self.opponent.respond(player_move);
        self.finish_round(kind, player_move, computer_move)
    }

    /// Play a round with a fixed strategy instead of a drawn one.
    pub fn play_round_with(&mut self, kind: StrategyKind, player_move: Move) -> RoundOutcome {
        let (kind, computer_move) = self.opponent.respond_with(kind, player_move);
        self.finish_round(kind, player_move, computer_move)
    }

    fn finish_round(
        &mut self,
        kind: StrategyKind,
        player_move: Move,
        computer_move: Move,
    ) -> RoundOutcome {
        let resolution = resolve(player_move, computer_move);
        self.score.record(resolution.outcome);
        let narration = resolution.narration(player_move, computer_move);

        // The opponent only learns once its move is fixed
        self.opponent.observe(player_move);

        debug!("Round {}: {} ({})", self.score.rounds(), narration, kind);
        self.history.push(RoundRecord {
            player_move,
            computer_move,
            strategy: kind.name().to_owned(),
            narration: narration.clone(),
        });
        RoundOutcome {
            player_move,
            computer_move,
            strategy: kind.name().to_owned(),
            narration,
            score: self.score,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn frequency(&self) -> &MoveFrequency {
        self.opponent.frequency()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_cheat_round() {
        let mut session = GameSession::seeded(0);
        let outcome = session.play_round_with(StrategyKind::Cheat, Move::Rock);
        assert_eq!(outcome.computer_move, Move::Paper);
        assert_eq!(outcome.strategy, "Cheat");
        assert_eq!(
            outcome.narration,
            "Rock vs Paper: Paper covers Rock. (Computer Wins!)"
        );
        assert_eq!(
            outcome.score,
            Score {
                player_wins: 0,
                computer_wins: 1,
                ties: 0
            }
        );
        assert_eq!(
            session.history()[0].to_string(),
            "Rock vs Paper: Paper covers Rock. (Computer Wins!) (Computer: Cheat)"
        );
    }

    #[test]
    fn one_counter_per_round() {
        let mut session = GameSession::seeded(11);
        for (i, player_move) in Move::ALL.iter().cycle().take(300).enumerate() {
            let before = session.score();
            let outcome = session.play_round(*player_move);
            let after = session.score();
            let increments = (after.player_wins - before.player_wins)
                + (after.computer_wins - before.computer_wins)
                + (after.ties - before.ties);
            assert_eq!(increments, 1);
            assert_eq!(after.rounds(), i as u32 + 1);
            assert_eq!(outcome.score, after);
        }
        assert_eq!(session.history().len(), 300);
    }

    #[test]
    fn scissors_twice_then_last_used() {
        let mut session = GameSession::seeded(3);
        session.play_round(Move::Scissors);
        session.play_round(Move::Scissors);
        assert_eq!(session.frequency().count(Move::Scissors), 2);
        let outcome = session.play_round_with(StrategyKind::LastUsed, Move::Paper);
        assert_eq!(outcome.computer_move, Move::Rock);
        assert_eq!(session.frequency().count(Move::Paper), 1);
    }

    #[test]
    fn strategy_never_sees_its_own_round() {
        let mut session = GameSession::seeded(3);
        session.play_round(Move::Rock);
        // Paper has not been recorded yet, so Most Used still counters Rock
        let outcome = session.play_round_with(StrategyKind::MostUsed, Move::Paper);
        assert_eq!(outcome.computer_move, Move::Paper);
        assert_eq!(session.frequency().last(), Some(Move::Paper));
    }

    #[test]
    fn computer_moves_are_not_tracked() {
        let mut session = GameSession::seeded(8);
        for _ in 0..50 {
            session.play_round(Move::Paper);
        }
        assert_eq!(session.frequency().count(Move::Paper), 50);
        assert_eq!(session.frequency().total(), 50);
    }

    #[test]
    fn invalid_token_leaves_state_alone() {
        let mut session = GameSession::seeded(4);
        session.play_token("R").unwrap();
        let score = session.score();
        let frequency = session.frequency().clone();

        let error = session.play_token("Lizard").unwrap_err();
        assert_eq!(error, GameError::InvalidMove("Lizard".to_owned()));
        assert_eq!(session.score(), score);
        assert_eq!(session.frequency(), &frequency);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn history_matches_outcomes() {
        let mut session = GameSession::seeded(21);
        let outcomes: Vec<RoundOutcome> = [Move::Rock, Move::Paper, Move::Scissors]
            .into_iter()
            .map(|m| session.play_round(m))
            .collect();
        for (record, outcome) in session.history().iter().zip(outcomes.iter()) {
            assert_eq!(record.player_move, outcome.player_move);
            assert_eq!(record.computer_move, outcome.computer_move);
            assert_eq!(record.strategy, outcome.strategy);
            assert_eq!(record.narration, outcome.narration);
        }
    }
}
