use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid move: {0:?} is not one of Rock, Paper or Scissors")]
    InvalidMove(String),
}
