use crate::model::{
    game::{RoundOutcome, RoundRecord, Score},
    messages::Id,
};
use serde::{Deserialize, Serialize};

// Client types
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ClientRequest {
    // Raw token so that invalid moves reach the session and get reported
    Move { value: String },
    Score,
    History,
    Quit,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ClientResponse {
    // First message on every connection
    SessionStarted { session_id: Id },
    RoundResult(RoundOutcome),
    Score(Score),
    History { rounds: Vec<RoundRecord> },
    InvalidMove { token: String },
    BadRequest { reason: String },
    Goodbye,
}
