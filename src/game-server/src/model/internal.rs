use common::{
    error::GameError,
    model::{
        game::{RoundOutcome, RoundRecord, Score},
        messages::Id,
    },
};
use tokio::sync::{mpsc::Sender, oneshot};

use crate::error::ServerError;

// Messages to a session thread
#[derive(Debug)]
pub enum SessionRequest {
    PlayRound {
        token: String,
        reply: oneshot::Sender<Result<RoundOutcome, GameError>>,
    },
    Score {
        reply: oneshot::Sender<Score>,
    },
    History {
        reply: oneshot::Sender<Vec<RoundRecord>>,
    },
}

/// Cheap, cloneable way to talk to one session thread.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: Id,
    pub sender: Sender<SessionRequest>,
}

impl SessionHandle {
    pub async fn play_round(&self, token: String) -> Result<RoundOutcome, ServerError> {
        let outcome = self
            .request(|reply| SessionRequest::PlayRound { token, reply })
            .await?;
        Ok(outcome?)
    }

    pub async fn score(&self) -> Result<Score, ServerError> {
        self.request(|reply| SessionRequest::Score { reply }).await
    }

    pub async fn history(&self) -> Result<Vec<RoundRecord>, ServerError> {
        self.request(|reply| SessionRequest::History { reply }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionRequest,
    ) -> Result<T, ServerError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .await
            .map_err(|_| ServerError::SessionClosed(self.id))?;
        response
            .await
            .map_err(|_| ServerError::SessionClosed(self.id))
    }
}
