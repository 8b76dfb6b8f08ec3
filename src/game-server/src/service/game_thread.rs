use common::model::messages::Id;
use tokio::sync::{broadcast, mpsc::Receiver};
use tracing::{debug, info};

use crate::{model::internal::SessionRequest, session::GameSession};

/// Owns one `GameSession` and serializes every request made against it.
pub struct SessionThread {}
impl SessionThread {
    pub async fn run(
        id: Id,
        mut session: GameSession,
        mut shutdown_receiver: broadcast::Receiver<()>,
        mut from_handles: Receiver<SessionRequest>,
    ) {
        info!("Session {} started", id);
        loop {
            tokio::select! {
                request = from_handles.recv() => {
                    // Every handle dropped
                    let Some(request) = request else {
                        break;
                    };
                    Self::update(&mut session, request);
                }
                _ = shutdown_receiver.recv() => {
                    break;
                }
            }
        }
        info!(
            "Session {} ended after {} rounds",
            id,
            session.score().rounds()
        );
    }

    fn update(session: &mut GameSession, request: SessionRequest) {
        // A dropped reply only means the caller went away; the round still counts
        match request {
            SessionRequest::PlayRound { token, reply } => {
                let result = session.play_token(&token);
                if reply.send(result).is_err() {
                    debug!("Round result for {:?} had no receiver", token);
                }
            }
            SessionRequest::Score { reply } => {
                let _ = reply.send(session.score());
            }
            SessionRequest::History { reply } => {
                let _ = reply.send(session.history().to_vec());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{error::GameError, model::game::Move};
    use tokio::sync::{mpsc, oneshot};

    use super::*;

    #[tokio::test]
    async fn serves_requests_in_order() {
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (sender, receiver) = mpsc::channel(8);
        let handle = tokio::spawn(SessionThread::run(
            Id::new(),
            GameSession::seeded(1),
            shutdown_receiver,
            receiver,
        ));

        for token in ["R", "Paper", "Lizard"] {
            let (reply, response) = oneshot::channel();
            sender
                .send(SessionRequest::PlayRound {
                    token: token.to_owned(),
                    reply,
                })
                .await
                .unwrap();
            let result = response.await.unwrap();
            if token == "Lizard" {
                assert_eq!(result, Err(GameError::InvalidMove("Lizard".to_owned())));
            } else {
                assert!(result.is_ok());
            }
        }

        let (reply, response) = oneshot::channel();
        sender.send(SessionRequest::History { reply }).await.unwrap();
        let history = response.await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].player_move, Move::Rock);
        assert_eq!(history[1].player_move, Move::Paper);

        shutdown_sender.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn exits_when_handles_drop() {
        let (_shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (sender, receiver) = mpsc::channel(8);
        let handle = tokio::spawn(SessionThread::run(
            Id::new(),
            GameSession::seeded(1),
            shutdown_receiver,
            receiver,
        ));
        drop(sender);
        handle.await.unwrap();
    }
}
