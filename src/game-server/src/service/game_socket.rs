use std::net::SocketAddr;

use async_trait::async_trait;
use common::{
    error::GameError,
    message::game_server::{ClientRequest, ClientResponse},
    websocket::WebsocketHandler,
};
use tracing::{debug, warn};

use crate::{
    error::ServerError, model::internal::SessionHandle, service::game_manager::SessionRegistry,
};

/// Websocket front-end. Every connection plays its own fresh session.
#[derive(Clone)]
pub struct GameSocket {
    registry: SessionRegistry,
}

impl GameSocket {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }

    fn error_response(error: ServerError) -> ClientResponse {
        match error {
            ServerError::Game(GameError::InvalidMove(token)) => ClientResponse::InvalidMove { token },
            other => ClientResponse::BadRequest {
                reason: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl WebsocketHandler<ClientRequest, ClientResponse> for GameSocket {
    type Connection = SessionHandle;

    async fn open(&self, address: SocketAddr) -> Option<(SessionHandle, Option<ClientResponse>)> {
        let handle = self.registry.create(None).await;
        debug!("Session {} opened for {}", handle.id, address);
        let greeting = ClientResponse::SessionStarted {
            session_id: handle.id,
        };
        Some((handle, Some(greeting)))
    }

    async fn respond_to_request(
        &self,
        connection: &mut SessionHandle,
        request: ClientRequest,
    ) -> Option<ClientResponse> {
        let response = match request {
            ClientRequest::Move { value } => connection
                .play_round(value)
                .await
                .map(ClientResponse::RoundResult),
            ClientRequest::Score => connection.score().await.map(ClientResponse::Score),
            ClientRequest::History => connection
                .history()
                .await
                .map(|rounds| ClientResponse::History { rounds }),
            ClientRequest::Quit => Ok(ClientResponse::Goodbye),
        };
        Some(response.unwrap_or_else(Self::error_response))
    }

    fn reject_request(&self, error: serde_json::Error) -> Option<ClientResponse> {
        Some(ClientResponse::BadRequest {
            reason: error.to_string(),
        })
    }

    async fn close(&self, connection: SessionHandle) {
        if let Err(e) = self.registry.remove(connection.id).await {
            warn!("Closing socket: {}", e);
        }
    }

    fn drop_after_send(response: &ClientResponse) -> bool {
        matches!(response, ClientResponse::Goodbye)
    }
}
