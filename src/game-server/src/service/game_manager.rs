use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use common::model::{
    game::{RoundOutcome, RoundRecord, Score},
    messages::{CreateSessionRequest, CreateSessionResponse, ErrorResponse, Id, PlayRoundRequest},
};
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc, Mutex},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    error::ServerError, model::internal::SessionHandle, service::game_thread::SessionThread,
    session::GameSession,
};

/// Live sessions, shared by the REST API and the websocket.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Id, SessionHandle>>>,
    shutdown_sender: broadcast::Sender<()>,
}

impl SessionRegistry {
    pub fn new(shutdown_sender: broadcast::Sender<()>) -> Self {
        SessionRegistry {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            shutdown_sender,
        }
    }

    pub async fn create(&self, seed: Option<u64>) -> SessionHandle {
        let id = Id::new();
        let session = seed.map(GameSession::seeded).unwrap_or_default();
        let (sender, receiver) = mpsc::channel(32);
        tokio::spawn(SessionThread::run(
            id,
            session,
            self.shutdown_sender.subscribe(),
            receiver,
        ));
        let handle = SessionHandle { id, sender };
        self.sessions.lock().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Id) -> Result<SessionHandle, ServerError> {
        self.sessions
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServerError::SessionNotFound(id))
    }

    // The session thread exits once the last clone of its handle is gone
    pub async fn remove(&self, id: Id) -> Result<(), ServerError> {
        match self.sessions.lock().await.remove(&id) {
            Some(_) => {
                info!("Removed session {}", id);
                Ok(())
            }
            None => Err(ServerError::SessionNotFound(id)),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

pub struct GameManager {}

impl GameManager {
    pub fn router(registry: SessionRegistry) -> Router {
        Router::new()
            .route("/", get(Self::root))
            .route("/session", post(Self::create_session))
            .route("/session/{id}", delete(Self::close_session))
            .route("/session/{id}/round", post(Self::play_round))
            .route("/session/{id}/score", get(Self::score))
            .route("/session/{id}/history", get(Self::history))
            .layer(TraceLayer::new_for_http())
            .with_state(registry)
    }

    pub async fn listen(
        listener: TcpListener,
        registry: SessionRegistry,
        mut shutdown_receiver: broadcast::Receiver<()>,
    ) {
        let address = listener
            .local_addr()
            .map(|address| address.to_string())
            .unwrap_or_default();
        info!("Game manager listening on {}", address);
        let result = axum::serve(listener, Self::router(registry))
            .with_graceful_shutdown(async move {
                let _ = shutdown_receiver.recv().await;
            })
            .await;
        if let Err(e) = result {
            error!("Game manager exited with error: {}", e);
        }
        info!("Exited game manager");
    }

    async fn root() -> &'static str {
        "Rock Paper Scissors"
    }

    // Empty body means an unseeded session
    async fn create_session(State(registry): State<SessionRegistry>, body: Bytes) -> Response {
        let request = if body.is_empty() {
            CreateSessionRequest::default()
        } else {
            match serde_json::from_slice::<CreateSessionRequest>(&body) {
                Ok(request) => request,
                Err(e) => {
                    warn!("Bad create session request: {}", e);
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: e.to_string(),
                        }),
                    )
                        .into_response();
                }
            }
        };
        let handle = registry.create(request.seed).await;
        (
            StatusCode::CREATED,
            Json(CreateSessionResponse {
                session_id: handle.id,
            }),
        )
            .into_response()
    }

    async fn close_session(
        State(registry): State<SessionRegistry>,
        Path(id): Path<Id>,
    ) -> Result<StatusCode, ServerError> {
        registry.remove(id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    async fn play_round(
        State(registry): State<SessionRegistry>,
        Path(id): Path<Id>,
        Json(request): Json<PlayRoundRequest>,
    ) -> Result<Json<RoundOutcome>, ServerError> {
        let handle = registry.get(id).await?;
        Ok(Json(handle.play_round(request.value).await?))
    }

    async fn score(
        State(registry): State<SessionRegistry>,
        Path(id): Path<Id>,
    ) -> Result<Json<Score>, ServerError> {
        let handle = registry.get(id).await?;
        Ok(Json(handle.score().await?))
    }

    async fn history(
        State(registry): State<SessionRegistry>,
        Path(id): Path<Id>,
    ) -> Result<Json<Vec<RoundRecord>>, ServerError> {
        let handle = registry.get(id).await?;
        Ok(Json(handle.history().await?))
    }
}
