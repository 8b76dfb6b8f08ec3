use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    error::GameError,
    model::messages::{ErrorResponse, Id},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServerError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Session {0} not found")]
    SessionNotFound(Id),
    #[error("Session {0} has shut down")]
    SessionClosed(Id),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Game(GameError::InvalidMove(_)) => StatusCode::BAD_REQUEST,
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::SessionClosed(_) => StatusCode::GONE,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
