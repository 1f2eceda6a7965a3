use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("you can't send a friend request to yourself")]
    SelfRequest,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("this user is already your friend")]
    AlreadyFriends,

    #[error("a friend request already exists between these users")]
    DuplicateRequest,

    #[error("only the recipient can accept this friend request")]
    Forbidden,

    #[error("the friend request was modified concurrently, please retry")]
    Conflict,

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ConnectionError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConnectionError::SelfRequest => StatusCode::BAD_REQUEST,
            ConnectionError::NotFound(_) => StatusCode::NOT_FOUND,
            ConnectionError::AlreadyFriends
            | ConnectionError::DuplicateRequest
            | ConnectionError::Conflict => StatusCode::CONFLICT,
            ConnectionError::Forbidden => StatusCode::FORBIDDEN,
            ConnectionError::InvalidBody(rejection) => rejection.status(),
            ConnectionError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            ConnectionError::SelfRequest => "self_request",
            ConnectionError::NotFound(_) => "not_found",
            ConnectionError::AlreadyFriends => "already_friends",
            ConnectionError::DuplicateRequest => "duplicate_request",
            ConnectionError::Forbidden => "forbidden",
            ConnectionError::Conflict => "conflict",
            ConnectionError::InvalidBody(_) => "invalid_body",
            ConnectionError::Database(_) => "internal",
        }
    }
}

impl IntoResponse for ConnectionError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ConnectionError::Database(e) => {
                error!("friend connection storage failure: {}", e);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type ConnectionResult<T> = Result<T, ConnectionError>;
