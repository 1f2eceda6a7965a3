use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::error::ConnectionError;
use crate::services::friend_request_service::{
    self, AcceptedConnectionView, FriendRequestsOverview, IncomingRequestView,
    OutgoingRequestView,
};
use crate::web::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize)]
pub struct SendFriendRequestBody {
    pub target_id: String,
}

pub async fn send_friend_request_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
    payload: Result<Json<SendFriendRequestBody>, JsonRejection>,
) -> Result<impl IntoResponse, ConnectionError> {
    let Json(body) = payload?;
    let request =
        friend_request_service::send_friend_request(&pool, &auth_user.id, &body.target_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "request_id": request.request_id,
            "status": request.status,
            "sender_id": request.sender_id,
            "recipient_id": request.recipient_id,
            "created_at": request.created_at,
        })),
    ))
}

pub async fn accept_friend_request_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(request_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, ConnectionError> {
    let request =
        friend_request_service::accept_friend_request(&pool, &auth_user.id, &request_id).await?;

    Ok(Json(json!({
        "request_id": request.request_id,
        "status": request.status,
    })))
}

pub async fn friend_requests_overview_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<FriendRequestsOverview>, ConnectionError> {
    friend_request_service::load_friend_requests_overview(&pool, &auth_user.id)
        .await
        .map(Json)
}

pub async fn incoming_requests_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<IncomingRequestView>>, ConnectionError> {
    friend_request_service::list_incoming_pending(&pool, &auth_user.id)
        .await
        .map(Json)
}

pub async fn outgoing_requests_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<OutgoingRequestView>>, ConnectionError> {
    friend_request_service::list_outgoing_pending(&pool, &auth_user.id)
        .await
        .map(Json)
}

pub async fn accepted_requests_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<AcceptedConnectionView>>, ConnectionError> {
    friend_request_service::list_accepted(&pool, &auth_user.id)
        .await
        .map(Json)
}
