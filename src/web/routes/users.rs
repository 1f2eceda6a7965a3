use axum::{
    extract::{Query, State},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::error::ConnectionError;
use crate::models::{RecommendedUserRow, UserProfile};
use crate::services::friend_graph_service::{self, FriendsQuery};
use crate::services::recommendation_service;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn recommendations_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<RecommendedUserRow>>, ConnectionError> {
    recommendation_service::recommend(&pool, &auth_user.id)
        .await
        .map(Json)
}

pub async fn friends_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<FriendsQuery>,
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<UserProfile>>, ConnectionError> {
    friend_graph_service::list_friends(&pool, &auth_user.id, &query)
        .await
        .map(Json)
}
