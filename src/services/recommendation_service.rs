use sqlx::SqlitePool;

use crate::database::user_repo;
use crate::error::ConnectionResult;
use crate::models::RecommendedUserRow;
use crate::services::friend_request_service;

/// Onboarded users other than the actor who are not yet in the actor's friend
/// set. No ranking: rows come back in directory order.
pub async fn recommend(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<Vec<RecommendedUserRow>> {
    let mut users = user_repo::list_recommendation_candidates(pool, actor_user_id).await?;
    if users.is_empty() {
        return Ok(users);
    }

    let sent = friend_request_service::pending_recipient_ids(pool, actor_user_id).await?;
    for user in users.iter_mut() {
        user.request_sent = sent.contains(&user.user_id);
    }

    Ok(users)
}
