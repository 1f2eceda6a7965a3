use sqlx::SqliteExecutor;

use crate::models::{ordered_pair, FriendRequestRow, FriendRequestWithProfileRow, RequestStatus};

pub struct NewFriendRequest<'a> {
    pub request_id: &'a str,
    pub sender_id: &'a str,
    pub recipient_id: &'a str,
}

const SQL_FIND_BY_ID: &str = r#"
SELECT request_id, sender_id, recipient_id, status, created_at, updated_at
FROM friend_requests
WHERE request_id = ?1
LIMIT 1
"#;

const SQL_FIND_BY_PAIR: &str = r#"
SELECT request_id, sender_id, recipient_id, status, created_at, updated_at
FROM friend_requests
WHERE user_low = ?1
  AND user_high = ?2
LIMIT 1
"#;

const SQL_INSERT_FRIEND_REQUEST: &str = r#"
INSERT INTO friend_requests (
  request_id,
  sender_id,
  recipient_id,
  user_low,
  user_high,
  status
) VALUES (?1, ?2, ?3, ?4, ?5, 'pending')
RETURNING request_id, sender_id, recipient_id, status, created_at, updated_at
"#;

const SQL_UPDATE_STATUS: &str = r#"
UPDATE friend_requests
SET status = ?2,
    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
WHERE request_id = ?1
"#;

const SQL_FIND_BY_RECIPIENT_AND_STATUS: &str = r#"
SELECT
    fr.request_id, fr.sender_id, fr.recipient_id, fr.status, fr.created_at, fr.updated_at,
    u.user_id AS other_user_id,
    u.full_name AS other_full_name,
    u.profile_pic AS other_profile_pic,
    u.native_language AS other_native_language,
    u.learning_language AS other_learning_language
FROM friend_requests fr
JOIN users u ON u.user_id = fr.sender_id
WHERE fr.recipient_id = ?1
  AND fr.status = ?2
ORDER BY fr.created_at, fr.rowid
"#;

const SQL_FIND_BY_SENDER_AND_STATUS: &str = r#"
SELECT
    fr.request_id, fr.sender_id, fr.recipient_id, fr.status, fr.created_at, fr.updated_at,
    u.user_id AS other_user_id,
    u.full_name AS other_full_name,
    u.profile_pic AS other_profile_pic,
    u.native_language AS other_native_language,
    u.learning_language AS other_learning_language
FROM friend_requests fr
JOIN users u ON u.user_id = fr.recipient_id
WHERE fr.sender_id = ?1
  AND fr.status = ?2
ORDER BY fr.created_at, fr.rowid
"#;

// Accepted requests on either side, joined with whoever is not ?1.
const SQL_FIND_ACCEPTED_FOR_USER: &str = r#"
SELECT
    fr.request_id, fr.sender_id, fr.recipient_id, fr.status, fr.created_at, fr.updated_at,
    u.user_id AS other_user_id,
    u.full_name AS other_full_name,
    u.profile_pic AS other_profile_pic,
    u.native_language AS other_native_language,
    u.learning_language AS other_learning_language
FROM friend_requests fr
JOIN users u ON u.user_id = CASE
    WHEN fr.sender_id = ?1 THEN fr.recipient_id
    ELSE fr.sender_id
END
WHERE fr.status = 'accepted'
  AND (fr.sender_id = ?1 OR fr.recipient_id = ?1)
ORDER BY fr.updated_at DESC, fr.rowid DESC
"#;

const SQL_LIST_ACCEPTED: &str = r#"
SELECT request_id, sender_id, recipient_id, status, created_at, updated_at
FROM friend_requests
WHERE status = 'accepted'
ORDER BY rowid
"#;

pub async fn find_by_id<'e, E>(
    executor: E,
    request_id: &str,
) -> sqlx::Result<Option<FriendRequestRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, FriendRequestRow>(SQL_FIND_BY_ID)
        .bind(request_id)
        .fetch_optional(executor)
        .await
}

/// Looks up the request between `a` and `b` regardless of who sent it.
pub async fn find_by_unordered_pair<'e, E>(
    executor: E,
    a: &str,
    b: &str,
) -> sqlx::Result<Option<FriendRequestRow>>
where
    E: SqliteExecutor<'e>,
{
    let (low, high) = ordered_pair(a, b);
    sqlx::query_as::<_, FriendRequestRow>(SQL_FIND_BY_PAIR)
        .bind(low)
        .bind(high)
        .fetch_optional(executor)
        .await
}

/// Inserts a pending request. A second request for the same unordered pair
/// fails with a unique violation on `(user_low, user_high)`.
pub async fn insert<'e, E>(executor: E, req: NewFriendRequest<'_>) -> sqlx::Result<FriendRequestRow>
where
    E: SqliteExecutor<'e>,
{
    let (low, high) = ordered_pair(req.sender_id, req.recipient_id);
    sqlx::query_as::<_, FriendRequestRow>(SQL_INSERT_FRIEND_REQUEST)
        .bind(req.request_id)
        .bind(req.sender_id)
        .bind(req.recipient_id)
        .bind(low)
        .bind(high)
        .fetch_one(executor)
        .await
}

pub async fn update_status<'e, E>(
    executor: E,
    request_id: &str,
    status: RequestStatus,
) -> sqlx::Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let res = sqlx::query(SQL_UPDATE_STATUS)
        .bind(request_id)
        .bind(status)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

/// Requests addressed to `recipient_id`, joined with the sender's profile.
pub async fn find_by_recipient_and_status<'e, E>(
    executor: E,
    recipient_id: &str,
    status: RequestStatus,
) -> sqlx::Result<Vec<FriendRequestWithProfileRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, FriendRequestWithProfileRow>(SQL_FIND_BY_RECIPIENT_AND_STATUS)
        .bind(recipient_id)
        .bind(status)
        .fetch_all(executor)
        .await
}

/// Requests sent by `sender_id`, joined with the recipient's profile.
pub async fn find_by_sender_and_status<'e, E>(
    executor: E,
    sender_id: &str,
    status: RequestStatus,
) -> sqlx::Result<Vec<FriendRequestWithProfileRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, FriendRequestWithProfileRow>(SQL_FIND_BY_SENDER_AND_STATUS)
        .bind(sender_id)
        .bind(status)
        .fetch_all(executor)
        .await
}

pub async fn find_accepted_for_user<'e, E>(
    executor: E,
    user_id: &str,
) -> sqlx::Result<Vec<FriendRequestWithProfileRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, FriendRequestWithProfileRow>(SQL_FIND_ACCEPTED_FOR_USER)
        .bind(user_id)
        .fetch_all(executor)
        .await
}

pub async fn list_accepted<'e, E>(executor: E) -> sqlx::Result<Vec<FriendRequestRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, FriendRequestRow>(SQL_LIST_ACCEPTED)
        .fetch_all(executor)
        .await
}
