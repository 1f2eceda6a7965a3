use std::collections::HashSet;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::database::{friend_request_repo, user_repo};
use crate::error::{ConnectionError, ConnectionResult};
use crate::models::{ConnectionRole, FriendRequestRow, RequestStatus, UserProfile};

#[derive(Debug, Clone, Serialize)]
pub struct IncomingRequestView {
    #[serde(flatten)]
    pub request: FriendRequestRow,
    pub sender: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutgoingRequestView {
    #[serde(flatten)]
    pub request: FriendRequestRow,
    pub recipient: UserProfile,
}

/// An accepted request seen from one of its two parties.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedConnectionView {
    pub request: FriendRequestRow,
    pub role: ConnectionRole,
    pub other_user: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestsOverview {
    pub incoming_requests: Vec<IncomingRequestView>,
    pub accepted_requests: Vec<AcceptedConnectionView>,
}

pub async fn send_friend_request(
    pool: &SqlitePool,
    actor_user_id: &str,
    target_user_id: &str,
) -> ConnectionResult<FriendRequestRow> {
    let actor_user_id = actor_user_id.trim();
    let target_user_id = target_user_id.trim();
    if actor_user_id == target_user_id {
        return Err(ConnectionError::SelfRequest);
    }

    // Checks and insert share one transaction; UNIQUE (user_low, user_high)
    // catches a concurrent sender that slipped past the lookup.
    let mut tx = pool.begin().await?;

    if user_repo::find_user_by_id(&mut *tx, target_user_id)
        .await?
        .is_none()
    {
        return Err(ConnectionError::NotFound("user"));
    }

    if user_repo::is_friend_of(&mut *tx, target_user_id, actor_user_id).await? {
        return Err(ConnectionError::AlreadyFriends);
    }

    if let Some(existing) =
        friend_request_repo::find_by_unordered_pair(&mut *tx, actor_user_id, target_user_id)
            .await?
    {
        debug!(
            "friend request {} already links {} and {} ({})",
            existing.request_id,
            existing.sender_id,
            existing.recipient_id,
            existing.status.as_str()
        );
        return Err(ConnectionError::DuplicateRequest);
    }

    let request_id = Uuid::new_v4().to_string();
    let request = friend_request_repo::insert(
        &mut *tx,
        friend_request_repo::NewFriendRequest {
            request_id: &request_id,
            sender_id: actor_user_id,
            recipient_id: target_user_id,
        },
    )
    .await
    .map_err(classify_write_error)?;

    tx.commit().await.map_err(classify_write_error)?;

    info!(
        "friend request {} sent: {} -> {}",
        request.request_id, request.sender_id, request.recipient_id
    );
    Ok(request)
}

/// Accepts a request on behalf of its recipient and writes both friend edges
/// in the same transaction. Accepting an accepted request re-applies the
/// (idempotent) edges and succeeds.
pub async fn accept_friend_request(
    pool: &SqlitePool,
    actor_user_id: &str,
    request_id: &str,
) -> ConnectionResult<FriendRequestRow> {
    let mut tx = pool.begin().await?;

    let Some(request) = friend_request_repo::find_by_id(&mut *tx, request_id).await? else {
        return Err(ConnectionError::NotFound("friend request"));
    };

    if request.recipient_id != actor_user_id {
        warn!(
            "user {} tried to accept friend request {} addressed to {}",
            actor_user_id, request.request_id, request.recipient_id
        );
        return Err(ConnectionError::Forbidden);
    }

    if request.status == RequestStatus::Pending {
        friend_request_repo::update_status(&mut *tx, request_id, RequestStatus::Accepted)
            .await
            .map_err(classify_write_error)?;
    } else {
        debug!("friend request {} already accepted", request.request_id);
    }

    let forward =
        user_repo::add_to_friend_set(&mut *tx, &request.sender_id, &request.recipient_id)
            .await
            .map_err(classify_write_error)?;
    let backward =
        user_repo::add_to_friend_set(&mut *tx, &request.recipient_id, &request.sender_id)
            .await
            .map_err(classify_write_error)?;

    let accepted = friend_request_repo::find_by_id(&mut *tx, request_id)
        .await?
        .ok_or(ConnectionError::NotFound("friend request"))?;

    tx.commit().await.map_err(classify_write_error)?;

    info!(
        "friend request {} accepted: {} <-> {} ({} new edges)",
        accepted.request_id, accepted.sender_id, accepted.recipient_id, forward + backward
    );
    Ok(accepted)
}

pub async fn list_incoming_pending(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<Vec<IncomingRequestView>> {
    let rows = friend_request_repo::find_by_recipient_and_status(
        pool,
        actor_user_id,
        RequestStatus::Pending,
    )
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let (request, sender) = row.into_parts();
            IncomingRequestView { request, sender }
        })
        .collect())
}

pub async fn list_outgoing_pending(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<Vec<OutgoingRequestView>> {
    let rows =
        friend_request_repo::find_by_sender_and_status(pool, actor_user_id, RequestStatus::Pending)
            .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let (request, recipient) = row.into_parts();
            OutgoingRequestView { request, recipient }
        })
        .collect())
}

pub async fn list_accepted(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<Vec<AcceptedConnectionView>> {
    let rows = friend_request_repo::find_accepted_for_user(pool, actor_user_id).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let (request, other_user) = row.into_parts();
            let role = if request.sender_id == actor_user_id {
                ConnectionRole::Sender
            } else {
                ConnectionRole::Recipient
            };
            AcceptedConnectionView {
                request,
                role,
                other_user,
            }
        })
        .collect())
}

pub async fn load_friend_requests_overview(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<FriendRequestsOverview> {
    Ok(FriendRequestsOverview {
        incoming_requests: list_incoming_pending(pool, actor_user_id).await?,
        accepted_requests: list_accepted(pool, actor_user_id).await?,
    })
}

/// Ids of users the actor has a pending outgoing request to. Derived from the
/// store on every call.
pub async fn pending_recipient_ids(
    pool: &SqlitePool,
    actor_user_id: &str,
) -> ConnectionResult<HashSet<String>> {
    Ok(list_outgoing_pending(pool, actor_user_id)
        .await?
        .into_iter()
        .map(|view| view.request.recipient_id)
        .collect())
}

// Unique violations and SQLITE_BUSY both mean another writer won the race.
fn classify_write_error(err: sqlx::Error) -> ConnectionError {
    if let sqlx::Error::Database(db) = &err {
        let busy = db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| code & 0xff == 5)
            .unwrap_or(false);
        if db.is_unique_violation() || busy {
            return ConnectionError::Conflict;
        }
    }
    ConnectionError::Database(err)
}
