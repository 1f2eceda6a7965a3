use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{friend_request_repo, user_repo};
use crate::error::ConnectionResult;
use crate::models::UserProfile;

#[derive(Debug, Deserialize, Default)]
pub struct FriendsQuery {
    pub q: Option<String>,
    pub language: Option<String>,
    pub sort: Option<String>, // name|recent|language
}

#[derive(Debug, Default)]
pub struct FriendGraphRepairReport {
    pub accepted: usize,
    pub edges_added: u64,
}

pub async fn list_friends(
    pool: &SqlitePool,
    actor_user_id: &str,
    query: &FriendsQuery,
) -> ConnectionResult<Vec<UserProfile>> {
    let friends = user_repo::list_friend_profiles(pool, actor_user_id).await?;
    Ok(apply_friends_query(friends, query))
}

fn apply_friends_query(friends: Vec<UserProfile>, query: &FriendsQuery) -> Vec<UserProfile> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let language = query
        .language
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase);

    let mut friends: Vec<UserProfile> = friends
        .into_iter()
        .filter(|f| {
            needle
                .as_ref()
                .map_or(true, |n| f.full_name.to_lowercase().contains(n))
        })
        .filter(|f| {
            language.as_ref().map_or(true, |l| {
                f.learning_language.as_deref().unwrap_or("").to_lowercase() == *l
            })
        })
        .collect();

    match query.sort.as_deref().unwrap_or("").trim() {
        "name" => friends.sort_by_key(|f| f.full_name.to_lowercase()),
        "language" => friends.sort_by(|a, b| {
            lower(&a.learning_language)
                .cmp(&lower(&b.learning_language))
                .then_with(|| a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()))
        }),
        "recent" => friends.reverse(),
        _ => {}
    }

    friends
}

fn lower(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").to_lowercase()
}

/// Re-applies both friend edges for every accepted request. Edges are
/// insert-or-ignore, so running this repeatedly is harmless.
pub async fn repair_friend_graph(pool: &SqlitePool) -> ConnectionResult<FriendGraphRepairReport> {
    let accepted = friend_request_repo::list_accepted(pool).await?;
    let mut report = FriendGraphRepairReport {
        accepted: accepted.len(),
        ..Default::default()
    };

    for request in accepted {
        let mut tx = pool.begin().await?;
        let forward =
            user_repo::add_to_friend_set(&mut *tx, &request.sender_id, &request.recipient_id)
                .await?;
        let backward =
            user_repo::add_to_friend_set(&mut *tx, &request.recipient_id, &request.sender_id)
                .await?;
        tx.commit().await?;

        let added = forward + backward;

        if added > 0 {
            warn!(
                "restored {} missing friend edge(s) for accepted request {}",
                added, request.request_id
            );
        }
        report.edges_added += added;
    }

    info!(
        "friend graph repair done: accepted={}, edges_added={}",
        report.accepted, report.edges_added
    );
    Ok(report)
}
