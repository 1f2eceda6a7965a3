#![allow(dead_code)]

use sqlx::SqlitePool;

use lingo_connect::database::{pool, schema, user_repo};
use lingo_connect::models::NewUser;

pub async fn test_pool() -> SqlitePool {
    let pool = pool::connect_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    schema::ensure_schema(&pool).await.expect("schema");
    pool
}

pub async fn seed_user(pool: &SqlitePool, user_id: &str, full_name: &str, is_onboarded: bool) {
    seed_language_user(pool, user_id, full_name, "english", "spanish", is_onboarded).await;
}

pub async fn seed_language_user(
    pool: &SqlitePool,
    user_id: &str,
    full_name: &str,
    native_language: &str,
    learning_language: &str,
    is_onboarded: bool,
) {
    user_repo::insert_user(
        pool,
        NewUser {
            user_id,
            full_name,
            native_language: Some(native_language),
            learning_language: Some(learning_language),
            is_onboarded,
            ..Default::default()
        },
    )
    .await
    .expect("seed user");
}

/// Makes two users friends directly through the directory, without a request.
pub async fn make_friends(pool: &SqlitePool, a: &str, b: &str) {
    user_repo::add_to_friend_set(pool, a, b).await.expect("edge a->b");
    user_repo::add_to_friend_set(pool, b, a).await.expect("edge b->a");
}

pub async fn friend_ids(pool: &SqlitePool, user_id: &str) -> Vec<String> {
    user_repo::list_friend_profiles(pool, user_id)
        .await
        .expect("friend profiles")
        .into_iter()
        .map(|p| p.user_id)
        .collect()
}

pub async fn count_requests(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM friend_requests")
        .fetch_one(pool)
        .await
        .expect("count")
}
