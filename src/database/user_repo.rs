use sqlx::SqliteExecutor;

use crate::models::{NewUser, RecommendedUserRow, UserProfile, UsersRow};

pub const SQL_FIND_USER_BY_ID: &str = r#"
SELECT
    user_id,
    full_name,
    email,
    bio,
    profile_pic,
    native_language,
    learning_language,
    location,
    is_onboarded
FROM users
WHERE user_id = ?1
LIMIT 1
"#;

const SQL_IS_FRIEND_OF: &str = r#"
SELECT 1
FROM user_friends
WHERE user_id = ?1
  AND friend_id = ?2
LIMIT 1
"#;

const SQL_ADD_TO_FRIEND_SET: &str = r#"
INSERT OR IGNORE INTO user_friends (user_id, friend_id)
VALUES (?1, ?2)
"#;

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  user_id,
  full_name,
  email,
  bio,
  profile_pic,
  native_language,
  learning_language,
  location,
  is_onboarded
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SQL_LIST_FRIEND_PROFILES: &str = r#"
SELECT
    u.user_id,
    u.full_name,
    u.profile_pic,
    u.native_language,
    u.learning_language
FROM user_friends uf
JOIN users u ON u.user_id = uf.friend_id
WHERE uf.user_id = ?1
ORDER BY uf.created_at, uf.rowid
"#;

pub const SQL_LIST_RECOMMENDATION_CANDIDATES: &str = r#"
SELECT
    u.user_id,
    u.full_name,
    u.bio,
    u.profile_pic,
    u.native_language,
    u.learning_language,
    u.location
FROM users u
WHERE u.user_id != ?1
  AND u.is_onboarded = 1
  AND u.user_id NOT IN (
    SELECT uf.friend_id FROM user_friends uf WHERE uf.user_id = ?1
  )
ORDER BY u.rowid
"#;

pub async fn find_user_by_id<'e, E>(executor: E, user_id: &str) -> sqlx::Result<Option<UsersRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, UsersRow>(SQL_FIND_USER_BY_ID)
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// True when `friend_id` is in `user_id`'s friend set.
pub async fn is_friend_of<'e, E>(executor: E, user_id: &str, friend_id: &str) -> sqlx::Result<bool>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_scalar::<_, i64>(SQL_IS_FRIEND_OF)
        .bind(user_id)
        .bind(friend_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

/// Adds `friend_id` to `user_id`'s friend set. Returns 0 when the edge already existed.
pub async fn add_to_friend_set<'e, E>(
    executor: E,
    user_id: &str,
    friend_id: &str,
) -> sqlx::Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let res = sqlx::query(SQL_ADD_TO_FRIEND_SET)
        .bind(user_id)
        .bind(friend_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

pub async fn insert_user<'e, E>(executor: E, user: NewUser<'_>) -> sqlx::Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(SQL_INSERT_USER)
        .bind(user.user_id)
        .bind(user.full_name)
        .bind(user.email)
        .bind(user.bio)
        .bind(user.profile_pic)
        .bind(user.native_language)
        .bind(user.learning_language)
        .bind(user.location)
        .bind(user.is_onboarded)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_friend_profiles<'e, E>(
    executor: E,
    user_id: &str,
) -> sqlx::Result<Vec<UserProfile>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, UserProfile>(SQL_LIST_FRIEND_PROFILES)
        .bind(user_id)
        .fetch_all(executor)
        .await
}

pub async fn list_recommendation_candidates<'e, E>(
    executor: E,
    actor_id: &str,
) -> sqlx::Result<Vec<RecommendedUserRow>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, RecommendedUserRow>(SQL_LIST_RECOMMENDATION_CANDIDATES)
        .bind(actor_id)
        .fetch_all(executor)
        .await
}
