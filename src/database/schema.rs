use sqlx::SqlitePool;
use tracing::debug;

const SQL_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  user_id TEXT PRIMARY KEY,
  full_name TEXT NOT NULL,
  email TEXT,
  bio TEXT,
  profile_pic TEXT,
  native_language TEXT,
  learning_language TEXT,
  location TEXT,
  is_onboarded INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

// One row per direction; acceptance always writes both.
const SQL_CREATE_USER_FRIENDS: &str = r#"
CREATE TABLE IF NOT EXISTS user_friends (
  user_id TEXT NOT NULL REFERENCES users(user_id),
  friend_id TEXT NOT NULL REFERENCES users(user_id),
  created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
  PRIMARY KEY (user_id, friend_id),
  CHECK (user_id != friend_id)
)
"#;

// (user_low, user_high) is the pair sorted, whoever sent the request.
const SQL_CREATE_FRIEND_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS friend_requests (
  request_id TEXT PRIMARY KEY,
  sender_id TEXT NOT NULL REFERENCES users(user_id),
  recipient_id TEXT NOT NULL REFERENCES users(user_id),
  user_low TEXT NOT NULL,
  user_high TEXT NOT NULL,
  status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'accepted')),
  created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
  updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
  UNIQUE (user_low, user_high),
  CHECK (sender_id != recipient_id),
  CHECK (user_low < user_high)
)
"#;

const SQL_INDEX_REQUESTS_RECIPIENT: &str = r#"
CREATE INDEX IF NOT EXISTS idx_friend_requests_recipient_status
  ON friend_requests (recipient_id, status)
"#;

const SQL_INDEX_REQUESTS_SENDER: &str = r#"
CREATE INDEX IF NOT EXISTS idx_friend_requests_sender_status
  ON friend_requests (sender_id, status)
"#;

const SCHEMA: [&str; 5] = [
    SQL_CREATE_USERS,
    SQL_CREATE_USER_FRIENDS,
    SQL_CREATE_FRIEND_REQUESTS,
    SQL_INDEX_REQUESTS_RECIPIENT,
    SQL_INDEX_REQUESTS_SENDER,
];

/// Creates the tables used by the connection subsystem. Safe to run on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("schema ready ({} statements)", SCHEMA.len());
    Ok(())
}
